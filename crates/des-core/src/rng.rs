//! Deterministic simulation RNG wrapper.
//!
//! # Determinism strategy
//!
//! A run owns exactly one root `SimRng` seeded from `SimConfig::seed`.  Every
//! random draw happens inside a process while it runs, and processes run one
//! at a time in a fixed order, so the sequence of draws (and therefore the
//! whole run) is reproducible.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation-level RNG.
///
/// Used only from the single-threaded run loop.  Not `Clone`: two handles on
/// one stream would make draw order depend on who asked first.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Sample an exponentially distributed delay with the given mean.
    ///
    /// Inverse-CDF method: `-ln(u) * mean` with `u` in `(0, 1]`.
    pub fn exponential(&mut self, mean: f64) -> f64 {
        let u: f64 = 1.0 - self.0.r#gen::<f64>();
        -u.ln() * mean
    }
}
