//! Scenario parameters.

use des_core::{SimConfig, SimTime};

use crate::{TheaterError, TheaterResult};

/// Everything that shapes one ticket-counter run.
///
/// `Default` reproduces the reference scenario: three movies with 50 tickets
/// each, a single counter, customers every 0.5 minutes on average buying 1–6
/// tickets, and a 120-minute horizon.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TheaterConfig {
    /// Movie titles; a movie's `CategoryId` is its index here.
    pub movies: Vec<String>,

    /// Starting stock per movie.
    pub tickets_per_movie: u32,

    /// Number of customers served at the counter at once.
    pub counter_capacity: usize,

    /// A sale that leaves fewer than this many tickets sells the movie out;
    /// the remainder is discarded.
    pub sold_out_below: u32,

    /// Mean of the exponential inter-arrival delay, in minutes.
    pub mean_interarrival: f64,

    /// Inclusive range of tickets a customer asks for.
    pub min_tickets: u32,
    pub max_tickets: u32,

    /// Minutes a customer spends at the counter when too few tickets are left.
    pub argue_time: f64,

    /// Minutes a successful purchase keeps the counter busy.
    pub purchase_time: f64,

    /// Minutes after opening at which the run stops.
    pub horizon: f64,

    /// Master RNG seed.
    pub seed: u64,
}

impl Default for TheaterConfig {
    fn default() -> Self {
        Self {
            movies: vec![
                "Python Unchained".to_string(),
                "Kill Process".to_string(),
                "Pulp Implementation".to_string(),
            ],
            tickets_per_movie: 50,
            counter_capacity:  1,
            sold_out_below:    2,
            mean_interarrival: 0.5,
            min_tickets:       1,
            max_tickets:       6,
            argue_time:        0.5,
            purchase_time:     1.0,
            horizon:           120.0,
            seed:              42,
        }
    }
}

impl TheaterConfig {
    pub fn validate(&self) -> TheaterResult<()> {
        let fail = |msg: String| Err(TheaterError::Config(msg));
        if self.movies.is_empty() {
            return fail("at least one movie is required".into());
        }
        if self.counter_capacity == 0 {
            return fail("counter capacity must be at least 1".into());
        }
        if self.min_tickets == 0 || self.min_tickets > self.max_tickets {
            return fail(format!(
                "ticket range {}..={} is empty or includes zero",
                self.min_tickets, self.max_tickets
            ));
        }
        if !self.mean_interarrival.is_finite() || self.mean_interarrival <= 0.0 {
            return fail(format!(
                "mean_interarrival must be finite and positive, got {}",
                self.mean_interarrival
            ));
        }
        for (name, v) in [
            ("argue_time", self.argue_time),
            ("purchase_time", self.purchase_time),
            ("horizon", self.horizon),
        ] {
            if !v.is_finite() || v < 0.0 {
                return fail(format!("{name} must be finite and non-negative, got {v}"));
            }
        }
        Ok(())
    }

    /// Engine configuration for this scenario.
    pub fn sim_config(&self) -> SimConfig {
        SimConfig::new(Some(SimTime(self.horizon)), self.seed)
    }
}
