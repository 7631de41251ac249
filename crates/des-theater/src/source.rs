//! Where customers come from.
//!
//! The arrival process only needs "how long until the next customer, which
//! movie, how many tickets".  [`RandomArrivals`] draws those from a seeded
//! RNG; [`ScriptedArrivals`] replays a fixed list, which is what tests use.

use std::collections::VecDeque;

use des_core::{CategoryId, SimRng};

/// One customer as produced by an [`ArrivalSource`].
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Arrival {
    /// Delay after the previous arrival.
    pub delay:   f64,
    pub movie:   CategoryId,
    pub tickets: u32,
}

/// Supplies the arrival stream.  `None` ends it.
pub trait ArrivalSource {
    fn next_arrival(&mut self, movie_count: usize) -> Option<Arrival>;
}

/// Endless Poisson arrivals with uniformly chosen movie and ticket count.
pub struct RandomArrivals {
    rng:               SimRng,
    mean_interarrival: f64,
    min_tickets:       u32,
    max_tickets:       u32,
}

impl RandomArrivals {
    pub fn new(seed: u64, mean_interarrival: f64, min_tickets: u32, max_tickets: u32) -> Self {
        Self { rng: SimRng::new(seed), mean_interarrival, min_tickets, max_tickets }
    }
}

impl ArrivalSource for RandomArrivals {
    fn next_arrival(&mut self, movie_count: usize) -> Option<Arrival> {
        if movie_count == 0 {
            return None;
        }
        // Draw order is fixed: delay, movie, tickets.
        let delay = self.rng.exponential(self.mean_interarrival);
        let movie = CategoryId(self.rng.gen_range(0..movie_count) as u32);
        let tickets = self.rng.gen_range(self.min_tickets..=self.max_tickets);
        Some(Arrival { delay, movie, tickets })
    }
}

/// A fixed, finite list of arrivals.
#[derive(Default, Clone, Debug)]
pub struct ScriptedArrivals(VecDeque<Arrival>);

impl ScriptedArrivals {
    pub fn new(arrivals: impl IntoIterator<Item = Arrival>) -> Self {
        Self(arrivals.into_iter().collect())
    }

    /// Convenience: `(delay, movie index, tickets)` triples.
    pub fn from_triples(triples: &[(f64, u32, u32)]) -> Self {
        Self::new(triples.iter().map(|&(delay, movie, tickets)| Arrival {
            delay,
            movie: CategoryId(movie),
            tickets,
        }))
    }
}

impl ArrivalSource for ScriptedArrivals {
    fn next_arrival(&mut self, _movie_count: usize) -> Option<Arrival> {
        self.0.pop_front()
    }
}
