//! Shared theater state: the counter, and per-movie stock and signals.
//!
//! Processes mutate this only while they run, so every read-modify-write
//! below completes before the next suspension point.

use des_core::{CategoryId, EventId, ResourceId, SimTime};

/// Terminal states of a customer.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum OutcomeKind {
    /// The movie sold out while the customer was still queued.
    Reneged,
    /// Reached the counter but fewer tickets were left than requested.
    InsufficientStock,
    /// Bought the requested tickets.
    Fulfilled,
}

/// What happened to one customer.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Outcome {
    /// Arrival order, starting at 0.
    pub customer: u32,
    pub movie:    CategoryId,
    pub tickets:  u32,
    pub kind:     OutcomeKind,
    /// When the outcome was decided.
    pub at:       SimTime,
}

/// Result of trying to sell tickets.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Sale {
    Insufficient,
    Sold {
        /// This sale pushed the stock below the low-water mark.
        sold_out:  bool,
        /// Tickets dropped by the clamp to zero.
        discarded: u32,
    },
}

#[derive(Clone, Debug)]
pub struct Movie {
    pub name:         String,
    pub initial:      u32,
    pub available:    u32,
    /// Triggered exactly once, when the movie sells out.
    pub sold_out:     EventId,
    pub sold_out_at:  Option<SimTime>,
    pub tickets_sold: u32,
    /// Stock discarded by the sold-out clamp.
    pub discarded:    u32,
    pub fulfilled:    u32,
    pub insufficient: u32,
    pub reneged:      u32,
}

impl Movie {
    pub fn is_sold_out(&self) -> bool {
        self.sold_out_at.is_some()
    }
}

/// The model state handed to `des_sim::Sim`.
#[derive(Clone, Debug)]
pub struct Theater {
    pub counter:         ResourceId,
    pub movies:          Vec<Movie>,
    pub sold_out_below:  u32,
    /// Every customer outcome, in the order they were decided.
    pub outcomes:        Vec<Outcome>,
    /// Customers currently admitted to the counter.
    pub at_counter:      usize,
    pub peak_at_counter: usize,
    next_customer:       u32,
}

impl Theater {
    /// `movies` pairs each title with its pre-allocated sold-out event.
    pub fn new(
        counter:        ResourceId,
        movies:         Vec<(String, EventId)>,
        tickets:        u32,
        sold_out_below: u32,
    ) -> Self {
        let movies = movies
            .into_iter()
            .map(|(name, sold_out)| Movie {
                name,
                initial: tickets,
                available: tickets,
                sold_out,
                sold_out_at: None,
                tickets_sold: 0,
                discarded: 0,
                fulfilled: 0,
                insufficient: 0,
                reneged: 0,
            })
            .collect();
        Self {
            counter,
            movies,
            sold_out_below,
            outcomes: Vec::new(),
            at_counter: 0,
            peak_at_counter: 0,
            next_customer: 0,
        }
    }

    pub fn movie(&self, id: CategoryId) -> Option<&Movie> {
        self.movies.get(id.index())
    }

    pub fn movie_mut(&mut self, id: CategoryId) -> Option<&mut Movie> {
        self.movies.get_mut(id.index())
    }

    /// Hand out the next customer number.
    pub fn next_customer(&mut self) -> u32 {
        let n = self.next_customer;
        self.next_customer += 1;
        n
    }

    /// Try to sell `tickets` for `movie`.
    ///
    /// On success the stock drops by `tickets`; if that leaves fewer than
    /// `sold_out_below` the movie is marked sold out at `now` and the stock is
    /// clamped to zero.  The caller still has to trigger the sold-out event
    /// when `sold_out` is reported.
    pub fn sell(&mut self, movie: CategoryId, tickets: u32, now: SimTime) -> Option<Sale> {
        let below = self.sold_out_below;
        let m = self.movie_mut(movie)?;
        if m.available < tickets {
            return Some(Sale::Insufficient);
        }
        m.available -= tickets;
        m.tickets_sold += tickets;
        if m.available < below && !m.is_sold_out() {
            let discarded = m.available;
            m.discarded += discarded;
            m.available = 0;
            m.sold_out_at = Some(now);
            return Some(Sale::Sold { sold_out: true, discarded });
        }
        Some(Sale::Sold { sold_out: false, discarded: 0 })
    }

    pub fn admit(&mut self) {
        self.at_counter += 1;
        self.peak_at_counter = self.peak_at_counter.max(self.at_counter);
    }

    pub fn leave(&mut self) {
        self.at_counter = self.at_counter.saturating_sub(1);
    }

    /// Record a customer's terminal state and bump the movie's tally.
    pub fn record(&mut self, outcome: Outcome) {
        if let Some(m) = self.movie_mut(outcome.movie) {
            match outcome.kind {
                OutcomeKind::Reneged => m.reneged += 1,
                OutcomeKind::InsufficientStock => m.insufficient += 1,
                OutcomeKind::Fulfilled => m.fulfilled += 1,
            }
        }
        self.outcomes.push(outcome);
    }
}
