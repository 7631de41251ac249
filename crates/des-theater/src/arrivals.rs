//! The arrival process: spawns one `Moviegoer` per customer.

use des_core::DesResult;
use des_sim::{Ctx, Process, Step, Wake};

use crate::{Arrival, ArrivalSource, Moviegoer, Theater};

/// Waits out each arrival's delay, then lets the customer in if their movie
/// still has tickets.  Ends when the source runs dry.
pub struct Arrivals {
    source:        Box<dyn ArrivalSource>,
    argue_time:    f64,
    purchase_time: f64,
    next:          Option<Arrival>,
}

impl Arrivals {
    pub fn new(source: Box<dyn ArrivalSource>, argue_time: f64, purchase_time: f64) -> Self {
        Self { source, argue_time, purchase_time, next: None }
    }

    fn schedule_next(&mut self, ctx: &mut Ctx<'_, Theater>) -> DesResult<Step> {
        let movie_count = ctx.state().movies.len();
        match self.source.next_arrival(movie_count) {
            Some(arrival) => {
                self.next = Some(arrival);
                Ok(Step::wait(ctx.timeout(arrival.delay)?))
            }
            None => Ok(Step::Done),
        }
    }
}

impl Process<Theater> for Arrivals {
    fn resume(&mut self, ctx: &mut Ctx<'_, Theater>, _wake: Wake) -> DesResult<Step> {
        if let Some(arrival) = self.next.take() {
            let open = ctx.state().movie(arrival.movie).is_some_and(|m| m.available > 0);
            if open {
                let customer = ctx.state_mut().next_customer();
                log::debug!(
                    "customer {customer} arrives at {} for {} x{}",
                    ctx.now(),
                    arrival.movie,
                    arrival.tickets
                );
                ctx.spawn(Moviegoer::new(
                    customer,
                    arrival.movie,
                    arrival.tickets,
                    self.argue_time,
                    self.purchase_time,
                ))?;
            }
        }
        self.schedule_next(ctx)
    }
}
