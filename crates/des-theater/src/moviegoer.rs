//! The customer process.
//!
//! ```text
//!   Start ──request counter, race(grant, sold_out)──▶ Queued
//!   Queued ──sold_out first──▶ RENEGED          (queued request cancelled)
//!   Queued ──grant first────▶ admitted:
//!       too few tickets ──▶ INSUFFICIENT_STOCK  (argue, then leave)
//!       otherwise       ──▶ FULFILLED           (buy, maybe sell out, then leave)
//!   Leaving ──▶ Done                              (counter slot returned)
//! ```

use des_core::{CategoryId, DesResult, EventId};
use des_sim::{Ctx, EventValue, Grant, Process, Step, Wake};

use crate::{Outcome, OutcomeKind, Sale, Theater};

#[derive(Copy, Clone, Debug)]
enum Stage {
    Start,
    Queued { grant: Grant, race: EventId },
    Leaving,
}

/// One customer trying to buy `tickets` for `movie`.
#[derive(Debug)]
pub struct Moviegoer {
    customer:      u32,
    movie:         CategoryId,
    tickets:       u32,
    argue_time:    f64,
    purchase_time: f64,
    stage:         Stage,
}

impl Moviegoer {
    pub fn new(
        customer:      u32,
        movie:         CategoryId,
        tickets:       u32,
        argue_time:    f64,
        purchase_time: f64,
    ) -> Self {
        Self { customer, movie, tickets, argue_time, purchase_time, stage: Stage::Start }
    }

    fn outcome(&self, kind: OutcomeKind, ctx: &Ctx<'_, Theater>) -> Outcome {
        Outcome {
            customer: self.customer,
            movie:    self.movie,
            tickets:  self.tickets,
            kind,
            at:       ctx.now(),
        }
    }

    fn join_queue(&mut self, ctx: &mut Ctx<'_, Theater>) -> DesResult<Step> {
        let counter = ctx.state().counter;
        let Some(sold_out) = ctx.state().movie(self.movie).map(|m| m.sold_out) else {
            return Ok(Step::Done);
        };
        let grant = ctx.request(counter)?;
        let race = ctx.race(&[grant.event, sold_out])?;
        self.stage = Stage::Queued { grant, race };
        Ok(Step::wait(race))
    }

    fn at_front(&mut self, ctx: &mut Ctx<'_, Theater>, grant: Grant, fired: &EventValue) -> DesResult<Step> {
        if !fired.fired(grant.event) {
            ctx.cancel(grant)?;
            let outcome = self.outcome(OutcomeKind::Reneged, ctx);
            log::debug!("customer {} reneged at {}", self.customer, ctx.now());
            ctx.state_mut().record(outcome);
            return Ok(Step::Done);
        }

        ctx.state_mut().admit();
        self.stage = Stage::Leaving;
        let now = ctx.now();
        match ctx.state_mut().sell(self.movie, self.tickets, now) {
            None => {
                ctx.state_mut().leave();
                Ok(Step::Done)
            }
            Some(Sale::Insufficient) => {
                let outcome = self.outcome(OutcomeKind::InsufficientStock, ctx);
                ctx.state_mut().record(outcome);
                Ok(Step::wait(ctx.timeout(self.argue_time)?))
            }
            Some(Sale::Sold { sold_out, discarded }) => {
                let signal = ctx.state().movie(self.movie).map(|m| (m.name.clone(), m.sold_out));
                if let (true, Some((name, event))) = (sold_out, signal) {
                    log::info!("'{name}' sold out at {now}, {discarded} tickets discarded");
                    ctx.succeed(event, EventValue::Number(now.0))?;
                }
                let outcome = self.outcome(OutcomeKind::Fulfilled, ctx);
                ctx.state_mut().record(outcome);
                Ok(Step::wait(ctx.timeout(self.purchase_time)?))
            }
        }
    }
}

impl Process<Theater> for Moviegoer {
    fn resume(&mut self, ctx: &mut Ctx<'_, Theater>, wake: Wake) -> DesResult<Step> {
        match self.stage {
            Stage::Start => self.join_queue(ctx),
            Stage::Queued { grant, race } if wake.cause == Some(race) => {
                self.at_front(ctx, grant, &wake.value)
            }
            Stage::Queued { race, .. } => Ok(Step::wait(race)),
            Stage::Leaving => {
                ctx.state_mut().leave();
                Ok(Step::Done)
            }
        }
    }
}
