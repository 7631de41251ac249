//! movie_renege — the ticket-counter reneging scenario.
//!
//! Three movies, one counter, customers arriving every half minute on
//! average.  When a movie sells out, everyone still queued for it leaves.
//! Output is fully determined by the fixed seed; set `RUST_LOG=debug` to
//! watch the event loop on stderr.

use anyhow::Result;

use des_core::{EventId, ProcessId, SimTime};
use des_sim::SimObserver;
use des_theater::{TheaterBuilder, TheaterConfig, run_scenario};

// ── Observer ──────────────────────────────────────────────────────────────────

/// Counts engine activity and logs it once the run ends.
#[derive(Default)]
struct RunStats {
    events:    u64,
    resumes:   u64,
    completed: u64,
}

impl SimObserver for RunStats {
    fn on_event_processed(&mut self, _now: SimTime, _event: EventId) {
        self.events += 1;
    }

    fn on_process_resumed(&mut self, _now: SimTime, _process: ProcessId) {
        self.resumes += 1;
    }

    fn on_process_done(&mut self, _now: SimTime, _process: ProcessId) {
        self.completed += 1;
    }

    fn on_run_end(&mut self, now: SimTime) {
        log::info!(
            "run ended at {now}: {} events, {} resumes, {} processes completed",
            self.events,
            self.resumes,
            self.completed
        );
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = TheaterConfig::default();
    log::info!(
        "{} movies x {} tickets, counter capacity {}, horizon {} min, seed {}",
        config.movies.len(),
        config.tickets_per_movie,
        config.counter_capacity,
        config.horizon,
        config.seed
    );

    let mut stats = RunStats::default();
    let report = run_scenario(TheaterBuilder::new(config), &mut stats)?;
    print!("{}", report.render());
    Ok(())
}
