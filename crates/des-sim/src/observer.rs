//! Simulation observer trait for progress reporting and data collection.

use des_core::{EventId, ProcessId, SimTime};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// event loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: event counter
///
/// ```rust,ignore
/// struct Count(usize);
///
/// impl SimObserver for Count {
///     fn on_event_processed(&mut self, _now: SimTime, _event: EventId) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called after an event's callbacks have all run.
    fn on_event_processed(&mut self, _now: SimTime, _event: EventId) {}

    /// Called just before a process's logic is re-entered.
    fn on_process_resumed(&mut self, _now: SimTime, _process: ProcessId) {}

    /// Called once a process has completed and its held slots were returned.
    fn on_process_done(&mut self, _now: SimTime, _process: ProcessId) {}

    /// Called once when `run`/`run_until` returns successfully.
    fn on_run_end(&mut self, _now: SimTime) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
