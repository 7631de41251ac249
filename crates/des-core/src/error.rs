//! Engine error type.
//!
//! Every variant here is a *bug* signal: a scheduling or bookkeeping mistake
//! that makes the rest of the run meaningless.  Expected outcomes of a model
//! (a customer reneging, a request that cannot be served) are plain values in
//! the model's own types and never travel through `DesError`.
//!
//! Cancelling a resource request that has already been granted is likewise
//! not an error; `cancel` simply reports that nothing was removed.

use thiserror::Error;

use crate::{EventId, ProcessId, ResourceId, SimTime};

/// The top-level error type shared by all `des-*` crates.
#[derive(Debug, Error)]
pub enum DesError {
    #[error("{0} was already triggered")]
    DoubleTrigger(EventId),

    #[error("{0} suspended without waiting on any event")]
    DeadlockedProcess(ProcessId),

    #[error("{resource} over capacity: {active} active, capacity {capacity}")]
    OverCapacity {
        resource: ResourceId,
        active:   usize,
        capacity: usize,
    },

    #[error("{0} not found")]
    UnknownEvent(EventId),

    #[error("{0} not found")]
    UnknownProcess(ProcessId),

    #[error("{0} not found")]
    UnknownResource(ResourceId),

    #[error("invalid delay {0}: must be finite and non-negative")]
    InvalidDelay(f64),

    #[error("clock cannot move backwards from {now} to {target}")]
    TimeReversal { now: SimTime, target: SimTime },

    #[error("no {0} left to allocate")]
    IdsExhausted(&'static str),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `des-*` crates.
pub type DesResult<T> = Result<T, DesError>;
