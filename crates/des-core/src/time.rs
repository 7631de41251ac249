//! Virtual time model.
//!
//! # Design
//!
//! Time is a continuous `SimTime` value (minutes, seconds, whatever unit the
//! model picks) that only the run loop advances.  Nothing here reads the wall
//! clock: two runs with the same inputs see exactly the same instants.
//!
//! `SimTime` wraps an `f64` but is totally ordered through
//! [`f64::total_cmp`], so it can key a `BTreeMap` directly.  Constructors
//! reject NaN and infinities, which keeps that order meaningful.

use std::cmp::Ordering;
use std::fmt;

use crate::{DesError, DesResult};

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute instant on the simulation's virtual time axis.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Return the instant `delay` units after `self`.
    ///
    /// Fails with [`DesError::InvalidDelay`] for negative or non-finite delays.
    #[inline]
    pub fn offset(self, delay: f64) -> DesResult<SimTime> {
        if !delay.is_finite() || delay < 0.0 {
            return Err(DesError::InvalidDelay(delay));
        }
        Ok(SimTime(self.0 + delay))
    }

    /// Time elapsed from `earlier` to `self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.3}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The engine's notion of "now".
///
/// Only moves forward.  The run loop calls [`SimClock::advance_to`] with the
/// time of each entry it pops; equal times are allowed (many events share an
/// instant), earlier ones are a scheduling bug.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    now: SimTime,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Move the clock to `target`.
    pub fn advance_to(&mut self, target: SimTime) -> DesResult<()> {
        if target < self.now {
            return Err(DesError::TimeReversal { now: self.now, target });
        }
        self.now = target;
        Ok(())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Engine-level configuration.
///
/// Model crates layer their own parameters on top and hand this to
/// `des_sim::Sim::new`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Stop the run once the next pending entry lies beyond this instant.
    /// `None` runs until the event queue drains.
    pub horizon: Option<SimTime>,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl SimConfig {
    pub fn new(horizon: Option<SimTime>, seed: u64) -> Self {
        Self { horizon, seed }
    }

    /// Reject horizons that cannot be reached from time zero.
    pub fn validate(&self) -> DesResult<()> {
        if let Some(h) = self.horizon {
            if !h.0.is_finite() || h < SimTime::ZERO {
                return Err(DesError::Config(format!("horizon {} is not reachable", h.0)));
            }
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { horizon: None, seed: 0 }
    }
}
