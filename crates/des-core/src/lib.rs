//! `des-core` — foundational types for the `des` discrete-event simulation
//! workspace.
//!
//! This crate is a dependency of every other `des-*` crate.  It intentionally
//! has no `des-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `EventId`, `ProcessId`, `ResourceId`, `CategoryId`    |
//! | [`time`]        | `SimTime`, `SimClock`, `SimConfig`                    |
//! | [`rng`]         | `SimRng` (seeded, deterministic)                      |
//! | [`error`]       | `DesError`, `DesResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{DesError, DesResult};
pub use ids::{CategoryId, EventId, ProcessId, ResourceId};
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, SimTime};
