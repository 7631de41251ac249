//! `des-theater` — a ticket counter where customers give up when their movie
//! sells out.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`config`]    | `TheaterConfig` (defaults reproduce the reference run)     |
//! | [`source`]    | `ArrivalSource` trait, `RandomArrivals`, `ScriptedArrivals`|
//! | [`theater`]   | `Theater` shared state, `Movie`, `Outcome`, `Sale`         |
//! | [`moviegoer`] | `Moviegoer` process (queue / renege / buy state machine)   |
//! | [`arrivals`]  | `Arrivals` process that spawns moviegoers                  |
//! | [`report`]    | `TheaterReport`, `MovieReport`, text rendering             |
//! | [`builder`]   | `TheaterBuilder`, `run_scenario`                           |
//! | [`error`]     | `TheaterError`, `TheaterResult<T>`                         |
//!
//! # Model (summary)
//!
//! One counter of capacity `counter_capacity` serves customers in arrival
//! order.  Each customer races their counter grant against their movie's
//! sold-out event.  A sale that leaves fewer than `sold_out_below` tickets
//! triggers that event once, records the time and clamps the stock to zero;
//! everyone still queued for that movie reneges.

pub mod arrivals;
pub mod builder;
pub mod config;
pub mod error;
pub mod moviegoer;
pub mod report;
pub mod source;
pub mod theater;

#[cfg(test)]
mod tests;

pub use arrivals::Arrivals;
pub use builder::{TheaterBuilder, run_scenario};
pub use config::TheaterConfig;
pub use error::{TheaterError, TheaterResult};
pub use moviegoer::Moviegoer;
pub use report::{MovieReport, TheaterReport};
pub use source::{Arrival, ArrivalSource, RandomArrivals, ScriptedArrivals};
pub use theater::{Movie, Outcome, OutcomeKind, Sale, Theater};
