//! `des-sim` — virtual-time event loop, processes, resources, and races.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`event`]    | `EventState`, `EventValue`, the event arena                   |
//! | [`queue`]    | `EventQueue` (`BTreeMap<SimTime, VecDeque<Entry>>`)           |
//! | [`process`]  | `Process` trait, `Step`, `Wake`, `from_fn`                    |
//! | [`context`]  | `Ctx`, the running process's handle on the simulation         |
//! | [`resource`] | `Resource`, `Grant`: capacity-limited FIFO pool               |
//! | [`observer`] | `SimObserver` trait, `NoopObserver`                           |
//! | [`sim`]      | `Sim`, owns everything and runs the loop                      |
//!
//! # Execution model
//!
//! ```text
//! loop:
//!   ① pop the earliest entry (FIFO among equal times); stop past the horizon
//!   ② advance the clock to its time
//!   ③ Event entry  → mark processed, run callbacks in registration order:
//!                      Resume(process)  → re-enter the process
//!                      Condition(race)  → trigger the race if still pending
//!      Resume entry → re-enter the process (first run, or waits on
//!                      events that had already been processed)
//! ```
//!
//! Exactly one process runs at a time and it runs until it returns a
//! [`Step`].  Shared model state in `Sim::state` is therefore only ever
//! touched by one process between two of its suspension points.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use des_core::{SimConfig, SimTime};
//! use des_sim::{NoopObserver, Sim, Step, from_fn};
//!
//! let mut sim = Sim::new(SimConfig::new(Some(SimTime(10.0)), 42), 0u32)?;
//! sim.spawn(from_fn(|ctx: &mut des_sim::Ctx<'_, u32>, _wake| {
//!     *ctx.state_mut() += 1;
//!     Ok(Step::wait(ctx.timeout(1.0)?))
//! }))?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod context;
pub mod event;
pub mod observer;
pub mod process;
pub mod queue;
pub mod resource;
pub mod sim;


pub use context::Ctx;
pub use event::{EventState, EventValue};
pub use observer::{NoopObserver, SimObserver};
pub use process::{FnProcess, Process, ProcessState, Step, Wake, from_fn};
pub use queue::{Entry, EventQueue};
pub use resource::{Grant, PendingRequest, Release, Resource};
pub use sim::Sim;

pub use des_core::{DesError, DesResult};
