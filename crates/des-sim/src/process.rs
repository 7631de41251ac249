//! The `Process` trait: suspendable units of model logic.
//!
//! A process is an explicit state machine.  The engine calls
//! [`Process::resume`] once when the process starts and again every time one
//! of the events it is waiting on fires.  Each call runs until the process
//! either declares what it waits on next ([`Step::Wait`]) or finishes
//! ([`Step::Done`]).  Nothing runs concurrently: while `resume` executes it
//! has exclusive access to the simulation through [`Ctx`].

use des_core::{DesResult, EventId};

use crate::{Ctx, EventValue};

/// Why a process is being resumed.
#[derive(Clone, Debug, PartialEq)]
pub struct Wake {
    /// The event that fired, or `None` on the first run.
    pub cause: Option<EventId>,
    /// The firing event's value (`Empty` on the first run).
    pub value: EventValue,
}

impl Wake {
    pub(crate) fn start() -> Self {
        Self { cause: None, value: EventValue::Empty }
    }

    #[inline]
    pub fn is_start(&self) -> bool {
        self.cause.is_none()
    }
}

/// What a process does after a `resume` call returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Suspend until any of these events fires.  Must not be empty.
    Wait(Vec<EventId>),
    /// The process has finished.  Held resource slots are returned.
    Done,
}

impl Step {
    /// Suspend on a single event.
    #[inline]
    pub fn wait(event: EventId) -> Step {
        Step::Wait(vec![event])
    }

    /// Suspend until the first of `events` fires.
    #[inline]
    pub fn any(events: &[EventId]) -> Step {
        Step::Wait(events.to_vec())
    }
}

/// Coarse lifecycle of a process.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ProcessState {
    /// Scheduled to run or currently running.
    Runnable,
    /// Waiting on one or more events.
    Suspended,
    Done,
}

/// Pluggable process logic.
///
/// # Example
///
/// ```rust,ignore
/// struct Blink { left: u32 }
///
/// impl Process<()> for Blink {
///     fn resume(&mut self, ctx: &mut Ctx<'_, ()>, _wake: Wake) -> DesResult<Step> {
///         if self.left == 0 {
///             return Ok(Step::Done);
///         }
///         self.left -= 1;
///         Ok(Step::wait(ctx.timeout(1.0)?))
///     }
/// }
/// ```
pub trait Process<S> {
    fn resume(&mut self, ctx: &mut Ctx<'_, S>, wake: Wake) -> DesResult<Step>;
}

impl<S, P: Process<S> + ?Sized> Process<S> for Box<P> {
    fn resume(&mut self, ctx: &mut Ctx<'_, S>, wake: Wake) -> DesResult<Step> {
        (**self).resume(ctx, wake)
    }
}

/// A [`Process`] backed by a closure.  Build with [`from_fn`].
pub struct FnProcess<F>(F);

/// Wrap a closure as a process.
///
/// Captured variables persist across resumes, so a `move` closure holding a
/// small `stage` counter is enough for short scripted processes.
pub fn from_fn<S, F>(f: F) -> FnProcess<F>
where
    F: FnMut(&mut Ctx<'_, S>, Wake) -> DesResult<Step>,
{
    FnProcess(f)
}

impl<S, F> Process<S> for FnProcess<F>
where
    F: FnMut(&mut Ctx<'_, S>, Wake) -> DesResult<Step>,
{
    fn resume(&mut self, ctx: &mut Ctx<'_, S>, wake: Wake) -> DesResult<Step> {
        (self.0)(ctx, wake)
    }
}
