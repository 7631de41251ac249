//! `Ctx`, the running process's handle on the simulation.

use des_core::{DesResult, EventId, ProcessId, ResourceId, SimTime};

use crate::{EventValue, Grant, Process, Sim};

/// Mutable view of the simulation handed to [`Process::resume`].
///
/// A `Ctx` exists only while one process runs, so everything done through
/// it happens between two suspension points of that process and can never
/// interleave with another process.
pub struct Ctx<'a, S> {
    pub(crate) sim:     &'a mut Sim<S>,
    pub(crate) process: ProcessId,
}

impl<'a, S> Ctx<'a, S> {
    /// Current virtual time.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.sim.now()
    }

    /// Id of the process this context belongs to.
    #[inline]
    pub fn process(&self) -> ProcessId {
        self.process
    }

    /// Shared model state.
    #[inline]
    pub fn state(&self) -> &S {
        &self.sim.state
    }

    #[inline]
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.sim.state
    }

    /// New pending event, to be triggered with [`Ctx::succeed`].
    pub fn event(&mut self) -> DesResult<EventId> {
        self.sim.event()
    }

    /// Event that fires `delay` time units from now.
    pub fn timeout(&mut self, delay: f64) -> DesResult<EventId> {
        self.sim.timeout(delay, EventValue::Empty)
    }

    pub fn timeout_with(&mut self, delay: f64, value: EventValue) -> DesResult<EventId> {
        self.sim.timeout(delay, value)
    }

    pub fn succeed(&mut self, event: EventId, value: EventValue) -> DesResult<()> {
        self.sim.succeed(event, value)
    }

    /// Composite event that fires with the first of `events`.
    pub fn race(&mut self, events: &[EventId]) -> DesResult<EventId> {
        self.sim.race(events)
    }

    /// Request a slot of `resource` on behalf of this process.
    ///
    /// The grant is held by the process until released, cancelled, or the
    /// process completes, whichever comes first.
    pub fn request(&mut self, resource: ResourceId) -> DesResult<Grant> {
        let grant = self.sim.request_for(resource, Some(self.process))?;
        self.sim.hold(self.process, grant);
        Ok(grant)
    }

    pub fn release(&mut self, grant: Grant) -> DesResult<()> {
        self.sim.unhold(self.process, grant);
        self.sim.release(grant)
    }

    /// Withdraw a still-queued request.  A no-op returning `false` if the
    /// grant has already been assigned; the slot then stays held until
    /// released or the process completes.
    pub fn cancel(&mut self, grant: Grant) -> DesResult<bool> {
        let removed = self.sim.cancel(grant)?;
        if removed {
            self.sim.unhold(self.process, grant);
        }
        Ok(removed)
    }

    /// Start another process at the current instant.
    pub fn spawn<P: Process<S> + 'static>(&mut self, process: P) -> DesResult<ProcessId> {
        self.sim.spawn(process)
    }

    pub fn has_triggered(&self, event: EventId) -> bool {
        self.sim.has_triggered(event)
    }

    pub fn event_value(&self, event: EventId) -> Option<&EventValue> {
        self.sim.event_value(event)
    }
}
