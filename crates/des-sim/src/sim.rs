//! The `Sim` struct and its event loop.

use des_core::{
    DesError, DesResult, EventId, ProcessId, ResourceId, SimClock, SimConfig, SimTime,
};

use crate::event::{Callback, EventArena};
use crate::queue::{Entry, EventQueue};
use crate::resource::Release;
use crate::{
    Ctx, EventState, EventValue, Grant, Process, ProcessState, Resource, SimObserver, Step, Wake,
};

// ── Process table entry ───────────────────────────────────────────────────────

struct ProcessSlot<S> {
    /// `None` while the logic is running (taken out to split the borrow) and
    /// after completion.
    logic: Option<Box<dyn Process<S>>>,
    state: ProcessState,
    /// Bumped on every resume; callbacks registered under an older token are
    /// stale and ignored.
    token: u64,
    /// Grants requested through `Ctx::request` and not yet given back.
    held:  Vec<Grant>,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation engine.
///
/// `Sim<S>` owns the clock, the event queue, every event, process and
/// resource, plus the model's shared state `S`.  The loop is:
///
/// 1. Pop the earliest queue entry (FIFO among equal times).
/// 2. Advance the clock to its time.
/// 3. Event entry: trigger it if it is a due timeout, mark it processed, and
///    run its callbacks in registration order (resume waiting processes,
///    resolve races).  Resume entry: re-enter that process directly.
///
/// Every resumed process runs synchronously until it suspends or completes.
pub struct Sim<S> {
    pub config:       SimConfig,
    /// Shared model state, reachable from processes via [`Ctx::state_mut`].
    pub state:        S,
    clock:            SimClock,
    queue:            EventQueue,
    events:           EventArena,
    processes:        Vec<ProcessSlot<S>>,
    resources:        Vec<Resource>,
}

impl<S> Sim<S> {
    pub fn new(config: SimConfig, state: S) -> DesResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state,
            clock:     SimClock::new(),
            queue:     EventQueue::new(),
            events:    EventArena::default(),
            processes: Vec::new(),
            resources: Vec::new(),
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Time of the next queued entry, if any.
    pub fn peek(&self) -> Option<SimTime> {
        self.queue.next_time()
    }

    /// Number of queued entries.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn event_state(&self, event: EventId) -> DesResult<EventState> {
        Ok(self.events.get(event)?.state)
    }

    pub fn event_value(&self, event: EventId) -> Option<&EventValue> {
        self.events.get(event).ok()?.value.as_ref().filter(|_| self.events.has_triggered(event))
    }

    pub fn has_triggered(&self, event: EventId) -> bool {
        self.events.has_triggered(event)
    }

    /// Scheduled firing time, for timeouts.
    pub fn scheduled_time(&self, event: EventId) -> DesResult<Option<SimTime>> {
        Ok(self.events.get(event)?.scheduled_time)
    }

    pub fn process_state(&self, process: ProcessId) -> DesResult<ProcessState> {
        self.processes
            .get(process.index())
            .map(|p| p.state)
            .ok_or(DesError::UnknownProcess(process))
    }

    pub fn resource(&self, resource: ResourceId) -> DesResult<&Resource> {
        self.resources
            .get(resource.index())
            .ok_or(DesError::UnknownResource(resource))
    }

    // ── Events ────────────────────────────────────────────────────────────

    /// Create a pending event with no scheduled time.
    pub fn event(&mut self) -> DesResult<EventId> {
        self.events.alloc(None)
    }

    /// Create an event that fires with `value` at `now + delay`.
    pub fn timeout(&mut self, delay: f64, value: EventValue) -> DesResult<EventId> {
        let at = self.now().offset(delay)?;
        let id = self.events.alloc(Some(at))?;
        self.events.get_mut(id)?.value = Some(value);
        self.queue.push(at, Entry::Event(id));
        Ok(id)
    }

    /// Trigger a pending event now.  Its waiters resume once the loop reaches
    /// it, after everything already queued for this instant.
    ///
    /// Timeouts are triggered by the clock; calling this on one, or on any
    /// event that already triggered, fails with [`DesError::DoubleTrigger`].
    pub fn succeed(&mut self, event: EventId, value: EventValue) -> DesResult<()> {
        if self.events.get(event)?.scheduled_time.is_some() {
            return Err(DesError::DoubleTrigger(event));
        }
        self.trigger_now(event, value)
    }

    fn trigger_now(&mut self, event: EventId, value: EventValue) -> DesResult<()> {
        self.events.trigger(event, value)?;
        self.queue.push(self.now(), Entry::Event(event));
        Ok(())
    }

    /// Composite event that triggers as soon as any of `events` is processed.
    ///
    /// Its value is `EventValue::Fired` listing every constituent that had
    /// triggered at that moment, so simultaneous outcomes are all visible.
    /// Constituents that lose are left untouched.
    pub fn race(&mut self, events: &[EventId]) -> DesResult<EventId> {
        if events.is_empty() {
            return Err(DesError::Config("race needs at least one event".into()));
        }
        for &e in events {
            self.events.get(e)?;
        }
        let cond = self.events.alloc(None)?;
        self.events.get_mut(cond)?.race_of = Some(events.to_vec());

        let already = events
            .iter()
            .any(|&e| matches!(self.events.get(e).map(|s| s.state), Ok(EventState::Processed)));
        if already {
            self.resolve_race(cond)?;
        } else {
            for &e in events {
                self.events.get_mut(e)?.callbacks.push(Callback::Condition(cond));
            }
        }
        Ok(cond)
    }

    fn resolve_race(&mut self, cond: EventId) -> DesResult<()> {
        let slot = self.events.get(cond)?;
        if slot.state != EventState::Pending {
            return Ok(());
        }
        let constituents = slot.race_of.clone().unwrap_or_default();
        let mut fired: Vec<EventId> = Vec::with_capacity(constituents.len());
        for e in constituents {
            if self.events.has_triggered(e) && !fired.contains(&e) {
                fired.push(e);
            }
        }
        log::debug!("race {cond} resolved at {}: {fired:?}", self.now());
        self.trigger_now(cond, EventValue::Fired(fired))
    }

    // ── Processes ─────────────────────────────────────────────────────────

    /// Register a process; it first runs at the current instant, after
    /// everything already queued for it.
    ///
    /// Finished processes keep their slot (state only, the logic is dropped)
    /// so their ids stay valid for [`Sim::process_state`].
    pub fn spawn<P: Process<S> + 'static>(&mut self, process: P) -> DesResult<ProcessId> {
        let id = ProcessId::next(self.processes.len())?;
        self.processes.push(ProcessSlot {
            logic: Some(Box::new(process)),
            state: ProcessState::Runnable,
            token: 0,
            held:  Vec::new(),
        });
        self.queue.push(self.now(), Entry::Resume { process: id, token: 0, cause: None });
        Ok(id)
    }

    pub(crate) fn hold(&mut self, process: ProcessId, grant: Grant) {
        if let Some(p) = self.processes.get_mut(process.index()) {
            p.held.push(grant);
        }
    }

    pub(crate) fn unhold(&mut self, process: ProcessId, grant: Grant) {
        if let Some(p) = self.processes.get_mut(process.index()) {
            p.held.retain(|&g| g != grant);
        }
    }

    // ── Resources ─────────────────────────────────────────────────────────

    pub fn add_resource(&mut self, capacity: usize) -> DesResult<ResourceId> {
        let id = ResourceId::next(self.resources.len())?;
        self.resources.push(Resource::new(id, capacity)?);
        Ok(id)
    }

    fn resource_mut(&mut self, resource: ResourceId) -> DesResult<&mut Resource> {
        self.resources
            .get_mut(resource.index())
            .ok_or(DesError::UnknownResource(resource))
    }

    /// Request a slot from outside any process.  Nothing releases it
    /// automatically; prefer [`Ctx::request`] inside process logic.
    pub fn request(&mut self, resource: ResourceId) -> DesResult<Grant> {
        self.request_for(resource, None)
    }

    pub(crate) fn request_for(
        &mut self,
        resource: ResourceId,
        owner:    Option<ProcessId>,
    ) -> DesResult<Grant> {
        self.resource(resource)?;
        let event = self.events.alloc(None)?;
        let grant = Grant { resource, event };
        if self.resource_mut(resource)?.request(event, owner)? {
            self.trigger_now(event, EventValue::Granted(resource))?;
        }
        Ok(grant)
    }

    /// Return a granted slot (or withdraw a still-queued request).  The head
    /// of the queue, if any, is granted immediately.
    pub fn release(&mut self, grant: Grant) -> DesResult<()> {
        match self.resource_mut(grant.resource)?.release(grant.event)? {
            Release::Freed { next: Some(next) } => {
                self.trigger_now(next, EventValue::Granted(grant.resource))
            }
            Release::Freed { next: None } | Release::Withdrawn | Release::NotHeld => Ok(()),
        }
    }

    /// Withdraw a queued request.  Returns whether anything was removed;
    /// cancelling an already granted request is a harmless no-op.
    pub fn cancel(&mut self, grant: Grant) -> DesResult<bool> {
        Ok(self.resource_mut(grant.resource)?.cancel(grant.event))
    }

    // ── Run loop ──────────────────────────────────────────────────────────

    /// Run to the configured horizon, or until the queue drains if there is
    /// none.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> DesResult<()> {
        match self.config.horizon {
            Some(limit) => self.run_until(limit, observer),
            None => {
                log::info!("run start at {}, no horizon", self.now());
                while self.step(observer)? {}
                observer.on_run_end(self.now());
                Ok(())
            }
        }
    }

    /// Process every entry scheduled at or before `limit`, then leave the
    /// clock at `limit`.
    pub fn run_until<O: SimObserver>(&mut self, limit: SimTime, observer: &mut O) -> DesResult<()> {
        log::info!("run start at {}, until {limit}", self.now());
        while self.queue.next_time().is_some_and(|t| t <= limit) {
            self.step(observer)?;
        }
        if limit > self.now() {
            self.clock.advance_to(limit)?;
        }
        log::info!("run stop at {}, {} entries left", self.now(), self.queue.len());
        observer.on_run_end(self.now());
        Ok(())
    }

    /// Process exactly one queue entry.  Returns `false` if the queue was empty.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> DesResult<bool> {
        let Some((time, entry)) = self.queue.pop() else {
            return Ok(false);
        };
        self.clock.advance_to(time)?;
        match entry {
            Entry::Event(event) => self.process_event(event, observer)?,
            Entry::Resume { process, token, cause } => {
                self.resume(process, token, cause, observer)?
            }
        }
        Ok(true)
    }

    fn process_event<O: SimObserver>(&mut self, event: EventId, observer: &mut O) -> DesResult<()> {
        let slot = self.events.get_mut(event)?;
        if slot.state == EventState::Processed {
            return Ok(());
        }
        slot.state = EventState::Processed;
        let callbacks = std::mem::take(&mut slot.callbacks);
        log::debug!("{event} processed at {}, {} callbacks", self.now(), callbacks.len());

        for callback in callbacks {
            match callback {
                Callback::Resume { process, token } => {
                    self.resume(process, token, Some(event), observer)?
                }
                Callback::Condition(cond) => self.resolve_race(cond)?,
            }
        }
        observer.on_event_processed(self.now(), event);
        Ok(())
    }

    fn resume<O: SimObserver>(
        &mut self,
        process:  ProcessId,
        token:    u64,
        cause:    Option<EventId>,
        observer: &mut O,
    ) -> DesResult<()> {
        let slot = self
            .processes
            .get_mut(process.index())
            .ok_or(DesError::UnknownProcess(process))?;
        if slot.state == ProcessState::Done || slot.token != token {
            log::trace!("{process} stale wake-up from {cause:?}");
            return Ok(());
        }
        let Some(mut logic) = slot.logic.take() else {
            return Ok(());
        };
        slot.state = ProcessState::Runnable;
        slot.token += 1;

        let wake = match cause {
            None => Wake::start(),
            Some(event) => Wake {
                cause: Some(event),
                value: self.events.get(event)?.value.clone().unwrap_or_default(),
            },
        };
        log::debug!("{process} resumed at {} by {cause:?}", self.now());
        observer.on_process_resumed(self.now(), process);

        let step = {
            let mut ctx = Ctx { sim: self, process };
            logic.resume(&mut ctx, wake)
        };

        match step {
            Ok(Step::Wait(events)) if !events.is_empty() => {
                if let Err(e) = self.suspend(process, &events) {
                    self.finish(process, observer)?;
                    return Err(e);
                }
                if let Some(slot) = self.processes.get_mut(process.index()) {
                    slot.logic = Some(logic);
                }
                Ok(())
            }
            Ok(Step::Wait(_)) => {
                self.finish(process, observer)?;
                Err(DesError::DeadlockedProcess(process))
            }
            Ok(Step::Done) => self.finish(process, observer),
            Err(e) => {
                self.finish(process, observer)?;
                Err(e)
            }
        }
    }

    /// Register `process` as waiting on `events`.  If one of them was already
    /// processed, the process is queued to resume at the current instant.
    fn suspend(&mut self, process: ProcessId, events: &[EventId]) -> DesResult<()> {
        for &e in events {
            self.events.get(e)?;
        }
        let slot = self
            .processes
            .get_mut(process.index())
            .ok_or(DesError::UnknownProcess(process))?;
        slot.state = ProcessState::Suspended;
        let token = slot.token;

        let mut immediate = None;
        for &e in events {
            let ev = self.events.get_mut(e)?;
            if ev.state == EventState::Processed {
                immediate.get_or_insert(e);
            } else {
                ev.callbacks.push(Callback::Resume { process, token });
            }
        }
        if let Some(cause) = immediate {
            self.queue.push(self.now(), Entry::Resume { process, token, cause: Some(cause) });
        }
        Ok(())
    }

    /// Mark `process` done and hand back every grant it still holds.
    fn finish<O: SimObserver>(&mut self, process: ProcessId, observer: &mut O) -> DesResult<()> {
        let held = match self.processes.get_mut(process.index()) {
            Some(slot) => {
                slot.state = ProcessState::Done;
                slot.logic = None;
                std::mem::take(&mut slot.held)
            }
            None => return Err(DesError::UnknownProcess(process)),
        };
        for grant in held {
            self.release(grant)?;
        }
        log::debug!("{process} done at {}", self.now());
        observer.on_process_done(self.now(), process);
        Ok(())
    }
}
