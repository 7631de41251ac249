//! One-shot events and the arena that owns them.

use des_core::{DesError, DesResult, EventId, ProcessId, ResourceId, SimTime};

/// Lifecycle of an event.
///
/// `Pending → Triggered → Processed`, never backwards.  An event is
/// *triggered* once its outcome is decided (value set, queued for
/// processing) and *processed* once the run loop has popped it and run its
/// callbacks.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum EventState {
    Pending,
    Triggered,
    Processed,
}

/// Result value carried by a triggered event.
#[derive(Clone, PartialEq, Debug, Default)]
pub enum EventValue {
    #[default]
    Empty,
    Number(f64),
    /// Outcome of a race: every constituent that had triggered when the race
    /// resolved, in the order they were passed to `race`.
    Fired(Vec<EventId>),
    /// A resource slot was granted.
    Granted(ResourceId),
}

impl EventValue {
    /// `true` if this is a race outcome that includes `event`.
    pub fn fired(&self, event: EventId) -> bool {
        matches!(self, EventValue::Fired(ids) if ids.contains(&event))
    }
}

/// Something to run when an event is processed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Callback {
    /// Resume a suspended process, if it is still waiting under `token`.
    Resume { process: ProcessId, token: u64 },
    /// Re-evaluate a race condition that lists this event as a constituent.
    Condition(EventId),
}

/// Arena slot for one event.
#[derive(Debug)]
pub(crate) struct EventSlot {
    pub state:          EventState,
    /// Set only for timeouts.
    pub scheduled_time: Option<SimTime>,
    pub value:          Option<EventValue>,
    /// Run in registration order when processed, then dropped.
    pub callbacks:      Vec<Callback>,
    /// Constituents, if this event is a race condition.
    pub race_of:        Option<Vec<EventId>>,
}

impl EventSlot {
    fn new(scheduled_time: Option<SimTime>) -> Self {
        Self {
            state: EventState::Pending,
            scheduled_time,
            value: None,
            callbacks: Vec::new(),
            race_of: None,
        }
    }
}

/// Dense `EventId → EventSlot` storage.
///
/// Slots are not reclaimed.  Once an event is processed its callback list is
/// dropped, so nothing it was waited on by stays reachable, but the slot
/// itself (state, value, scheduled time) lives until the `Sim` is dropped.
/// Models keep ids such as a sold-out signal and query them after the run,
/// so an id always names the same event and can never alias a newer one.
/// Memory grows by one small slot per event; a run that needs more than
/// `u32::MAX - 1` events fails with [`DesError::IdsExhausted`].
#[derive(Default, Debug)]
pub(crate) struct EventArena {
    slots: Vec<EventSlot>,
}

impl EventArena {
    pub fn alloc(&mut self, scheduled_time: Option<SimTime>) -> DesResult<EventId> {
        let id = EventId::next(self.slots.len())?;
        self.slots.push(EventSlot::new(scheduled_time));
        Ok(id)
    }

    pub fn get(&self, id: EventId) -> DesResult<&EventSlot> {
        self.slots.get(id.index()).ok_or(DesError::UnknownEvent(id))
    }

    pub fn get_mut(&mut self, id: EventId) -> DesResult<&mut EventSlot> {
        self.slots.get_mut(id.index()).ok_or(DesError::UnknownEvent(id))
    }

    /// Move `id` from `Pending` to `Triggered` with `value`.
    pub fn trigger(&mut self, id: EventId, value: EventValue) -> DesResult<()> {
        let slot = self.get_mut(id)?;
        if slot.state != EventState::Pending {
            return Err(DesError::DoubleTrigger(id));
        }
        slot.state = EventState::Triggered;
        slot.value = Some(value);
        Ok(())
    }

    /// `true` once the outcome of `id` is decided.
    pub fn has_triggered(&self, id: EventId) -> bool {
        self.slots
            .get(id.index())
            .is_some_and(|s| s.state != EventState::Pending)
    }
}
