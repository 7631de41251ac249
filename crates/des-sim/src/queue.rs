//! `EventQueue`: time-ordered, FIFO-within-instant agenda.
//!
//! # Ordering
//!
//! Entries are keyed by `SimTime` in a `BTreeMap`; each key holds a
//! `VecDeque` of entries in insertion order.  Popping always takes the front
//! of the earliest key, so two entries scheduled for the same instant come
//! out in the order they went in.  An entry pushed *at* the current instant
//! while that instant is being drained lands at the back of the same deque
//! and is processed after everything already waiting there.
//!
//! `BTreeMap` gives O(log W) insert and pop where W is the number of distinct
//! pending instants.

use std::collections::{BTreeMap, VecDeque};

use des_core::{EventId, ProcessId, SimTime};

/// One unit of work for the run loop.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Entry {
    /// Trigger (if still pending) and process an event.
    Event(EventId),
    /// Resume a process directly: used for its first run and for waits on
    /// events that were already processed.
    Resume {
        process: ProcessId,
        token:   u64,
        cause:   Option<EventId>,
    },
}

/// A priority queue mapping virtual time → entries due at that time.
#[derive(Default, Debug)]
pub struct EventQueue {
    inner: BTreeMap<SimTime, VecDeque<Entry>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `entry` at `time`, after anything already due then.
    pub fn push(&mut self, time: SimTime, entry: Entry) {
        log::trace!("queue push {entry:?} at {time}");
        self.inner.entry(time).or_default().push_back(entry);
        self.total += 1;
    }

    /// Remove and return the earliest entry.
    pub fn pop(&mut self) -> Option<(SimTime, Entry)> {
        let mut first = self.inner.first_entry()?;
        let time = *first.key();
        let entry = first.get_mut().pop_front();
        if first.get().is_empty() {
            first.remove();
        }
        let entry = entry?;
        self.total -= 1;
        Some((time, entry))
    }

    /// The earliest instant with at least one queued entry, or `None` if empty.
    pub fn next_time(&self) -> Option<SimTime> {
        self.inner.keys().next().copied()
    }

    /// Total number of entries across all future instants.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
