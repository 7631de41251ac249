//! Capacity-limited resource with strict FIFO admission.
//!
//! `Resource` is pure bookkeeping: it decides *who* holds a slot and *who*
//! is next, and reports those decisions back to [`Sim`][crate::Sim], which
//! owns the grant events and triggers them.

use std::collections::VecDeque;

use des_core::{DesError, DesResult, EventId, ProcessId, ResourceId};

/// Handle for one request against a resource.
///
/// `event` triggers (with `EventValue::Granted`) once the slot is assigned.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Grant {
    pub resource: ResourceId,
    pub event:    EventId,
}

/// A request waiting for a free slot.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct PendingRequest {
    pub grant: EventId,
    /// `None` for requests made from outside any process.
    pub owner: Option<ProcessId>,
}

/// Outcome of [`Resource::release`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Release {
    /// A held slot was returned; `next` is the queued grant that now takes it.
    Freed { next: Option<EventId> },
    /// The grant was still queued and has been withdrawn.
    Withdrawn,
    /// Neither held nor queued (already released or cancelled).
    NotHeld,
}

#[derive(Debug)]
pub struct Resource {
    id:       ResourceId,
    capacity: usize,
    /// Grants currently holding a slot; `users.len()` is the active count.
    users:    Vec<EventId>,
    queue:    VecDeque<PendingRequest>,
}

impl Resource {
    pub fn new(id: ResourceId, capacity: usize) -> DesResult<Self> {
        if capacity == 0 {
            return Err(DesError::Config(format!("{id} needs a capacity of at least 1")));
        }
        Ok(Self { id, capacity, users: Vec::new(), queue: VecDeque::new() })
    }

    #[inline]
    pub fn id(&self) -> ResourceId {
        self.id
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of slots currently held.
    #[inline]
    pub fn active(&self) -> usize {
        self.users.len()
    }

    /// Number of requests waiting for a slot.
    #[inline]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Admit `grant` if a slot is free (returns `true`), otherwise queue it.
    pub(crate) fn request(&mut self, grant: EventId, owner: Option<ProcessId>) -> DesResult<bool> {
        if self.users.len() < self.capacity {
            self.users.push(grant);
            self.check()?;
            return Ok(true);
        }
        self.queue.push_back(PendingRequest { grant, owner });
        Ok(false)
    }

    /// Return the slot held by `grant` and hand it to the head of the queue.
    ///
    /// A grant that is still queued is withdrawn instead, so a scoped release
    /// is correct whether or not the slot was ever granted.
    pub(crate) fn release(&mut self, grant: EventId) -> DesResult<Release> {
        if let Some(pos) = self.users.iter().position(|&g| g == grant) {
            self.users.remove(pos);
            let next = self.queue.pop_front().map(|req| {
                log::trace!("{} hands {} to {:?}", self.id, req.grant, req.owner);
                req.grant
            });
            if let Some(next) = next {
                self.users.push(next);
            }
            self.check()?;
            return Ok(Release::Freed { next });
        }
        if self.cancel(grant) {
            return Ok(Release::Withdrawn);
        }
        Ok(Release::NotHeld)
    }

    /// Withdraw a queued request.  Returns `false` (and changes nothing) when
    /// the grant is not queued, e.g. because it was granted in the meantime.
    pub(crate) fn cancel(&mut self, grant: EventId) -> bool {
        match self.queue.iter().position(|req| req.grant == grant) {
            Some(pos) => {
                self.queue.remove(pos);
                true
            }
            None => false,
        }
    }

    fn check(&self) -> DesResult<()> {
        if self.users.len() > self.capacity {
            return Err(DesError::OverCapacity {
                resource: self.id,
                active:   self.users.len(),
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}
