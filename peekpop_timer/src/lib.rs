// Copyright 2026 the Peekpop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Peekpop Timer: a deterministic, `no_std` deadline queue for UI timers.
//!
//! ## Overview
//!
//! Gesture recognition needs a handful of logical timers — a long-press
//! detector, one dwell timer per tracked region, repeat timers — but none of
//! them need a thread. This crate models them as entries in a host-driven
//! deadline queue: the host polls [`TimerService::next_deadline`], sleeps (or
//! schedules a platform callback) until then, and calls
//! [`TimerService::fire_due`] with the current time. Fired entries come back
//! as plain messages that the caller feeds into its own state machine like
//! any other input event.
//!
//! Because firing happens on the caller's thread, cancellation here is
//! synchronous: once [`TimerService::cancel`] returns `true`, that entry can
//! never fire. Callers that hand out timer messages across a state reset
//! should still tag messages with their own generation counter, since a
//! message already returned by `fire_due` is out of the queue's hands.
//!
//! ## Minimal example
//!
//! ```
//! use peekpop_timer::TimerService;
//!
//! #[derive(Debug, PartialEq)]
//! enum Msg {
//!     LongPress,
//!     Dwell(u32),
//! }
//!
//! let mut timers: TimerService<Msg> = TimerService::new();
//! let long_press = timers.schedule(200, Msg::LongPress);
//! timers.schedule(850, Msg::Dwell(7));
//!
//! assert_eq!(timers.next_deadline(), Some(200));
//!
//! // Nothing is due yet at t = 100.
//! assert!(timers.fire_due(100).is_empty());
//!
//! // The long press fires at t = 200; the dwell timer stays queued.
//! let fired = timers.fire_due(200);
//! assert_eq!(fired, vec![(long_press, Msg::LongPress)]);
//! assert_eq!(timers.next_deadline(), Some(850));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::num::NonZeroU64;

/// Handle for a scheduled timer entry.
///
/// Ids are allocated from a per-service monotone counter and are never
/// reused, so a stale handle can be cancelled harmlessly: cancelling an
/// entry that already fired (or was already cancelled) returns `false`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TimerId(NonZeroU64);

#[derive(Debug)]
struct Entry<M> {
    id: TimerId,
    deadline: u64,
    msg: M,
}

/// Host-driven deadline queue.
///
/// ## Usage
///
/// - [`TimerService::schedule`] an entry with an absolute deadline (same
///   clock as every other timestamp the host feeds in, typically
///   milliseconds of a monotonic clock).
/// - [`TimerService::cancel`] it by handle, or [`TimerService::cancel_all`]
///   on teardown.
/// - Poll [`TimerService::next_deadline`] to find out when to wake up, and
///   drain due entries with [`TimerService::fire_due`].
///
/// Entries fire in deadline order; entries sharing a deadline fire in
/// scheduling order. A deadline at or before `now` is due (`<=`, not `<`).
#[derive(Debug)]
pub struct TimerService<M> {
    entries: Vec<Entry<M>>,
    next_id: u64,
}

impl<M> TimerService<M> {
    /// Create an empty service.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Schedule a message to fire once `now >= deadline`.
    pub fn schedule(&mut self, deadline: u64, msg: M) -> TimerId {
        let id = TimerId(NonZeroU64::new(self.next_id).expect("timer ids start at 1"));
        self.next_id += 1;
        self.entries.push(Entry { id, deadline, msg });
        id
    }

    /// Cancel a scheduled entry.
    ///
    /// Returns `true` if the entry was still queued. Cancelling an id that
    /// already fired or was already cancelled is a no-op returning `false`.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Cancel every scheduled entry.
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Whether the entry with this id is still queued.
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// The earliest queued deadline, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return every entry whose deadline is at or before `now`.
    ///
    /// Returned in (deadline, scheduling) order, so a repeat timer scheduled
    /// from inside the handling of one fire cannot jump ahead of an already
    /// due sibling.
    pub fn fire_due(&mut self, now: u64) -> Vec<(TimerId, M)> {
        let mut due: Vec<Entry<M>> = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].deadline <= now {
                due.push(self.entries.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|e| (e.deadline, e.id));
        due.into_iter().map(|e| (e.id, e.msg)).collect()
    }
}

impl<M> Default for TimerService<M> {
    fn default() -> Self {
        Self::new()
    }
}
