//! Virtual-clock timer queue for the interaction controller.
//!
//! The controller runs on a single logical thread: events are handled to
//! completion, and time only moves when the host calls
//! [`TimerQueue::pop_due`] with a later instant. Every scheduled task gets a
//! [`TimerId`] that its owner keeps and may pass to [`TimerQueue::cancel`];
//! a cancelled or already-fired id is simply absent.
//!
//! Due tasks come out in deadline order, ties in scheduling order.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Handle to one scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
pub struct TimerQueue<T> {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<(Duration, TimerId), T>,
    deadlines: HashMap<TimerId, Duration>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Current virtual time, measured from when the queue was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `task` to become due `delay` from now.
    pub fn schedule(&mut self, delay: Duration, task: impl Into<T>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let deadline = self.now + delay;
        self.pending.insert((deadline, id), task.into());
        self.deadlines.insert(id, deadline);
        id
    }

    /// Cancel a pending task. Returns it if it had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let deadline = self.deadlines.remove(&id)?;
        self.pending.remove(&(deadline, id))
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    /// Deadline of the earliest pending task.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pop the earliest task due at or before `until`, moving the clock to
    /// its deadline. Returns `None` (and moves the clock to `until`) when
    /// nothing else is due.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, T)> {
        if !matches!(self.next_deadline(), Some(deadline) if deadline <= until) {
            self.now = self.now.max(until);
            return None;
        }
        let ((deadline, id), task) = self.pending.pop_first()?;
        self.deadlines.remove(&id);
        self.now = self.now.max(deadline);
        Some((id, task))
    }
}
