//! One-shot timers on a virtual monotonic clock.
//!
//! The toolkit never sleeps. Components arm timers through
//! [`TimerService`]; whoever drives the event loop advances the clock with
//! [`TimerQueue::expire`] and routes the returned ids back to their owners.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

pub trait TimerService {
    /// Arm a one-shot timer firing `delay` from now.
    fn arm(&mut self, delay: Duration) -> TimerId;

    /// Replace the pending deadline of `id`. Returns false when `id` is not
    /// pending, in which case nothing is armed.
    fn rearm(&mut self, id: TimerId, delay: Duration) -> bool;

    /// Disarm `id`. It will not fire after this returns.
    fn cancel(&mut self, id: TimerId) -> bool;

    fn now(&self) -> Duration;
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    pending: HashMap<TimerId, Duration>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.contains_key(&id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.values().min().copied()
    }

    /// Advance the clock to `now` and return the timers that are due, in
    /// deadline order. The clock never goes backwards.
    pub fn expire(&mut self, now: Duration) -> Vec<TimerId> {
        if now > self.now {
            self.now = now;
        }
        let mut due: Vec<(Duration, TimerId)> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= self.now)
            .map(|(id, deadline)| (*deadline, *id))
            .collect();
        due.sort();
        for (_, id) in &due {
            self.pending.remove(id);
        }
        due.into_iter().map(|(_, id)| id).collect()
    }
}

impl TimerService for TimerQueue {
    fn arm(&mut self, delay: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending.insert(id, self.now + delay);
        id
    }

    fn rearm(&mut self, id: TimerId, delay: Duration) -> bool {
        match self.pending.get_mut(&id) {
            Some(deadline) => {
                *deadline = self.now + delay;
                true
            }
            None => false,
        }
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.pending.remove(&id).is_some()
    }

    fn now(&self) -> Duration {
        self.now
    }
}
