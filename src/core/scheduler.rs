//! Virtual-time timer queue with cancellable handles.
//!
//! The scheduler never sleeps. Its owner moves it forward with
//! [`Scheduler::pop_due`], which hands back due timers one at a time in due
//! order and sets the scheduler's notion of "now" to each timer's due time, so
//! timers scheduled from inside a callback are placed relative to the moment
//! the callback logically ran rather than to the wall clock.
//!
//! ```
//! use std::time::Duration;
//! use village_games::core::Scheduler;
//!
//! let mut scheduler = Scheduler::new();
//! let tick = scheduler.schedule(Duration::from_secs(1), "tick");
//! scheduler.schedule(Duration::from_secs(2), "later");
//! assert!(scheduler.cancel(tick));
//!
//! let fired = scheduler.pop_due(Duration::from_secs(5)).map(|(_, t)| t);
//! assert_eq!(fired, Some("later"));
//! assert_eq!(scheduler.now(), Duration::from_secs(2));
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

/// Handle to a scheduled timer. Needed to cancel it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle {
    due: Duration,
    id: u64,
}

impl TimerHandle {
    /// When the timer is due to fire.
    #[must_use]
    pub fn due(&self) -> Duration {
        self.due
    }
}

/// Timer queue keyed by due time, ties fired in scheduling order.
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<TimerHandle, T>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: BTreeMap::new(),
        }
    }
}

impl<T> Scheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scheduler time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `timer` to fire `delay` after the current scheduler time.
    pub fn schedule(&mut self, delay: Duration, timer: T) -> TimerHandle {
        let handle = TimerHandle {
            due: self.now + delay,
            id: self.next_id,
        };
        self.next_id += 1;
        self.pending.insert(handle, timer);
        handle
    }

    /// Cancel a pending timer. Returns false if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.pending.remove(&handle).is_some()
    }

    /// Cancel every pending timer. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True when nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return the earliest timer due at or before `limit`.
    ///
    /// The scheduler clock jumps to that timer's due time.
    pub fn pop_due(&mut self, limit: Duration) -> Option<(TimerHandle, T)> {
        let first = *self.pending.keys().next()?;
        if first.due > limit {
            return None;
        }
        let timer = self.pending.remove(&first)?;
        self.now = self.now.max(first.due);
        Some((first, timer))
    }

    /// Move the scheduler clock forward without firing anything.
    ///
    /// Never moves backwards. Callers drain [`pop_due`](Self::pop_due) first.
    pub fn advance_to(&mut self, at: Duration) {
        self.now = self.now.max(at);
    }
}
