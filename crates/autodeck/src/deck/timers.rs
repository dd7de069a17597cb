//! Single-threaded timer queue.
//!
//! Every timer the presenter needs (slide advance, progress tick, panel hide,
//! countdown tick) lives here. Components keep the returned [`TimerHandle`] in
//! an `Option` slot and cancel it before scheduling a replacement. Handles are
//! never reused, so a handle that no longer matches its slot is stale.

use std::time::{Duration, Instant};

/// Smallest delay or period the queue accepts. Keeps catch-up loops finite.
const MIN_DELAY: Duration = Duration::from_millis(1);

/// Source of "now" for the presenter.
pub trait Clock {
    /// Time elapsed since the clock's epoch.
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/// Hand-driven clock for tests. Clones share the same time.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct ManualClock {
    now: std::rc::Rc<std::cell::Cell<Duration>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Advance,
    ProgressTick,
    Hide,
    CountdownTick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// A timer that came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub handle: TimerHandle,
    pub kind: TimerKind,
    /// When the timer was due. Callbacks treat this as "now".
    pub at: Duration,
}

#[derive(Debug)]
struct Entry {
    handle: TimerHandle,
    kind: TimerKind,
    due: Duration,
    period: Option<Duration>,
}

#[derive(Debug, Default)]
pub struct Timers {
    entries: Vec<Entry>,
    next_id: u64,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_once(&mut self, kind: TimerKind, delay: Duration, now: Duration) -> TimerHandle {
        self.insert(kind, now + delay.max(MIN_DELAY), None)
    }

    /// Schedule a timer that fires every `period`, first at `now + period`.
    pub fn schedule_every(
        &mut self,
        kind: TimerKind,
        period: Duration,
        now: Duration,
    ) -> TimerHandle {
        let period = period.max(MIN_DELAY);
        self.insert(kind, now + period, Some(period))
    }

    fn insert(&mut self, kind: TimerKind, due: Duration, period: Option<Duration>) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            handle,
            kind,
            due,
            period,
        });
        handle
    }

    /// Cancel whatever the slot holds and leave it empty.
    pub fn cancel(&mut self, slot: &mut Option<TimerHandle>) {
        if let Some(handle) = slot.take() {
            self.entries.retain(|e| e.handle != handle);
        }
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn pending_of(&self, kind: TimerKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.iter().map(|e| e.due).min()
    }

    /// Pop the earliest timer due at or before `now`.
    ///
    /// Ties go to the timer scheduled first. One-shot timers are removed,
    /// repeating timers are re-armed one period later.
    pub fn pop_due(&mut self, now: Duration) -> Option<Fired> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= now)
            .min_by_key(|(_, e)| (e.due, e.handle.0))
            .map(|(i, _)| i)?;

        let entry = &self.entries[idx];
        let fired = Fired {
            handle: entry.handle,
            kind: entry.kind,
            at: entry.due,
        };
        let period = entry.period;
        match period {
            Some(period) => self.entries[idx].due += period,
            None => {
                self.entries.swap_remove(idx);
            }
        }
        Some(fired)
    }
}
