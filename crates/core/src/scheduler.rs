//! Scheduler module - timer capability injected into the game controller
//!
//! The controller never owns a clock. It asks a [`Scheduler`] to fire a
//! [`TimerKind`] once or repeatedly, and the host hands fired kinds back to
//! [`Game::on_timer`](crate::game::Game::on_timer).
//!
//! [`ManualScheduler`] is a virtual-clock implementation. Tests drive it with
//! exact millisecond values; the binary drives it from a monotonic clock.

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Advance the simulation by one tick
    Tick,
    /// Return from fast-drop to the normal tick interval
    EndFastDrop,
}

/// Opaque handle identifying one scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// Timer primitives the controller needs from its host
pub trait Scheduler {
    /// Fire `kind` every `interval_ms`, first after one interval
    fn schedule_repeating(&mut self, interval_ms: u32, kind: TimerKind) -> TimerHandle;

    /// Fire `kind` once after `delay_ms`
    fn schedule_once(&mut self, delay_ms: u32, kind: TimerKind) -> TimerHandle;

    /// Cancel a timer. Unknown or already-fired handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

/// A pending timer as seen by [`ManualScheduler::timers`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerInfo {
    pub handle: TimerHandle,
    pub kind: TimerKind,
    pub deadline_ms: u64,
    /// `Some` for repeating timers
    pub interval_ms: Option<u32>,
}

/// Virtual-clock scheduler
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    now_ms: u64,
    next_id: u64,
    timers: Vec<TimerInfo>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Pending timers in creation order
    pub fn timers(&self) -> &[TimerInfo] {
        &self.timers
    }

    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.iter().map(|t| t.deadline_ms).min()
    }

    /// Pop the earliest timer due at or before `until_ms`.
    ///
    /// The clock moves to that timer's deadline, so anything the handler
    /// schedules is measured from the moment the timer fired. Repeating timers
    /// are re-armed before they are returned. Ties fire in creation order.
    /// When nothing is due the clock moves to `until_ms` and `None` is returned.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TimerKind> {
        let due = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline_ms <= until_ms)
            .min_by_key(|(_, t)| (t.deadline_ms, t.handle))
            .map(|(idx, _)| idx);

        let Some(idx) = due else {
            self.now_ms = self.now_ms.max(until_ms);
            return None;
        };

        let timer = self.timers[idx];
        self.now_ms = self.now_ms.max(timer.deadline_ms);
        match timer.interval_ms {
            Some(interval) => {
                self.timers[idx].deadline_ms = timer.deadline_ms + interval as u64;
            }
            None => {
                self.timers.remove(idx);
            }
        }
        Some(timer.kind)
    }

    fn insert(&mut self, delay_ms: u32, interval_ms: Option<u32>, kind: TimerKind) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.push(TimerInfo {
            handle,
            kind,
            deadline_ms: self.now_ms + delay_ms as u64,
            interval_ms,
        });
        handle
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, interval_ms: u32, kind: TimerKind) -> TimerHandle {
        // A zero interval would fire forever within one `pop_due` loop.
        let interval_ms = interval_ms.max(1);
        self.insert(interval_ms, Some(interval_ms), kind)
    }

    fn schedule_once(&mut self, delay_ms: u32, kind: TimerKind) -> TimerHandle {
        self.insert(delay_ms, None, kind)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|t| t.handle != handle);
    }
}
