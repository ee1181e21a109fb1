//! Virtual-clock timer queue.
//!
//! Nothing here sleeps. The engine advances the clock by each frame's `dt` and
//! drains due entries in deadline order. Every scheduling call takes a
//! [`CancelToken`]; an entry whose token is cancelled never fires.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::ids::{CarouselId, CounterId};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TimerId(pub u64);

/// What a timer drives when it fires.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    CounterTick(CounterId),
    Autoplay(CarouselId),
}

/// Shared cancellation flag handed to the queue alongside each entry.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[derive(Debug)]
struct TimerEntry {
    id: TimerId,
    deadline_ms: f64,
    period_ms: Option<f64>,
    kind: TimerKind,
    token: CancelToken,
}

/// A timer that came due.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Fired {
    pub id: TimerId,
    pub kind: TimerKind,
    pub deadline_ms: f64,
    /// Interval timers stay queued after firing.
    pub repeating: bool,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    now_ms: f64,
    next_id: u64,
    // Sorted by (deadline, id); small enough that insertion sort wins.
    entries: Vec<TimerEntry>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// One-shot timer firing no earlier than `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: f64, kind: TimerKind, token: CancelToken) -> TimerId {
        self.insert(delay_ms, None, kind, token)
    }

    /// Repeating timer firing every `period_ms` until cancelled.
    pub fn schedule_interval(
        &mut self,
        period_ms: f64,
        kind: TimerKind,
        token: CancelToken,
    ) -> TimerId {
        self.insert(period_ms, Some(period_ms.max(f64::EPSILON)), kind, token)
    }

    fn insert(
        &mut self,
        delay_ms: f64,
        period_ms: Option<f64>,
        kind: TimerKind,
        token: CancelToken,
    ) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let entry = TimerEntry {
            id,
            deadline_ms: self.now_ms + delay_ms.max(0.0),
            period_ms,
            kind,
            token,
        };
        self.push_sorted(entry);
        id
    }

    fn push_sorted(&mut self, entry: TimerEntry) {
        let pos = self
            .entries
            .iter()
            .position(|e| {
                e.deadline_ms > entry.deadline_ms
                    || (e.deadline_ms == entry.deadline_ms && e.id > entry.id)
            })
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
    }

    /// Cancel and drop an entry. Returns false if it already fired or was dropped.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(pos) => {
                let entry = self.entries.remove(pos);
                entry.token.cancel();
                true
            }
            None => false,
        }
    }

    /// Pop the next live timer due at or before `until_ms`, moving the clock to
    /// its deadline. Returns `None` (and leaves the clock alone) when nothing is due.
    pub fn pop_due(&mut self, until_ms: f64) -> Option<Fired> {
        loop {
            let first = self.entries.first()?;
            if first.deadline_ms > until_ms {
                return None;
            }
            let entry = self.entries.remove(0);
            if entry.token.is_cancelled() {
                continue;
            }
            self.now_ms = self.now_ms.max(entry.deadline_ms);
            let fired = Fired {
                id: entry.id,
                kind: entry.kind,
                deadline_ms: entry.deadline_ms,
                repeating: entry.period_ms.is_some(),
            };
            if let Some(period) = entry.period_ms {
                self.push_sorted(TimerEntry {
                    deadline_ms: entry.deadline_ms + period,
                    ..entry
                });
            }
            return Some(fired);
        }
    }

    /// Move the clock forward after due timers have been drained.
    pub fn advance_to(&mut self, until_ms: f64) {
        if until_ms > self.now_ms {
            self.now_ms = until_ms;
        }
    }

    /// Live (uncancelled) entries.
    pub fn pending(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| !e.token.is_cancelled())
            .count()
    }

    pub fn pending_for(&self, kind: TimerKind) -> usize {
        self.entries
            .iter()
            .filter(|e| e.kind == kind && !e.token.is_cancelled())
            .count()
    }

    /// Deadline of the next live entry, if any.
    pub fn next_deadline(&self) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| !e.token.is_cancelled())
            .map(|e| e.deadline_ms)
    }
}

/// An owner's exclusive handle on at most one pending timer.
///
/// Arming always cancels whatever was armed before, so a slot can never leave
/// two timers racing for the same owner.
#[derive(Debug, Default)]
pub struct TimerSlot {
    armed: Option<(TimerId, CancelToken)>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, queue: &mut TimerQueue, delay_ms: f64, kind: TimerKind) -> TimerId {
        self.disarm(queue);
        let token = CancelToken::new();
        let id = queue.schedule(delay_ms, kind, token.clone());
        self.armed = Some((id, token));
        id
    }

    pub fn arm_interval(
        &mut self,
        queue: &mut TimerQueue,
        period_ms: f64,
        kind: TimerKind,
    ) -> TimerId {
        self.disarm(queue);
        let token = CancelToken::new();
        let id = queue.schedule_interval(period_ms, kind, token.clone());
        self.armed = Some((id, token));
        id
    }

    /// Returns true if a timer was pending.
    pub fn disarm(&mut self, queue: &mut TimerQueue) -> bool {
        match self.armed.take() {
            Some((id, token)) => {
                token.cancel();
                queue.cancel(id);
                true
            }
            None => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
            .as_ref()
            .is_some_and(|(_, token)| !token.is_cancelled())
    }

    pub fn timer_id(&self) -> Option<TimerId> {
        self.armed.as_ref().map(|(id, _)| *id)
    }

    /// Whether `fired` belongs to this slot.
    pub fn owns(&self, fired: &Fired) -> bool {
        self.timer_id() == Some(fired.id)
    }

    /// Forget a one-shot timer that has just fired.
    pub fn settle(&mut self, fired: &Fired) {
        if !fired.repeating && self.owns(fired) {
            self.armed = None;
        }
    }
}
