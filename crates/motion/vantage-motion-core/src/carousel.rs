//! Autoplaying, directional carousel.
//!
//! The carousel displays one item at a time. Every transition, manual or
//! automatic, restarts the autoplay rest period, so a click never gets
//! followed by a surprise advance a moment later.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{check_duration, MotionError, Result};
use crate::ids::CarouselId;
use crate::timer::{Fired, TimerKind, TimerQueue, TimerSlot};

/// Sign of the most recent transition. Used to pick enter/exit sides only.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Direction {
    Backward,
    #[default]
    Still,
    Forward,
}

impl Direction {
    pub fn from_delta(delta: isize) -> Self {
        match delta.signum() {
            -1 => Direction::Backward,
            1 => Direction::Forward,
            _ => Direction::Still,
        }
    }

    pub fn as_i8(self) -> i8 {
        match self {
            Direction::Backward => -1,
            Direction::Still => 0,
            Direction::Forward => 1,
        }
    }
}

impl From<Direction> for i8 {
    fn from(d: Direction) -> Self {
        d.as_i8()
    }
}

impl TryFrom<i8> for Direction {
    type Error = String;

    fn try_from(v: i8) -> std::result::Result<Self, Self::Error> {
        match v {
            -1 => Ok(Direction::Backward),
            0 => Ok(Direction::Still),
            1 => Ok(Direction::Forward),
            other => Err(format!("direction must be -1, 0 or 1 (got {other})")),
        }
    }
}

/// A completed index change.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
}

/// Declarative carousel configuration. Items are opaque to the core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarouselCfg {
    pub key: String,
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
    #[serde(default = "default_autoplay")]
    pub autoplay: bool,
    #[serde(default)]
    pub interval_ms: Option<f64>,
}

fn default_autoplay() -> bool {
    true
}

impl CarouselCfg {
    pub fn new(key: impl Into<String>, items: Vec<serde_json::Value>) -> Self {
        Self {
            key: key.into(),
            items,
            autoplay: true,
            interval_ms: None,
        }
    }

    pub fn interval_or(&self, cfg: &Config) -> f64 {
        self.interval_ms.unwrap_or(cfg.carousel_interval_ms)
    }

    pub fn validate(&self, cfg: &Config) -> Result<()> {
        check_interval(self.interval_or(cfg))
    }
}

fn check_interval(interval_ms: f64) -> Result<()> {
    check_duration("carousel.interval_ms", interval_ms)?;
    if interval_ms == 0.0 {
        return Err(MotionError::InvalidDuration {
            field: "carousel.interval_ms".into(),
            value: interval_ms,
        });
    }
    Ok(())
}

#[derive(Debug)]
pub struct Carousel<T> {
    id: CarouselId,
    items: Vec<T>,
    current: usize,
    direction: Direction,
    autoplay: bool,
    interval_ms: f64,
    slot: TimerSlot,
}

impl<T> Carousel<T> {
    pub fn new(id: CarouselId, items: Vec<T>, autoplay: bool, interval_ms: f64) -> Result<Self> {
        check_interval(interval_ms)?;
        Ok(Self {
            id,
            items,
            current: 0,
            direction: Direction::Still,
            autoplay,
            interval_ms,
            slot: TimerSlot::new(),
        })
    }

    pub fn id(&self) -> CarouselId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_item(&self) -> Option<&T> {
        self.items.get(self.current)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub fn is_timer_armed(&self) -> bool {
        self.slot.is_armed()
    }

    pub fn owns(&self, fired: &Fired) -> bool {
        self.slot.owns(fired)
    }

    fn can_cycle(&self) -> bool {
        self.items.len() > 1
    }

    fn restart_autoplay(&mut self, queue: &mut TimerQueue) {
        if self.autoplay && self.can_cycle() {
            self.slot
                .arm(queue, self.interval_ms, TimerKind::Autoplay(self.id));
        } else {
            self.slot.disarm(queue);
        }
    }

    /// Start the autoplay timer when the carousel appears.
    pub fn mount(&mut self, queue: &mut TimerQueue) {
        self.restart_autoplay(queue);
    }

    /// Release the autoplay timer. Returns true if one was pending.
    pub fn teardown(&mut self, queue: &mut TimerQueue) -> bool {
        self.slot.disarm(queue)
    }

    /// Move by `delta` positions, wrapping at both ends. No-op for fewer
    /// than two items.
    pub fn advance(&mut self, delta: isize, queue: &mut TimerQueue) -> Option<Transition> {
        if !self.can_cycle() || delta == 0 {
            return None;
        }
        let len = self.items.len() as isize;
        let from = self.current;
        let to = (from as isize + delta.rem_euclid(len)).rem_euclid(len) as usize;
        self.current = to;
        self.direction = Direction::from_delta(delta);
        self.restart_autoplay(queue);
        log::debug!(
            "carousel {:?}: {} -> {} ({:?})",
            self.id,
            from,
            to,
            self.direction
        );
        Some(Transition {
            from,
            to,
            direction: self.direction,
        })
    }

    pub fn next(&mut self, queue: &mut TimerQueue) -> Option<Transition> {
        self.advance(1, queue)
    }

    pub fn prev(&mut self, queue: &mut TimerQueue) -> Option<Transition> {
        self.advance(-1, queue)
    }

    /// Jump straight to `index`. Jumping to the current index only records a
    /// forward direction; it is not a transition and leaves autoplay alone.
    pub fn jump_to(&mut self, index: usize, queue: &mut TimerQueue) -> Result<Option<Transition>> {
        if index >= self.items.len() {
            return Err(MotionError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let from = self.current;
        if index == from {
            self.direction = Direction::Forward;
            return Ok(None);
        }
        self.direction = if index > from {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.current = index;
        self.restart_autoplay(queue);
        log::debug!("carousel {:?}: jump {} -> {}", self.id, from, index);
        Ok(Some(Transition {
            from,
            to: index,
            direction: self.direction,
        }))
    }

    /// Handle this carousel's autoplay timer firing.
    pub fn on_autoplay(&mut self, fired: &Fired, queue: &mut TimerQueue) -> Option<Transition> {
        if !self.slot.owns(fired) {
            return None;
        }
        self.slot.settle(fired);
        self.advance(1, queue)
    }

    pub fn set_autoplay(&mut self, enabled: bool, queue: &mut TimerQueue) {
        if self.autoplay == enabled {
            return;
        }
        self.autoplay = enabled;
        self.restart_autoplay(queue);
    }

    pub fn set_interval(&mut self, interval_ms: f64, queue: &mut TimerQueue) -> Result<()> {
        check_interval(interval_ms)?;
        self.interval_ms = interval_ms;
        if self.slot.is_armed() {
            self.restart_autoplay(queue);
        }
        Ok(())
    }

    /// Replace the item list. The index resets to 0 when it no longer fits;
    /// returns true in that case.
    pub fn set_items(&mut self, items: Vec<T>, queue: &mut TimerQueue) -> bool {
        self.items = items;
        let reset = self.current >= self.items.len() && self.current != 0;
        if reset {
            self.current = 0;
            self.direction = Direction::Still;
        }
        self.restart_autoplay(queue);
        reset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(n: usize) -> Carousel<usize> {
        Carousel::new(CarouselId(0), (0..n).collect(), true, 5000.0).unwrap()
    }

    #[test]
    fn wraps_backwards() {
        let mut q = TimerQueue::new();
        let mut c = carousel(4);
        let t = c.prev(&mut q).unwrap();
        assert_eq!(t.to, 3);
        assert_eq!(c.direction(), Direction::Backward);
    }

    #[test]
    fn direction_serializes_as_sign() {
        assert_eq!(serde_json::to_string(&Direction::Backward).unwrap(), "-1");
        let d: Direction = serde_json::from_str("1").unwrap();
        assert_eq!(d, Direction::Forward);
        assert!(serde_json::from_str::<Direction>("2").is_err());
    }

    #[test]
    fn empty_carousel_is_inert() {
        let mut q = TimerQueue::new();
        let mut c = carousel(0);
        c.mount(&mut q);
        assert!(c.next(&mut q).is_none());
        assert!(c.current_item().is_none());
        assert!(c.jump_to(0, &mut q).is_err());
        assert_eq!(q.pending(), 0);
    }

    #[test]
    fn extreme_deltas_wrap_without_overflow() {
        let mut q = TimerQueue::new();
        let mut c = carousel(4);
        c.jump_to(3, &mut q).unwrap();
        let t = c.advance(isize::MAX, &mut q).unwrap();
        assert_eq!(t.to, (3 + isize::MAX % 4) as usize % 4);
        assert_eq!(t.direction, Direction::Forward);
        let t = c.advance(isize::MIN, &mut q).unwrap();
        assert_eq!(t.to, t.from);
        assert_eq!(t.direction, Direction::Backward);
    }

    #[test]
    fn shrinking_items_resets_the_index() {
        let mut q = TimerQueue::new();
        let mut c = carousel(4);
        c.mount(&mut q);
        c.jump_to(3, &mut q).unwrap();
        assert!(c.set_items(vec![10, 11], &mut q));
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.direction(), Direction::Still);
        assert_eq!(q.pending(), 1);

        assert!(!c.set_items(vec![20, 21, 22], &mut q));
        assert_eq!(c.current_item(), Some(&20));

        assert!(!c.set_items(vec![30], &mut q));
        assert_eq!(q.pending(), 0);
    }

    #[test]
    fn rejects_zero_interval() {
        assert!(Carousel::<u8>::new(CarouselId(0), vec![1, 2], true, 0.0).is_err());
        assert!(Carousel::<u8>::new(CarouselId(0), vec![1, 2], true, -5.0).is_err());
    }
}
