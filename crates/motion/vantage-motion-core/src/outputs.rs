//! Output contracts from the motion engine.
//!
//! Outputs carry only the property values that changed this tick, keyed by
//! `"<owner key>.<property>"`, plus a separate list of semantic events.
//! The presentation layer applies them; the core never paints.

use serde::{Deserialize, Serialize};

use crate::carousel::Direction;
use crate::ids::{CarouselId, CounterId, PromptId, TriggerId};
use crate::timer::{TimerId, TimerKind};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MotionValue {
    Number(f64),
    Text(String),
}

impl MotionValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MotionValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MotionValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// One changed property this tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub key: String,
    pub value: MotionValue,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum MotionEvent {
    VisibilityChanged {
        trigger: TriggerId,
        region: String,
        visible: bool,
    },
    CounterStarted {
        counter: CounterId,
    },
    CounterFinished {
        counter: CounterId,
        value: f64,
    },
    CarouselTransition {
        carousel: CarouselId,
        from: usize,
        to: usize,
        direction: Direction,
    },
    PromptToggled {
        prompt: PromptId,
        visible: bool,
    },
    /// Ask the host to scroll the document.
    ScrollRequested {
        top: f32,
        smooth: bool,
    },
    /// A timer fired with no live owner. Always a bug in teardown.
    TimerLeaked {
        timer: TimerId,
        kind: TimerKind,
    },
    /// A command could not be applied (unknown handle, out-of-range index).
    Warning {
        message: String,
    },
}

/// Outputs returned by `MotionEngine::update()`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<MotionEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_change(&mut self, key: String, value: MotionValue) {
        self.changes.push(Change { key, value });
    }

    #[inline]
    pub fn push_number(&mut self, owner: &str, property: &str, value: f64) {
        self.push_change(format!("{owner}.{property}"), MotionValue::Number(value));
    }

    #[inline]
    pub fn push_event(&mut self, event: MotionEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }

    /// Last value written for `key` this tick.
    pub fn value(&self, key: &str) -> Option<&MotionValue> {
        self.changes
            .iter()
            .rev()
            .find(|c| c.key == key)
            .map(|c| &c.value)
    }
}
