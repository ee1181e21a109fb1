//! Threshold-crossing visibility triggers.

use serde::{Deserialize, Serialize};

use crate::error::{check_threshold, Result};

/// How a trigger decides it is in view.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisibilityOptions {
    /// Minimum visible fraction of the region, in [0, 1].
    #[serde(default)]
    pub threshold: f32,
    /// Latch on the first crossing and stop observing.
    #[serde(default)]
    pub once: bool,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            once: false,
        }
    }
}

impl VisibilityOptions {
    pub fn once(threshold: f32) -> Self {
        Self {
            threshold,
            once: true,
        }
    }

    pub fn repeating(threshold: f32) -> Self {
        Self {
            threshold,
            once: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_threshold(self.threshold)
    }
}

/// Visibility state of one observed region.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportTrigger {
    region: String,
    options: VisibilityOptions,
    is_visible: bool,
    released: bool,
}

impl ViewportTrigger {
    pub fn new(region: impl Into<String>, options: VisibilityOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            region: region.into(),
            options,
            is_visible: false,
            released: false,
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn options(&self) -> VisibilityOptions {
        self.options
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    /// A `once` trigger releases itself after its first crossing; further
    /// observations are ignored.
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Feed the region's current intersection ratio.
    ///
    /// Returns `Some(state)` only when the visible state flips.
    pub fn observe_ratio(&mut self, ratio: f32) -> Option<bool> {
        if self.released {
            return None;
        }
        let now_visible = ratio > 0.0 && ratio >= self.options.threshold;
        if now_visible == self.is_visible {
            return None;
        }
        self.is_visible = now_visible;
        if now_visible && self.options.once {
            self.released = true;
        }
        Some(now_visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn once_latches_and_releases() {
        let mut t = ViewportTrigger::new("stats", VisibilityOptions::once(0.5)).unwrap();
        assert_eq!(t.observe_ratio(0.3), None);
        assert_eq!(t.observe_ratio(0.5), Some(true));
        assert!(t.is_released());
        assert_eq!(t.observe_ratio(0.0), None);
        assert!(t.is_visible());
    }

    #[test]
    fn repeating_toggles_both_ways() {
        let mut t = ViewportTrigger::new("card", VisibilityOptions::repeating(0.25)).unwrap();
        assert_eq!(t.observe_ratio(0.4), Some(true));
        assert_eq!(t.observe_ratio(0.9), None);
        assert_eq!(t.observe_ratio(0.1), Some(false));
        assert_eq!(t.observe_ratio(0.25), Some(true));
        assert!(!t.is_released());
    }

    #[test]
    fn zero_threshold_needs_some_overlap() {
        let mut t = ViewportTrigger::new("hero", VisibilityOptions::default()).unwrap();
        assert_eq!(t.observe_ratio(0.0), None);
        assert_eq!(t.observe_ratio(0.01), Some(true));
    }

    #[test]
    fn rejects_threshold_out_of_range() {
        assert!(ViewportTrigger::new("x", VisibilityOptions::once(1.5)).is_err());
        assert!(ViewportTrigger::new("x", VisibilityOptions::once(f32::NAN)).is_err());
    }
}
