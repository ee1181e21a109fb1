//! Engine-wide defaults for vantage-motion-core.

use serde::{Deserialize, Serialize};

/// Defaults applied when a controller config leaves a field unset.
/// Every field is plain data so hosts can pass it straight from JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lower bound on a counter's tick interval (ms).
    pub min_step_ms: f64,
    /// Intersection threshold for plain triggers.
    pub default_threshold: f32,
    /// Intersection threshold used by counters unless overridden.
    pub counter_threshold: f32,
    pub counter_duration_ms: f64,
    pub carousel_interval_ms: f64,
    pub reveal_duration_ms: f64,
    /// Page scroll (px) past which the floating scroll prompt hides.
    pub prompt_hide_after_px: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_step_ms: 50.0,
            default_threshold: 0.0,
            counter_threshold: 0.5,
            counter_duration_ms: 2000.0,
            carousel_interval_ms: 5000.0,
            reveal_duration_ms: 500.0,
            prompt_hide_after_px: 100.0,
        }
    }
}
