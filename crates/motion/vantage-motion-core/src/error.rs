//! Error types for motion configuration.
//!
//! Only construction can fail. Once a controller exists, ticking it never
//! returns an error: degenerate inputs (zero targets, empty item lists) are
//! defined no-ops.

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum MotionError {
    /// Intersection threshold outside [0, 1]
    #[error("Invalid threshold: {value} (expected a fraction in [0, 1])")]
    InvalidThreshold { value: f32 },

    /// Scroll anchor that could not be parsed or is out of range
    #[error("Invalid anchor: {value}")]
    InvalidAnchor { value: String },

    /// Piecewise remap with no stops or unordered stops
    #[error("Invalid remap: {reason}")]
    InvalidRemap { reason: String },

    /// Counter target/duration/step configuration
    #[error("Invalid counter config: {reason}")]
    InvalidCounter { reason: String },

    /// Non-positive or non-finite duration/interval
    #[error("Invalid duration for {field}: {value}")]
    InvalidDuration { field: String, value: f64 },

    /// Carousel jump outside the item list
    #[error("Index {index} is out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    /// Two controllers declared with the same output key
    #[error("Duplicate key: {key}")]
    DuplicateKey { key: String },

    /// Scene document could not be parsed
    #[error("Scene parse error: {reason}")]
    SceneParse { reason: String },
}

pub type Result<T, E = MotionError> = std::result::Result<T, E>;

pub(crate) fn check_duration(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(MotionError::InvalidDuration {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

pub(crate) fn check_threshold(value: f32) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(MotionError::InvalidThreshold { value });
    }
    Ok(())
}
