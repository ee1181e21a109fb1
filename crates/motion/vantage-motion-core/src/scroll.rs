//! Scroll-linked progress between two viewport anchors.
//!
//! An [`Anchor`] pairs a point on the region with a point on the viewport;
//! `"start end"` means "region top meets viewport bottom". Progress is 0 at
//! the start anchor, 1 at the end anchor, and clamped outside that span.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MotionError, Result};
use crate::geometry::Rect;
use crate::interp::Remap;

/// Region edge fraction meeting a viewport edge fraction (0 = top, 1 = bottom).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Anchor {
    pub region: f32,
    pub viewport: f32,
}

impl Anchor {
    /// Region top meets viewport bottom.
    pub const START_END: Anchor = Anchor {
        region: 0.0,
        viewport: 1.0,
    };
    /// Region bottom meets viewport top.
    pub const END_START: Anchor = Anchor {
        region: 1.0,
        viewport: 0.0,
    };
    /// Region bottom meets viewport bottom.
    pub const END_END: Anchor = Anchor {
        region: 1.0,
        viewport: 1.0,
    };

    pub fn new(region: f32, viewport: f32) -> Result<Self> {
        for v in [region, viewport] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(MotionError::InvalidAnchor {
                    value: format!("{region} {viewport}"),
                });
            }
        }
        Ok(Self { region, viewport })
    }

    /// Scroll distance (px) still to travel before this anchor is met.
    /// Negative once it has been passed.
    #[inline]
    fn remaining(&self, rect: &Rect, viewport_height: f32) -> f32 {
        rect.top + self.region * rect.height - self.viewport * viewport_height
    }
}

fn parse_edge(token: &str) -> Option<f32> {
    match token {
        "start" => Some(0.0),
        "center" => Some(0.5),
        "end" => Some(1.0),
        t if t.ends_with('%') => t[..t.len() - 1].parse::<f32>().ok().map(|p| p / 100.0),
        t => t.parse::<f32>().ok(),
    }
}

impl FromStr for Anchor {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || MotionError::InvalidAnchor {
            value: s.to_string(),
        };
        let mut parts = s.split_whitespace();
        let (Some(r), Some(v), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };
        let region = parse_edge(r).ok_or_else(invalid)?;
        let viewport = parse_edge(v).ok_or_else(invalid)?;
        Anchor::new(region, viewport).map_err(|_| invalid())
    }
}

impl TryFrom<String> for Anchor {
    type Error = MotionError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Anchor> for String {
    fn from(a: Anchor) -> Self {
        a.to_string()
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.region, self.viewport)
    }
}

/// Normalized progress of `rect` through the span between `start` and `end`.
pub fn scroll_progress(rect: &Rect, viewport_height: f32, start: Anchor, end: Anchor) -> f32 {
    let to_start = start.remaining(rect, viewport_height);
    let to_end = end.remaining(rect, viewport_height);
    let span = to_end - to_start;
    if span <= 0.0 {
        return if to_end <= 0.0 { 1.0 } else { 0.0 };
    }
    (-to_start / span).clamp(0.0, 1.0)
}

/// Projects progress into one named output property.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RemapBinding {
    pub property: String,
    pub remap: Remap,
}

impl RemapBinding {
    pub fn new(property: impl Into<String>, remap: Remap) -> Self {
        Self {
            property: property.into(),
            remap,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrollRangeCfg {
    pub key: String,
    pub region: String,
    pub start: Anchor,
    pub end: Anchor,
    #[serde(default)]
    pub bindings: Vec<RemapBinding>,
}

impl ScrollRangeCfg {
    pub fn new(key: impl Into<String>, region: impl Into<String>, start: Anchor, end: Anchor) -> Self {
        Self {
            key: key.into(),
            region: region.into(),
            start,
            end,
            bindings: Vec::new(),
        }
    }

    pub fn bind(mut self, property: impl Into<String>, remap: Remap) -> Self {
        self.bindings.push(RemapBinding::new(property, remap));
        self
    }

    /// Background drifts from 0% to `intensity * 100`% of its height while
    /// the region travels through the whole viewport.
    pub fn parallax(key: impl Into<String>, region: impl Into<String>, intensity: f32) -> Result<Self> {
        let remap = Remap::linear([0.0, 1.0], [0.0, intensity * 100.0])?;
        Ok(Self::new(key, region, Anchor::START_END, Anchor::END_START).bind("y_pct", remap))
    }

    /// Fade and rise into place during the first half of the region's entry.
    pub fn fade_in_section(key: impl Into<String>, region: impl Into<String>) -> Result<Self> {
        let opacity = Remap::linear([0.0, 0.5], [0.0, 1.0])?;
        let y = Remap::linear([0.0, 0.5], [50.0, 0.0])?;
        Ok(Self::new(key, region, Anchor::START_END, Anchor::END_END)
            .bind("opacity", opacity)
            .bind("y", y))
    }
}

/// Progress state for one scroll-linked region.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollRange {
    region: String,
    start: Anchor,
    end: Anchor,
    bindings: Vec<RemapBinding>,
    progress: f32,
    measured: bool,
}

impl ScrollRange {
    pub fn new(
        region: impl Into<String>,
        start: Anchor,
        end: Anchor,
        bindings: Vec<RemapBinding>,
    ) -> Self {
        Self {
            region: region.into(),
            start,
            end,
            bindings,
            progress: 0.0,
            measured: false,
        }
    }

    pub fn from_cfg(cfg: &ScrollRangeCfg) -> Self {
        Self::new(cfg.region.clone(), cfg.start, cfg.end, cfg.bindings.clone())
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn bindings(&self) -> &[RemapBinding] {
        &self.bindings
    }

    /// Recompute from fresh geometry. Returns true when progress changed (or
    /// on the first measurement).
    pub fn measure(&mut self, rect: &Rect, viewport_height: f32) -> bool {
        let next = scroll_progress(rect, viewport_height, self.start, self.end);
        let changed = !self.measured || next != self.progress;
        self.progress = next;
        self.measured = true;
        changed
    }

    /// Current value of every bound property.
    pub fn values(&self) -> impl Iterator<Item = (&str, f32)> + '_ {
        self.bindings
            .iter()
            .map(move |b| (b.property.as_str(), b.remap.sample(self.progress)))
    }
}
