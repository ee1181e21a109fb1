//! Value interpolation driven by scroll progress or elapsed time.
//!
//! - `Remap`: piecewise-linear projection of a progress value
//! - `Tween`: single from→to transition over elapsed milliseconds
//! - `Keyframes`: evenly spaced values, optionally repeating

pub mod functions;

use serde::{Deserialize, Serialize};

use crate::error::{MotionError, Result};
pub use functions::{lerp_f32, Easing};

/// Piecewise-linear mapping `[(p0, v0), (p1, v1), ...]`.
///
/// Inputs before the first stop clamp to `v0`, inputs after the last stop clamp
/// to the last value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<[f32; 2]>", into = "Vec<[f32; 2]>")]
pub struct Remap {
    stops: Vec<[f32; 2]>,
}

impl Remap {
    pub fn new(stops: Vec<[f32; 2]>) -> Result<Self> {
        if stops.is_empty() {
            return Err(MotionError::InvalidRemap {
                reason: "at least one stop is required".into(),
            });
        }
        if stops.iter().flatten().any(|v| !v.is_finite()) {
            return Err(MotionError::InvalidRemap {
                reason: "stops must be finite".into(),
            });
        }
        if stops.windows(2).any(|w| w[1][0] < w[0][0]) {
            return Err(MotionError::InvalidRemap {
                reason: "stop inputs must be non-decreasing".into(),
            });
        }
        Ok(Self { stops })
    }

    /// Two-stop shorthand: `[p0, p1] -> [v0, v1]`.
    pub fn linear(input: [f32; 2], output: [f32; 2]) -> Result<Self> {
        Self::new(vec![[input[0], output[0]], [input[1], output[1]]])
    }

    pub fn stops(&self) -> &[[f32; 2]] {
        &self.stops
    }

    pub fn sample(&self, p: f32) -> f32 {
        let first = self.stops[0];
        if p <= first[0] {
            return first[1];
        }
        let last = self.stops[self.stops.len() - 1];
        if p >= last[0] {
            return last[1];
        }
        for w in self.stops.windows(2) {
            let [p0, v0] = w[0];
            let [p1, v1] = w[1];
            if p >= p0 && p <= p1 {
                let span = p1 - p0;
                if span <= 0.0 {
                    return v1;
                }
                return lerp_f32(v0, v1, (p - p0) / span);
            }
        }
        last[1]
    }
}

impl TryFrom<Vec<[f32; 2]>> for Remap {
    type Error = MotionError;

    fn try_from(stops: Vec<[f32; 2]>) -> Result<Self> {
        Remap::new(stops)
    }
}

impl From<Remap> for Vec<[f32; 2]> {
    fn from(remap: Remap) -> Self {
        remap.stops
    }
}

/// Time-based transition from `from` to `to`, after an optional delay.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub duration_ms: f64,
    #[serde(default)]
    pub delay_ms: f64,
    #[serde(default)]
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            duration_ms,
            delay_ms: 0.0,
            easing: Easing::Linear,
        }
    }

    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Normalized progress in [0, 1] before easing.
    pub fn progress(&self, elapsed_ms: f64) -> f32 {
        let local = elapsed_ms - self.delay_ms;
        if local <= 0.0 {
            // A zero-length tween still waits out its delay.
            return if self.duration_ms <= 0.0 && local == 0.0 {
                1.0
            } else {
                0.0
            };
        }
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (local / self.duration_ms).clamp(0.0, 1.0) as f32
    }

    pub fn sample(&self, elapsed_ms: f64) -> f32 {
        let t = self.easing.apply(self.progress(elapsed_ms));
        lerp_f32(self.from, self.to, t)
    }

    pub fn is_finished(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.delay_ms + self.duration_ms.max(0.0)
    }
}

/// Repeat behavior for keyframe sequences.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    #[default]
    Once,
    Loop,
    PingPong,
}

fn fmod(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        return 0.0;
    }
    let m = a % b;
    if (m < 0.0 && b > 0.0) || (m > 0.0 && b < 0.0) {
        m + b
    } else {
        m
    }
}

/// Reflect t into [0, span] with ping-pong behavior, where period = 2 * span.
fn ping_pong(t: f64, span: f64) -> f64 {
    if span <= 0.0 {
        return 0.0;
    }
    let m = fmod(t, 2.0 * span);
    if m <= span {
        m
    } else {
        2.0 * span - m
    }
}

/// Evenly spaced keyframe values over `duration_ms`. The easing applies per
/// segment, so `[0, 8, 0]` with `EaseInOut` settles at each turning point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframes {
    pub values: Vec<f32>,
    pub duration_ms: f64,
    #[serde(default)]
    pub easing: Easing,
    #[serde(default)]
    pub loop_mode: LoopMode,
}

impl Keyframes {
    pub fn new(values: Vec<f32>, duration_ms: f64) -> Self {
        Self {
            values,
            duration_ms,
            easing: Easing::Linear,
            loop_mode: LoopMode::Once,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_loop(mut self, loop_mode: LoopMode) -> Self {
        self.loop_mode = loop_mode;
        self
    }

    pub fn sample(&self, elapsed_ms: f64) -> f32 {
        let n = self.values.len();
        match n {
            0 => 0.0,
            1 => self.values[0],
            _ => {
                if self.duration_ms <= 0.0 {
                    return self.values[n - 1];
                }
                let t = elapsed_ms / self.duration_ms;
                let u = match self.loop_mode {
                    LoopMode::Once => t.clamp(0.0, 1.0),
                    LoopMode::Loop => fmod(t, 1.0),
                    LoopMode::PingPong => ping_pong(t, 1.0),
                };
                let scaled = u * (n - 1) as f64;
                let i0 = (scaled.floor() as usize).min(n - 2);
                let local = (scaled - i0 as f64).clamp(0.0, 1.0) as f32;
                lerp_f32(
                    self.values[i0],
                    self.values[i0 + 1],
                    self.easing.apply(local),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) {
        assert!((a - b).abs() <= 1e-4, "left={a} right={b}");
    }

    #[test]
    fn remap_clamps_outside_breakpoints() {
        let r = Remap::new(vec![[0.0, 0.0], [0.5, 1.0]]).unwrap();
        approx(r.sample(-1.0), 0.0);
        approx(r.sample(0.25), 0.5);
        approx(r.sample(0.5), 1.0);
        approx(r.sample(0.9), 1.0);
    }

    #[test]
    fn remap_multi_segment() {
        let r = Remap::new(vec![[0.0, 0.0], [0.5, 10.0], [1.0, 0.0]]).unwrap();
        approx(r.sample(0.25), 5.0);
        approx(r.sample(0.75), 5.0);
    }

    #[test]
    fn remap_rejects_unordered_and_empty() {
        assert!(Remap::new(vec![]).is_err());
        assert!(Remap::new(vec![[0.5, 0.0], [0.2, 1.0]]).is_err());
        assert!(serde_json::from_str::<Remap>("[[1.0, 0.0], [0.0, 1.0]]").is_err());
    }

    #[test]
    fn remap_deserializes_from_pairs() {
        let r: Remap = serde_json::from_str("[[0, 50], [0.5, 0]]").unwrap();
        approx(r.sample(0.25), 25.0);
    }

    #[test]
    fn tween_honors_delay() {
        let t = Tween::new(0.0, 1.0, 1000.0).with_delay(2000.0);
        approx(t.sample(1500.0), 0.0);
        approx(t.sample(2500.0), 0.5);
        approx(t.sample(5000.0), 1.0);
        assert!(!t.is_finished(2999.0));
        assert!(t.is_finished(3000.0));
    }

    #[test]
    fn keyframes_loop_returns_to_start() {
        let k = Keyframes::new(vec![0.0, 8.0, 0.0], 1500.0).with_loop(LoopMode::Loop);
        approx(k.sample(0.0), 0.0);
        approx(k.sample(750.0), 8.0);
        approx(k.sample(1500.0), 0.0);
        approx(k.sample(2250.0), 8.0);
    }

    #[test]
    fn keyframes_ping_pong_reflects() {
        let k = Keyframes::new(vec![0.0, 10.0], 1000.0).with_loop(LoopMode::PingPong);
        approx(k.sample(500.0), 5.0);
        approx(k.sample(1000.0), 10.0);
        approx(k.sample(1500.0), 5.0);
    }
}
