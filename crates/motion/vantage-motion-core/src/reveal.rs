//! Visibility-driven entrance animations (timeline cards, counter pop-in).

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{check_duration, check_threshold, Result};
use crate::interp::{lerp_f32, Easing};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealTrack {
    pub property: String,
    pub hidden: f32,
    pub shown: f32,
}

impl RevealTrack {
    pub fn new(property: impl Into<String>, hidden: f32, shown: f32) -> Self {
        Self {
            property: property.into(),
            hidden,
            shown,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealCfg {
    pub key: String,
    pub region: String,
    #[serde(default)]
    pub threshold: Option<f32>,
    #[serde(default = "default_once")]
    pub once: bool,
    #[serde(default)]
    pub tracks: Vec<RevealTrack>,
    #[serde(default)]
    pub duration_ms: Option<f64>,
    #[serde(default)]
    pub delay_ms: f64,
    #[serde(default = "default_easing")]
    pub easing: Easing,
}

fn default_once() -> bool {
    true
}

fn default_easing() -> Easing {
    Easing::EaseOut
}

impl RevealCfg {
    pub fn new(key: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            region: region.into(),
            threshold: None,
            once: true,
            tracks: Vec::new(),
            duration_ms: None,
            delay_ms: 0.0,
            easing: default_easing(),
        }
    }

    pub fn track(mut self, property: impl Into<String>, hidden: f32, shown: f32) -> Self {
        self.tracks.push(RevealTrack::new(property, hidden, shown));
        self
    }

    /// Alternating timeline card: even indices slide in from the left, odd
    /// from the right, each starting 100 ms after the previous one.
    pub fn timeline_item(key: impl Into<String>, region: impl Into<String>, index: usize) -> Self {
        let offset = if index % 2 == 0 { -50.0 } else { 50.0 };
        let mut cfg = Self::new(key, region)
            .track("opacity", 0.0, 1.0)
            .track("x", offset, 0.0);
        cfg.threshold = Some(0.3);
        cfg.duration_ms = Some(500.0);
        cfg.delay_ms = index as f64 * 100.0;
        cfg
    }

    /// Center dot of a timeline card: scales in 200 ms after its card starts.
    pub fn timeline_dot(key: impl Into<String>, region: impl Into<String>, index: usize) -> Self {
        let mut cfg = Self::new(key, region).track("scale", 0.0, 1.0);
        cfg.threshold = Some(0.3);
        cfg.duration_ms = Some(300.0);
        cfg.delay_ms = index as f64 * 100.0 + 200.0;
        cfg
    }

    /// Pop-in used by counters: fade up from 0 and scale up from 0.8 in 400 ms.
    pub fn counter_entrance(key: impl Into<String>, region: impl Into<String>, threshold: f32) -> Self {
        let mut cfg = Self::new(key, region)
            .track("opacity", 0.0, 1.0)
            .track("scale", 0.8, 1.0);
        cfg.threshold = Some(threshold);
        cfg.duration_ms = Some(400.0);
        cfg
    }

    pub fn duration_or(&self, cfg: &Config) -> f64 {
        self.duration_ms.unwrap_or(cfg.reveal_duration_ms)
    }

    pub fn threshold_or(&self, cfg: &Config) -> f32 {
        self.threshold.unwrap_or(cfg.default_threshold)
    }

    pub fn validate(&self, cfg: &Config) -> Result<()> {
        check_threshold(self.threshold_or(cfg))?;
        check_duration("reveal.duration_ms", self.duration_or(cfg))?;
        check_duration("reveal.delay_ms", self.delay_ms)
    }
}

/// Progress toward the shown state; moves back toward hidden when the
/// region leaves view (only possible for repeating triggers).
#[derive(Clone, Debug, PartialEq)]
pub struct Reveal {
    tracks: Vec<RevealTrack>,
    duration_ms: f64,
    delay_ms: f64,
    easing: Easing,
    shown: bool,
    waited_ms: f64,
    progress: f32,
}

impl Reveal {
    pub fn new(tracks: Vec<RevealTrack>, duration_ms: f64, delay_ms: f64, easing: Easing) -> Self {
        Self {
            tracks,
            duration_ms,
            delay_ms,
            easing,
            shown: false,
            waited_ms: 0.0,
            progress: 0.0,
        }
    }

    pub fn from_cfg(cfg: &RevealCfg, defaults: &Config) -> Result<Self> {
        cfg.validate(defaults)?;
        Ok(Self::new(
            cfg.tracks.clone(),
            cfg.duration_or(defaults),
            cfg.delay_ms,
            cfg.easing,
        ))
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn set_shown(&mut self, shown: bool) {
        if shown && !self.shown {
            self.waited_ms = 0.0;
        }
        self.shown = shown;
    }

    pub fn is_settled(&self) -> bool {
        if self.shown {
            self.progress >= 1.0
        } else {
            self.progress <= 0.0
        }
    }

    /// Advance by `dt_ms`. Returns true when the output values moved.
    pub fn step(&mut self, dt_ms: f64) -> bool {
        if self.is_settled() {
            return false;
        }
        let mut dt = dt_ms.max(0.0);
        if self.shown && self.waited_ms < self.delay_ms {
            let wait = (self.delay_ms - self.waited_ms).min(dt);
            self.waited_ms += wait;
            dt -= wait;
            if self.waited_ms < self.delay_ms {
                return false;
            }
        }
        let delta = if self.duration_ms <= 0.0 {
            1.0
        } else {
            (dt / self.duration_ms) as f32
        };
        let before = self.progress;
        self.progress = if self.shown {
            (self.progress + delta).min(1.0)
        } else {
            (self.progress - delta).max(0.0)
        };
        self.progress != before
    }

    pub fn values(&self) -> impl Iterator<Item = (&str, f32)> + '_ {
        let t = self.easing.apply(self.progress);
        self.tracks
            .iter()
            .map(move |tr| (tr.property.as_str(), lerp_f32(tr.hidden, tr.shown, t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(delay: f64) -> Reveal {
        Reveal::new(
            vec![RevealTrack::new("opacity", 0.0, 1.0)],
            500.0,
            delay,
            Easing::Linear,
        )
    }

    #[test]
    fn waits_for_delay_then_rises() {
        let mut r = linear(200.0);
        r.set_shown(true);
        assert!(!r.step(150.0));
        assert!(r.step(100.0));
        assert!((r.progress() - 0.1).abs() < 1e-6);
        r.step(1000.0);
        assert!(r.is_settled());
        let (_, v) = r.values().next().unwrap();
        assert_eq!(v, 1.0);
    }

    #[test]
    fn hides_without_delay() {
        let mut r = linear(200.0);
        r.set_shown(true);
        r.step(700.0);
        r.set_shown(false);
        assert!(r.step(250.0));
        assert!((r.progress() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn timeline_items_alternate_sides_and_stagger() {
        let even = RevealCfg::timeline_item("t0", "timeline.0", 0);
        let odd = RevealCfg::timeline_item("t3", "timeline.3", 3);
        assert_eq!(even.tracks[1].hidden, -50.0);
        assert_eq!(odd.tracks[1].hidden, 50.0);
        assert_eq!(odd.delay_ms, 300.0);
    }

    #[test]
    fn timeline_dot_trails_its_card() {
        let dot = RevealCfg::timeline_dot("t2.dot", "timeline.2", 2);
        assert_eq!(dot.tracks, vec![RevealTrack::new("scale", 0.0, 1.0)]);
        assert_eq!(dot.delay_ms, 400.0);
        assert_eq!(dot.duration_ms, Some(300.0));
        assert_eq!(dot.threshold, Some(0.3));
    }
}
