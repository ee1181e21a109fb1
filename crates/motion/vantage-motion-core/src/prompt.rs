//! Floating "scroll to explore" prompt.
//!
//! Hidden once the page has scrolled past a small offset; fades in after a
//! delay on first paint and bobs its indicator forever while mounted.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::interp::{Easing, Keyframes, LoopMode, Tween};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PromptCfg {
    pub key: String,
    #[serde(default)]
    pub hide_after_px: Option<f32>,
}

impl PromptCfg {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            hide_after_px: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollPrompt {
    hide_after_px: f32,
    visible: bool,
    elapsed_ms: f64,
    entrance: Tween,
    bob: Keyframes,
}

impl ScrollPrompt {
    pub fn new(hide_after_px: f32) -> Self {
        Self {
            hide_after_px,
            visible: true,
            elapsed_ms: 0.0,
            entrance: Tween::new(0.0, 1.0, 1000.0).with_delay(2000.0),
            bob: Keyframes::new(vec![0.0, 8.0, 0.0], 1500.0)
                .with_easing(Easing::EaseInOut)
                .with_loop(LoopMode::Loop),
        }
    }

    pub fn from_cfg(cfg: &PromptCfg, defaults: &Config) -> Self {
        Self::new(cfg.hide_after_px.unwrap_or(defaults.prompt_hide_after_px))
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns `Some(visible)` when the page scroll flips the prompt.
    pub fn on_scroll(&mut self, scroll_y: f32) -> Option<bool> {
        let visible = scroll_y <= self.hide_after_px;
        if visible == self.visible {
            return None;
        }
        self.visible = visible;
        Some(visible)
    }

    pub fn step(&mut self, dt_ms: f64) {
        self.elapsed_ms += dt_ms.max(0.0);
    }

    pub fn opacity(&self) -> f32 {
        if self.visible {
            self.entrance.sample(self.elapsed_ms)
        } else {
            0.0
        }
    }

    pub fn indicator_y(&self) -> f32 {
        self.bob.sample(self.elapsed_ms)
    }
}
