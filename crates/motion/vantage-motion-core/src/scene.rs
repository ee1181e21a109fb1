//! Declarative page scenes (JSON).
//!
//! A scene lists every animated region of a page. Loading validates the whole
//! document before registering anything, so a bad scene leaves the engine
//! untouched.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::carousel::CarouselCfg;
use crate::counter::CounterCfg;
use crate::engine::MotionEngine;
use crate::error::{MotionError, Result};
use crate::ids::{CarouselId, CounterId, PromptId, RangeId, RevealId, TriggerId};
use crate::prompt::PromptCfg;
use crate::reveal::RevealCfg;
use crate::scroll::ScrollRangeCfg;
use crate::visibility::VisibilityOptions;

/// Plain visibility subscription reported through events only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriggerCfg {
    pub key: String,
    pub region: String,
    #[serde(flatten)]
    pub options: VisibilityOptions,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParallaxCfg {
    pub key: String,
    pub region: String,
    #[serde(default = "default_intensity")]
    pub intensity: f32,
}

fn default_intensity() -> f32 {
    0.2
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FadeInCfg {
    pub key: String,
    pub region: String,
}

/// Alternating, staggered cards; reveal keys are `"<key>.<index>"` for the
/// card and `"<key>.<index>.dot"` for its center dot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineCfg {
    pub key: String,
    pub regions: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneSpec {
    #[serde(default)]
    pub triggers: Vec<TriggerCfg>,
    #[serde(default)]
    pub ranges: Vec<ScrollRangeCfg>,
    #[serde(default)]
    pub parallax: Vec<ParallaxCfg>,
    #[serde(default)]
    pub fade_ins: Vec<FadeInCfg>,
    #[serde(default)]
    pub counters: Vec<CounterCfg>,
    #[serde(default)]
    pub carousels: Vec<CarouselCfg>,
    #[serde(default)]
    pub reveals: Vec<RevealCfg>,
    #[serde(default)]
    pub timelines: Vec<TimelineCfg>,
    #[serde(default)]
    pub prompts: Vec<PromptCfg>,
}

/// Ids assigned to every declared key.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SceneHandles {
    pub triggers: HashMap<String, TriggerId>,
    pub ranges: HashMap<String, RangeId>,
    pub counters: HashMap<String, CounterId>,
    pub carousels: HashMap<String, CarouselId>,
    pub reveals: HashMap<String, RevealId>,
    pub prompts: HashMap<String, PromptId>,
}

pub fn parse_scene_json(json: &str) -> Result<SceneSpec> {
    serde_json::from_str(json).map_err(|e| MotionError::SceneParse {
        reason: e.to_string(),
    })
}

impl SceneSpec {
    /// Expand presets into plain range and reveal configs.
    fn expand(&self) -> Result<(Vec<ScrollRangeCfg>, Vec<RevealCfg>)> {
        let mut ranges = self.ranges.clone();
        for p in &self.parallax {
            ranges.push(ScrollRangeCfg::parallax(&p.key, &p.region, p.intensity)?);
        }
        for f in &self.fade_ins {
            ranges.push(ScrollRangeCfg::fade_in_section(&f.key, &f.region)?);
        }
        let mut reveals = self.reveals.clone();
        for t in &self.timelines {
            for (index, region) in t.regions.iter().enumerate() {
                reveals.push(RevealCfg::timeline_item(
                    format!("{}.{index}", t.key),
                    region,
                    index,
                ));
                reveals.push(RevealCfg::timeline_dot(
                    format!("{}.{index}.dot", t.key),
                    region,
                    index,
                ));
            }
        }
        Ok((ranges, reveals))
    }
}

impl MotionEngine {
    fn check_keys<'a>(&self, keys: impl Iterator<Item = &'a str>) -> Result<()> {
        let mut seen: HashSet<&str> = HashSet::new();
        for key in keys {
            if !seen.insert(key) || self.has_key(key) {
                return Err(MotionError::DuplicateKey {
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Validate and register a whole scene.
    pub fn load_scene(&mut self, scene: &SceneSpec) -> Result<SceneHandles> {
        let (ranges, reveals) = scene.expand()?;

        self.check_keys(
            scene
                .triggers
                .iter()
                .map(|t| t.key.as_str())
                .chain(ranges.iter().map(|r| r.key.as_str()))
                .chain(scene.counters.iter().map(|c| c.key.as_str()))
                .chain(scene.carousels.iter().map(|c| c.key.as_str()))
                .chain(reveals.iter().map(|r| r.key.as_str()))
                .chain(scene.prompts.iter().map(|p| p.key.as_str())),
        )?;

        let cfg = self.config().clone();
        for t in &scene.triggers {
            t.options.validate()?;
        }
        for c in &scene.counters {
            c.validate(&cfg)?;
        }
        for c in &scene.carousels {
            c.validate(&cfg)?;
        }
        for r in &reveals {
            r.validate(&cfg)?;
        }

        let mut handles = SceneHandles::default();
        for t in &scene.triggers {
            let id = self.observe(&t.region, t.options)?;
            handles.triggers.insert(t.key.clone(), id);
        }
        for r in ranges {
            let key = r.key.clone();
            handles.ranges.insert(key, self.add_scroll_range(r)?);
        }
        for c in &scene.counters {
            handles.counters.insert(c.key.clone(), self.add_counter(c.clone())?);
        }
        for c in &scene.carousels {
            handles
                .carousels
                .insert(c.key.clone(), self.add_carousel(c.clone())?);
        }
        for r in reveals {
            let key = r.key.clone();
            handles.reveals.insert(key, self.add_reveal(r)?);
        }
        for p in &scene.prompts {
            handles
                .prompts
                .insert(p.key.clone(), self.add_scroll_prompt(p.clone())?);
        }
        log::debug!(
            "scene loaded: {} triggers, {} ranges, {} counters, {} carousels, {} reveals, {} prompts",
            handles.triggers.len(),
            handles.ranges.len(),
            handles.counters.len(),
            handles.carousels.len(),
            handles.reveals.len(),
            handles.prompts.len()
        );
        Ok(handles)
    }
}
