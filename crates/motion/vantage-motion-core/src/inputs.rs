//! Input contracts for the motion engine.
//!
//! Hosts build one `Inputs` per frame: whatever geometry changed since the
//! last frame (scroll/resize) plus user commands, applied in delivery order.

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Viewport};
use crate::ids::{CarouselId, CounterId, PromptId};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Inputs {
    /// New viewport size/scroll, if it changed.
    #[serde(default)]
    pub viewport: Option<Viewport>,
    /// Fresh bounding rects for observed regions.
    #[serde(default)]
    pub regions: Vec<RegionGeometry>,
    /// Regions removed from the page; everything they own is torn down.
    #[serde(default)]
    pub removed_regions: Vec<String>,
    #[serde(default)]
    pub carousel_cmds: Vec<CarouselCommand>,
    #[serde(default)]
    pub counter_cmds: Vec<CounterCommand>,
    #[serde(default)]
    pub nav_cmds: Vec<NavCommand>,
}

impl Inputs {
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    pub fn with_region(mut self, region: impl Into<String>, rect: Rect) -> Self {
        self.regions.push(RegionGeometry {
            region: region.into(),
            rect,
        });
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionGeometry {
    pub region: String,
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CarouselCommand {
    Next { carousel: CarouselId },
    Prev { carousel: CarouselId },
    JumpTo { carousel: CarouselId, index: usize },
    SetAutoplay { carousel: CarouselId, enabled: bool },
    SetInterval { carousel: CarouselId, interval_ms: f64 },
    /// Replace the displayed items; the index resets to 0 if it no longer fits.
    SetItems {
        carousel: CarouselId,
        items: Vec<serde_json::Value>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CounterCommand {
    Retarget { counter: CounterId, target: f64 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum NavCommand {
    ScrollToTop,
    ScrollToRegion { region: String },
    /// The floating prompt was clicked: scroll one viewport down.
    PromptClicked { prompt: PromptId },
}
