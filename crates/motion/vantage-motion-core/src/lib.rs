//! Vantage Motion Core (engine-agnostic)
//!
//! Viewport-driven animation state for a landing page: visibility triggers,
//! scroll-linked ranges, counting statistics, autoplaying carousels, entrance
//! reveals and the floating scroll prompt. Hosts feed geometry and commands
//! through [`Inputs`] each frame and apply the returned [`Outputs`]; all
//! timers run on a virtual clock advanced by `update(dt)`.

pub mod carousel;
pub mod config;
pub mod counter;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod inputs;
pub mod interp;
pub mod outputs;
pub mod prompt;
pub mod reveal;
pub mod scene;
pub mod scroll;
pub mod timer;
pub mod visibility;

// Re-exports for consumers (adapters)
pub use carousel::{Carousel, CarouselCfg, Direction, Transition};
pub use config::Config;
pub use counter::{CounterCfg, CounterPhase, CounterPlan, CounterStepper};
pub use engine::MotionEngine;
pub use error::{MotionError, Result};
pub use geometry::{intersection_ratio, GeometrySource, Rect, Viewport};
pub use ids::{CarouselId, CounterId, PromptId, RangeId, RevealId, TriggerId};
pub use inputs::{CarouselCommand, CounterCommand, Inputs, NavCommand, RegionGeometry};
pub use interp::{Easing, Keyframes, LoopMode, Remap, Tween};
pub use outputs::{Change, MotionEvent, MotionValue, Outputs};
pub use prompt::{PromptCfg, ScrollPrompt};
pub use reveal::{Reveal, RevealCfg, RevealTrack};
pub use scene::{parse_scene_json, SceneHandles, SceneSpec};
pub use scroll::{scroll_progress, Anchor, RemapBinding, ScrollRange, ScrollRangeCfg};
pub use timer::{CancelToken, Fired, TimerId, TimerKind, TimerQueue, TimerSlot};
pub use visibility::{ViewportTrigger, VisibilityOptions};
