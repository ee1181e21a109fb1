//! Engine: owns every controller on the page and steps them once per frame.
//!
//! Per-tick order:
//! 1. geometry (viewport, region rects, removed regions)
//! 2. visibility triggers → counter starts, reveal targets
//! 3. scroll ranges → remapped properties
//! 4. scroll prompts
//! 5. commands (carousel, counter, navigation) in delivery order
//! 6. timers due within `dt`, in deadline order
//! 7. time-based tweens (reveals, counter entrances, prompt)

use hashbrown::{HashMap, HashSet};

use crate::carousel::{Carousel, CarouselCfg, Transition};
use crate::config::Config;
use crate::counter::{CounterCfg, CounterPhase, CounterStepper};
use crate::error::{MotionError, Result};
use crate::geometry::{intersection_ratio, GeometrySource, Rect, Viewport};
use crate::ids::{CarouselId, CounterId, IdAllocator, PromptId, RangeId, RevealId, TriggerId};
use crate::inputs::{CarouselCommand, CounterCommand, Inputs, NavCommand, RegionGeometry};
use crate::outputs::{MotionEvent, MotionValue, Outputs};
use crate::prompt::{PromptCfg, ScrollPrompt};
use crate::reveal::{Reveal, RevealCfg};
use crate::scroll::{ScrollRange, ScrollRangeCfg};
use crate::timer::{Fired, TimerKind, TimerQueue};
use crate::visibility::{ViewportTrigger, VisibilityOptions};

/// Who reacts when a trigger crosses its threshold.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum TriggerOwner {
    Host,
    Counter(CounterId),
    Reveal(RevealId),
}

#[derive(Debug)]
struct TriggerEntry {
    id: TriggerId,
    owner: TriggerOwner,
    trigger: ViewportTrigger,
}

#[derive(Debug)]
struct RangeEntry {
    id: RangeId,
    key: String,
    range: ScrollRange,
}

#[derive(Debug)]
struct CounterEntry {
    key: String,
    region: String,
    trigger: TriggerId,
    stepper: CounterStepper,
    entrance: Option<Reveal>,
}

#[derive(Debug)]
struct CarouselEntry {
    key: String,
    carousel: Carousel<serde_json::Value>,
}

#[derive(Debug)]
struct RevealEntry {
    id: RevealId,
    key: String,
    region: String,
    trigger: TriggerId,
    reveal: Reveal,
}

#[derive(Debug)]
struct PromptEntry {
    id: PromptId,
    key: String,
    prompt: ScrollPrompt,
}

#[derive(Debug)]
pub struct MotionEngine {
    cfg: Config,
    ids: IdAllocator,
    keys: HashSet<String>,

    viewport: Viewport,
    regions: HashMap<String, Rect>,
    // Set when geometry arrives or a new observer needs its first measurement.
    needs_measure: bool,

    triggers: Vec<TriggerEntry>,
    ranges: Vec<RangeEntry>,
    counters: Vec<CounterEntry>,
    carousels: Vec<CarouselEntry>,
    reveals: Vec<RevealEntry>,
    prompts: Vec<PromptEntry>,

    timers: TimerQueue,
    outputs: Outputs,
}

fn push_counter(outputs: &mut Outputs, key: &str, stepper: &CounterStepper) {
    outputs.push_number(key, "value", stepper.current());
    outputs.push_change(
        format!("{key}.text"),
        MotionValue::Text(stepper.display_text()),
    );
}

fn push_transition(outputs: &mut Outputs, id: CarouselId, key: &str, t: Transition) {
    outputs.push_number(key, "index", t.to as f64);
    outputs.push_number(key, "direction", t.direction.as_i8() as f64);
    outputs.push_event(MotionEvent::CarouselTransition {
        carousel: id,
        from: t.from,
        to: t.to,
        direction: t.direction,
    });
}

fn push_reveal(outputs: &mut Outputs, key: &str, reveal: &Reveal) {
    for (property, value) in reveal.values() {
        outputs.push_number(key, property, value as f64);
    }
}

fn warn(outputs: &mut Outputs, message: String) {
    log::warn!("{message}");
    outputs.push_event(MotionEvent::Warning { message });
}

impl MotionEngine {
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            ids: IdAllocator::new(),
            keys: HashSet::new(),
            viewport: Viewport::default(),
            regions: HashMap::new(),
            needs_measure: false,
            triggers: Vec::new(),
            ranges: Vec::new(),
            counters: Vec::new(),
            carousels: Vec::new(),
            reveals: Vec::new(),
            prompts: Vec::new(),
            timers: TimerQueue::new(),
            outputs: Outputs::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    fn claim_key(&mut self, key: &str) -> Result<()> {
        if !self.keys.insert(key.to_string()) {
            return Err(MotionError::DuplicateKey {
                key: key.to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn has_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    fn insert_trigger(
        &mut self,
        region: &str,
        options: VisibilityOptions,
        owner: TriggerOwner,
    ) -> Result<TriggerId> {
        let trigger = ViewportTrigger::new(region, options)?;
        let id = self.ids.alloc_trigger();
        self.triggers.push(TriggerEntry { id, owner, trigger });
        self.needs_measure = true;
        Ok(id)
    }

    fn drop_trigger(&mut self, id: TriggerId) {
        self.triggers.retain(|t| t.id != id);
    }

    // ---- registration -------------------------------------------------------

    /// Subscribe to a region's visibility. Crossings are reported as
    /// `MotionEvent::VisibilityChanged`; `unobserve` is the unsubscribe handle.
    pub fn observe(&mut self, region: &str, options: VisibilityOptions) -> Result<TriggerId> {
        self.insert_trigger(region, options, TriggerOwner::Host)
    }

    /// Drop a host subscription. Triggers owned by counters or reveals are
    /// released through their owner instead.
    pub fn unobserve(&mut self, id: TriggerId) -> bool {
        let before = self.triggers.len();
        self.triggers
            .retain(|t| !(t.id == id && t.owner == TriggerOwner::Host));
        self.triggers.len() != before
    }

    pub fn add_scroll_range(&mut self, cfg: ScrollRangeCfg) -> Result<RangeId> {
        self.claim_key(&cfg.key)?;
        let id = self.ids.alloc_range();
        self.ranges.push(RangeEntry {
            id,
            range: ScrollRange::from_cfg(&cfg),
            key: cfg.key,
        });
        self.needs_measure = true;
        Ok(id)
    }

    pub fn add_counter(&mut self, cfg: CounterCfg) -> Result<CounterId> {
        let id = self.ids.alloc_counter();
        let stepper = CounterStepper::from_cfg(id, &cfg, &self.cfg)?;
        let threshold = cfg.threshold_or(&self.cfg);
        let entrance = if cfg.entrance {
            let entrance_cfg = RevealCfg::counter_entrance(&cfg.key, &cfg.region, threshold);
            Some(Reveal::from_cfg(&entrance_cfg, &self.cfg)?)
        } else {
            None
        };
        self.claim_key(&cfg.key)?;
        let trigger = self.insert_trigger(
            &cfg.region,
            VisibilityOptions::once(threshold),
            TriggerOwner::Counter(id),
        )?;
        self.counters.push(CounterEntry {
            key: cfg.key,
            region: cfg.region,
            trigger,
            stepper,
            entrance,
        });
        Ok(id)
    }

    pub fn add_carousel(&mut self, cfg: CarouselCfg) -> Result<CarouselId> {
        let interval = cfg.interval_or(&self.cfg);
        let id = self.ids.alloc_carousel();
        let mut carousel = Carousel::new(id, cfg.items, cfg.autoplay, interval)?;
        self.claim_key(&cfg.key)?;
        carousel.mount(&mut self.timers);
        self.carousels.push(CarouselEntry {
            key: cfg.key,
            carousel,
        });
        Ok(id)
    }

    pub fn add_reveal(&mut self, cfg: RevealCfg) -> Result<RevealId> {
        let reveal = Reveal::from_cfg(&cfg, &self.cfg)?;
        self.claim_key(&cfg.key)?;
        let id = self.ids.alloc_reveal();
        let options = VisibilityOptions {
            threshold: cfg.threshold_or(&self.cfg),
            once: cfg.once,
        };
        let trigger = self.insert_trigger(&cfg.region, options, TriggerOwner::Reveal(id))?;
        self.reveals.push(RevealEntry {
            id,
            key: cfg.key,
            region: cfg.region,
            trigger,
            reveal,
        });
        Ok(id)
    }

    pub fn add_scroll_prompt(&mut self, cfg: PromptCfg) -> Result<PromptId> {
        self.claim_key(&cfg.key)?;
        let id = self.ids.alloc_prompt();
        let mut prompt = ScrollPrompt::from_cfg(&cfg, &self.cfg);
        prompt.on_scroll(self.viewport.scroll_y);
        self.prompts.push(PromptEntry {
            id,
            key: cfg.key,
            prompt,
        });
        Ok(id)
    }

    // ---- teardown -----------------------------------------------------------

    pub fn remove_scroll_range(&mut self, id: RangeId) -> bool {
        match self.ranges.iter().position(|r| r.id == id) {
            Some(pos) => {
                let entry = self.ranges.remove(pos);
                self.keys.remove(&entry.key);
                true
            }
            None => false,
        }
    }

    pub fn remove_counter(&mut self, id: CounterId) -> bool {
        match self.counters.iter().position(|c| c.stepper.id() == id) {
            Some(pos) => {
                let mut entry = self.counters.remove(pos);
                entry.stepper.teardown(&mut self.timers);
                self.drop_trigger(entry.trigger);
                self.keys.remove(&entry.key);
                log::debug!("counter {id:?} torn down");
                true
            }
            None => false,
        }
    }

    pub fn remove_carousel(&mut self, id: CarouselId) -> bool {
        match self.carousels.iter().position(|c| c.carousel.id() == id) {
            Some(pos) => {
                let mut entry = self.carousels.remove(pos);
                entry.carousel.teardown(&mut self.timers);
                self.keys.remove(&entry.key);
                log::debug!("carousel {id:?} torn down");
                true
            }
            None => false,
        }
    }

    pub fn remove_reveal(&mut self, id: RevealId) -> bool {
        match self.reveals.iter().position(|r| r.id == id) {
            Some(pos) => {
                let entry = self.reveals.remove(pos);
                self.drop_trigger(entry.trigger);
                self.keys.remove(&entry.key);
                true
            }
            None => false,
        }
    }

    pub fn remove_scroll_prompt(&mut self, id: PromptId) -> bool {
        match self.prompts.iter().position(|p| p.id == id) {
            Some(pos) => {
                let entry = self.prompts.remove(pos);
                self.keys.remove(&entry.key);
                true
            }
            None => false,
        }
    }

    /// Tear down everything animating `region`. Returns how many controllers
    /// (host triggers included) were removed.
    pub fn unmount_region(&mut self, region: &str) -> usize {
        let mut removed = 0;
        let counters: Vec<CounterId> = self
            .counters
            .iter()
            .filter(|c| c.region == region)
            .map(|c| c.stepper.id())
            .collect();
        for id in counters {
            removed += usize::from(self.remove_counter(id));
        }
        let reveals: Vec<RevealId> = self
            .reveals
            .iter()
            .filter(|r| r.region == region)
            .map(|r| r.id)
            .collect();
        for id in reveals {
            removed += usize::from(self.remove_reveal(id));
        }
        let ranges: Vec<RangeId> = self
            .ranges
            .iter()
            .filter(|r| r.range.region() == region)
            .map(|r| r.id)
            .collect();
        for id in ranges {
            removed += usize::from(self.remove_scroll_range(id));
        }
        let before = self.triggers.len();
        self.triggers
            .retain(|t| !(t.owner == TriggerOwner::Host && t.trigger.region() == region));
        removed += before - self.triggers.len();
        self.regions.remove(region);
        log::debug!("region {region:?} unmounted ({removed} controllers)");
        removed
    }

    // ---- accessors ----------------------------------------------------------

    pub fn trigger(&self, id: TriggerId) -> Option<&ViewportTrigger> {
        self.triggers.iter().find(|t| t.id == id).map(|t| &t.trigger)
    }

    pub fn scroll_range(&self, id: RangeId) -> Option<&ScrollRange> {
        self.ranges.iter().find(|r| r.id == id).map(|r| &r.range)
    }

    pub fn counter(&self, id: CounterId) -> Option<&CounterStepper> {
        self.counters
            .iter()
            .find(|c| c.stepper.id() == id)
            .map(|c| &c.stepper)
    }

    pub fn carousel(&self, id: CarouselId) -> Option<&Carousel<serde_json::Value>> {
        self.carousels
            .iter()
            .find(|c| c.carousel.id() == id)
            .map(|c| &c.carousel)
    }

    pub fn reveal(&self, id: RevealId) -> Option<&Reveal> {
        self.reveals.iter().find(|r| r.id == id).map(|r| &r.reveal)
    }

    pub fn scroll_prompt(&self, id: PromptId) -> Option<&ScrollPrompt> {
        self.prompts.iter().find(|p| p.id == id).map(|p| &p.prompt)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn now_ms(&self) -> f64 {
        self.timers.now_ms()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    // ---- stepping -----------------------------------------------------------

    /// Step the page by `dt_ms` with this frame's inputs.
    pub fn update(&mut self, dt_ms: f64, inputs: Inputs) -> &Outputs {
        self.outputs.clear();

        let Inputs {
            viewport,
            regions,
            removed_regions,
            carousel_cmds,
            counter_cmds,
            nav_cmds,
        } = inputs;

        // 1) Geometry
        for region in removed_regions {
            self.unmount_region(&region);
        }
        if let Some(vp) = viewport {
            self.viewport = vp;
            self.needs_measure = true;
        }
        for RegionGeometry { region, rect } in regions {
            self.regions.insert(region, rect);
            self.needs_measure = true;
        }

        if self.needs_measure {
            self.needs_measure = false;
            // 2) Visibility
            self.evaluate_triggers();
            // 3) Scroll ranges
            self.measure_ranges();
            // 4) Prompt
            self.check_prompts();
        }

        // 5) Commands
        for cmd in carousel_cmds {
            self.apply_carousel_cmd(cmd);
        }
        for cmd in counter_cmds {
            self.apply_counter_cmd(cmd);
        }
        for cmd in nav_cmds {
            self.apply_nav_cmd(cmd);
        }

        // 6) Timers
        self.run_timers(dt_ms);

        // 7) Tweens
        self.step_tweens(dt_ms);

        &self.outputs
    }

    /// Like `update`, but first pulls geometry for every observed region from
    /// `source`. Geometry in `inputs` wins over polled values.
    pub fn poll(&mut self, dt_ms: f64, source: &dyn GeometrySource, inputs: Inputs) -> &Outputs {
        let mut polled = Inputs {
            viewport: Some(source.viewport()),
            ..Inputs::default()
        };
        let mut observed: Vec<String> = Vec::new();
        let regions = self
            .triggers
            .iter()
            .map(|t| t.trigger.region())
            .chain(self.ranges.iter().map(|r| r.range.region()));
        for region in regions {
            if !observed.iter().any(|r| r == region) {
                observed.push(region.to_string());
            }
        }
        for region in observed {
            if let Some(rect) = source.region_rect(&region) {
                polled.regions.push(RegionGeometry { region, rect });
            }
        }
        let Inputs {
            viewport,
            regions,
            removed_regions,
            carousel_cmds,
            counter_cmds,
            nav_cmds,
        } = inputs;
        if viewport.is_some() {
            polled.viewport = viewport;
        }
        polled.regions.extend(regions);
        polled.removed_regions = removed_regions;
        polled.carousel_cmds = carousel_cmds;
        polled.counter_cmds = counter_cmds;
        polled.nav_cmds = nav_cmds;
        self.update(dt_ms, polled)
    }

    fn evaluate_triggers(&mut self) {
        let mut crossings: Vec<(TriggerId, TriggerOwner, bool)> = Vec::new();
        for entry in &mut self.triggers {
            let Some(rect) = self.regions.get(entry.trigger.region()) else {
                continue;
            };
            let ratio = intersection_ratio(rect, &self.viewport);
            if let Some(visible) = entry.trigger.observe_ratio(ratio) {
                self.outputs.push_event(MotionEvent::VisibilityChanged {
                    trigger: entry.id,
                    region: entry.trigger.region().to_string(),
                    visible,
                });
                crossings.push((entry.id, entry.owner, visible));
            }
        }
        for (trigger, owner, visible) in crossings {
            match owner {
                TriggerOwner::Host => {}
                TriggerOwner::Counter(id) => {
                    if !visible {
                        continue;
                    }
                    let Some(entry) = self
                        .counters
                        .iter_mut()
                        .find(|c| c.stepper.id() == id && c.trigger == trigger)
                    else {
                        continue;
                    };
                    if let Some(entrance) = entry.entrance.as_mut() {
                        entrance.set_shown(true);
                    }
                    if entry.stepper.phase() == CounterPhase::Idle {
                        self.outputs
                            .push_event(MotionEvent::CounterStarted { counter: id });
                        if let Some(value) = entry.stepper.start(&mut self.timers) {
                            push_counter(&mut self.outputs, &entry.key, &entry.stepper);
                            self.outputs.push_event(MotionEvent::CounterFinished {
                                counter: id,
                                value,
                            });
                        }
                    }
                }
                TriggerOwner::Reveal(id) => {
                    if let Some(entry) = self
                        .reveals
                        .iter_mut()
                        .find(|r| r.id == id && r.trigger == trigger)
                    {
                        entry.reveal.set_shown(visible);
                    }
                }
            }
        }
    }

    fn measure_ranges(&mut self) {
        let vh = self.viewport.height;
        for entry in &mut self.ranges {
            let Some(rect) = self.regions.get(entry.range.region()) else {
                continue;
            };
            if entry.range.measure(rect, vh) {
                self.outputs
                    .push_number(&entry.key, "progress", entry.range.progress() as f64);
                for (property, value) in entry.range.values() {
                    self.outputs.push_number(&entry.key, property, value as f64);
                }
            }
        }
    }

    fn check_prompts(&mut self) {
        let scroll_y = self.viewport.scroll_y;
        for entry in &mut self.prompts {
            if let Some(visible) = entry.prompt.on_scroll(scroll_y) {
                self.outputs.push_event(MotionEvent::PromptToggled {
                    prompt: entry.id,
                    visible,
                });
            }
        }
    }

    fn apply_carousel_cmd(&mut self, cmd: CarouselCommand) {
        let id = match &cmd {
            CarouselCommand::Next { carousel }
            | CarouselCommand::Prev { carousel }
            | CarouselCommand::JumpTo { carousel, .. }
            | CarouselCommand::SetAutoplay { carousel, .. }
            | CarouselCommand::SetInterval { carousel, .. }
            | CarouselCommand::SetItems { carousel, .. } => *carousel,
        };
        let Some(entry) = self.carousels.iter_mut().find(|c| c.carousel.id() == id) else {
            warn(&mut self.outputs, format!("unknown carousel {id:?}"));
            return;
        };
        let timers = &mut self.timers;
        let transition = match cmd {
            CarouselCommand::Next { .. } => entry.carousel.next(timers),
            CarouselCommand::Prev { .. } => entry.carousel.prev(timers),
            CarouselCommand::JumpTo { index, .. } => match entry.carousel.jump_to(index, timers) {
                Ok(t) => t,
                Err(e) => {
                    warn(&mut self.outputs, format!("carousel {id:?}: {e}"));
                    None
                }
            },
            CarouselCommand::SetAutoplay { enabled, .. } => {
                entry.carousel.set_autoplay(enabled, timers);
                None
            }
            CarouselCommand::SetInterval { interval_ms, .. } => {
                if let Err(e) = entry.carousel.set_interval(interval_ms, timers) {
                    warn(&mut self.outputs, format!("carousel {id:?}: {e}"));
                }
                None
            }
            CarouselCommand::SetItems { items, .. } => {
                if entry.carousel.set_items(items, timers) {
                    self.outputs.push_number(&entry.key, "index", 0.0);
                    self.outputs.push_number(&entry.key, "direction", 0.0);
                }
                None
            }
        };
        if let Some(t) = transition {
            push_transition(&mut self.outputs, id, &entry.key, t);
        }
    }

    fn apply_counter_cmd(&mut self, cmd: CounterCommand) {
        match cmd {
            CounterCommand::Retarget { counter, target } => {
                let Some(entry) = self
                    .counters
                    .iter_mut()
                    .find(|c| c.stepper.id() == counter)
                else {
                    warn(&mut self.outputs, format!("unknown counter {counter:?}"));
                    return;
                };
                match entry.stepper.retarget(target, &mut self.timers) {
                    Ok(Some(value)) => {
                        push_counter(&mut self.outputs, &entry.key, &entry.stepper);
                        self.outputs
                            .push_event(MotionEvent::CounterFinished { counter, value });
                    }
                    Ok(None) => {}
                    Err(e) => warn(&mut self.outputs, format!("counter {counter:?}: {e}")),
                }
            }
        }
    }

    fn apply_nav_cmd(&mut self, cmd: NavCommand) {
        match cmd {
            NavCommand::ScrollToTop => {
                self.outputs.push_event(MotionEvent::ScrollRequested {
                    top: 0.0,
                    smooth: true,
                });
            }
            NavCommand::ScrollToRegion { region } => match self.regions.get(&region) {
                Some(rect) => {
                    let top = (self.viewport.scroll_y + rect.top).max(0.0);
                    self.outputs
                        .push_event(MotionEvent::ScrollRequested { top, smooth: true });
                }
                None => warn(&mut self.outputs, format!("unknown region {region:?}")),
            },
            NavCommand::PromptClicked { prompt } => {
                if self.prompts.iter().any(|p| p.id == prompt) {
                    self.outputs.push_event(MotionEvent::ScrollRequested {
                        top: self.viewport.height,
                        smooth: true,
                    });
                } else {
                    warn(&mut self.outputs, format!("unknown prompt {prompt:?}"));
                }
            }
        }
    }

    fn run_timers(&mut self, dt_ms: f64) {
        let until = self.timers.now_ms() + dt_ms.max(0.0);
        while let Some(fired) = self.timers.pop_due(until) {
            let handled = match fired.kind {
                TimerKind::CounterTick(id) => self.fire_counter(id, &fired),
                TimerKind::Autoplay(id) => self.fire_autoplay(id, &fired),
            };
            if !handled {
                log::error!(
                    "timer {:?} ({:?}) fired without a live owner",
                    fired.id,
                    fired.kind
                );
                self.timers.cancel(fired.id);
                self.outputs.push_event(MotionEvent::TimerLeaked {
                    timer: fired.id,
                    kind: fired.kind,
                });
            }
        }
        self.timers.advance_to(until);
    }

    fn fire_counter(&mut self, id: CounterId, fired: &Fired) -> bool {
        let Some(entry) = self
            .counters
            .iter_mut()
            .find(|c| c.stepper.id() == id && c.stepper.owns(fired))
        else {
            return false;
        };
        if entry.stepper.tick(&mut self.timers).is_some() {
            push_counter(&mut self.outputs, &entry.key, &entry.stepper);
            if entry.stepper.phase() == CounterPhase::Done {
                self.outputs.push_event(MotionEvent::CounterFinished {
                    counter: id,
                    value: entry.stepper.current(),
                });
            }
        }
        true
    }

    fn fire_autoplay(&mut self, id: CarouselId, fired: &Fired) -> bool {
        let Some(entry) = self
            .carousels
            .iter_mut()
            .find(|c| c.carousel.id() == id && c.carousel.owns(fired))
        else {
            return false;
        };
        if let Some(t) = entry.carousel.on_autoplay(fired, &mut self.timers) {
            push_transition(&mut self.outputs, id, &entry.key, t);
        }
        true
    }

    fn step_tweens(&mut self, dt_ms: f64) {
        for entry in &mut self.reveals {
            if entry.reveal.step(dt_ms) {
                push_reveal(&mut self.outputs, &entry.key, &entry.reveal);
            }
        }
        for entry in &mut self.counters {
            if let Some(entrance) = entry.entrance.as_mut() {
                if entrance.step(dt_ms) {
                    push_reveal(&mut self.outputs, &entry.key, entrance);
                }
            }
        }
        for entry in &mut self.prompts {
            entry.prompt.step(dt_ms);
            self.outputs
                .push_number(&entry.key, "opacity", entry.prompt.opacity() as f64);
            self.outputs
                .push_number(&entry.key, "indicator_y", entry.prompt.indicator_y() as f64);
        }
    }
}

impl Default for MotionEngine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
