//! Visibility-started numeric counter.
//!
//! A counter steps its displayed value from where it stands up to `target`
//! on an interval timer. The tick interval is derived from the duration and
//! the target, bounded below by `min_step_ms`; the last tick always lands
//! exactly on the target.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{check_duration, check_threshold, MotionError, Result};
use crate::ids::CounterId;
use crate::timer::{Fired, TimerKind, TimerQueue, TimerSlot};

/// Declarative counter configuration. Unset fields fall back to [`Config`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CounterCfg {
    /// Output key prefix (`"<key>.value"`, `"<key>.text"`).
    pub key: String,
    pub region: String,
    pub target: f64,
    #[serde(default)]
    pub duration_ms: Option<f64>,
    #[serde(default)]
    pub decimals: u32,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    #[serde(default)]
    pub min_step_ms: Option<f64>,
    #[serde(default)]
    pub threshold: Option<f32>,
    /// Fade/scale the counter in when its trigger fires.
    #[serde(default = "default_entrance")]
    pub entrance: bool,
}

fn default_entrance() -> bool {
    true
}

impl CounterCfg {
    pub fn new(key: impl Into<String>, region: impl Into<String>, target: f64) -> Self {
        Self {
            key: key.into(),
            region: region.into(),
            target,
            duration_ms: None,
            decimals: 0,
            prefix: String::new(),
            suffix: String::new(),
            min_step_ms: None,
            threshold: None,
            entrance: true,
        }
    }

    pub fn with_duration(mut self, duration_ms: f64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_affixes(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self.suffix = suffix.into();
        self
    }

    pub fn duration_or(&self, cfg: &Config) -> f64 {
        self.duration_ms.unwrap_or(cfg.counter_duration_ms)
    }

    pub fn min_step_or(&self, cfg: &Config) -> f64 {
        self.min_step_ms.unwrap_or(cfg.min_step_ms)
    }

    pub fn threshold_or(&self, cfg: &Config) -> f32 {
        self.threshold.unwrap_or(cfg.counter_threshold)
    }

    pub fn validate(&self, cfg: &Config) -> Result<()> {
        check_target(self.target)?;
        check_duration("counter.duration_ms", self.duration_or(cfg))?;
        check_min_step(self.min_step_or(cfg))?;
        check_threshold(self.threshold_or(cfg))
    }
}

fn check_target(target: f64) -> Result<()> {
    if !target.is_finite() || target < 0.0 {
        return Err(MotionError::InvalidCounter {
            reason: format!("target must be a finite, non-negative number (got {target})"),
        });
    }
    Ok(())
}

fn check_min_step(min_step_ms: f64) -> Result<()> {
    if !min_step_ms.is_finite() || min_step_ms <= 0.0 {
        return Err(MotionError::InvalidCounter {
            reason: format!("min_step_ms must be positive (got {min_step_ms})"),
        });
    }
    Ok(())
}

/// Tick schedule for one counting run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CounterPlan {
    pub step_ms: f64,
    pub steps: u32,
    pub increment: f64,
}

impl CounterPlan {
    /// `None` for a zero target: there is nothing to step and no interval to derive.
    pub fn new(target: f64, duration_ms: f64, min_step_ms: f64) -> Option<Self> {
        if target <= 0.0 {
            return None;
        }
        // A subnormal target overflows the ratio; fall back to one step.
        let mut natural = (duration_ms / target).round();
        if !natural.is_finite() {
            natural = duration_ms;
        }
        let step_ms = natural.max(min_step_ms);
        let steps = ((duration_ms / step_ms).ceil() as u32).max(1);
        Some(Self {
            step_ms,
            steps,
            increment: target / steps as f64,
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CounterPhase {
    Idle,
    Running,
    Done,
}

/// Counter state plus its exclusively owned tick timer.
#[derive(Debug)]
pub struct CounterStepper {
    id: CounterId,
    target: f64,
    duration_ms: f64,
    min_step_ms: f64,
    decimals: u32,
    prefix: String,
    suffix: String,

    current: f64,
    run_from: f64,
    run_increment: f64,
    plan: Option<CounterPlan>,
    ticks: u32,
    phase: CounterPhase,
    slot: TimerSlot,
}

impl CounterStepper {
    pub fn new(id: CounterId, target: f64, duration_ms: f64, min_step_ms: f64) -> Result<Self> {
        check_target(target)?;
        check_duration("counter.duration_ms", duration_ms)?;
        check_min_step(min_step_ms)?;
        Ok(Self {
            id,
            target,
            duration_ms,
            min_step_ms,
            decimals: 0,
            prefix: String::new(),
            suffix: String::new(),
            current: 0.0,
            run_from: 0.0,
            run_increment: 0.0,
            plan: None,
            ticks: 0,
            phase: CounterPhase::Idle,
            slot: TimerSlot::new(),
        })
    }

    pub fn from_cfg(id: CounterId, cfg: &CounterCfg, defaults: &Config) -> Result<Self> {
        cfg.validate(defaults)?;
        let mut stepper = Self::new(
            id,
            cfg.target,
            cfg.duration_or(defaults),
            cfg.min_step_or(defaults),
        )?;
        stepper.decimals = cfg.decimals;
        stepper.prefix = cfg.prefix.clone();
        stepper.suffix = cfg.suffix.clone();
        Ok(stepper)
    }

    pub fn with_format(
        mut self,
        decimals: u32,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        self.decimals = decimals;
        self.prefix = prefix.into();
        self.suffix = suffix.into();
        self
    }

    pub fn id(&self) -> CounterId {
        self.id
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn phase(&self) -> CounterPhase {
        self.phase
    }

    pub fn plan(&self) -> Option<CounterPlan> {
        self.plan
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn is_timer_armed(&self) -> bool {
        self.slot.is_armed()
    }

    pub fn owns(&self, fired: &Fired) -> bool {
        self.slot.owns(fired)
    }

    /// Display string, e.g. `"$2.5M"` for prefix `$`, one decimal, suffix `M`.
    pub fn display_text(&self) -> String {
        format!(
            "{}{:.*}{}",
            self.prefix, self.decimals as usize, self.current, self.suffix
        )
    }

    /// Begin counting. Returns a value only when one is emitted immediately
    /// (zero target). Idempotent once running or done.
    pub fn start(&mut self, queue: &mut TimerQueue) -> Option<f64> {
        match self.phase {
            CounterPhase::Running | CounterPhase::Done => None,
            CounterPhase::Idle => self.begin_run(queue),
        }
    }

    fn begin_run(&mut self, queue: &mut TimerQueue) -> Option<f64> {
        self.slot.disarm(queue);
        self.ticks = 0;
        self.run_from = self.current;
        self.plan = CounterPlan::new(self.target, self.duration_ms, self.min_step_ms);
        match self.plan {
            None => {
                self.current = self.target;
                self.phase = CounterPhase::Done;
                log::debug!("counter {:?}: zero target, emitted immediately", self.id);
                Some(self.current)
            }
            Some(plan) => {
                self.run_increment = (self.target - self.run_from) / plan.steps as f64;
                self.phase = CounterPhase::Running;
                self.slot
                    .arm_interval(queue, plan.step_ms, TimerKind::CounterTick(self.id));
                log::debug!(
                    "counter {:?}: run {} -> {} in {} steps of {} ms",
                    self.id,
                    self.run_from,
                    self.target,
                    plan.steps,
                    plan.step_ms
                );
                None
            }
        }
    }

    /// Advance one step. The final step pins the value to the target and
    /// releases the timer.
    pub fn tick(&mut self, queue: &mut TimerQueue) -> Option<f64> {
        if self.phase != CounterPhase::Running {
            return None;
        }
        let plan = self.plan?;
        self.ticks += 1;
        if self.ticks >= plan.steps {
            self.current = self.target;
            self.phase = CounterPhase::Done;
            self.slot.disarm(queue);
            log::debug!("counter {:?}: reached {}", self.id, self.target);
        } else {
            let next = self.run_from + self.run_increment * self.ticks as f64;
            self.current = next.min(self.target).max(self.current);
            log::trace!("counter {:?}: tick {} -> {}", self.id, self.ticks, self.current);
        }
        Some(self.current)
    }

    /// Point the counter at a new target, cancelling any in-flight run first.
    ///
    /// A started counter resumes counting from its current value; a target
    /// below the current value is applied immediately.
    pub fn retarget(&mut self, target: f64, queue: &mut TimerQueue) -> Result<Option<f64>> {
        check_target(target)?;
        if target == self.target {
            return Ok(None);
        }
        self.slot.disarm(queue);
        self.target = target;
        match self.phase {
            CounterPhase::Idle => Ok(None),
            CounterPhase::Running | CounterPhase::Done => {
                if target <= self.current {
                    self.current = target;
                    self.phase = CounterPhase::Done;
                    Ok(Some(self.current))
                } else {
                    self.phase = CounterPhase::Idle;
                    Ok(self.begin_run(queue))
                }
            }
        }
    }

    /// Release the tick timer. Returns true if one was pending.
    pub fn teardown(&mut self, queue: &mut TimerQueue) -> bool {
        self.slot.disarm(queue)
    }
}
