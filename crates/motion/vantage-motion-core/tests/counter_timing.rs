use vantage_motion_core::{
    config::Config,
    counter::{CounterCfg, CounterPhase},
    engine::MotionEngine,
    geometry::{Rect, Viewport},
    inputs::{CounterCommand, Inputs},
    outputs::{MotionEvent, MotionValue},
    CounterId,
};

fn in_view() -> Inputs {
    Inputs::default()
        .with_viewport(Viewport::default())
        .with_region("stats", Rect::new(100.0, 0.0, 400.0, 200.0))
}

fn engine_with(cfg: CounterCfg) -> (MotionEngine, CounterId) {
    let mut engine = MotionEngine::new(Config::default());
    let id = engine.add_counter(cfg).unwrap();
    (engine, id)
}

#[test]
fn hundred_over_two_seconds_lands_on_target_after_forty_ticks() {
    let (mut engine, id) = engine_with(CounterCfg::new("clients", "stats", 100.0).with_duration(2000.0));

    let out = engine.update(0.0, in_view());
    assert!(out
        .events
        .contains(&MotionEvent::CounterStarted { counter: id }));
    assert!(out.value("clients.value").is_none());
    assert_eq!(engine.pending_timers(), 1);

    let out = engine.update(50.0, Inputs::default());
    assert_eq!(out.value("clients.value"), Some(&MotionValue::Number(2.5)));

    let out = engine.update(1950.0, Inputs::default());
    let ticks = out
        .changes
        .iter()
        .filter(|c| c.key == "clients.value")
        .count();
    assert_eq!(ticks, 39);
    assert_eq!(out.value("clients.value"), Some(&MotionValue::Number(100.0)));
    assert_eq!(out.value("clients.text").and_then(|v| v.as_str()), Some("100"));
    assert!(out.events.contains(&MotionEvent::CounterFinished {
        counter: id,
        value: 100.0
    }));

    let counter = engine.counter(id).unwrap();
    assert_eq!(counter.ticks(), 40);
    assert_eq!(counter.phase(), CounterPhase::Done);
    assert_eq!(engine.pending_timers(), 0);
}

#[test]
fn values_never_decrease_and_never_overshoot() {
    let (mut engine, id) = engine_with(CounterCfg::new("c", "stats", 7.0).with_duration(1000.0));
    engine.update(0.0, in_view());
    let mut last = 0.0;
    for _ in 0..100 {
        let out = engine.update(16.0, Inputs::default());
        if let Some(v) = out.value("c.value").and_then(|v| v.as_f64()) {
            assert!(v >= last);
            assert!(v <= 7.0);
            last = v;
        }
    }
    assert_eq!(engine.counter(id).unwrap().current(), 7.0);
}

#[test]
fn zero_target_emits_once_without_a_timer() {
    let (mut engine, id) = engine_with(CounterCfg::new("awards", "stats", 0.0));
    let out = engine.update(0.0, in_view());
    let emitted = out
        .changes
        .iter()
        .filter(|c| c.key == "awards.value")
        .count();
    assert_eq!(emitted, 1);
    assert_eq!(out.value("awards.value"), Some(&MotionValue::Number(0.0)));
    assert!(out.events.contains(&MotionEvent::CounterFinished {
        counter: id,
        value: 0.0
    }));
    assert_eq!(engine.pending_timers(), 0);

    let out = engine.update(5000.0, Inputs::default());
    assert!(out.value("awards.value").is_none());
}

#[test]
fn counter_waits_for_half_visibility() {
    let (mut engine, _) = engine_with(CounterCfg::new("c", "stats", 10.0));
    // 100 of 400 px visible.
    let peeking = Inputs::default()
        .with_viewport(Viewport::default())
        .with_region("stats", Rect::new(700.0, 0.0, 400.0, 400.0));
    engine.update(0.0, peeking);
    assert_eq!(engine.pending_timers(), 0);

    let half = Inputs::default().with_region("stats", Rect::new(600.0, 0.0, 400.0, 400.0));
    engine.update(0.0, half);
    assert_eq!(engine.pending_timers(), 1);
}

#[test]
fn counter_starts_only_once() {
    let (mut engine, id) = engine_with(CounterCfg::new("c", "stats", 10.0));
    engine.update(0.0, in_view());
    let away = Inputs::default().with_region("stats", Rect::new(-2000.0, 0.0, 400.0, 200.0));
    engine.update(0.0, away);
    let out = engine.update(0.0, in_view());
    assert!(!out
        .events
        .contains(&MotionEvent::CounterStarted { counter: id }));
    assert_eq!(engine.pending_timers(), 1);
}

#[test]
fn retarget_cancels_the_in_flight_run() {
    let (mut engine, id) = engine_with(CounterCfg::new("c", "stats", 100.0).with_duration(2000.0));
    engine.update(0.0, in_view());
    engine.update(500.0, Inputs::default());
    assert_eq!(engine.counter(id).unwrap().current(), 25.0);

    let retarget = Inputs {
        counter_cmds: vec![CounterCommand::Retarget {
            counter: id,
            target: 200.0,
        }],
        ..Inputs::default()
    };
    engine.update(0.0, retarget);
    assert_eq!(engine.pending_timers(), 1);
    assert_eq!(engine.counter(id).unwrap().ticks(), 0);

    let out = engine.update(50.0, Inputs::default());
    let v = out.value("c.value").and_then(|v| v.as_f64()).unwrap();
    assert!(v > 25.0 && v < 30.0);

    engine.update(2000.0, Inputs::default());
    assert_eq!(engine.counter(id).unwrap().current(), 200.0);
    assert_eq!(engine.pending_timers(), 0);
}

#[test]
fn lower_retarget_snaps() {
    let (mut engine, id) = engine_with(CounterCfg::new("c", "stats", 100.0).with_duration(2000.0));
    engine.update(0.0, in_view());
    engine.update(1000.0, Inputs::default());

    let retarget = Inputs {
        counter_cmds: vec![CounterCommand::Retarget {
            counter: id,
            target: 10.0,
        }],
        ..Inputs::default()
    };
    let out = engine.update(0.0, retarget);
    assert_eq!(out.value("c.value"), Some(&MotionValue::Number(10.0)));
    assert_eq!(engine.pending_timers(), 0);
}

#[test]
fn formatted_text_uses_affixes_and_decimals() {
    let cfg = CounterCfg::new("rev", "stats", 2.5)
        .with_decimals(1)
        .with_affixes("$", "M");
    let (mut engine, _) = engine_with(cfg);
    engine.update(0.0, in_view());
    let out = engine.update(5000.0, Inputs::default());
    assert_eq!(out.value("rev.text").and_then(|v| v.as_str()), Some("$2.5M"));
}

#[test]
fn entrance_pops_in_alongside_counting() {
    let (mut engine, _) = engine_with(CounterCfg::new("c", "stats", 10.0));
    engine.update(0.0, in_view());
    let out = engine.update(400.0, Inputs::default());
    let opacity = out.value("c.opacity").and_then(|v| v.as_f64()).unwrap();
    let scale = out.value("c.scale").and_then(|v| v.as_f64()).unwrap();
    assert!((opacity - 1.0).abs() < 1e-6);
    assert!((scale - 1.0).abs() < 1e-6);
}

#[test]
fn final_value_is_exact_across_targets_and_durations() {
    use vantage_motion_core::timer::TimerQueue;
    use vantage_motion_core::CounterStepper;

    for target in [1.0, 3.0, 7.0, 42.0, 99.0, 100.0, 1234.0, 98_765.0] {
        for duration in [50.0, 120.0, 999.0, 2000.0, 3500.0] {
            let mut q = TimerQueue::new();
            let mut c = CounterStepper::new(CounterId(0), target, duration, 50.0).unwrap();
            c.start(&mut q);
            let plan = c.plan().unwrap();
            let mut last = 0.0;
            while let Some(fired) = q.pop_due(f64::MAX) {
                assert!(c.owns(&fired));
                last = c.tick(&mut q).unwrap();
            }
            assert_eq!(last, target, "target {target} over {duration} ms");
            assert_eq!(c.ticks(), plan.steps);
            assert_eq!(q.pending(), 0);
        }
    }
}

#[test]
fn fractional_target_waits_the_full_ratio_before_its_single_tick() {
    let (mut engine, id) = engine_with(CounterCfg::new("ratio", "stats", 0.5).with_duration(2000.0));
    engine.update(0.0, in_view());
    assert_eq!(engine.counter(id).unwrap().plan().unwrap().step_ms, 4000.0);

    let out = engine.update(3999.0, Inputs::default());
    assert!(out.value("ratio.value").is_none());
    assert_eq!(engine.pending_timers(), 1);

    let out = engine.update(1.0, Inputs::default());
    assert_eq!(out.value("ratio.value"), Some(&MotionValue::Number(0.5)));
    assert!(out.events.contains(&MotionEvent::CounterFinished {
        counter: id,
        value: 0.5
    }));
    assert_eq!(engine.pending_timers(), 0);
}
