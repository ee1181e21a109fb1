use serde_json::json;
use vantage_motion_core::{
    carousel::CarouselCfg,
    counter::CounterCfg,
    engine::MotionEngine,
    geometry::{Rect, Viewport},
    inputs::Inputs,
    outputs::MotionEvent,
    reveal::RevealCfg,
    visibility::VisibilityOptions,
};

fn visible(region: &str) -> Inputs {
    Inputs::default()
        .with_viewport(Viewport::default())
        .with_region(region, Rect::new(100.0, 0.0, 400.0, 200.0))
}

fn leaked(events: &[MotionEvent]) -> bool {
    events
        .iter()
        .any(|e| matches!(e, MotionEvent::TimerLeaked { .. }))
}

#[test]
fn unmounting_a_region_cancels_its_timers() {
    let mut engine = MotionEngine::default();
    engine
        .add_counter(CounterCfg::new("a", "stats", 1000.0).with_duration(10_000.0))
        .unwrap();
    engine
        .add_counter(CounterCfg::new("b", "stats", 50.0))
        .unwrap();
    engine.update(0.0, visible("stats"));
    engine.update(300.0, Inputs::default());
    assert_eq!(engine.pending_timers(), 2);

    let removed = Inputs {
        removed_regions: vec!["stats".into()],
        ..Inputs::default()
    };
    engine.update(0.0, removed);
    assert_eq!(engine.pending_timers(), 0);

    let out = engine.update(60_000.0, Inputs::default());
    assert!(!leaked(&out.events));
    assert!(out.is_empty());
}

#[test]
fn removing_controllers_releases_keys_and_timers() {
    let mut engine = MotionEngine::default();
    let carousel = engine
        .add_carousel(CarouselCfg::new("quotes", vec![json!(1), json!(2)]))
        .unwrap();
    let counter = engine
        .add_counter(CounterCfg::new("count", "stats", 10.0))
        .unwrap();
    engine.update(0.0, visible("stats"));
    assert_eq!(engine.pending_timers(), 2);

    assert!(engine.remove_carousel(carousel));
    assert!(engine.remove_counter(counter));
    assert!(!engine.remove_carousel(carousel));
    assert_eq!(engine.pending_timers(), 0);

    let out = engine.update(30_000.0, Inputs::default());
    assert!(!leaked(&out.events));

    // Keys are free again.
    engine
        .add_carousel(CarouselCfg::new("quotes", vec![json!(1)]))
        .unwrap();
}

#[test]
fn host_triggers_report_every_crossing_until_unobserved() {
    let mut engine = MotionEngine::default();
    let trigger = engine
        .observe("hero", VisibilityOptions::repeating(0.0))
        .unwrap();
    let away = Inputs::default().with_region("hero", Rect::new(-900.0, 0.0, 400.0, 400.0));

    let out = engine.update(0.0, visible("hero"));
    assert!(out.events.contains(&MotionEvent::VisibilityChanged {
        trigger,
        region: "hero".into(),
        visible: true
    }));
    let out = engine.update(0.0, away.clone());
    assert!(out.events.contains(&MotionEvent::VisibilityChanged {
        trigger,
        region: "hero".into(),
        visible: false
    }));

    assert!(engine.unobserve(trigger));
    let out = engine.update(0.0, visible("hero"));
    assert!(out.events.is_empty());
}

#[test]
fn once_trigger_latches_after_first_crossing() {
    let mut engine = MotionEngine::default();
    let trigger = engine.observe("hero", VisibilityOptions::once(0.0)).unwrap();
    engine.update(0.0, visible("hero"));
    let away = Inputs::default().with_region("hero", Rect::new(-900.0, 0.0, 400.0, 400.0));
    let out = engine.update(0.0, away);
    assert!(out.events.is_empty());
    let t = engine.trigger(trigger).unwrap();
    assert!(t.is_visible());
    assert!(t.is_released());
}

#[test]
fn repeating_reveal_reverses_when_leaving_view() {
    let mut engine = MotionEngine::default();
    let mut cfg = RevealCfg::new("card", "card").track("opacity", 0.0, 1.0);
    cfg.once = false;
    let id = engine.add_reveal(cfg).unwrap();

    engine.update(0.0, visible("card"));
    engine.update(500.0, Inputs::default());
    assert_eq!(engine.reveal(id).unwrap().progress(), 1.0);

    let away = Inputs::default().with_region("card", Rect::new(-900.0, 0.0, 400.0, 200.0));
    engine.update(0.0, away);
    engine.update(250.0, Inputs::default());
    assert!((engine.reveal(id).unwrap().progress() - 0.5).abs() < 1e-6);
}
