use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vantage_motion_core::{
    engine::MotionEngine,
    geometry::{Rect, Viewport},
    inputs::Inputs,
    scene::parse_scene_json,
};
use vantage_test_fixtures::scenes;

fn frame(scroll_y: f32) -> Inputs {
    let sections = [
        "hero", "about", "services", "stats", "story.0", "story.1", "story.2", "cta",
    ];
    let mut inputs = Inputs::default().with_viewport(Viewport {
        scroll_y,
        ..Viewport::default()
    });
    for (i, name) in sections.iter().enumerate() {
        let top = i as f32 * 600.0 - scroll_y;
        inputs = inputs.with_region(*name, Rect::new(top, 0.0, 1280.0, 500.0));
    }
    inputs
}

fn bench_landing_scroll(c: &mut Criterion) {
    let json = scenes::json("landing").expect("landing fixture");
    let spec = parse_scene_json(&json).expect("landing scene");

    c.bench_function("landing_scroll_frame", |b| {
        let mut engine = MotionEngine::default();
        engine.load_scene(&spec).expect("load");
        let mut scroll = 0.0f32;
        b.iter(|| {
            scroll = (scroll + 7.0) % 4800.0;
            let out = engine.update(16.0, frame(scroll));
            black_box(out.changes.len());
        })
    });

    c.bench_function("landing_idle_frame", |b| {
        let mut engine = MotionEngine::default();
        engine.load_scene(&spec).expect("load");
        engine.update(0.0, frame(0.0));
        b.iter(|| {
            let out = engine.update(16.0, Inputs::default());
            black_box(out.changes.len());
        })
    });
}

criterion_group!(benches, bench_landing_scroll);
criterion_main!(benches);
