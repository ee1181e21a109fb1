#![cfg(target_arch = "wasm32")]
use serde::Serialize;
use serde_json::json;
use serde_wasm_bindgen as swb;
use vantage_motion_wasm::{abi_version, VantageMotion};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn js(v: serde_json::Value) -> JsValue {
    v.serialize(&swb::Serializer::json_compatible()).unwrap()
}

fn rust(v: JsValue) -> serde_json::Value {
    swb::from_value(v).unwrap()
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn construct_with_defaults() {
    assert!(VantageMotion::new(JsValue::UNDEFINED).is_ok());
    assert!(VantageMotion::new(js(json!({ "carousel_interval_ms": 3000 }))).is_ok());
}

#[wasm_bindgen_test]
fn counter_counts_through_update() {
    let mut eng = VantageMotion::new(JsValue::NULL).unwrap();
    let id = eng
        .add_counter(js(json!({
            "key": "stats",
            "region": "stats",
            "target": 100,
            "duration_ms": 2000
        })))
        .unwrap();
    assert_eq!(id, 0);

    let geometry = json!({
        "viewport": { "width": 1280, "height": 800 },
        "regions": [{ "region": "stats", "rect": { "top": 100, "left": 0, "width": 400, "height": 200 } }]
    });
    eng.update(0.0, js(geometry)).unwrap();
    assert_eq!(eng.pending_timers(), 1);

    let out = rust(eng.update(2000.0, JsValue::UNDEFINED).unwrap());
    let changes = out["changes"].as_array().unwrap();
    let last = changes
        .iter()
        .rev()
        .find(|c| c["key"] == "stats.value")
        .unwrap();
    assert_eq!(last["value"].as_f64(), Some(100.0));
    assert_eq!(eng.pending_timers(), 0);
}

#[wasm_bindgen_test]
fn carousel_commands_round_trip() {
    let mut eng = VantageMotion::new(JsValue::NULL).unwrap();
    let id = eng
        .add_carousel(js(json!({ "key": "quotes", "items": [{ "q": "a" }, { "q": "b" }, { "q": "c" }, { "q": "d" }] })))
        .unwrap();
    let out = rust(
        eng.update(
            0.0,
            js(json!({ "carousel_cmds": [{ "Prev": { "carousel": id } }] })),
        )
        .unwrap(),
    );
    assert_eq!(eng.carousel_index(id), Some(3));
    let event = &out["events"][0]["CarouselTransition"];
    assert_eq!(event["direction"].as_f64(), Some(-1.0));
    assert!(eng.remove_carousel(id));
    assert_eq!(eng.pending_timers(), 0);
}

#[wasm_bindgen_test]
fn load_scene_returns_handles() {
    let mut eng = VantageMotion::new(JsValue::NULL).unwrap();
    let handles = rust(
        eng.load_scene(js(json!({
            "parallax": [{ "key": "hero.bg", "region": "hero" }],
            "prompts": [{ "key": "prompt" }]
        })))
        .unwrap(),
    );
    assert_eq!(handles["ranges"]["hero.bg"].as_f64(), Some(0.0));
    assert_eq!(handles["prompts"]["prompt"].as_f64(), Some(0.0));

    assert!(eng
        .load_scene(js(json!({ "prompts": [{ "key": "prompt" }] })))
        .is_err());
}

#[wasm_bindgen_test]
fn poll_measures_through_callback() {
    let mut eng = VantageMotion::new(JsValue::NULL).unwrap();
    eng.add_scroll_range(js(json!({
        "key": "hero",
        "region": "hero",
        "start": "start end",
        "end": "end start",
        "bindings": [{ "property": "y", "remap": [[0, 0], [1, 100]] }]
    })))
    .unwrap();
    let measure = js_sys::Function::new_with_args(
        "region",
        "return region === 'hero' ? { top: 200, left: 0, width: 1280, height: 400 } : null;",
    );
    let out = rust(
        eng.poll(
            16.0,
            js(json!({ "width": 1280, "height": 800 })),
            measure,
            JsValue::UNDEFINED,
        )
        .unwrap(),
    );
    let progress = out["changes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["key"] == "hero.progress")
        .unwrap();
    assert_eq!(progress["value"].as_f64(), Some(0.5));
}
