use js_sys::{Function, JSON};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use vantage_motion_core::{
    parse_scene_json, CarouselCfg, CarouselId, Config, CounterCfg, CounterId, GeometrySource,
    Inputs, MotionEngine, MotionError, Outputs, PromptCfg, PromptId, RangeId, Rect, RevealCfg,
    RevealId, ScrollRangeCfg, TriggerId, Viewport, VisibilityOptions,
};

#[wasm_bindgen]
pub struct VantageMotion {
    core: MotionEngine,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsError> {
    swb::from_value(value).map_err(|e| JsError::new(&format!("{what} error: {e}")))
}

fn from_js_or_default<T: DeserializeOwned + Default>(
    value: JsValue,
    what: &str,
) -> Result<T, JsError> {
    if jsvalue_is_undefined_or_null(&value) {
        Ok(T::default())
    } else {
        from_js(value, what)
    }
}

/// Plain objects rather than `Map`s, so hosts can index results by key.
fn to_js<T: Serialize>(value: &T, what: &str) -> Result<JsValue, JsError> {
    value
        .serialize(&swb::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("{what} error: {e}")))
}

fn core_err(e: MotionError) -> JsError {
    JsError::new(&e.to_string())
}

/// Geometry pulled from the page through a JS callback.
struct JsGeometry {
    viewport: Viewport,
    measure: Function,
}

impl GeometrySource for JsGeometry {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn region_rect(&self, region: &str) -> Option<Rect> {
        // measure(region) -> { top, left, width, height } | null/undefined
        let arg = JsValue::from_str(region);
        match self.measure.call1(&JsValue::UNDEFINED, &arg) {
            Ok(val) if !jsvalue_is_undefined_or_null(&val) => swb::from_value(val).ok(),
            _ => None,
        }
    }
}

#[wasm_bindgen]
impl VantageMotion {
    /// Create a new engine instance. Pass a JSON config object or undefined/null for defaults.
    /// Example:
    ///   new VantageMotion({ carousel_interval_ms: 6000 })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<VantageMotion, JsError> {
        console_error_panic_hook::set_once();
        let cfg: Config = from_js_or_default(config, "config")?;
        Ok(VantageMotion {
            core: MotionEngine::new(cfg),
        })
    }

    /// Load a whole page scene. Returns `{ triggers, ranges, counters, ... }`
    /// mapping every declared key to its numeric handle.
    #[wasm_bindgen(js_name = load_scene)]
    pub fn load_scene(&mut self, scene: JsValue) -> Result<JsValue, JsError> {
        if jsvalue_is_undefined_or_null(&scene) {
            return Err(JsError::new("load_scene: scene is null/undefined"));
        }
        // Stringify so scene errors come from the core parser.
        let s = JSON::stringify(&scene)
            .map_err(|e| JsError::new(&format!("load_scene stringify error: {:?}", e)))?
            .as_string()
            .ok_or_else(|| JsError::new("load_scene: stringify produced non-string"))?;
        let spec = parse_scene_json(&s).map_err(core_err)?;
        let handles = self.core.load_scene(&spec).map_err(core_err)?;
        to_js(&handles, "scene handles")
    }

    /// Subscribe to a region's visibility. `options` is `{ threshold, once }` or undefined.
    #[wasm_bindgen]
    pub fn observe(&mut self, region: String, options: JsValue) -> Result<u32, JsError> {
        let options: VisibilityOptions = from_js_or_default(options, "visibility options")?;
        let id: TriggerId = self.core.observe(&region, options).map_err(core_err)?;
        Ok(id.0)
    }

    #[wasm_bindgen]
    pub fn unobserve(&mut self, trigger: u32) -> bool {
        self.core.unobserve(TriggerId(trigger))
    }

    #[wasm_bindgen(js_name = add_scroll_range)]
    pub fn add_scroll_range(&mut self, cfg: JsValue) -> Result<u32, JsError> {
        let cfg: ScrollRangeCfg = from_js(cfg, "scroll range cfg")?;
        let id: RangeId = self.core.add_scroll_range(cfg).map_err(core_err)?;
        Ok(id.0)
    }

    #[wasm_bindgen(js_name = add_counter)]
    pub fn add_counter(&mut self, cfg: JsValue) -> Result<u32, JsError> {
        let cfg: CounterCfg = from_js(cfg, "counter cfg")?;
        let id: CounterId = self.core.add_counter(cfg).map_err(core_err)?;
        Ok(id.0)
    }

    #[wasm_bindgen(js_name = add_carousel)]
    pub fn add_carousel(&mut self, cfg: JsValue) -> Result<u32, JsError> {
        let cfg: CarouselCfg = from_js(cfg, "carousel cfg")?;
        let id: CarouselId = self.core.add_carousel(cfg).map_err(core_err)?;
        Ok(id.0)
    }

    #[wasm_bindgen(js_name = add_reveal)]
    pub fn add_reveal(&mut self, cfg: JsValue) -> Result<u32, JsError> {
        let cfg: RevealCfg = from_js(cfg, "reveal cfg")?;
        let id: RevealId = self.core.add_reveal(cfg).map_err(core_err)?;
        Ok(id.0)
    }

    #[wasm_bindgen(js_name = add_scroll_prompt)]
    pub fn add_scroll_prompt(&mut self, cfg: JsValue) -> Result<u32, JsError> {
        let cfg: PromptCfg = from_js(cfg, "prompt cfg")?;
        let id: PromptId = self.core.add_scroll_prompt(cfg).map_err(core_err)?;
        Ok(id.0)
    }

    #[wasm_bindgen(js_name = remove_scroll_range)]
    pub fn remove_scroll_range(&mut self, id: u32) -> bool {
        self.core.remove_scroll_range(RangeId(id))
    }

    #[wasm_bindgen(js_name = remove_counter)]
    pub fn remove_counter(&mut self, id: u32) -> bool {
        self.core.remove_counter(CounterId(id))
    }

    #[wasm_bindgen(js_name = remove_carousel)]
    pub fn remove_carousel(&mut self, id: u32) -> bool {
        self.core.remove_carousel(CarouselId(id))
    }

    #[wasm_bindgen(js_name = remove_reveal)]
    pub fn remove_reveal(&mut self, id: u32) -> bool {
        self.core.remove_reveal(RevealId(id))
    }

    #[wasm_bindgen(js_name = remove_scroll_prompt)]
    pub fn remove_scroll_prompt(&mut self, id: u32) -> bool {
        self.core.remove_scroll_prompt(PromptId(id))
    }

    /// Tear down everything attached to a region (call when its element unmounts).
    #[wasm_bindgen(js_name = unmount_region)]
    pub fn unmount_region(&mut self, region: String) -> u32 {
        self.core.unmount_region(&region) as u32
    }

    /// Current carousel index, or undefined for an unknown handle.
    #[wasm_bindgen(js_name = carousel_index)]
    pub fn carousel_index(&self, id: u32) -> Option<u32> {
        self.core
            .carousel(CarouselId(id))
            .map(|c| c.current_index() as u32)
    }

    #[wasm_bindgen(js_name = pending_timers)]
    pub fn pending_timers(&self) -> u32 {
        self.core.pending_timers() as u32
    }

    #[wasm_bindgen(js_name = now_ms)]
    pub fn now_ms(&self) -> f64 {
        self.core.now_ms()
    }

    /// Step the page by dt (milliseconds) with inputs JSON. Returns Outputs JSON.
    #[wasm_bindgen]
    pub fn update(&mut self, dt_ms: f64, inputs_json: JsValue) -> Result<JsValue, JsError> {
        let inputs: Inputs = from_js_or_default(inputs_json, "inputs")?;
        let out: &Outputs = self.core.update(dt_ms, inputs);
        to_js(out, "outputs")
    }

    /// Like `update`, but measures every observed region first.
    /// `measure(region: string)` returns a rect `{ top, left, width, height }`
    /// relative to the viewport, or null/undefined when the region is not mounted.
    #[wasm_bindgen]
    pub fn poll(
        &mut self,
        dt_ms: f64,
        viewport: JsValue,
        measure: Function,
        inputs_json: JsValue,
    ) -> Result<JsValue, JsError> {
        let viewport: Viewport = from_js_or_default(viewport, "viewport")?;
        let inputs: Inputs = from_js_or_default(inputs_json, "inputs")?;
        let source = JsGeometry { viewport, measure };
        let out: &Outputs = self.core.poll(dt_ms, &source, inputs);
        to_js(out, "outputs")
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
