//! Browser binding
//!
//! The page owns the canvas and the `requestAnimationFrame` loop; it forwards
//! DOM events here, calls `tick` once per frame and draws from `snapshot_json`.

use std::str::FromStr;

use glam::Vec2;
use wasm_bindgen::prelude::*;

use super::input::InputState;
use crate::settings::{SimConfig, Variant};
use crate::sim::{GameState, Key, tick};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // Already initialized when several modules load
    console_log::init_with_level(log::Level::Info).ok();
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// One simulation instance driven by the page
#[wasm_bindgen]
pub struct WebSimulation {
    state: GameState,
    input: InputState,
}

impl WebSimulation {
    fn build(config: SimConfig) -> Result<WebSimulation, JsValue> {
        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(config, seed).map_err(to_js)?;
        Ok(WebSimulation {
            state,
            input: InputState::new(),
        })
    }
}

#[wasm_bindgen]
impl WebSimulation {
    /// Build from a preset name (`alien_defence`, `attack_on_turrets`, `space_dodge`)
    #[wasm_bindgen(constructor)]
    pub fn new(variant: &str, width: f32, height: f32) -> Result<WebSimulation, JsValue> {
        let variant = Variant::from_str(variant).map_err(to_js)?;
        let config = SimConfig::from_preset(variant).with_playfield(width, height);
        Self::build(config)
    }

    /// Build from a JSON config
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<WebSimulation, JsValue> {
        let config = SimConfig::from_json(json).map_err(to_js)?;
        Self::build(config)
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.input.pointer_move(Vec2::new(x, y));
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.input.pointer_down(Vec2::new(x, y));
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) {
        self.input.pointer_up();
    }

    /// `KeyboardEvent.key`; unknown keys are ignored
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str) {
        if let Some(key) = Key::from_dom(key) {
            self.input.key_down(key);
        }
    }

    #[wasm_bindgen(js_name = keyUp)]
    pub fn key_up(&mut self, key: &str) {
        if let Some(key) = Key::from_dom(key) {
            self.input.key_up(key);
        }
    }

    /// Window lost focus
    pub fn blur(&mut self) {
        self.input.clear();
    }

    pub fn tick(&mut self) {
        let input = self.input.take();
        tick(&mut self.state, &input);
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn phase(&self) -> String {
        self.state.phase().as_str().to_string()
    }

    pub fn score(&self) -> f64 {
        self.state.score as f64
    }

    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.snapshot()).map_err(to_js)
    }

    /// Events since the last call
    #[wasm_bindgen(js_name = eventsJson)]
    pub fn events_json(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.drain_events()).map_err(to_js)
    }
}
