use wasm_bindgen::prelude::*;
use orrery_engine::*;

// Static data and state
mod bodies;
mod state;

// Simulation and controls
mod control;
mod interaction;
mod orbit;

// Main game controller
mod game;

use game::{events, SolarSystem};

orrery_web::export_game!(SolarSystem, "solar-system", vectors);

#[wasm_bindgen]
pub fn game_set_speed(index: u32, value: f32) {
    with_runner(|r| {
        r.push_input(InputEvent::Custom { kind: events::SET_SPEED, a: index as f32, b: value, c: 0.0 })
    });
}

#[wasm_bindgen]
pub fn game_toggle_pause() {
    with_runner(|r| {
        r.push_input(InputEvent::Custom { kind: events::TOGGLE_PAUSE, a: 0.0, b: 0.0, c: 0.0 })
    });
}

#[wasm_bindgen]
pub fn game_toggle_theme() {
    with_runner(|r| {
        r.push_input(InputEvent::Custom { kind: events::TOGGLE_THEME, a: 0.0, b: 0.0, c: 0.0 })
    });
}

#[wasm_bindgen]
pub fn game_resize(width: f32, height: f32) {
    with_runner(|r| {
        r.push_input(InputEvent::Custom { kind: events::RESIZE, a: width, b: height, c: 0.0 })
    });
}

/// Body catalog for building the slider list. Empty string on failure.
#[wasm_bindgen]
pub fn get_body_catalog_json() -> String {
    with_runner(|r| match r.game().catalog_json() {
        Ok(json) => json,
        Err(e) => {
            log::error!("catalog serialization failed: {}", e);
            String::new()
        }
    })
}

#[wasm_bindgen]
pub fn get_session_json() -> String {
    with_runner(|r| match r.game().session_json() {
        Ok(json) => json,
        Err(e) => {
            log::error!("session serialization failed: {}", e);
            String::new()
        }
    })
}
