//! WASM bridge for the billiards table.
//!
//! wasm-bindgen cannot export a stateful struct with borrowed buffers
//! directly, so the runner lives in a `thread_local!` and every export is a
//! free function that borrows it. TypeScript reads the command and event
//! buffers straight out of wasm memory after each `billiards_tick`.

use std::cell::RefCell;

use billiards_core::{InputEvent, SimConfig};
use wasm_bindgen::prelude::*;

pub mod runner;

pub use runner::TableRunner;

thread_local! {
    static RUNNER: RefCell<Option<TableRunner>> = const { RefCell::new(None) };
}

fn with_runner<R>(f: impl FnOnce(&mut TableRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn start(config: SimConfig) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let mut runner = TableRunner::new(config);
    runner.init();
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("billiards: initialized");
}

/// Start a table with the default configuration.
#[wasm_bindgen]
pub fn billiards_init() {
    start(SimConfig::default());
}

/// Start a table from a JSON configuration. Falls back to the defaults when
/// the document does not parse.
#[wasm_bindgen]
pub fn billiards_init_with_config(json: &str) {
    let config = match SimConfig::from_json(json) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("billiards: bad config ({}), using defaults", err);
            SimConfig::default()
        }
    };
    start(config);
}

#[wasm_bindgen]
pub fn billiards_deinit() {
    with_runner(|r| r.deinit());
}

#[wasm_bindgen]
pub fn billiards_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn billiards_press_start(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PressStart { x, y }));
}

#[wasm_bindgen]
pub fn billiards_press_end(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PressEnd { x, y }));
}

#[wasm_bindgen]
pub fn billiards_reset() {
    with_runner(|r| r.push_input(InputEvent::Reset));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_commands_ptr() -> *const f32 {
    with_runner(|r| r.commands_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_command_count() -> u32 {
    with_runner(|r| r.command_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(|r| r.events_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.events_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_balls_remaining() -> u32 {
    with_runner(|r| r.balls_remaining()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_is_at_rest() -> bool {
    with_runner(|r| r.is_at_rest()).unwrap_or(true)
}

#[wasm_bindgen]
pub fn get_table_width() -> f32 {
    with_runner(|r| r.table_width()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_table_height() -> f32 {
    with_runner(|r| r.table_height()).unwrap_or(0.0)
}
