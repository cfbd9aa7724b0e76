pub mod runner;

use std::cell::RefCell;

use glam::Vec3;
use stellar_core::{ComposerInput, SystemId};
use wasm_bindgen::prelude::*;

pub use runner::ComposerRunner;

thread_local! {
    static RUNNER: RefCell<Option<ComposerRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the page's runner. Before `composer_init` every export
/// logs and returns the fallback instead of panicking.
fn with_runner<R>(fallback: R, f: impl FnOnce(&mut ComposerRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => {
            log::warn!("stellar-web: composer not initialized, call composer_init() first");
            fallback
        }
    })
}

/// Create the composer. `config_json` may be empty for defaults.
/// Returns false if the config is rejected; the previous composer (if any) is kept.
#[wasm_bindgen]
pub fn composer_init(config_json: &str) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    match ComposerRunner::from_config_json(config_json) {
        Ok(runner) => {
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("stellar-web: composer initialized");
            true
        }
        Err(err) => {
            log::error!("stellar-web: {err}");
            false
        }
    }
}

#[wasm_bindgen]
pub fn composer_tick(dt: f32) {
    with_runner((), |r| r.tick(dt));
}

// ---- Navigation (applied on the next tick) ----

#[wasm_bindgen]
pub fn composer_select_system(id: &str) {
    with_runner((), |r| r.push_input(ComposerInput::SelectSystem(SystemId::new(id))));
}

#[wasm_bindgen]
pub fn composer_go_idle() {
    with_runner((), |r| r.push_input(ComposerInput::GoIdle));
}

#[wasm_bindgen]
pub fn composer_go_create() {
    with_runner((), |r| r.push_input(ComposerInput::GoCreate));
}

#[wasm_bindgen]
pub fn composer_set_camera_lock(locked: bool) {
    with_runner((), |r| r.push_input(ComposerInput::SetCameraLock(locked)));
}

// ---- Data loader ----

/// Feed a system record fetched by the page. Returns false on malformed JSON.
#[wasm_bindgen]
pub fn composer_load_system(json: &str) -> bool {
    with_runner(false, |r| r.load_system_json(json))
}

#[wasm_bindgen]
pub fn composer_system_load_failed(id: &str, reason: &str) {
    with_runner((), |r| r.system_load_failed(id, reason));
}

// ---- Camera ----

/// Apply a pose from the page's orbit controls. Returns false during a transition.
#[wasm_bindgen]
pub fn composer_set_camera(ex: f32, ey: f32, ez: f32, lx: f32, ly: f32, lz: f32) -> bool {
    with_runner(false, |r| r.set_camera(Vec3::new(ex, ey, ez), Vec3::new(lx, ly, lz)))
}

/// Eye xyz followed by look-at xyz.
#[wasm_bindgen]
pub fn composer_camera_pose() -> js_sys::Float32Array {
    with_runner(js_sys::Float32Array::new_with_length(0), |r| {
        js_sys::Float32Array::from(&r.camera_pose()[..])
    })
}

#[wasm_bindgen]
pub fn composer_camera_distance() -> f32 {
    with_runner(0.0, |r| r.camera_distance())
}

#[wasm_bindgen]
pub fn composer_is_camera_moving() -> bool {
    with_runner(false, |r| r.is_camera_moving())
}

// ---- View state ----

/// 0 = idle, 1 = viewing, 2 = creating.
#[wasm_bindgen]
pub fn composer_mode() -> u32 {
    with_runner(0, |r| r.mode_code())
}

#[wasm_bindgen]
pub fn composer_selected_system() -> String {
    with_runner(String::new(), |r| r.selected_system())
}

/// Events since the last call, as a JSON array.
#[wasm_bindgen]
pub fn composer_drain_events() -> String {
    with_runner(String::from("[]"), |r| r.drain_events_json())
}

// ---- Body placements ----

#[wasm_bindgen]
pub fn get_placements_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.placements_ptr())
}

#[wasm_bindgen]
pub fn get_placement_count() -> u32 {
    with_runner(0, |r| r.placement_count())
}

/// Guide ring for body `index` as flat xyz triples.
#[wasm_bindgen]
pub fn composer_orbit_guide(index: usize) -> js_sys::Float32Array {
    with_runner(js_sys::Float32Array::new_with_length(0), |r| {
        js_sys::Float32Array::from(&r.orbit_guide(index)[..])
    })
}
