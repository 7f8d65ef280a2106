//! wasm-bindgen exports driving one [`Studio`] from the browser.
//!
//! JS calls `studio_init` once, then `studio_tick(dt)` from
//! `requestAnimationFrame`, forwarding pointer events and settings as they
//! happen. After each tick it blits the canvas and overlay buffers, read
//! straight out of wasm memory through the pointer accessors.

use std::cell::RefCell;

use glowpaint::{InputEvent, PenKind, Studio, StudioConfig, StudioError};
use wasm_bindgen::prelude::*;

thread_local! {
    static STUDIO: RefCell<Option<Studio>> = const { RefCell::new(None) };
}

/// Run `f` against the live studio. Calls made before `studio_init` are
/// reported on the console and return `None`.
fn with_studio<R>(f: impl FnOnce(&mut Studio) -> R) -> Option<R> {
    STUDIO.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(studio) => Some(f(studio)),
            None => {
                let msg = "glowpaint: studio not initialized, call studio_init() first";
                web_sys::console::warn_1(&msg.into());
                None
            }
        }
    })
}

fn to_js(err: StudioError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub fn studio_init(width: u32, height: u32) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = StudioConfig {
        width,
        height,
        seed: js_sys::Date::now() as u64,
        ..StudioConfig::default()
    };
    let studio = Studio::new(config).map_err(to_js)?;
    STUDIO.with(|cell| {
        *cell.borrow_mut() = Some(studio);
    });
    log::info!("glowpaint: initialized {}x{}", width, height);
    Ok(())
}

/// Advance by a display delta in seconds. Returns the number of frames run.
#[wasm_bindgen]
pub fn studio_tick(dt: f32) -> u32 {
    with_studio(|s| s.tick(dt)).unwrap_or(0)
}

#[wasm_bindgen]
pub fn studio_pointer_down(x: f32, y: f32) {
    with_studio(|s| s.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn studio_pointer_move(x: f32, y: f32) {
    with_studio(|s| s.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn studio_pointer_up(x: f32, y: f32) {
    with_studio(|s| s.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn studio_set_pen(name: &str) -> Result<(), JsValue> {
    let kind: PenKind = name.parse().map_err(to_js)?;
    with_studio(|s| s.set_pen(kind));
    Ok(())
}

/// Apply a persisted settings record (JSON).
#[wasm_bindgen]
pub fn studio_apply_settings(json: &str) -> Result<(), JsValue> {
    with_studio(|s| s.apply_settings_json(json))
        .unwrap_or(Ok(()))
        .map_err(to_js)
}

/// Current settings as JSON, for the host to persist.
#[wasm_bindgen]
pub fn studio_settings() -> Result<String, JsValue> {
    with_studio(|s| s.settings().to_json())
        .unwrap_or_else(|| Ok(String::new()))
        .map_err(to_js)
}

/// Queue tracer output as a flat `[x, y, pen, ...]` array.
#[wasm_bindgen]
pub fn studio_trace(points: &[f32]) -> Result<usize, JsValue> {
    with_studio(|s| s.queue_trace_flat(points))
        .unwrap_or(Ok(0))
        .map_err(to_js)
}

#[wasm_bindgen]
pub fn studio_clear() {
    with_studio(|s| s.clear_canvas());
}

#[wasm_bindgen]
pub fn studio_invert() {
    with_studio(|s| s.invert());
}

#[wasm_bindgen]
pub fn studio_resize(width: u32, height: u32) -> Result<(), JsValue> {
    with_studio(|s| s.resize(width, height))
        .unwrap_or(Ok(()))
        .map_err(to_js)
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_pixels_ptr() -> *const u8 {
    with_studio(|s| s.pixels().as_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_pixels_len() -> usize {
    with_studio(|s| s.pixels().len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_overlay_ptr() -> *const u8 {
    with_studio(|s| s.overlay_pixels().as_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_overlay_len() -> usize {
    with_studio(|s| s.overlay_pixels().len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_width() -> u32 {
    with_studio(|s| s.width()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_height() -> u32 {
    with_studio(|s| s.height()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_effect_count() -> usize {
    with_studio(|s| s.effect_count()).unwrap_or(0)
}

/// `globalCompositeOperation` the canvas is drawing with.
#[wasm_bindgen]
pub fn get_composite_mode() -> String {
    with_studio(|s| s.ctx().composite().css_name().to_string()).unwrap_or_default()
}

/// Current pen color as a CSS `rgba()` string, for UI swatches.
#[wasm_bindgen]
pub fn get_pen_color() -> String {
    with_studio(|s| {
        let ctx = s.ctx();
        ctx.paint(ctx.pen_color, 1.0).css()
    })
    .unwrap_or_default()
}
