//! Browser smoke tests, run with `wasm-pack test --headless`.

#![cfg(target_arch = "wasm32")]

use jugar::browser::{DisplayManager, CANVAS_ID, FULLSCREEN_TOGGLE_ID, WRAPPER_ID};
use jugar::{Size, SurfaceFlags};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn init_creates_display_elements() {
    let mut display = DisplayManager::new().unwrap();
    display.init().unwrap();
    assert!(display.dom().contains(WRAPPER_ID));
    assert!(display.dom().contains(CANVAS_ID));
    assert!(display.dom().contains(FULLSCREEN_TOGGLE_ID));

    // Second init must not duplicate anything.
    display.init().unwrap();
}

#[wasm_bindgen_test]
fn set_mode_applies_resolution_and_binds_surface() {
    let mut display = DisplayManager::new().unwrap();
    display.init().unwrap();
    let surface = display.set_mode([320, 240], SurfaceFlags::NONE).unwrap();
    assert!(surface.is_bound());
    assert_eq!(
        display.dom().canvas_size(CANVAS_ID).unwrap(),
        Size::new(320, 240)
    );
}

#[wasm_bindgen_test]
fn set_caption_sets_document_title() {
    let display = DisplayManager::new().unwrap();
    display.set_caption("smoke test", None);
    assert_eq!(display.dom().title(), "smoke test");
}
