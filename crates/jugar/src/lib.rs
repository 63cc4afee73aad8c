//! Jugar: WASM-first display runtime for canvas 2D games.
//!
//! Owns the lifecycle of one drawable surface backed by an on-screen canvas,
//! plus the fullscreen/pointer-lock state machine layered on the platform
//! fullscreen APIs.
//!
//! # Browser Usage (WASM)
//!
//! ```ignore
//! use jugar::browser::DisplayManager;
//! use jugar::SurfaceFlags;
//!
//! let mut display = DisplayManager::new()?;
//! display.init()?;
//! display.set_caption("My Game", None);
//! let surface = display.set_mode([640, 480], SurfaceFlags::DISABLE_SMOOTHING)?;
//! ```

#![allow(
    clippy::doc_markdown,
    clippy::missing_const_for_fn,
    clippy::use_self,
    clippy::uninlined_format_args,
    // Result signatures are shared with the wasm32 implementations, which
    // can actually fail.
    clippy::unnecessary_wraps
)]

pub use jugar_core::*;

pub mod browser;

pub use browser::{DisplayManager, Surface};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Log to browser console.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}
