//! Browser runtime for the jugar display stack.
//!
//! This module bridges the platform-independent types in `jugar-core` to the
//! browser's DOM and Canvas APIs.

pub mod display;
pub mod dom;
pub mod surface;

pub use display::{
    DisplayManager, CANVAS_ID, FULLSCREEN_TOGGLE_ID, LOADER_ID, WRAPPER_ID,
};
pub use dom::Dom;
pub use surface::Surface;
