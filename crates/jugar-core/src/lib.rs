//! Core types for the jugar display runtime.
//!
//! This crate provides the platform-independent half of the display stack:
//! - Geometric primitives: [`Point`], [`Size`]
//! - Surface creation flags: [`SurfaceFlags`]
//! - The fullscreen state machine: [`FullscreenMachine`]
//! - The display error taxonomy: [`DisplayError`]
//!
//! Nothing in here touches the DOM; the browser bindings live in the `jugar`
//! crate, which drives these types from platform notifications.

mod error;
mod flags;
mod fullscreen;
mod geometry;

pub use error::DisplayError;
pub use flags::SurfaceFlags;
pub use fullscreen::{FullscreenMachine, FullscreenState, Transition};
pub use geometry::{Point, Size};
