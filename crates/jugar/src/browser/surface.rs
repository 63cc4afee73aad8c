//! Surface - the drawing abstraction bound to the rendering target.
//!
//! A surface is created with a size and later bound 1:1 to the canvas by the
//! display manager, which also owns the canvas's 2d drawing context through
//! it. Pixel operations live elsewhere; this type carries the bindings and
//! the smoothing capability toggles.

use jugar_core::{DisplayError, Size};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Vendor-prefixed spellings of `imageSmoothingEnabled`, set alongside the
/// standard property.
#[cfg(target_arch = "wasm32")]
const PREFIXED_SMOOTHING_PROPS: [&str; 2] =
    ["webkitImageSmoothingEnabled", "mozImageSmoothingEnabled"];

/// A drawing surface.
///
/// Exactly one surface is bound to the on-screen rendering target per
/// process; the display manager constructs it lazily and hands out the same
/// instance from then on.
#[derive(Debug)]
pub struct Surface {
    size: Size,
    smoothing: bool,
    #[cfg(target_arch = "wasm32")]
    canvas: Option<HtmlCanvasElement>,
    #[cfg(target_arch = "wasm32")]
    context: Option<CanvasRenderingContext2d>,
    #[cfg(not(target_arch = "wasm32"))]
    target: Option<String>,
}

impl Surface {
    /// Create an unbound surface with the given `[width, height]`.
    #[must_use]
    pub fn new(dimensions: [u32; 2]) -> Self {
        Self {
            size: Size::from_dimensions(dimensions),
            smoothing: true,
            #[cfg(target_arch = "wasm32")]
            canvas: None,
            #[cfg(target_arch = "wasm32")]
            context: None,
            #[cfg(not(target_arch = "wasm32"))]
            target: None,
        }
    }

    /// Bind the surface to the on-screen canvas and take ownership of its 2d
    /// drawing context.
    #[cfg(target_arch = "wasm32")]
    pub fn bind_target(&mut self, canvas: HtmlCanvasElement) -> Result<(), DisplayError> {
        let context = canvas
            .get_context("2d")
            .map_err(|_| DisplayError::ContextUnavailable)?
            .ok_or(DisplayError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| DisplayError::ContextUnavailable)?;
        self.canvas = Some(canvas);
        self.context = Some(context);
        self.apply_smoothing();
        Ok(())
    }

    /// Bind the surface to a rendering target by id (in-memory model).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn bind_target(&mut self, id: &str) -> Result<(), DisplayError> {
        self.target = Some(id.to_string());
        Ok(())
    }

    /// Whether the surface has been bound to a rendering target.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            self.context.is_some()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.target.is_some()
        }
    }

    /// Turn pixel smoothing on.
    pub fn enable_smoothing(&mut self) {
        self.smoothing = true;
        self.apply_smoothing();
    }

    /// Turn pixel smoothing off (crisp scaling for pixel art).
    pub fn disable_smoothing(&mut self) {
        self.smoothing = false;
        self.apply_smoothing();
    }

    /// Current smoothing setting.
    #[must_use]
    pub const fn smoothing(&self) -> bool {
        self.smoothing
    }

    /// Surface size.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Surface width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.size.width
    }

    /// Surface height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.size.height
    }

    /// Bound rendering target, if any.
    #[cfg(target_arch = "wasm32")]
    #[must_use]
    pub fn canvas(&self) -> Option<&HtmlCanvasElement> {
        self.canvas.as_ref()
    }

    /// Bound 2d drawing context, if any.
    #[cfg(target_arch = "wasm32")]
    #[must_use]
    pub fn context(&self) -> Option<&CanvasRenderingContext2d> {
        self.context.as_ref()
    }

    /// Id of the bound rendering target, if any (in-memory model).
    #[cfg(not(target_arch = "wasm32"))]
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Push the smoothing flag down into the bound context, including the
    /// vendor-prefixed spellings.
    #[cfg(target_arch = "wasm32")]
    fn apply_smoothing(&self) {
        if let Some(context) = &self.context {
            context.set_image_smoothing_enabled(self.smoothing);
            for prop in PREFIXED_SMOOTHING_PROPS {
                js_sys::Reflect::set(
                    context.as_ref(),
                    &JsValue::from_str(prop),
                    &JsValue::from_bool(self.smoothing),
                )
                .ok();
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn apply_smoothing(&self) {}
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_new_surface_dimensions() {
        let surface = Surface::new([640, 480]);
        assert_eq!(surface.width(), 640);
        assert_eq!(surface.height(), 480);
        assert_eq!(surface.size(), Size::new(640, 480));
    }

    #[test]
    fn test_smoothing_enabled_by_default() {
        let surface = Surface::new([100, 100]);
        assert!(surface.smoothing());
    }

    #[test]
    fn test_smoothing_toggles() {
        let mut surface = Surface::new([100, 100]);
        surface.disable_smoothing();
        assert!(!surface.smoothing());
        surface.enable_smoothing();
        assert!(surface.smoothing());
    }

    #[test]
    fn test_bind_target() {
        let mut surface = Surface::new([100, 100]);
        assert!(!surface.is_bound());
        surface.bind_target("screen").unwrap();
        assert!(surface.is_bound());
        assert_eq!(surface.target(), Some("screen"));
    }
}
