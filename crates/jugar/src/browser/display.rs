//! Display manager - owns the rendering target, the singleton surface, and
//! the fullscreen lifecycle.
//!
//! One `DisplayManager` is constructed at startup and passed by reference to
//! everything that needs the screen; there is no module-level global state.
//! Fullscreen is a two-phase affair: a user click on the toggle control
//! issues the platform request, and the state machine only advances when the
//! platform's change notification arrives (see `jugar_core::fullscreen`).

use std::cell::RefCell;
use std::rc::Rc;

use jugar_core::{DisplayError, FullscreenMachine, Point, Size, SurfaceFlags, Transition};

use super::dom::Dom;
use super::surface::Surface;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::Closure;

/// Id of the canvas serving as the rendering target.
pub const CANVAS_ID: &str = "jugar-canvas";
/// Id of the optional loading indicator hidden by `init`.
pub const LOADER_ID: &str = "jugar-loader";
/// Id of the container wrapping the canvas; this is the element that goes
/// fullscreen.
pub const WRAPPER_ID: &str = "jugar-canvas-wrapper";
/// Id of the fullscreen toggle control.
pub const FULLSCREEN_TOGGLE_ID: &str = "jugar-fullscreen-toggle";

/// Fullscreen change notifications, unprefixed and vendor-prefixed.
const FULLSCREEN_CHANGE_EVENTS: [&str; 3] = [
    "fullscreenchange",
    "webkitfullscreenchange",
    "mozfullscreenchange",
];

/// Manages the single rendering surface bound to the on-screen canvas.
///
/// # Example
///
/// ```ignore
/// use jugar::browser::DisplayManager;
/// use jugar_core::SurfaceFlags;
///
/// let mut display = DisplayManager::new()?;
/// display.init()?;
/// display.set_caption("My Game", None);
/// let surface = display.set_mode([640, 480], SurfaceFlags::NONE)?;
/// ```
pub struct DisplayManager {
    dom: Dom,
    machine: Rc<RefCell<FullscreenMachine>>,
    surface: Option<Surface>,
    smoothing: bool,
    initialized: bool,
    #[cfg(target_arch = "wasm32")]
    listeners: Vec<Closure<dyn FnMut(web_sys::Event)>>,
}

impl DisplayManager {
    /// Connect to the document and create an uninitialized manager.
    pub fn new() -> Result<Self, DisplayError> {
        Ok(Self::with_dom(Dom::new()?))
    }

    /// Create a manager over an existing document handle.
    ///
    /// Clones of the handle observe the same document; this is how tests
    /// drive the platform side of the contract.
    #[must_use]
    pub fn with_dom(dom: Dom) -> Self {
        Self {
            dom,
            machine: Rc::new(RefCell::new(FullscreenMachine::new())),
            surface: None,
            smoothing: true,
            initialized: false,
            #[cfg(target_arch = "wasm32")]
            listeners: Vec::new(),
        }
    }

    /// Set up the display: ensure the wrapper, rendering target, and
    /// fullscreen toggle exist, wire up the toggle and the fullscreen-change
    /// notifications, and hide the loading indicator if one is present.
    ///
    /// Idempotent: calling it again creates nothing and registers nothing.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        if self.initialized {
            return Ok(());
        }
        self.dom.ensure_element("div", WRAPPER_ID, None)?;
        self.dom
            .ensure_element("canvas", CANVAS_ID, Some(WRAPPER_ID))?;
        self.dom
            .ensure_element("button", FULLSCREEN_TOGGLE_ID, Some(WRAPPER_ID))?;
        self.dom.hide(LOADER_ID);
        self.register_listeners();
        self.initialized = true;
        Ok(())
    }

    /// Set the rendering target's resolution and the smoothing flag, and
    /// return the singleton surface (created on the first call).
    ///
    /// `dimensions` is `[width, height]` in pixels and is not validated
    /// here; out-of-range values are left to the platform.
    pub fn set_mode(
        &mut self,
        dimensions: [u32; 2],
        flags: SurfaceFlags,
    ) -> Result<&Surface, DisplayError> {
        self.ensure_canvas()?;
        self.dom
            .set_canvas_size(CANVAS_ID, Size::from_dimensions(dimensions))?;
        self.smoothing = !flags.contains(SurfaceFlags::DISABLE_SMOOTHING);
        if let Some(surface) = self.surface.as_mut() {
            if self.smoothing {
                surface.enable_smoothing();
            } else {
                surface.disable_smoothing();
            }
        }
        self.surface()
    }

    /// Set the document title.
    ///
    /// The `icon` parameter is accepted for API compatibility but is not
    /// implemented; it is ignored.
    pub fn set_caption(&self, title: &str, icon: Option<&str>) {
        let _ = icon;
        self.dom.set_title(title);
    }

    /// The singleton drawing surface, constructed lazily from the rendering
    /// target's client-measured size with the current smoothing flag
    /// applied. Every call after the first returns the same instance.
    pub fn surface(&mut self) -> Result<&Surface, DisplayError> {
        if self.surface.is_none() {
            self.ensure_canvas()?;
            let size = self.dom.client_size(CANVAS_ID)?;
            let mut surface = Surface::new([size.width, size.height]);
            #[cfg(target_arch = "wasm32")]
            surface.bind_target(self.dom.canvas_element(CANVAS_ID)?)?;
            #[cfg(not(target_arch = "wasm32"))]
            surface.bind_target(CANVAS_ID)?;
            if self.smoothing {
                surface.enable_smoothing();
            } else {
                surface.disable_smoothing();
            }
            self.surface = Some(surface);
        }
        self.surface.as_ref().ok_or(DisplayError::ContextUnavailable)
    }

    /// Request fullscreen on the wrapper element.
    ///
    /// Fire-and-forget: `true` means the platform request was issued. The
    /// state machine does not advance until the change notification arrives.
    /// Returns `false`, with no state change, when the platform exposes no
    /// fullscreen API.
    pub fn request_fullscreen(&self) -> bool {
        self.dom.request_fullscreen(WRAPPER_ID)
    }

    /// Inbound fullscreen-change handler.
    ///
    /// Derives the current state from the platform's fullscreen element
    /// query rather than trusting any earlier request. On entry, requests
    /// pointer lock on the wrapper (best-effort) and centers it; on exit,
    /// restores the alignment recorded at entry.
    pub fn handle_fullscreen_change(&self) {
        sync_fullscreen(&self.dom, &self.machine);
    }

    /// Whether the display is currently fullscreen, as last confirmed by the
    /// platform.
    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.machine.borrow().is_fullscreen()
    }

    /// Viewport offset of the rendering target's bounding box, for
    /// translating input coordinates.
    pub fn canvas_offset(&self) -> Result<Point, DisplayError> {
        self.dom.bounding_offset(CANVAS_ID)
    }

    /// Whether the rendering target currently holds input focus.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.dom.is_focused(CANVAS_ID)
    }

    /// Current smoothing flag, as set by the last `set_mode`.
    #[must_use]
    pub const fn smoothing_enabled(&self) -> bool {
        self.smoothing
    }

    /// Document handle this manager operates on.
    #[must_use]
    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    /// The rendering target is created lazily on first access, so `set_mode`
    /// and `surface` work before `init`. When the wrapper already exists the
    /// canvas is placed inside it.
    fn ensure_canvas(&self) -> Result<(), DisplayError> {
        if !self.dom.contains(CANVAS_ID) {
            let parent = self.dom.contains(WRAPPER_ID).then_some(WRAPPER_ID);
            self.dom.ensure_element("canvas", CANVAS_ID, parent)?;
        }
        Ok(())
    }

    #[cfg(target_arch = "wasm32")]
    fn register_listeners(&mut self) {
        let dom = self.dom.clone();
        let click = Closure::new(move |_: web_sys::Event| {
            // Failure (no fullscreen API) is deliberately silent.
            dom.request_fullscreen(WRAPPER_ID);
        });
        self.dom
            .add_element_listener(FULLSCREEN_TOGGLE_ID, "click", &click);
        self.listeners.push(click);

        for event in FULLSCREEN_CHANGE_EVENTS {
            let dom = self.dom.clone();
            let machine = Rc::clone(&self.machine);
            let on_change = Closure::new(move |_: web_sys::Event| {
                sync_fullscreen(&dom, &machine);
            });
            self.dom.add_document_listener(event, &on_change);
            self.listeners.push(on_change);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn register_listeners(&mut self) {
        self.dom.record_listener(FULLSCREEN_TOGGLE_ID, "click");
        for event in FULLSCREEN_CHANGE_EVENTS {
            self.dom.record_listener("document", event);
        }
    }
}

/// Drive the state machine from the platform's view of fullscreen and apply
/// the resulting side effects to the wrapper element.
fn sync_fullscreen(dom: &Dom, machine: &RefCell<FullscreenMachine>) {
    let platform_fullscreen = dom.fullscreen_element().is_some();
    let current_alignment = dom.text_align(WRAPPER_ID);
    let transition = machine
        .borrow_mut()
        .observe(platform_fullscreen, &current_alignment);
    match transition {
        Transition::Entered => {
            dom.request_pointer_lock(WRAPPER_ID);
            dom.set_text_align(WRAPPER_ID, "center");
        }
        Transition::Exited { restore_alignment } => {
            if let Some(alignment) = restore_alignment {
                dom.set_text_align(WRAPPER_ID, &alignment);
            }
        }
        Transition::Unchanged => {}
    }
}
