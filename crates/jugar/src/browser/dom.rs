//! DOM facade for the display runtime.
//!
//! On `wasm32` this drives the real document through `web-sys`. On every
//! other target it is an in-memory document model with the same surface, so
//! the whole display contract is testable without a browser.
//!
//! A [`Dom`] is a cheap handle: clones share the underlying document, which
//! is what lets event-listener closures and the display manager observe the
//! same state.

use jugar_core::{DisplayError, Point, Size};

#[cfg(not(target_arch = "wasm32"))]
use std::cell::RefCell;
#[cfg(not(target_arch = "wasm32"))]
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use std::cell::OnceCell;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{Element, HtmlCanvasElement, HtmlElement};

/// Fullscreen request method names, probed in order. The first one present
/// on the wrapper element is resolved once and cached for the lifetime of
/// the handle.
#[cfg(target_arch = "wasm32")]
const FULLSCREEN_REQUEST_METHODS: [&str; 3] = [
    "requestFullscreen",
    "webkitRequestFullscreen",
    "mozRequestFullScreen",
];

/// Fullscreen element property names, unprefixed first.
#[cfg(target_arch = "wasm32")]
const FULLSCREEN_ELEMENT_PROPS: [&str; 3] = [
    "fullscreenElement",
    "webkitFullscreenElement",
    "mozFullScreenElement",
];

/// Pointer lock request method names, probed in order. Best-effort only.
#[cfg(target_arch = "wasm32")]
const POINTER_LOCK_METHODS: [&str; 3] = [
    "requestPointerLock",
    "webkitRequestPointerLock",
    "mozRequestPointerLock",
];

/// Handle to the document.
///
/// In WASM this wraps `web_sys::Document`. In non-WASM (tests) it is an
/// in-memory document model with test hooks for simulating platform
/// behavior such as fullscreen-change notifications.
#[derive(Debug, Clone)]
pub struct Dom {
    #[cfg(target_arch = "wasm32")]
    document: web_sys::Document,
    /// Resolved fullscreen request method, probed at most once.
    #[cfg(target_arch = "wasm32")]
    fullscreen_api: OnceCell<Option<&'static str>>,
    #[cfg(not(target_arch = "wasm32"))]
    state: Rc<RefCell<MockDocument>>,
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
struct MockElement {
    tag: String,
    parent: Option<String>,
    width: u32,
    height: u32,
    client_size: Option<Size>,
    offset: Point,
    styles: HashMap<String, String>,
    hidden: bool,
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
struct MockDocument {
    elements: HashMap<String, MockElement>,
    title: String,
    focused: Option<String>,
    fullscreen_element: Option<String>,
    fullscreen_supported: bool,
    pointer_lock_requests: Vec<String>,
    listeners: Vec<(String, String)>,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for MockDocument {
    fn default() -> Self {
        Self {
            elements: HashMap::new(),
            title: String::new(),
            focused: None,
            fullscreen_element: None,
            // Browsers without a fullscreen API are the exception; tests
            // opt into that path via `set_fullscreen_supported(false)`.
            fullscreen_supported: true,
            pointer_lock_requests: Vec::new(),
            listeners: Vec::new(),
        }
    }
}

impl Dom {
    /// Connect to the document.
    ///
    /// Fails with [`DisplayError::DocumentUnavailable`] when there is no
    /// window (WASM outside a browser). The in-memory model always succeeds.
    pub fn new() -> Result<Self, DisplayError> {
        #[cfg(target_arch = "wasm32")]
        {
            let document = web_sys::window()
                .ok_or(DisplayError::DocumentUnavailable)?
                .document()
                .ok_or(DisplayError::DocumentUnavailable)?;
            Ok(Self {
                document,
                fullscreen_api: OnceCell::new(),
            })
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Ok(Self {
                state: Rc::new(RefCell::new(MockDocument::default())),
            })
        }
    }

    /// Check whether an element with the given id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            self.element(id).is_some()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.state.borrow().elements.contains_key(id)
        }
    }

    /// Look up an element by id, creating it when absent.
    ///
    /// Newly created elements are appended under `parent` (an element id),
    /// or under the document body when `parent` is `None` or missing.
    /// Returns `Ok(true)` when the element was created, `Ok(false)` when it
    /// already existed.
    pub fn ensure_element(
        &self,
        tag: &str,
        id: &str,
        parent: Option<&str>,
    ) -> Result<bool, DisplayError> {
        if self.contains(id) {
            return Ok(false);
        }
        #[cfg(target_arch = "wasm32")]
        {
            let element = self
                .document
                .create_element(tag)
                .map_err(|e| DisplayError::Platform(format!("createElement failed: {e:?}")))?;
            element.set_id(id);

            let attached = parent
                .and_then(|pid| self.element(pid))
                .map_or(false, |p| p.append_child(&element).is_ok());
            if !attached {
                let body = self
                    .document
                    .body()
                    .ok_or(DisplayError::DocumentUnavailable)?;
                body.append_child(&element)
                    .map_err(|e| DisplayError::Platform(format!("appendChild failed: {e:?}")))?;
            }
            Ok(true)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.state.borrow_mut().elements.insert(
                id.to_string(),
                MockElement {
                    tag: tag.to_string(),
                    parent: parent.map(String::from),
                    ..MockElement::default()
                },
            );
            Ok(true)
        }
    }

    /// Hide an element (`display: none`). No-op when the element is absent.
    pub fn hide(&self, id: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(el) = self.html_element(id) {
                el.style().set_property("display", "none").ok();
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Some(el) = self.state.borrow_mut().elements.get_mut(id) {
                el.hidden = true;
                el.styles.insert("display".to_string(), "none".to_string());
            }
        }
    }

    /// Set the width/height attributes of a canvas element.
    pub fn set_canvas_size(&self, id: &str, size: Size) -> Result<(), DisplayError> {
        #[cfg(target_arch = "wasm32")]
        {
            let canvas = self.canvas(id)?;
            canvas.set_width(size.width);
            canvas.set_height(size.height);
            Ok(())
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let mut state = self.state.borrow_mut();
            let el = state
                .elements
                .get_mut(id)
                .ok_or_else(|| DisplayError::ElementNotFound(id.to_string()))?;
            if el.tag != "canvas" {
                return Err(DisplayError::NotACanvas(id.to_string()));
            }
            el.width = size.width;
            el.height = size.height;
            Ok(())
        }
    }

    /// Read the width/height attributes of a canvas element.
    pub fn canvas_size(&self, id: &str) -> Result<Size, DisplayError> {
        #[cfg(target_arch = "wasm32")]
        {
            let canvas = self.canvas(id)?;
            Ok(Size::new(canvas.width(), canvas.height()))
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let state = self.state.borrow();
            let el = state
                .elements
                .get(id)
                .ok_or_else(|| DisplayError::ElementNotFound(id.to_string()))?;
            if el.tag != "canvas" {
                return Err(DisplayError::NotACanvas(id.to_string()));
            }
            Ok(Size::new(el.width, el.height))
        }
    }

    /// Client-measured size of an element.
    ///
    /// Falls back to the canvas width/height attributes when the element is
    /// unstyled and reports a zero client size.
    pub fn client_size(&self, id: &str) -> Result<Size, DisplayError> {
        #[cfg(target_arch = "wasm32")]
        {
            let el = self
                .element(id)
                .ok_or_else(|| DisplayError::ElementNotFound(id.to_string()))?;
            let mut width = el.client_width().max(0) as u32;
            let mut height = el.client_height().max(0) as u32;
            if let Some(canvas) = el.dyn_ref::<HtmlCanvasElement>() {
                if width == 0 {
                    width = canvas.width();
                }
                if height == 0 {
                    height = canvas.height();
                }
            }
            Ok(Size::new(width, height))
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let state = self.state.borrow();
            let el = state
                .elements
                .get(id)
                .ok_or_else(|| DisplayError::ElementNotFound(id.to_string()))?;
            Ok(el.client_size.unwrap_or(Size::new(el.width, el.height)))
        }
    }

    /// Viewport offset of an element's bounding box.
    pub fn bounding_offset(&self, id: &str) -> Result<Point, DisplayError> {
        #[cfg(target_arch = "wasm32")]
        {
            let el = self
                .element(id)
                .ok_or_else(|| DisplayError::ElementNotFound(id.to_string()))?;
            let rect = el.get_bounding_client_rect();
            Ok(Point::new(rect.left() as f32, rect.top() as f32))
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let state = self.state.borrow();
            let el = state
                .elements
                .get(id)
                .ok_or_else(|| DisplayError::ElementNotFound(id.to_string()))?;
            Ok(el.offset)
        }
    }

    /// Set the document title.
    pub fn set_title(&self, title: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            self.document.set_title(title);
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.state.borrow_mut().title = title.to_string();
        }
    }

    /// Current document title.
    #[must_use]
    pub fn title(&self) -> String {
        #[cfg(target_arch = "wasm32")]
        {
            self.document.title()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.state.borrow().title.clone()
        }
    }

    /// Inline `text-align` style of an element, empty when unset or absent.
    #[must_use]
    pub fn text_align(&self, id: &str) -> String {
        #[cfg(target_arch = "wasm32")]
        {
            self.html_element(id)
                .and_then(|el| el.style().get_property_value("text-align").ok())
                .unwrap_or_default()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.state
                .borrow()
                .elements
                .get(id)
                .and_then(|el| el.styles.get("text-align").cloned())
                .unwrap_or_default()
        }
    }

    /// Set the inline `text-align` style of an element. No-op when absent.
    pub fn set_text_align(&self, id: &str, value: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(el) = self.html_element(id) {
                el.style().set_property("text-align", value).ok();
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Some(el) = self.state.borrow_mut().elements.get_mut(id) {
                el.styles
                    .insert("text-align".to_string(), value.to_string());
            }
        }
    }

    /// Whether the element with the given id is the active (focused) element.
    #[must_use]
    pub fn is_focused(&self, id: &str) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            self.document
                .active_element()
                .is_some_and(|el| el.id() == id)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.state.borrow().focused.as_deref() == Some(id)
        }
    }

    /// Id of the platform's current fullscreen element, if any.
    ///
    /// Checks the unprefixed property first, then the vendor-prefixed ones.
    #[must_use]
    pub fn fullscreen_element(&self) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            for prop in FULLSCREEN_ELEMENT_PROPS {
                if let Ok(value) =
                    js_sys::Reflect::get(self.document.as_ref(), &JsValue::from_str(prop))
                {
                    if let Ok(el) = value.dyn_into::<Element>() {
                        return Some(el.id());
                    }
                }
            }
            None
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.state.borrow().fullscreen_element.clone()
        }
    }

    /// Whether a fullscreen request API exists for the given element.
    #[must_use]
    pub fn fullscreen_supported(&self, id: &str) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            self.resolve_fullscreen_api(id).is_some()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = id;
            self.state.borrow().fullscreen_supported
        }
    }

    /// Request fullscreen on an element through the resolved platform API.
    ///
    /// Fire-and-forget: `true` means the request was issued, not that
    /// fullscreen was entered. Confirmation arrives later through a
    /// fullscreen-change notification. Returns `false` when the platform
    /// exposes no fullscreen API or the element is absent.
    pub fn request_fullscreen(&self, id: &str) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(method) = self.resolve_fullscreen_api(id) else {
                return false;
            };
            let Some(el) = self.element(id) else {
                return false;
            };
            call_js_method(el.as_ref(), method)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let state = self.state.borrow();
            state.fullscreen_supported && state.elements.contains_key(id)
        }
    }

    /// Request pointer lock on an element. Best-effort: failures and missing
    /// APIs are ignored.
    pub fn request_pointer_lock(&self, id: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(el) = self.element(id) {
                for method in POINTER_LOCK_METHODS {
                    if call_js_method(el.as_ref(), method) {
                        break;
                    }
                }
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let mut state = self.state.borrow_mut();
            if state.elements.contains_key(id) {
                state.pointer_lock_requests.push(id.to_string());
            }
        }
    }
}

// WASM internals and listener registration.
#[cfg(target_arch = "wasm32")]
impl Dom {
    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn html_element(&self, id: &str) -> Option<HtmlElement> {
        self.element(id)?.dyn_into::<HtmlElement>().ok()
    }

    fn canvas(&self, id: &str) -> Result<HtmlCanvasElement, DisplayError> {
        self.element(id)
            .ok_or_else(|| DisplayError::ElementNotFound(id.to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| DisplayError::NotACanvas(id.to_string()))
    }

    /// Rendering target handle for binding a surface.
    pub(crate) fn canvas_element(&self, id: &str) -> Result<HtmlCanvasElement, DisplayError> {
        self.canvas(id)
    }

    /// Probe the ordered method list once; later calls reuse the result.
    /// Nothing is cached until the element exists, so a pre-init query does
    /// not pin a wrong verdict.
    fn resolve_fullscreen_api(&self, id: &str) -> Option<&'static str> {
        if let Some(cached) = self.fullscreen_api.get() {
            return *cached;
        }
        let el = self.element(id)?;
        let resolved = FULLSCREEN_REQUEST_METHODS.into_iter().find(|method| {
            js_sys::Reflect::get(el.as_ref(), &JsValue::from_str(method))
                .map(|v| v.is_function())
                .unwrap_or(false)
        });
        let _ = self.fullscreen_api.set(resolved);
        resolved
    }

    /// Attach a listener to an element. The caller keeps the closure alive.
    pub fn add_element_listener(
        &self,
        id: &str,
        event: &str,
        callback: &Closure<dyn FnMut(web_sys::Event)>,
    ) {
        if let Some(el) = self.element(id) {
            el.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
                .ok();
        }
    }

    /// Attach a listener to the document. The caller keeps the closure alive.
    pub fn add_document_listener(
        &self,
        event: &str,
        callback: &Closure<dyn FnMut(web_sys::Event)>,
    ) {
        self.document
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .ok();
    }
}

/// Look up a method by name on a JS object and invoke it with no arguments.
#[cfg(target_arch = "wasm32")]
fn call_js_method(target: &JsValue, method: &str) -> bool {
    js_sys::Reflect::get(target, &JsValue::from_str(method))
        .ok()
        .and_then(|v| v.dyn_into::<js_sys::Function>().ok())
        .is_some_and(|f| f.call0(target).is_ok())
}

// Test hooks for the in-memory document model. These stand in for platform
// behavior the mock cannot produce on its own (focus changes, fullscreen
// confirmation, element geometry).
#[cfg(not(target_arch = "wasm32"))]
impl Dom {
    /// Record a listener registration (mirrors the WASM listener methods).
    pub fn record_listener(&self, target: &str, event: &str) {
        self.state
            .borrow_mut()
            .listeners
            .push((target.to_string(), event.to_string()));
    }

    /// Registered listeners as `(target, event)` pairs.
    #[must_use]
    pub fn listeners(&self) -> Vec<(String, String)> {
        self.state.borrow().listeners.clone()
    }

    /// Number of elements in the document.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.state.borrow().elements.len()
    }

    /// Parent id an element was created under.
    #[must_use]
    pub fn parent_of(&self, id: &str) -> Option<String> {
        self.state.borrow().elements.get(id)?.parent.clone()
    }

    /// Whether an element has been hidden.
    #[must_use]
    pub fn is_hidden(&self, id: &str) -> bool {
        self.state
            .borrow()
            .elements
            .get(id)
            .is_some_and(|el| el.hidden)
    }

    /// Simulate the platform setting (or clearing) the fullscreen element.
    pub fn set_fullscreen_element(&self, id: Option<&str>) {
        self.state.borrow_mut().fullscreen_element = id.map(String::from);
    }

    /// Toggle whether the platform exposes a fullscreen API.
    pub fn set_fullscreen_supported(&self, supported: bool) {
        self.state.borrow_mut().fullscreen_supported = supported;
    }

    /// Simulate focus moving to an element (or away with `None`).
    pub fn set_focused(&self, id: Option<&str>) {
        self.state.borrow_mut().focused = id.map(String::from);
    }

    /// Set the client-measured size of an element.
    pub fn set_client_size(&self, id: &str, size: Size) {
        if let Some(el) = self.state.borrow_mut().elements.get_mut(id) {
            el.client_size = Some(size);
        }
    }

    /// Set the viewport offset of an element's bounding box.
    pub fn set_bounding_offset(&self, id: &str, offset: Point) {
        if let Some(el) = self.state.borrow_mut().elements.get_mut(id) {
            el.offset = offset;
        }
    }

    /// Pointer-lock requests issued so far, in order.
    #[must_use]
    pub fn pointer_lock_requests(&self) -> Vec<String> {
        self.state.borrow().pointer_lock_requests.clone()
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_element_is_idempotent() {
        let dom = Dom::new().unwrap();
        assert!(dom.ensure_element("div", "wrapper", None).unwrap());
        assert!(!dom.ensure_element("div", "wrapper", None).unwrap());
        assert_eq!(dom.element_count(), 1);
    }

    #[test]
    fn test_ensure_element_records_parent() {
        let dom = Dom::new().unwrap();
        dom.ensure_element("div", "wrapper", None).unwrap();
        dom.ensure_element("canvas", "screen", Some("wrapper"))
            .unwrap();
        assert_eq!(dom.parent_of("screen").as_deref(), Some("wrapper"));
        assert_eq!(dom.parent_of("wrapper"), None);
    }

    #[test]
    fn test_canvas_size_round_trip() {
        let dom = Dom::new().unwrap();
        dom.ensure_element("canvas", "screen", None).unwrap();
        dom.set_canvas_size("screen", Size::new(640, 480)).unwrap();
        assert_eq!(dom.canvas_size("screen").unwrap(), Size::new(640, 480));
    }

    #[test]
    fn test_canvas_ops_reject_non_canvas() {
        let dom = Dom::new().unwrap();
        dom.ensure_element("div", "wrapper", None).unwrap();
        assert_eq!(
            dom.set_canvas_size("wrapper", Size::new(1, 1)),
            Err(DisplayError::NotACanvas("wrapper".to_string()))
        );
    }

    #[test]
    fn test_canvas_ops_require_element() {
        let dom = Dom::new().unwrap();
        assert_eq!(
            dom.canvas_size("missing"),
            Err(DisplayError::ElementNotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_client_size_falls_back_to_attributes() {
        let dom = Dom::new().unwrap();
        dom.ensure_element("canvas", "screen", None).unwrap();
        dom.set_canvas_size("screen", Size::new(320, 240)).unwrap();
        assert_eq!(dom.client_size("screen").unwrap(), Size::new(320, 240));

        dom.set_client_size("screen", Size::new(300, 200));
        assert_eq!(dom.client_size("screen").unwrap(), Size::new(300, 200));
    }

    #[test]
    fn test_hide_is_noop_for_missing_element() {
        let dom = Dom::new().unwrap();
        dom.hide("loader");
        assert!(!dom.is_hidden("loader"));

        dom.ensure_element("div", "loader", None).unwrap();
        dom.hide("loader");
        assert!(dom.is_hidden("loader"));
    }

    #[test]
    fn test_title() {
        let dom = Dom::new().unwrap();
        assert_eq!(dom.title(), "");
        dom.set_title("My Game");
        assert_eq!(dom.title(), "My Game");
    }

    #[test]
    fn test_text_align_defaults_empty() {
        let dom = Dom::new().unwrap();
        dom.ensure_element("div", "wrapper", None).unwrap();
        assert_eq!(dom.text_align("wrapper"), "");
        dom.set_text_align("wrapper", "center");
        assert_eq!(dom.text_align("wrapper"), "center");
    }

    #[test]
    fn test_request_fullscreen_honors_support_flag() {
        let dom = Dom::new().unwrap();
        dom.ensure_element("div", "wrapper", None).unwrap();
        assert!(dom.request_fullscreen("wrapper"));

        dom.set_fullscreen_supported(false);
        assert!(!dom.request_fullscreen("wrapper"));
        assert!(!dom.fullscreen_supported("wrapper"));
    }

    #[test]
    fn test_request_fullscreen_requires_element() {
        let dom = Dom::new().unwrap();
        assert!(!dom.request_fullscreen("missing"));
    }

    #[test]
    fn test_fullscreen_request_does_not_set_fullscreen_element() {
        let dom = Dom::new().unwrap();
        dom.ensure_element("div", "wrapper", None).unwrap();
        dom.request_fullscreen("wrapper");
        // Confirmation is delivered separately, by the platform.
        assert_eq!(dom.fullscreen_element(), None);
    }

    #[test]
    fn test_pointer_lock_recorded_only_for_existing_elements() {
        let dom = Dom::new().unwrap();
        dom.request_pointer_lock("missing");
        assert!(dom.pointer_lock_requests().is_empty());

        dom.ensure_element("div", "wrapper", None).unwrap();
        dom.request_pointer_lock("wrapper");
        assert_eq!(dom.pointer_lock_requests(), vec!["wrapper".to_string()]);
    }

    #[test]
    fn test_focus_tracking() {
        let dom = Dom::new().unwrap();
        dom.ensure_element("canvas", "screen", None).unwrap();
        assert!(!dom.is_focused("screen"));
        dom.set_focused(Some("screen"));
        assert!(dom.is_focused("screen"));
        dom.set_focused(None);
        assert!(!dom.is_focused("screen"));
    }

    #[test]
    fn test_clones_share_the_document() {
        let dom = Dom::new().unwrap();
        let other = dom.clone();
        other.ensure_element("div", "wrapper", None).unwrap();
        assert!(dom.contains("wrapper"));
    }
}
