//! Display error taxonomy.
//!
//! Missing platform capabilities (fullscreen, pointer lock) are deliberately
//! NOT errors: those degrade to a silent no-op or a `false` return. Errors
//! here are structural failures of the document itself.

/// Errors raised by the display runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayError {
    /// No window/document is available (e.g. not running in a browser).
    DocumentUnavailable,
    /// A required element id was not found and could not be created.
    ElementNotFound(String),
    /// The rendering target element exists but is not a canvas.
    NotACanvas(String),
    /// The canvas refused to hand out a 2d drawing context.
    ContextUnavailable,
    /// An unexpected platform-side failure, with detail.
    Platform(String),
}

impl std::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DocumentUnavailable => write!(f, "document not available"),
            Self::ElementNotFound(id) => write!(f, "element '{id}' not found"),
            Self::NotACanvas(id) => write!(f, "element '{id}' is not a canvas"),
            Self::ContextUnavailable => write!(f, "2d drawing context not available"),
            Self::Platform(msg) => write!(f, "platform error: {msg}"),
        }
    }
}

impl std::error::Error for DisplayError {}
