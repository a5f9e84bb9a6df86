//! Geometry value types shared by the renderer and layout code.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! The textured-quad shader converts to NDC using a viewport uniform.

mod rect;
mod viewport;

pub use rect::Rect;
pub use viewport::Viewport;
