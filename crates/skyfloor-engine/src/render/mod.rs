//! GPU rendering subsystem.
//!
//! The only primitive is a texture stretched into a destination rectangle.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shader converts to NDC using a viewport uniform.

mod ctx;
mod image;
mod quad;
mod texture;

pub use ctx::{RenderCtx, RenderTarget};
pub use image::ImageRenderer;
pub use texture::Texture;
