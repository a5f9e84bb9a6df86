//! Image decoding.
//!
//! Files are decoded into a CPU-side [`PixelSurface`] (RGBA8), which the
//! session then uploads as a GPU texture. Only formats registered in the
//! session's [`ImageCodecs`] are accepted.

mod codecs;
mod error;
mod surface;

pub use codecs::ImageCodecs;
pub use error::LoadError;
pub use image::ImageFormat;
pub use surface::PixelSurface;
