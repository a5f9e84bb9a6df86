//! Paint model shared between the session and renderers.
//!
//! Only solid colors are needed: the clear color of each frame. Images are
//! drawn from textures and carry their own pixels.

pub mod color;

pub use color::Color;
