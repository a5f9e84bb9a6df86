//! Skyfloor engine crate.
//!
//! Display session (window + wgpu renderer + image decoders), texture
//! loading, the frame loop and the winit runtime that drives it.

pub mod coords;
pub mod core;
pub mod device;
pub mod frame;
pub mod imaging;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod session;
pub mod window;
