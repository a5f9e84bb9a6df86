//! Window runtime loop.
//!
//! Owns the winit `EventLoop`, starts the display session and feeds the
//! frame loop.

mod runtime;

pub use runtime::{RunError, Runtime};
