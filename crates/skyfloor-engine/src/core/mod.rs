//! Core engine-facing contracts.
//!
//! Defines the interface between the runtime (platform loop) and the
//! application without leaking winit types into it.

mod app;

pub use app::{App, AppControl};
