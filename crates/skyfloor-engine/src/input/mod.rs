//! Input subsystem.
//!
//! The frame loop consumes platform-agnostic [`SessionEvent`]s; the runtime
//! translates winit events with [`translate_window_event`].

mod event;
mod winit;

pub use event::SessionEvent;
pub use self::winit::translate_window_event;
