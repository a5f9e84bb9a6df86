use crate::session::{DisplaySession, SessionCanvas};

/// Control directive returned by frame operations.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by [`Runtime`](crate::window::Runtime).
pub trait App {
    /// Called once, right after the display session has started. Load
    /// textures here.
    fn on_start(&mut self, session: &DisplaySession);

    /// Called once per frame-loop iteration between clear and present.
    fn on_frame(&mut self, canvas: &mut SessionCanvas<'_>);

    /// Called once before the session stops. Release every texture here.
    fn on_stop(&mut self);
}
