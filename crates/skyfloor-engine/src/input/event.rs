/// Window event as seen by the frame loop.
///
/// Platform events are translated into this set; everything the loop does
/// not act on collapses into `Other`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SessionEvent {
    /// The user or the OS asked the window to close.
    CloseRequested,
    /// Drawable size changed (physical pixels).
    Resized { width: u32, height: u32 },
    /// Any other input; drained and ignored.
    Other,
}
