//! Frame loop.
//!
//! Each iteration drains the pending events, then clears, draws and presents
//! through a [`Canvas`]. A close request ends the loop for good.

mod canvas;
mod frame_loop;

pub use canvas::{Canvas, CanvasOp, RecordingCanvas};
pub use frame_loop::{FrameLoop, LoopState};
