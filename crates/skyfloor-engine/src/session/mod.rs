//! Display session: window, accelerated renderer and image decoders.
//!
//! Only one session may be active per process. Startup is staged and fails
//! fast with an [`InitError`] naming the stage; teardown runs in reverse
//! order of acquisition.

mod canvas;
mod config;
mod display;
mod error;
mod guard;

pub use canvas::SessionCanvas;
pub use config::SessionConfig;
pub use display::DisplaySession;
pub use error::{InitError, InitStage};
