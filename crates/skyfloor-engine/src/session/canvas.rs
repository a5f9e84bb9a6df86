use crate::coords::Rect;
use crate::core::AppControl;
use crate::device::{GpuFrame, SurfaceErrorAction};
use crate::frame::Canvas;
use crate::render::Texture;

use super::DisplaySession;

/// [`Canvas`] backed by the session's swapchain.
///
/// `clear` acquires the frame and records the clear pass, each draw records
/// its own pass in call order, `present` submits and presents. If the frame
/// could not be acquired, draws are dropped and `present` only reports
/// whether the failure was fatal.
pub struct SessionCanvas<'s> {
    session: &'s mut DisplaySession,
    frame: Option<GpuFrame>,
    fatal: bool,
}

impl<'s> SessionCanvas<'s> {
    pub(super) fn new(session: &'s mut DisplaySession) -> Self {
        Self {
            session,
            frame: None,
            fatal: false,
        }
    }

    fn acquire(&mut self) -> Option<GpuFrame> {
        match self.session.begin_frame() {
            Ok(frame) => Some(frame),
            Err(err) => {
                log::debug!("surface error: {err}");
                if self.session.handle_surface_error(err) == SurfaceErrorAction::Fatal {
                    log::error!("surface failure is unrecoverable");
                    self.fatal = true;
                }
                None
            }
        }
    }
}

impl Canvas for SessionCanvas<'_> {
    type Texture = Texture;

    fn clear(&mut self) {
        // An unpresented frame from an earlier clear is discarded.
        self.frame = None;

        let Some(mut frame) = self.acquire() else { return };

        let clear_color = self.session.clear_color().to_wgpu();
        frame.target().clear(clear_color);

        let (ctx, renderer) = self.session.render_parts();
        renderer.begin_frame(&ctx);

        self.frame = Some(frame);
    }

    fn draw_texture(&mut self, texture: &Texture, dest: Rect) {
        let Some(frame) = self.frame.as_mut() else { return };

        let (ctx, renderer) = self.session.render_parts();
        renderer.draw(&ctx, &mut frame.target(), texture, dest);
    }

    fn present(&mut self) -> AppControl {
        if let Some(frame) = self.frame.take() {
            self.session.submit(frame);
        }

        if self.fatal {
            AppControl::Exit
        } else {
            AppControl::Continue
        }
    }
}
