use crate::core::AppControl;
use crate::input::SessionEvent;

use super::Canvas;

/// Frame loop state. `Stopped` is terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Drain-then-draw loop driven once per event-queue pass.
///
/// The loop never waits for events and never limits its own rate; pacing
/// comes from the canvas' present (vsync).
#[derive(Debug)]
pub struct FrameLoop {
    state: LoopState,
    frames: u64,
    discarded: u64,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Running,
            frames: 0,
            discarded: 0,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Frames presented so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Events consumed without effect so far.
    #[inline]
    pub fn discarded_events(&self) -> u64 {
        self.discarded
    }

    /// Stops the loop from outside (e.g. the platform is shutting down).
    pub fn stop(&mut self) {
        self.state = LoopState::Stopped;
    }

    /// Consumes every queued event. A close request stops the loop; the
    /// remaining events of the same batch are still consumed.
    pub fn drain<I>(&mut self, events: I) -> LoopState
    where
        I: IntoIterator<Item = SessionEvent>,
    {
        for event in events {
            match event {
                SessionEvent::CloseRequested => {
                    if self.state == LoopState::Running {
                        log::info!("close requested");
                    }
                    self.state = LoopState::Stopped;
                }
                SessionEvent::Resized { .. } | SessionEvent::Other => self.discarded += 1,
            }
        }
        self.state
    }

    /// One loop iteration: drain `events`, clear, let `draw` issue its
    /// draws, and present.
    ///
    /// An iteration whose drain sees a close request still renders its frame
    /// and then reports `Stopped`. Iterations that begin stopped do nothing.
    /// A fatal present stops the loop.
    pub fn iterate<C, I, F>(&mut self, events: I, canvas: &mut C, draw: F) -> LoopState
    where
        C: Canvas,
        I: IntoIterator<Item = SessionEvent>,
        F: FnOnce(&mut C),
    {
        let was_running = self.is_running();
        self.drain(events);
        if !was_running {
            return self.state;
        }

        canvas.clear();
        draw(canvas);

        match canvas.present() {
            AppControl::Continue => self.frames += 1,
            AppControl::Exit => {
                log::error!("frame could not be presented; stopping frame loop");
                self.state = LoopState::Stopped;
            }
        }

        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::frame::{CanvasOp, RecordingCanvas};

    const DEST: Rect = Rect::new(0.0, 0.0, 4.0, 4.0);

    #[test]
    fn starts_running() {
        let fl = FrameLoop::new();
        assert!(fl.is_running());
        assert_eq!(fl.frames(), 0);
    }

    #[test]
    fn empty_queue_renders_one_frame() {
        let mut fl = FrameLoop::new();
        let mut canvas = RecordingCanvas::new();

        let state = fl.iterate(Vec::new(), &mut canvas, |c| c.draw(Some(&"sky"), DEST));

        assert_eq!(state, LoopState::Running);
        assert_eq!(
            canvas.ops,
            vec![
                CanvasOp::Clear,
                CanvasOp::Draw { texture: "sky", dest: DEST },
                CanvasOp::Present,
            ]
        );
        assert_eq!(fl.frames(), 1);
    }

    #[test]
    fn close_stops_after_rendering_the_draining_frame() {
        let mut fl = FrameLoop::new();
        let mut canvas = RecordingCanvas::new();

        let events = vec![
            SessionEvent::Other,
            SessionEvent::Resized { width: 10, height: 10 },
            SessionEvent::CloseRequested,
            SessionEvent::Other,
        ];
        let state = fl.iterate(events, &mut canvas, |c| c.draw(Some(&"sky"), DEST));

        assert_eq!(state, LoopState::Stopped);
        assert_eq!(
            canvas.ops,
            vec![
                CanvasOp::Clear,
                CanvasOp::Draw { texture: "sky", dest: DEST },
                CanvasOp::Present,
            ]
        );
        assert_eq!(fl.discarded_events(), 3);
        assert_eq!(fl.frames(), 1);
    }

    #[test]
    fn lone_close_still_clears_and_presents() {
        let mut fl = FrameLoop::new();
        let mut canvas = RecordingCanvas::<&str>::new();

        let state = fl.iterate([SessionEvent::CloseRequested], &mut canvas, |_| {});

        assert_eq!(state, LoopState::Stopped);
        assert_eq!(canvas.ops, vec![CanvasOp::Clear, CanvasOp::Present]);
    }

    #[test]
    fn stopped_is_terminal() {
        let mut fl = FrameLoop::new();
        fl.drain([SessionEvent::CloseRequested]);

        let mut canvas = RecordingCanvas::<&str>::new();
        assert_eq!(fl.iterate([SessionEvent::Other], &mut canvas, |_| {}), LoopState::Stopped);
        assert_eq!(fl.iterate(Vec::new(), &mut canvas, |_| {}), LoopState::Stopped);
        assert_eq!(canvas.presents(), 0);
    }

    #[test]
    fn ignored_events_keep_the_loop_running() {
        let mut fl = FrameLoop::new();
        let mut canvas = RecordingCanvas::<&str>::new();

        for _ in 0..3 {
            fl.iterate([SessionEvent::Other, SessionEvent::Other], &mut canvas, |_| {});
        }

        assert!(fl.is_running());
        assert_eq!(fl.frames(), 3);
        assert_eq!(canvas.presents(), 3);
    }

    #[test]
    fn fatal_present_stops_the_loop() {
        let mut fl = FrameLoop::new();
        let mut canvas = RecordingCanvas::<&str> {
            fail_present: true,
            ..Default::default()
        };

        assert_eq!(fl.iterate(Vec::new(), &mut canvas, |_| {}), LoopState::Stopped);
        assert_eq!(fl.frames(), 0);
    }
}
