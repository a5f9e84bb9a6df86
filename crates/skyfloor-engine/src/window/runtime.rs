use winit::application::ApplicationHandler;
use winit::error::EventLoopError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use crate::core::App;
use crate::frame::{FrameLoop, LoopState};
use crate::input::{translate_window_event, SessionEvent};
use crate::session::{DisplaySession, InitError, InitStage, SessionConfig};

/// Why [`Runtime::run`] did not finish with a normal close.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The display session could not start; the frame loop never ran.
    #[error(transparent)]
    Init(#[from] InitError),

    #[error("event loop terminated with error: {0}")]
    EventLoop(#[from] EventLoopError),
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the display session, runs the frame loop until the window is
    /// closed, then tears everything down.
    ///
    /// The event loop polls: an iteration runs whenever winit has drained
    /// its queue, with no waiting in between.
    pub fn run<A>(config: SessionConfig, app: A) -> Result<(), RunError>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new()
            .map_err(|e| InitError::new(InitStage::Subsystem, e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut state = RuntimeState::new(config, app);
        event_loop.run_app(&mut state)?;

        // Covers platforms that return from `run_app` without `exiting`.
        state.shutdown();

        match state.failure.take() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

struct RuntimeState<A>
where
    A: App + 'static,
{
    config: SessionConfig,
    app: A,

    session: Option<DisplaySession>,
    frame_loop: FrameLoop,
    pending: Vec<SessionEvent>,

    failure: Option<InitError>,
}

impl<A> RuntimeState<A>
where
    A: App + 'static,
{
    fn new(config: SessionConfig, app: A) -> Self {
        Self {
            config,
            app,
            session: None,
            frame_loop: FrameLoop::new(),
            pending: Vec::new(),
            failure: None,
        }
    }

    /// Releases textures, then the session. Idempotent.
    fn shutdown(&mut self) {
        self.frame_loop.stop();

        let Some(session) = self.session.take() else { return };

        self.app.on_stop();
        log::info!(
            "frame loop stopped after {} frames ({} events ignored)",
            self.frame_loop.frames(),
            self.frame_loop.discarded_events()
        );
        session.stop();
        debug_assert!(!DisplaySession::is_active());
    }
}

impl<A> ApplicationHandler for RuntimeState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() || !self.frame_loop.is_running() {
            return;
        }

        event_loop.set_control_flow(ControlFlow::Poll);

        match DisplaySession::start(event_loop, &self.config) {
            Ok(session) => {
                self.app.on_start(&session);
                self.session = Some(session);
            }
            Err(err) => {
                log::debug!("display session failed at the {} stage", err.stage);
                self.failure = Some(err);
                self.frame_loop.stop();
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(session) = self.session.as_mut() else { return };
        if window_id != session.window_id() {
            return;
        }

        // Swapchain bookkeeping happens immediately; the loop only sees the event.
        match &event {
            WindowEvent::Resized(size) => session.resize(*size),
            WindowEvent::ScaleFactorChanged { .. } => session.refresh_size(),
            _ => {}
        }

        self.pending.push(translate_window_event(&event));
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Self {
            app,
            session,
            frame_loop,
            pending,
            ..
        } = self;

        let Some(session) = session.as_mut() else { return };

        let state = {
            let mut canvas = session.canvas();
            frame_loop.iterate(pending.drain(..), &mut canvas, |canvas| app.on_frame(canvas))
        };

        if state == LoopState::Stopped {
            self.shutdown();
            event_loop.exit();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}
