use std::path::Path;

use ouroboros::self_referencing;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::coords::Viewport;
use crate::device::{Gpu, GpuFrame, SurfaceErrorAction};
use crate::imaging::{ImageCodecs, LoadError, PixelSurface};
use crate::paint::Color;
use crate::render::{ImageRenderer, RenderCtx, Texture};

use super::guard::SubsystemGuard;
use super::{InitError, InitStage, SessionCanvas, SessionConfig};

/// Window plus the GPU context whose surface borrows it.
#[self_referencing]
struct SessionCore {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// The window, its accelerated renderer and the image decoders.
///
/// Created by [`DisplaySession::start`] and released by
/// [`DisplaySession::stop`] (or on drop, in the same order): pipeline, GPU
/// context, window, decoders, then the process-wide subsystem claim.
/// Textures loaded through the session must be dropped before it.
pub struct DisplaySession {
    // Field order is drop order.
    renderer: ImageRenderer,
    core: SessionCore,
    codecs: ImageCodecs,
    clear_color: Color,
    _subsystem: SubsystemGuard,
}

impl DisplaySession {
    /// Starts the session: claims the subsystem, creates the window, then the
    /// renderer, then the decoder set.
    ///
    /// Fails fast at the first failing stage. Anything created before the
    /// failure is released before returning.
    pub fn start(event_loop: &ActiveEventLoop, config: &SessionConfig) -> Result<Self, InitError> {
        let (subsystem, size) = Self::preflight(config)?;

        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(size)
            .with_resizable(false);

        let window = event_loop
            .create_window(attrs)
            .map_err(|e| InitError::new(InitStage::Window, e.to_string()))?;

        log::info!("window created: \"{}\" {}x{}", config.title, size.width, size.height);

        let gpu_init = config.gpu.clone();
        let core = SessionCoreTryBuilder {
            window,
            gpu_builder: |window| pollster::block_on(Gpu::new(window, gpu_init)),
        }
        .try_build()
        .map_err(|e| {
            log::debug!("renderer creation failed; window released");
            InitError::from_anyhow(InitStage::Renderer, &e)
        })?;

        let renderer = {
            let gpu = core.borrow_gpu();
            ImageRenderer::new(gpu.device(), gpu.surface_format())
        };
        log::info!(
            "renderer created ({:?}, {:?}, vsync {})",
            renderer.format(),
            core.borrow_gpu().present_mode(),
            config.gpu.vsync()
        );

        let codecs = ImageCodecs::init(&config.image_formats)?;
        log::info!("image decoders ready: {:?}", codecs.formats());

        Ok(Self {
            renderer,
            core,
            codecs,
            clear_color: config.clear_color,
            _subsystem: subsystem,
        })
    }

    /// Startup steps that need no event loop: claim the subsystem, then
    /// validate the window size. On failure the claim is already released.
    fn preflight(config: &SessionConfig) -> Result<(SubsystemGuard, LogicalSize<u32>), InitError> {
        let subsystem = SubsystemGuard::acquire()?;
        let size = config.window_size()?;
        Ok((subsystem, size))
    }

    /// Whether any display session currently holds the subsystem.
    pub fn is_active() -> bool {
        SubsystemGuard::is_held()
    }

    /// Releases the renderer, then the window, then the decoders and the
    /// subsystem claim. Consumes the session so no handle outlives it.
    pub fn stop(self) {
        let Self {
            renderer,
            core,
            codecs,
            clear_color: _,
            _subsystem,
        } = self;

        drop(renderer);

        // Drops the GPU context (surface, device) and hands back the window.
        let heads = core.into_heads();
        log::debug!("renderer destroyed");

        drop(heads.window);
        log::debug!("window destroyed");

        drop(codecs);
        drop(_subsystem);
        log::info!("display session stopped");
    }

    pub fn window(&self) -> &Window {
        self.core.borrow_window()
    }

    pub fn window_id(&self) -> WindowId {
        self.window().id()
    }

    pub fn gpu(&self) -> &Gpu<'_> {
        self.core.borrow_gpu()
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Window size in logical pixels; the coordinate space of draw calls.
    pub fn viewport(&self) -> Viewport {
        let window = self.window();
        Viewport::from_physical(window.inner_size(), window.scale_factor())
    }

    /// Reconfigures the swapchain for a new drawable size.
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.core.with_gpu_mut(|gpu| gpu.resize(size));
    }

    /// Re-reads the window size (e.g. after a scale factor change).
    pub fn refresh_size(&mut self) {
        let size = self.window().inner_size();
        self.resize(size);
    }

    /// Decodes `path` and uploads it as a texture.
    ///
    /// The decoded pixels are released whether or not the upload succeeds.
    pub fn load_texture(&self, path: impl AsRef<Path>) -> Result<Texture, LoadError> {
        let surface = PixelSurface::decode(&self.codecs, path)?;
        self.upload(&surface)
    }

    /// Uploads already decoded pixels as a texture.
    pub fn upload(&self, surface: &PixelSurface) -> Result<Texture, LoadError> {
        let gpu = self.gpu();
        self.renderer
            .create_texture(gpu.device(), gpu.queue(), surface, gpu.max_texture_dimension())
    }

    /// Canvas for one frame of drawing.
    pub fn canvas(&mut self) -> SessionCanvas<'_> {
        SessionCanvas::new(self)
    }

    // ── frame plumbing for `SessionCanvas` ────────────────────────────────

    pub(super) fn begin_frame(&self) -> Result<GpuFrame, wgpu::SurfaceError> {
        self.gpu().begin_frame()
    }

    pub(super) fn handle_surface_error(&mut self, err: wgpu::SurfaceError) -> SurfaceErrorAction {
        self.core.with_gpu_mut(|gpu| gpu.handle_surface_error(err))
    }

    /// Renderer context for the current viewport plus the image renderer.
    pub(super) fn render_parts(&mut self) -> (RenderCtx<'_>, &mut ImageRenderer) {
        let viewport = self.viewport();
        let gpu = self.core.borrow_gpu();
        let ctx = RenderCtx::new(gpu.device(), gpu.queue(), viewport);
        (ctx, &mut self.renderer)
    }

    pub(super) fn submit(&self, frame: GpuFrame) {
        self.window().pre_present_notify();
        self.gpu().submit(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::guard::serial_slot;

    #[test]
    fn invalid_size_fails_at_window_stage_and_frees_the_slot() {
        let _serial = serial_slot();
        let config = SessionConfig {
            width: 0,
            ..SessionConfig::default()
        };

        let err = DisplaySession::preflight(&config).unwrap_err();

        assert_eq!(err.stage, InitStage::Window);
        assert!(!DisplaySession::is_active());
    }

    #[test]
    fn second_session_is_refused_while_one_is_active() {
        let _serial = serial_slot();
        let config = SessionConfig::default();

        let (claim, size) = DisplaySession::preflight(&config).unwrap();
        assert_eq!(size, LogicalSize::new(800, 1000));
        assert!(DisplaySession::is_active());

        let err = DisplaySession::preflight(&config).unwrap_err();
        assert_eq!(err.stage, InitStage::Subsystem);
        assert!(DisplaySession::is_active());

        drop(claim);
        assert!(!DisplaySession::is_active());
    }
}
