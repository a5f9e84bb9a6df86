//! Swapchain policy: which format, alpha and present mode to configure, and
//! what to do when acquiring a frame fails.

use winit::dpi::PhysicalSize;

/// What the frame loop does after a failed frame acquisition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; the next frame may succeed.
    Reconfigured,
    /// Transient; this frame is skipped.
    SkipFrame,
    /// Rendering cannot continue (out of memory).
    Fatal,
}

impl SurfaceErrorAction {
    pub fn classify(err: &wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => Self::Reconfigured,
            wgpu::SurfaceError::OutOfMemory => Self::Fatal,
            wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => Self::SkipFrame,
        }
    }
}

/// Images are uploaded as sRGB, so an sRGB target shows them unchanged.
pub(crate) fn pick_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let srgb = formats.iter().copied().find(|f| f.is_srgb());
    match srgb {
        Some(f) if prefer_srgb => Some(f),
        _ => formats.first().copied(),
    }
}

pub(crate) fn pick_alpha_mode(
    modes: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    match requested {
        Some(mode) if modes.contains(&mode) => mode,
        _ => modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
    }
}

/// `Auto*` modes are resolved by wgpu; anything else must be advertised,
/// otherwise `Fifo` (always available) is used.
pub(crate) fn pick_present_mode(
    modes: &[wgpu::PresentMode],
    requested: wgpu::PresentMode,
) -> wgpu::PresentMode {
    use wgpu::PresentMode::{AutoNoVsync, AutoVsync, Fifo};

    if matches!(requested, AutoVsync | AutoNoVsync) || modes.contains(&requested) {
        requested
    } else {
        log::warn!("present mode {requested:?} not supported by the surface; falling back to Fifo");
        Fifo
    }
}

/// Configures the surface unless the window is minimized; wgpu rejects
/// zero-sized swapchains.
pub(crate) fn configure_sized(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
) -> bool {
    if size.width == 0 || size.height == 0 {
        return false;
    }
    config.width = size.width;
    config.height = size.height;
    surface.configure(device, config);
    true
}
