use image::ImageFormat;
use winit::dpi::LogicalSize;

use crate::device::GpuInit;
use crate::paint::Color;

use super::{InitError, InitStage};

/// Display session parameters.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub title: String,
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Color every frame is cleared to.
    pub clear_color: Color,
    pub gpu: GpuInit,
    /// Formats to decode in addition to PNG.
    pub image_formats: Vec<ImageFormat>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            title: "2D Rendering".to_string(),
            width: 800,
            height: 1000,
            clear_color: Color::white(),
            gpu: GpuInit::default(),
            image_formats: vec![ImageFormat::Png, ImageFormat::Jpeg],
        }
    }
}

impl SessionConfig {
    /// Validated window size.
    ///
    /// Zero or out-of-range dimensions fail at the window stage, before any
    /// window or renderer exists.
    pub fn window_size(&self) -> Result<LogicalSize<u32>, InitError> {
        let limit = i32::MAX as u32;
        if self.width == 0 || self.height == 0 || self.width > limit || self.height > limit {
            return Err(InitError::new(
                InitStage::Window,
                format!("invalid window dimensions {}x{}", self.width, self.height),
            ));
        }
        Ok(LogicalSize::new(self.width, self.height))
    }
}
