use winit::dpi::PhysicalSize;

/// Drawable area in logical pixels. Draw rectangles are expressed in this
/// space; the image shader maps it to clip space.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Converts a physical window size with the window's scale factor.
    ///
    /// Non-positive or non-finite scale factors count as 1.
    pub fn from_physical(size: PhysicalSize<u32>, scale_factor: f64) -> Self {
        let scale = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            1.0
        };
        Self::new(
            (f64::from(size.width) / scale) as f32,
            (f64::from(size.height) / scale) as f32,
        )
    }

    /// A minimized window reports 0x0.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Size as uploaded to the shader; never zero so the NDC divide stays
    /// finite.
    #[inline]
    pub fn shader_size(self) -> [f32; 2] {
        if self.is_valid() {
            [self.width, self.height]
        } else {
            [1.0, 1.0]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidpi_window_maps_back_to_logical() {
        let vp = Viewport::from_physical(PhysicalSize::new(1600, 2000), 2.0);
        assert_eq!(vp, Viewport::new(800.0, 1000.0));
    }

    #[test]
    fn bogus_scale_factor_is_ignored() {
        let vp = Viewport::from_physical(PhysicalSize::new(800, 1000), 0.0);
        assert_eq!(vp, Viewport::new(800.0, 1000.0));
    }

    #[test]
    fn minimized_window_uploads_unit_size() {
        let vp = Viewport::from_physical(PhysicalSize::new(0, 0), 1.0);
        assert!(!vp.is_valid());
        assert_eq!(vp.shader_size(), [1.0, 1.0]);
    }
}
