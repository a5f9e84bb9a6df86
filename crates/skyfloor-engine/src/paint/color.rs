/// Linear premultiplied RGBA color.
///
/// Invariant: `rgb` components are multiplied by `a`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    /// Opaque white, the session's default clear color.
    #[inline]
    pub const fn white() -> Self {
        Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 }
    }

    /// Creates a color from straight sRGB bytes (`0`-`255`), as written in
    /// config files.
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let channel = |v: u8| srgb_to_linear(f32::from(v) / 255.0);
        Self::from_straight(channel(r), channel(g), channel(b), f32::from(a) / 255.0)
    }

    fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    /// Converts to the clear value used by render pass load ops.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_white_bytes_are_white() {
        assert_eq!(Color::from_srgb_u8(0xFF, 0xFF, 0xFF, 0xFF), Color::white());
    }

    #[test]
    fn srgb_bytes_are_linearized() {
        let c = Color::from_srgb_u8(0x80, 0x00, 0xFF, 0xFF);
        assert!((c.r - 0.2158).abs() < 1e-3);
        assert_eq!(c.g, 0.0);
        assert_eq!(c.b, 1.0);
    }

    #[test]
    fn alpha_is_premultiplied() {
        let c = Color::from_srgb_u8(0xFF, 0xFF, 0xFF, 0x00);
        assert_eq!(c, Color::default());
    }

    #[test]
    fn white_clear_value() {
        let w = Color::white().to_wgpu();
        assert_eq!((w.r, w.g, w.b, w.a), (1.0, 1.0, 1.0, 1.0));
    }
}
