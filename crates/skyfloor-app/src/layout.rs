//! Where the two images go.
//!
//! Sky on top, floor directly below, both horizontally centered and drawn
//! at the same fixed size whatever their native resolution.

use skyfloor_engine::coords::Rect;

/// Horizontal margin the default image width leaves (`screen - 300`).
pub const DEFAULT_WIDTH_MARGIN: u32 = 300;
/// Vertical margin the default image height leaves (`screen - 500`).
pub const DEFAULT_HEIGHT_MARGIN: u32 = 500;

/// Screen and image dimensions in logical pixels.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LayoutConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    pub image_width: u32,
    pub image_height: u32,
}

impl LayoutConfig {
    /// Image size derived from the screen with the default margins.
    pub fn from_screen(screen_width: u32, screen_height: u32) -> Self {
        Self {
            screen_width,
            screen_height,
            image_width: screen_width.saturating_sub(DEFAULT_WIDTH_MARGIN),
            image_height: screen_height.saturating_sub(DEFAULT_HEIGHT_MARGIN),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::from_screen(800, 1000)
    }
}

/// Destination rectangles of the two images.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StackedLayout {
    pub sky: Rect,
    pub floor: Rect,
}

impl StackedLayout {
    /// Integer layout: `x = (screen_width - image_width) / 2` (truncating),
    /// sky at `y = 0`, floor at `y = image_height`.
    ///
    /// An image wider than the screen gets a negative `x` and is clipped on
    /// both sides.
    pub fn compute(cfg: &LayoutConfig) -> Self {
        let x = (i64::from(cfg.screen_width) - i64::from(cfg.image_width)) / 2;
        let (w, h) = (cfg.image_width as f32, cfg.image_height as f32);

        Self {
            sky: Rect::new(x as f32, 0.0, w, h),
            floor: Rect::new(x as f32, h, w, h),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_geometry() {
        let cfg = LayoutConfig::default();
        assert_eq!((cfg.image_width, cfg.image_height), (500, 500));

        let layout = StackedLayout::compute(&cfg);
        assert_eq!(layout.sky, Rect::new(150.0, 0.0, 500.0, 500.0));
        assert_eq!(layout.floor, Rect::new(150.0, 500.0, 500.0, 500.0));
    }

    #[test]
    fn floor_starts_where_sky_ends() {
        for screen_height in (0..=2000).step_by(37) {
            for image_height in (0..=screen_height).step_by(13) {
                let cfg = LayoutConfig {
                    screen_width: 800,
                    screen_height,
                    image_width: 500,
                    image_height,
                };
                let layout = StackedLayout::compute(&cfg);
                assert_eq!(layout.sky.y, 0.0);
                assert_eq!(layout.floor.y, layout.sky.y + layout.sky.height);
                assert!(layout.sky.bottom() <= layout.floor.y);
            }
        }
    }

    #[test]
    fn both_images_share_size_and_column() {
        let cfg = LayoutConfig {
            screen_width: 1024,
            screen_height: 768,
            image_width: 320,
            image_height: 240,
        };
        let layout = StackedLayout::compute(&cfg);
        assert_eq!(layout.sky.x, layout.floor.x);
        assert_eq!(
            (layout.sky.width, layout.sky.height),
            (layout.floor.width, layout.floor.height)
        );
        assert_eq!(layout.sky.x, 352.0);
    }

    #[test]
    fn odd_margin_truncates() {
        let cfg = LayoutConfig {
            image_width: 499,
            ..LayoutConfig::default()
        };
        assert_eq!(StackedLayout::compute(&cfg).sky.x, 150.0);
    }

    #[test]
    fn image_wider_than_screen_goes_negative() {
        let cfg = LayoutConfig {
            screen_width: 400,
            screen_height: 1000,
            image_width: 500,
            image_height: 500,
        };
        assert_eq!(StackedLayout::compute(&cfg).sky.x, -50.0);
    }

    #[test]
    fn small_screen_derives_empty_images() {
        let cfg = LayoutConfig::from_screen(200, 400);
        assert_eq!((cfg.image_width, cfg.image_height), (0, 0));
        assert!(StackedLayout::compute(&cfg).sky.is_empty());
    }
}
