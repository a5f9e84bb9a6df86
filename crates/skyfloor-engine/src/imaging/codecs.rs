use image::ImageFormat;

use crate::session::{InitError, InitStage};

/// The set of image formats a session will decode.
///
/// PNG is always part of the set. Other formats are included only if this
/// build of the decoder can read them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCodecs {
    formats: Vec<ImageFormat>,
}

impl ImageCodecs {
    /// Builds the codec set from the requested formats.
    ///
    /// Fails only when PNG cannot be decoded. Unavailable optional formats
    /// are logged and left out; files in those formats fail at load time.
    pub fn init(requested: &[ImageFormat]) -> Result<Self, InitError> {
        if !ImageFormat::Png.reading_enabled() {
            return Err(InitError::new(
                InitStage::ImageCodecs,
                "PNG decoding is not available in this build",
            ));
        }

        let mut formats = vec![ImageFormat::Png];
        for &format in requested {
            if formats.contains(&format) {
                continue;
            }
            if format.reading_enabled() {
                formats.push(format);
            } else {
                log::warn!("{format:?} decoding is not available; such files will fail to load");
            }
        }

        log::debug!("image codecs initialized: {formats:?}");
        Ok(Self { formats })
    }

    #[inline]
    pub fn supports(&self, format: ImageFormat) -> bool {
        self.formats.contains(&format)
    }

    #[inline]
    pub fn formats(&self) -> &[ImageFormat] {
        &self.formats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_is_always_enabled() {
        let codecs = ImageCodecs::init(&[]).unwrap();
        assert_eq!(codecs.formats(), &[ImageFormat::Png]);
        assert!(codecs.supports(ImageFormat::Png));
        assert!(!codecs.supports(ImageFormat::Jpeg));
    }

    #[test]
    fn jpeg_is_added_once() {
        let codecs =
            ImageCodecs::init(&[ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::Jpeg]).unwrap();
        assert_eq!(codecs.formats(), &[ImageFormat::Png, ImageFormat::Jpeg]);
    }

    #[test]
    fn unavailable_format_is_skipped_not_fatal() {
        // TIFF support is not compiled in.
        let codecs = ImageCodecs::init(&[ImageFormat::Tiff]).unwrap();
        assert!(!codecs.supports(ImageFormat::Tiff));
    }
}
