use std::path::{Path, PathBuf};

use image::{ImageReader, RgbaImage};

use super::{ImageCodecs, LoadError};

/// Decoded RGBA8 pixels, not yet uploaded to the GPU.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    path: PathBuf,
    pixels: RgbaImage,
}

impl PixelSurface {
    /// Decodes the file at `path`.
    ///
    /// The format is sniffed from the file contents, falling back to the
    /// extension, and must be one of `codecs`.
    pub fn decode(codecs: &ImageCodecs, path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let open_err = |source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        };

        let reader = ImageReader::open(path)
            .map_err(open_err)?
            .with_guessed_format()
            .map_err(open_err)?;

        match reader.format() {
            Some(format) if codecs.supports(format) => {}
            other => {
                return Err(LoadError::Unsupported {
                    path: path.to_path_buf(),
                    format: other.map_or_else(|| "unknown".to_string(), |f| format!("{f:?}")),
                });
            }
        }

        let pixels = reader
            .decode()
            .map_err(|source| LoadError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .into_rgba8();

        log::debug!("decoded {} ({}x{})", path.display(), pixels.width(), pixels.height());

        Ok(Self {
            path: path.to_path_buf(),
            pixels,
        })
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Tightly packed RGBA8 rows, top row first.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage, Rgba};

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("skyfloor-{}-{name}", std::process::id()))
    }

    fn codecs() -> ImageCodecs {
        ImageCodecs::init(&[ImageFormat::Jpeg]).unwrap()
    }

    #[test]
    fn missing_file_is_open_error() {
        let path = scratch("does-not-exist.png");
        let err = PixelSurface::decode(&codecs(), &path).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
        assert_eq!(err.path(), path.as_path());
        assert!(err.to_string().contains("does-not-exist.png"));
    }

    #[test]
    fn png_decodes_to_rgba() {
        let path = scratch("tiny.png");
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(2, 1, Rgba([10, 20, 30, 255]));
        img.save(&path).unwrap();

        let surface = PixelSurface::decode(&codecs(), &path).unwrap();
        assert_eq!((surface.width(), surface.height()), (3, 2));
        assert_eq!(surface.as_bytes().len(), 3 * 2 * 4);
        assert_eq!(&surface.as_bytes()[20..24], &[10, 20, 30, 255]);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn corrupt_png_is_decode_error() {
        let path = scratch("corrupt.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let err = PixelSurface::decode(&codecs(), &path).unwrap_err();
        assert!(matches!(err, LoadError::Decode { .. }), "{err}");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn unknown_content_is_unsupported() {
        let path = scratch("notes.txt");
        std::fs::write(&path, b"plain text").unwrap();

        let err = PixelSurface::decode(&codecs(), &path).unwrap_err();
        assert!(matches!(err, LoadError::Unsupported { .. }), "{err}");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn format_outside_codec_set_is_unsupported() {
        let path = scratch("photo.jpg");
        RgbImage::from_pixel(4, 4, Rgb([200, 100, 50])).save(&path).unwrap();

        let png_only = ImageCodecs::init(&[]).unwrap();
        let err = PixelSurface::decode(&png_only, &path).unwrap_err();
        assert!(matches!(err, LoadError::Unsupported { ref format, .. } if format == "Jpeg"));

        // Same file loads once JPEG is registered.
        assert!(PixelSurface::decode(&codecs(), &path).is_ok());

        std::fs::remove_file(&path).ok();
    }
}
