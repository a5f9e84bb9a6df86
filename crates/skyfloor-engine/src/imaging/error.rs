use std::path::{Path, PathBuf};

/// Why an image could not be turned into a texture.
///
/// Every variant is recoverable: the caller decides whether to continue
/// without the texture.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("unable to open image {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to load image {}: unsupported format ({format})", .path.display())]
    Unsupported { path: PathBuf, format: String },

    #[error("unable to load image {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("unable to create texture from {}: {message}", .path.display())]
    Upload { path: PathBuf, message: String },
}

impl LoadError {
    /// Path of the image that failed to load.
    pub fn path(&self) -> &Path {
        match self {
            LoadError::Open { path, .. }
            | LoadError::Unsupported { path, .. }
            | LoadError::Decode { path, .. }
            | LoadError::Upload { path, .. } => path,
        }
    }
}
