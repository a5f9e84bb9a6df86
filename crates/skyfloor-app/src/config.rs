use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use skyfloor_engine::device::GpuInit;
use skyfloor_engine::paint::Color;
use skyfloor_engine::session::SessionConfig;

use crate::layout::LayoutConfig;

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "skyfloor.toml";

/// Overrides [`DEFAULT_CONFIG_FILE`].
pub const CONFIG_ENV: &str = "SKYFLOOR_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Demo configuration. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    pub title: String,

    #[serde(alias = "screenWidth")]
    pub screen_width: u32,

    #[serde(alias = "screenHeight")]
    pub screen_height: u32,

    /// Defaults to `screen_width - 300`.
    #[serde(alias = "imageWidth")]
    pub image_width: Option<u32>,

    /// Defaults to `screen_height - 500`.
    #[serde(alias = "imageHeight")]
    pub image_height: Option<u32>,

    /// Drawn on top.
    pub sky_path: PathBuf,

    /// Drawn below the sky.
    pub floor_path: PathBuf,

    pub vsync: bool,

    /// sRGB background the images are drawn over.
    #[serde(alias = "clearColor")]
    pub clear_color: [u8; 3],

    /// `env_logger` filter; `RUST_LOG` applies when unset.
    pub log_filter: Option<String>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "2D Rendering".to_string(),
            screen_width: 800,
            screen_height: 1000,
            image_width: None,
            image_height: None,
            sky_path: PathBuf::from("./Assets/Chunthewulf.jpg"),
            floor_path: PathBuf::from("./Assets/Chunthesun.jpg"),
            vsync: true,
            clear_color: [0xFF, 0xFF, 0xFF],
            log_filter: None,
        }
    }
}

impl DemoConfig {
    /// Config path: `$SKYFLOOR_CONFIG`, else `./skyfloor.toml`.
    pub fn locate() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Reads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("no config at {}; using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn layout(&self) -> LayoutConfig {
        let derived = LayoutConfig::from_screen(self.screen_width, self.screen_height);
        LayoutConfig {
            image_width: self.image_width.unwrap_or(derived.image_width),
            image_height: self.image_height.unwrap_or(derived.image_height),
            ..derived
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        let [r, g, b] = self.clear_color;
        SessionConfig {
            title: self.title.clone(),
            clear_color: Color::from_srgb_u8(r, g, b, 0xFF),
            width: self.screen_width,
            height: self.screen_height,
            gpu: GpuInit::with_vsync(self.vsync),
            ..SessionConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(DemoConfig::from_toml_str("").unwrap(), DemoConfig::default());
    }

    #[test]
    fn defaults_reproduce_fixed_window() {
        let cfg = DemoConfig::default();
        assert_eq!(cfg.layout(), LayoutConfig::default());

        let session = cfg.session_config();
        assert_eq!((session.width, session.height), (800, 1000));
        assert_eq!(session.title, "2D Rendering");
        assert!(session.gpu.vsync());
        assert_eq!(session.clear_color, Color::white());
    }

    #[test]
    fn image_size_follows_screen_unless_set() {
        let cfg = DemoConfig::from_toml_str("screen_width = 1000\nscreen_height = 1200\n").unwrap();
        assert_eq!(cfg.layout(), LayoutConfig {
            screen_width: 1000,
            screen_height: 1200,
            image_width: 700,
            image_height: 700,
        });

        let cfg = DemoConfig::from_toml_str("screen_width = 1000\nimage_width = 640\n").unwrap();
        assert_eq!(cfg.layout().image_width, 640);
        assert_eq!(cfg.layout().image_height, 500);
    }

    #[test]
    fn camel_case_option_names_are_accepted() {
        let cfg = DemoConfig::from_toml_str(
            "screenWidth = 640\nscreenHeight = 960\nimageWidth = 320\nimageHeight = 480\n",
        )
        .unwrap();
        assert_eq!(cfg.layout(), LayoutConfig {
            screen_width: 640,
            screen_height: 960,
            image_width: 320,
            image_height: 480,
        });
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(DemoConfig::from_toml_str("fullscreen = true\n").is_err());
    }

    #[test]
    fn missing_file_means_defaults() {
        let path = std::env::temp_dir().join(format!("skyfloor-{}-absent.toml", std::process::id()));
        assert_eq!(DemoConfig::load(&path).unwrap(), DemoConfig::default());
    }

    #[test]
    fn malformed_file_reports_path() {
        let path = std::env::temp_dir().join(format!("skyfloor-{}-bad.toml", std::process::id()));
        std::fs::write(&path, "screen_width = \"wide\"\n").unwrap();

        let err = DemoConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn vsync_off_maps_to_present_mode() {
        let cfg = DemoConfig::from_toml_str("vsync = false\n").unwrap();
        assert!(!cfg.session_config().gpu.vsync());
    }

    #[test]
    fn clear_color_is_configurable() {
        let cfg = DemoConfig::from_toml_str("clear_color = [0, 0, 0]\n").unwrap();
        let clear = cfg.session_config().clear_color;
        assert_eq!((clear.r, clear.g, clear.b, clear.a), (0.0, 0.0, 0.0, 1.0));
    }
}
