//! Application configuration, read from a TOML document.
//!
//! The document is accepted or rejected as a whole: if it cannot be read or
//! parsed, every value falls back to the built-in defaults. Keys omitted from
//! a valid document take their individual defaults.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use log::{info, warn};
use serde::Deserialize;

use crate::error::ConfigError;

/// An RGB triple, written as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub [u8; 3]);

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub window: WindowConfig,
    pub slideshow: SlideshowConfig,
    pub colors: ColorConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub fullscreen: bool,
    pub menu_width: u32,
    pub fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            fullscreen: true,
            menu_width: 205,
            fps: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlideshowConfig {
    /// Time between automatic slide changes.
    pub image_delay_ms: u64,
    /// Delay before auto-advance resumes after startup, a category change or
    /// manual navigation.
    pub start_delay_ms: u64,
    /// Duration of the cross-fade between two slides.
    pub fade_speed_ms: u64,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            image_delay_ms: 15_000,
            start_delay_ms: 20_000,
            fade_speed_ms: 500,
        }
    }
}

impl SlideshowConfig {
    pub fn image_delay(&self) -> Duration {
        Duration::from_millis(self.image_delay_ms)
    }

    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_speed_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub background: Rgb,
    pub font_active: Rgb,
    pub font_inactive: Rgb,
    pub loading_text: Rgb,
    pub spinner: Rgb,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: Rgb([0, 0, 0]),
            font_active: Rgb([255, 255, 255]),
            font_inactive: Rgb([150, 150, 150]),
            loading_text: Rgb([200, 200, 200]),
            spinner: Rgb([255, 255, 255]),
        }
    }
}

impl Config {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        if config.window.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        Ok(config)
    }
}

/// Loads the configuration at `path`, degrading to defaults on any problem.
pub fn load_config(path: &Path) -> Config {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("No configuration at {}, using defaults", path.display());
            return Config::default();
        }
        Err(e) => {
            warn!("Could not read {}: {}; using defaults", path.display(), e);
            return Config::default();
        }
    };

    match Config::parse(&text) {
        Ok(config) => {
            info!("Loaded configuration from {}", path.display());
            config
        }
        Err(e) => {
            warn!("Invalid configuration in {}: {}; using defaults", path.display(), e);
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml"));

        assert_eq!(config, Config::default());
        assert_eq!(config.window.fps, 30);
        assert_eq!(config.window.menu_width, 205);
        assert!(config.window.fullscreen);
        assert_eq!(config.slideshow.image_delay_ms, 15_000);
        assert_eq!(config.slideshow.start_delay_ms, 20_000);
        assert_eq!(config.colors.font_inactive, Rgb([150, 150, 150]));
    }

    #[test]
    fn test_malformed_file_gives_full_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wall-display.toml");
        fs::write(&path, "[window]\nfps = 60\n[slideshow\n").unwrap();

        assert_eq!(load_config(&path), Config::default());
    }

    #[test]
    fn test_wrong_type_is_not_merged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wall-display.toml");
        fs::write(&path, "[window]\nfps = 60\n[colors]\nspinner = \"red\"\n").unwrap();

        let config = load_config(&path);
        assert_eq!(config.window.fps, 30);
    }

    #[test]
    fn test_partial_document_fills_omitted_keys() {
        let text = "[window]\nfullscreen = false\n\n[slideshow]\nimage_delay_ms = 5000\n";
        let config = Config::parse(text).unwrap();

        assert!(!config.window.fullscreen);
        assert_eq!(config.window.fps, 30);
        assert_eq!(config.slideshow.image_delay(), Duration::from_secs(5));
        assert_eq!(config.slideshow.start_delay_ms, 20_000);
        assert_eq!(config.colors, ColorConfig::default());
    }

    #[test]
    fn test_unknown_key_and_zero_fps_are_rejected() {
        assert!(matches!(
            Config::parse("[window]\nwidth = 3\n"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::parse("[window]\nfps = 0\n"),
            Err(ConfigError::ZeroFps)
        ));
    }

    #[test]
    fn test_colors() {
        let config = Config::parse("[colors]\nbackground = [10, 20, 30]\n").unwrap();
        assert_eq!(config.colors.background, Rgb([10, 20, 30]));
        assert_eq!(config.colors.font_active, Rgb([255, 255, 255]));
    }
}
