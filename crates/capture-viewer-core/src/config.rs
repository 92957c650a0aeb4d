use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::{PixelFormat, Resolution};

/// Fixed paths and timings of the viewer.
///
/// Every path is relative to the working directory unless made absolute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub settings_path: PathBuf,
    pub screenshot_dir: PathBuf,
    /// Overrides icon lookup; `None` searches next to the executable, then
    /// the working directory.
    pub resource_dir: Option<PathBuf>,
    pub resolution: Resolution,
    pub pixel_format: PixelFormat,
    pub tick_interval_ms: u64,
    pub flash_duration_ms: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            settings_path: PathBuf::from("settings.json"),
            screenshot_dir: PathBuf::from("screenshots"),
            resource_dir: None,
            resolution: Resolution::FHD,
            pixel_format: PixelFormat::Mjpeg,
            tick_interval_ms: 10,
            flash_duration_ms: 100,
        }
    }
}

impl ViewerConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn flash_duration(&self) -> Duration {
        Duration::from_millis(self.flash_duration_ms)
    }

    /// Camera request derived from this config.
    pub fn format_request(&self) -> FormatRequest {
        FormatRequest {
            resolution: self.resolution,
            pixel_format: self.pixel_format,
        }
    }
}

/// What a capture session asks the device for. Backends accept the closest
/// match the device supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatRequest {
    pub resolution: Resolution,
    pub pixel_format: PixelFormat,
}

impl Default for FormatRequest {
    fn default() -> Self {
        ViewerConfig::default().format_request()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_layout() {
        let cfg = ViewerConfig::default();
        assert_eq!(cfg.settings_path, PathBuf::from("settings.json"));
        assert_eq!(cfg.screenshot_dir, PathBuf::from("screenshots"));
        assert_eq!(cfg.tick_interval(), Duration::from_millis(10));
        assert_eq!(cfg.flash_duration(), Duration::from_millis(100));
        assert_eq!(
            cfg.format_request(),
            FormatRequest {
                resolution: Resolution::new(1920, 1080),
                pixel_format: PixelFormat::Mjpeg,
            }
        );
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let json = r#"{ "screenshot_dir": "/tmp/shots", "pixel_format": "yuyv" }"#;

        let cfg: ViewerConfig = serde_json::from_str(json).expect("valid partial config");
        assert_eq!(cfg.screenshot_dir, PathBuf::from("/tmp/shots"));
        assert_eq!(cfg.pixel_format, PixelFormat::Yuyv);
        assert_eq!(cfg.settings_path, PathBuf::from("settings.json"));
        assert_eq!(cfg.tick_interval_ms, 10);
    }
}
