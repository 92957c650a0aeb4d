use serde::{Deserialize, Serialize};

// MARK: - Resolution

/// Capture resolution requested from (or reported by) a camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const HD: Self = Self { width: 1280, height: 720 };
    pub const FHD: Self = Self { width: 1920, height: 1080 };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}×{}", self.width, self.height)
    }
}

// MARK: - PixelFormat

/// Wire format the camera delivers before decoding to RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    Mjpeg,
    Yuyv,
    Nv12,
    Rgb,
    Gray,
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mjpeg => write!(f, "MJPG"),
            Self::Yuyv => write!(f, "YUYV"),
            Self::Nv12 => write!(f, "NV12"),
            Self::Rgb => write!(f, "RGB"),
            Self::Gray => write!(f, "GRAY"),
        }
    }
}

// MARK: - FrameRate

/// Device-reported capture rate.
///
/// Decided once inside the capture session; consumers match on the variant
/// instead of re-inspecting the raw number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameRate {
    Numeric(f64),
    Unavailable,
}

impl FrameRate {
    /// Maps a raw device rate. Anything below 1 fps (including NaN) means the
    /// device could not tell us.
    pub fn from_reported(rate: f64) -> Self {
        if rate >= 1.0 {
            Self::Numeric(rate)
        } else {
            Self::Unavailable
        }
    }
}

impl std::fmt::Display for FrameRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric(rate) => write!(f, "{rate:.1} FPS"),
            Self::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// Text for the FPS readout: empty when the readout is disabled or no rate
/// was sampled.
pub fn fps_label_text(show_fps: bool, rate: Option<FrameRate>) -> String {
    match (show_fps, rate) {
        (true, Some(rate)) => rate.to_string(),
        _ => String::new(),
    }
}

// MARK: - DeviceDescriptor

/// One entry of the OS video-input list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    pub name: String,
    pub index: u32,
}

impl DeviceDescriptor {
    pub fn new(name: impl Into<String>, index: u32) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }

    /// Label shown in the camera picker.
    pub fn label(&self) -> String {
        format!("{} (Index {})", self.name, self.index)
    }
}

// MARK: - Frame

/// Decoded RGB8 frame, row-major, 3 bytes per pixel.
pub type Frame = image::RgbImage;

/// A frame together with the rate sampled alongside it.
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    pub frame: Frame,
    /// `None` when the caller did not ask for the rate.
    pub fps: Option<FrameRate>,
}
