use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("No camera backend compiled in")]
    BackendUnavailable,

    #[error("Camera {index} unavailable: {reason}")]
    DeviceUnavailable { index: u32, reason: String },

    #[error("Failed to open stream on camera {index}: {reason}")]
    StreamFailed { index: u32, reason: String },

    #[error("Failed to read frame: {reason}")]
    ReadFailed { reason: String },

    #[error("Device enumeration failed: {reason}")]
    Enumeration { reason: String },
}
