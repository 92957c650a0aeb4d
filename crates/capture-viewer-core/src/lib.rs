pub mod backend;
pub mod capture;
pub mod config;
pub mod devices;
pub mod errors;
pub mod screenshot;
pub mod settings;
pub mod types;

pub use backend::{CameraBackend, CameraStream, NativeBackend};
pub use capture::{CaptureSession, SessionStatus};
pub use config::{FormatRequest, ViewerConfig};
pub use devices::list_devices;
pub use errors::{CaptureError, ViewerError};
pub use screenshot::{save_screenshot, screenshot_file_name, ScreenshotWriter};
pub use settings::{Settings, SettingsStore};
pub use types::*;
