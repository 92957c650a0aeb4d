//! Timestamped PNG screenshots of the current frame.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use tracing::info;

use crate::capture::CaptureSession;
use crate::errors::ViewerError;
use crate::types::Frame;

/// `screenshot_YYYYMMDD_HHMMSS.png`. Two shots in the same second share a
/// name, so the later one overwrites the earlier.
pub fn screenshot_file_name<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("screenshot_{}.png", at.format("%Y%m%d_%H%M%S"))
}

#[derive(Debug, Clone)]
pub struct ScreenshotWriter {
    dir: PathBuf,
}

impl ScreenshotWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> PathBuf
    where
        Tz::Offset: std::fmt::Display,
    {
        self.dir.join(screenshot_file_name(at))
    }

    /// Writes `frame` as PNG, creating the directory if needed.
    pub fn write<Tz: TimeZone>(&self, frame: &Frame, at: &DateTime<Tz>) -> Result<PathBuf, ViewerError>
    where
        Tz::Offset: std::fmt::Display,
    {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(at);
        frame.save_with_format(&path, image::ImageFormat::Png)?;
        Ok(path)
    }
}

/// Grabs a fresh frame from `session` and writes it. `Ok(None)` when the
/// session has no frame to give.
pub fn save_screenshot(
    session: &mut CaptureSession,
    writer: &ScreenshotWriter,
) -> Result<Option<PathBuf>, ViewerError> {
    let Some(captured) = session.get_frame(false) else {
        return Ok(None);
    };
    let path = writer.write(&captured.frame, &Local::now())?;
    info!("Screenshot saved as {}", path.display());
    Ok(Some(path))
}
