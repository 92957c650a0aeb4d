//! Drawing-free half of the viewer window: settings, capture session,
//! screenshot writer and shortcut binding, driven by the egui app in
//! `viewer_app`.

use std::path::PathBuf;

use capture_viewer_core::{
    fps_label_text, save_screenshot, CaptureSession, Frame, ScreenshotWriter, SessionStatus,
    Settings, SettingsStore, ViewerConfig, ViewerError,
};
use egui::KeyboardShortcut;
use tracing::{info, warn};

use crate::shortcut::parse_shortcut;

/// Output of one display tick.
pub struct TickFrame {
    pub frame: Frame,
    pub fps_text: String,
}

pub struct Viewer {
    store: SettingsStore,
    settings: Settings,
    session: CaptureSession,
    writer: ScreenshotWriter,
    /// `None` when the stored shortcut text does not parse.
    shortcut: Option<KeyboardShortcut>,
    /// Display tick runs only after a successful start.
    ticking: bool,
}

impl Viewer {
    /// Loads settings and starts the stored camera.
    pub fn new(config: &ViewerConfig, session: CaptureSession) -> Self {
        let store = SettingsStore::new(&config.settings_path);
        let settings = store.load();
        info!(
            "Loaded settings: camera {}, show fps {}, shortcut {:?}",
            settings.cam_index, settings.show_fps, settings.shortcut_key
        );

        let mut viewer = Self {
            store,
            settings,
            session,
            writer: ScreenshotWriter::new(&config.screenshot_dir),
            shortcut: None,
            ticking: false,
        };
        viewer.shortcut = bind_shortcut(&viewer.settings.shortcut_key);
        viewer.ticking = viewer.session.start(viewer.settings.cam_index);
        viewer
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn shortcut(&self) -> Option<KeyboardShortcut> {
        self.shortcut
    }

    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    pub fn session_status(&self) -> SessionStatus {
        self.session.status()
    }

    /// One frame for the display, or `None` to keep the previous image.
    pub fn tick(&mut self) -> Option<TickFrame> {
        if !self.ticking {
            return None;
        }
        let show_fps = self.settings.show_fps;
        let captured = self.session.get_frame(show_fps)?;
        Some(TickFrame {
            frame: captured.frame,
            fps_text: fps_label_text(show_fps, captured.fps),
        })
    }

    /// Adopts accepted dialog values: rebind the shortcut, persist, then
    /// restart the camera.
    ///
    /// The camera is restarted even when saving fails; the save error is
    /// returned afterwards.
    pub fn apply_settings(&mut self, settings: Settings) -> Result<(), ViewerError> {
        self.settings = settings;
        self.shortcut = bind_shortcut(&self.settings.shortcut_key);
        let saved = self.store.save(&self.settings);
        self.ticking = self.session.start(self.settings.cam_index);
        saved
    }

    pub fn screenshot(&mut self) -> Result<Option<PathBuf>, ViewerError> {
        save_screenshot(&mut self.session, &self.writer)
    }

    /// Persists settings and releases the camera, unconditionally.
    pub fn close(&mut self) -> Result<(), ViewerError> {
        let saved = self.store.save(&self.settings);
        self.session.release();
        self.ticking = false;
        saved
    }
}

fn bind_shortcut(text: &str) -> Option<KeyboardShortcut> {
    match parse_shortcut(text) {
        Ok(shortcut) => {
            info!("Screenshot shortcut bound to {text:?}");
            Some(shortcut)
        }
        Err(e) => {
            warn!("Screenshot shortcut {text:?} not bound: {e}");
            None
        }
    }
}
