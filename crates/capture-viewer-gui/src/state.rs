use std::time::{Duration, Instant};

use capture_viewer_core::SessionStatus;

// ── FeedPhase ──────────────────────────────────────────────────────────────────

/// Footer status line; `NoFeed` is also drawn over an empty display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    Live { index: u32 },
    NoFeed,
}

impl FeedPhase {
    pub fn from_status(status: SessionStatus) -> Self {
        match status {
            SessionStatus::Open { index, .. } => Self::Live { index },
            SessionStatus::Closed => Self::NoFeed,
        }
    }

    pub fn label(&self) -> String {
        match self {
            FeedPhase::Live { index } => format!("Camera {index}"),
            FeedPhase::NoFeed => "No camera feed".to_owned(),
        }
    }

    pub fn color(&self) -> egui::Color32 {
        match self {
            FeedPhase::Live { .. } => egui::Color32::from_rgb(60, 200, 80),
            FeedPhase::NoFeed => egui::Color32::from_rgb(220, 60, 60),
        }
    }
}

// ── Notice ─────────────────────────────────────────────────────────────────────

/// Short-lived footer message (screenshot path, save failures).
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
    expires: Instant,
}

impl Notice {
    const LIFETIME: Duration = Duration::from_secs(3);

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text.into(), false)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text.into(), true)
    }

    fn new(text: String, is_error: bool) -> Self {
        Self {
            text,
            is_error,
            expires: Instant::now() + Self::LIFETIME,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires
    }
}

// ── Flash ──────────────────────────────────────────────────────────────────────

/// White overlay shown briefly after a shortcut screenshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flash {
    until: Option<Instant>,
}

impl Flash {
    pub fn trigger(&mut self, now: Instant, duration: Duration) {
        self.until = Some(now + duration);
    }

    /// Remaining visible time, clearing the flash once it has elapsed.
    pub fn remaining(&mut self, now: Instant) -> Option<Duration> {
        let until = self.until?;
        if now >= until {
            self.until = None;
            return None;
        }
        Some(until - now)
    }
}
