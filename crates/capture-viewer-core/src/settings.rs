//! Persisted user preferences (`settings.json`).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::errors::ViewerError;

pub const DEFAULT_SHORTCUT: &str = "F10";

/// User preferences. Missing keys fall back to [`Settings::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub cam_index: u32,
    pub show_fps: bool,
    pub shortcut_key: String,
}

impl Settings {
    /// Takes each key on its own; a missing, `null` or mistyped value falls
    /// back to that field's default without discarding the others.
    fn from_fields(fields: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        let cam_index = field(fields, "cam_index", |v| {
            v.as_u64().and_then(|n| u32::try_from(n).ok())
        });
        let show_fps = field(fields, "show_fps", Value::as_bool);
        let shortcut_key = field(fields, "shortcut_key", |v| v.as_str().map(str::to_owned));

        Self {
            cam_index: cam_index.unwrap_or(defaults.cam_index),
            show_fps: show_fps.unwrap_or(defaults.show_fps),
            shortcut_key: shortcut_key.unwrap_or(defaults.shortcut_key),
        }
    }
}

fn field<T>(fields: &Map<String, Value>, key: &str, read: impl FnOnce(&Value) -> Option<T>) -> Option<T> {
    let value = fields.get(key)?;
    let parsed = read(value);
    if parsed.is_none() {
        warn!("Ignoring settings value {key} = {value} (using default)");
    }
    parsed
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cam_index: 0,
            show_fps: false,
            shortcut_key: DEFAULT_SHORTCUT.to_owned(),
        }
    }
}

/// Reads and writes [`Settings`] at a single file path.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Never fails: an absent, unreadable or corrupt file yields defaults,
    /// and a bad individual value yields the default for that field only.
    pub fn load(&self) -> Settings {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No settings at {}, using defaults", self.path.display());
                return Settings::default();
            }
            Err(e) => {
                warn!("Cannot read {}: {e} (using defaults)", self.path.display());
                return Settings::default();
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(fields)) => Settings::from_fields(&fields),
            Ok(other) => {
                warn!("Ignoring {}: expected an object, found {other}", self.path.display());
                Settings::default()
            }
            Err(e) => {
                warn!("Ignoring corrupt {}: {e}", self.path.display());
                Settings::default()
            }
        }
    }

    /// Overwrites the file with the full record.
    pub fn save(&self, settings: &Settings) -> Result<(), ViewerError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, json)?;
        info!(
            "Settings saved to {} (camera {}, fps {}, shortcut {:?})",
            self.path.display(),
            settings.cam_index,
            settings.show_fps,
            settings.shortcut_key
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SettingsStore {
        SettingsStore::new(dir.path().join("settings.json"))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = store_in(&dir).load();
        assert_eq!(
            settings,
            Settings {
                cam_index: 0,
                show_fps: false,
                shortcut_key: "F10".into(),
            }
        );
    }

    #[test]
    fn missing_fields_fall_back_individually() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        std::fs::write(store.path(), r#"{ "show_fps": true }"#).unwrap();
        let settings = store.load();
        assert_eq!(settings.cam_index, 0);
        assert!(settings.show_fps);
        assert_eq!(settings.shortcut_key, "F10");

        std::fs::write(store.path(), r#"{ "cam_index": 3, "shortcut_key": "Ctrl+S" }"#).unwrap();
        let settings = store.load();
        assert_eq!(settings.cam_index, 3);
        assert!(!settings.show_fps);
        assert_eq!(settings.shortcut_key, "Ctrl+S");

        std::fs::write(store.path(), "{}").unwrap();
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{ not json").unwrap();
        assert_eq!(store.load(), Settings::default());

        std::fs::write(store.path(), "[1, 2, 3]").unwrap();
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn bad_values_fall_back_per_field() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        std::fs::write(
            store.path(),
            r#"{ "cam_index": 2, "show_fps": true, "shortcut_key": null }"#,
        )
        .unwrap();
        assert_eq!(
            store.load(),
            Settings {
                cam_index: 2,
                show_fps: true,
                shortcut_key: "F10".into(),
            }
        );

        std::fs::write(
            store.path(),
            r#"{ "cam_index": -1, "show_fps": "yes", "shortcut_key": "F9" }"#,
        )
        .unwrap();
        assert_eq!(
            store.load(),
            Settings {
                cam_index: 0,
                show_fps: false,
                shortcut_key: "F9".into(),
            }
        );

        // Beyond u32 range.
        std::fs::write(store.path(), r#"{ "cam_index": 4294967296, "show_fps": true }"#).unwrap();
        let settings = store.load();
        assert_eq!(settings.cam_index, 0);
        assert!(settings.show_fps);
    }

    #[test]
    fn save_then_load_returns_same_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let saved = Settings {
            cam_index: 2,
            show_fps: true,
            shortcut_key: "F9".into(),
        };

        store.save(&saved).unwrap();
        assert_eq!(store.load(), saved);

        // Saving again overwrites rather than appends.
        let updated = Settings {
            cam_index: 0,
            show_fps: false,
            shortcut_key: "Ctrl+Shift+P".into(),
        };
        store.save(&updated).unwrap();
        assert_eq!(store.load(), updated);
    }

    #[test]
    fn saved_file_uses_documented_keys_and_indentation() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&Settings::default()).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\n  \"cam_index\": 0"));
        assert!(raw.contains("\n  \"show_fps\": false"));
        assert!(raw.contains("\n  \"shortcut_key\": \"F10\""));
    }

    #[test]
    fn save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("nested/conf/settings.json"));
        store.save(&Settings::default()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn save_into_unwritable_location_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be.
        let blocked = dir.path().join("settings.json");
        std::fs::create_dir(&blocked).unwrap();
        let store = SettingsStore::new(&blocked);
        assert!(matches!(store.save(&Settings::default()), Err(ViewerError::Io(_))));
    }
}
