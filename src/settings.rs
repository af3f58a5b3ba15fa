use std::fs;
use std::path::PathBuf;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;

pub const SETTINGS_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DoubleClickAction {
    Fullscreen,
    PlayPause,
    Mute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseWheelAction {
    Volume,
    Seek,
    Disabled,
}

/// The full settings document. One flat mapping, persisted as a single JSON
/// file; unknown fields in the file are dropped, missing fields fall back to
/// the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub schema_version: u32,

    // Appearance
    pub theme: Theme,
    pub accent_color: String,
    pub auto_hide_controls: bool,
    pub control_opacity: f64,
    pub backdrop_blur: bool,
    pub overlay_blur: f64,
    pub animations_enabled: bool,
    pub ui_density: String,

    // Playback
    pub default_volume: u8,
    pub remember_position: bool,
    pub auto_play: bool,
    pub smooth_seeking: bool,

    // Behavior
    pub double_click_action: DoubleClickAction,
    pub mouse_wheel_action: MouseWheelAction,
    pub show_tooltips: bool,
    pub tooltip_position: String,

    // Advanced
    pub keyboard_shortcuts: bool,
    pub loop_playlist: bool,
    pub shuffle_mode: bool,
    pub show_controls_on_hover: bool,
    pub default_start_page: String,

    // Logging / cache
    pub log_level: String,
    pub enable_logging: bool,
    pub log_timestamps: bool,
    pub cache_size: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: SETTINGS_SCHEMA_VERSION,
            theme: Theme::Dark,
            accent_color: "#a855f7".to_string(),
            auto_hide_controls: true,
            control_opacity: 0.8,
            backdrop_blur: true,
            overlay_blur: 1.0,
            animations_enabled: true,
            ui_density: "comfortable".to_string(),
            default_volume: 70,
            remember_position: true,
            auto_play: false,
            smooth_seeking: true,
            double_click_action: DoubleClickAction::Fullscreen,
            mouse_wheel_action: MouseWheelAction::Volume,
            show_tooltips: true,
            tooltip_position: "smart".to_string(),
            keyboard_shortcuts: true,
            loop_playlist: true,
            shuffle_mode: false,
            show_controls_on_hover: true,
            default_start_page: "home".to_string(),
            log_level: "info".to_string(),
            enable_logging: true,
            log_timestamps: true,
            cache_size: 500,
        }
    }
}

impl Settings {
    fn normalize(&mut self) {
        if self.default_volume > 100 {
            self.default_volume = 100;
        }
        self.control_opacity = self.control_opacity.clamp(0.0, 1.0);
    }
}

pub struct SettingsManager {
    path: PathBuf,
    settings: Mutex<Settings>,
}

impl SettingsManager {
    /// Read the settings document, merging the stored values over defaults.
    /// A missing or unreadable file yields defaults rather than an error.
    pub fn load(path: PathBuf) -> Self {
        let settings = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Settings>(&content) {
                Ok(mut s) => {
                    s.normalize();
                    s
                }
                Err(e) => {
                    log::error!("Failed to parse settings file, using defaults: {}", e);
                    Settings::default()
                }
            },
            Err(_) => Settings::default(),
        };

        Self {
            path,
            settings: Mutex::new(settings),
        }
    }

    pub fn get(&self) -> Settings {
        self.settings.lock().clone()
    }

    pub fn get_value(&self, key: &str) -> Result<Value, AppError> {
        let doc = serde_json::to_value(self.get())?;
        doc.get(key)
            .cloned()
            .ok_or_else(|| AppError::Settings(format!("Unrecognized option: {}", key)))
    }

    /// Replace a single option and persist the whole document. An unknown key
    /// or a value of the wrong shape leaves the stored document untouched.
    pub fn set_value(&self, key: &str, value: Value) -> Result<Settings, AppError> {
        let mut guard = self.settings.lock();

        let mut doc = serde_json::to_value(guard.clone())?;
        let map = doc
            .as_object_mut()
            .ok_or_else(|| AppError::Internal("Settings document is not an object".into()))?;
        if !map.contains_key(key) {
            return Err(AppError::Settings(format!("Unrecognized option: {}", key)));
        }
        map.insert(key.to_string(), value);

        let mut updated: Settings = serde_json::from_value(doc)
            .map_err(|e| AppError::Settings(format!("Invalid value for {}: {}", key, e)))?;
        updated.normalize();

        self.persist(&updated)?;
        *guard = updated.clone();
        Ok(updated)
    }

    pub fn reset(&self) -> Result<Settings, AppError> {
        let defaults = Settings::default();
        self.persist(&defaults)?;
        *self.settings.lock() = defaults.clone();
        Ok(defaults)
    }

    fn persist(&self, settings: &Settings) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager_in(dir: &std::path::Path) -> SettingsManager {
        SettingsManager::load(dir.join("settings.json"))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_in(dir.path());
        assert_eq!(manager.get(), Settings::default());
    }

    #[test]
    fn save_and_reload_round_trips_every_key() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_in(dir.path());
        manager.set_value("theme", Value::String("light".into())).unwrap();
        manager
            .set_value("defaultVolume", Value::Number(35.into()))
            .unwrap();
        manager
            .set_value("accentColor", Value::String("#336699".into()))
            .unwrap();
        let before = manager.get();

        let reloaded = manager_in(dir.path());
        assert_eq!(reloaded.get(), before);
    }

    #[test]
    fn partial_document_merges_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"defaultVolume": 40}"#).unwrap();

        let manager = SettingsManager::load(path);
        let settings = manager.get();
        assert_eq!(settings.default_volume, 40);
        assert_eq!(settings.theme, Theme::Dark);
        assert!(settings.loop_playlist);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_in(dir.path());
        let err = manager
            .set_value("noSuchOption", Value::Bool(true))
            .unwrap_err();
        assert!(matches!(err, AppError::Settings(_)));
    }

    #[test]
    fn wrong_typed_value_leaves_document_intact() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_in(dir.path());
        manager
            .set_value("defaultVolume", Value::Number(55.into()))
            .unwrap();

        let err = manager
            .set_value("defaultVolume", Value::String("loud".into()))
            .unwrap_err();
        assert!(matches!(err, AppError::Settings(_)));
        assert_eq!(manager.get().default_volume, 55);

        let reloaded = manager_in(dir.path());
        assert_eq!(reloaded.get().default_volume, 55);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();

        let manager = SettingsManager::load(path);
        assert_eq!(manager.get(), Settings::default());
    }

    #[test]
    fn out_of_range_volume_clamped_on_set() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_in(dir.path());
        manager
            .set_value("defaultVolume", Value::Number(250.into()))
            .unwrap();
        assert_eq!(manager.get().default_volume, 100);
    }
}
