use tauri::{AppHandle, Emitter, State};

use crate::errors::AppError;
use crate::logger::Logger;
use crate::settings::{Settings, SettingsManager};

fn apply_logging_options(logger: &Logger, settings: &Settings) {
    logger.configure(
        settings.enable_logging,
        &settings.log_level,
        settings.log_timestamps,
    );
}

#[tauri::command]
pub async fn get_settings(manager: State<'_, SettingsManager>) -> Result<Settings, AppError> {
    Ok(manager.get())
}

#[tauri::command]
pub async fn get_setting(
    manager: State<'_, SettingsManager>,
    key: String,
) -> Result<serde_json::Value, AppError> {
    manager.get_value(&key)
}

#[tauri::command]
pub async fn set_setting(
    app: AppHandle,
    manager: State<'_, SettingsManager>,
    logger: State<'_, Logger>,
    key: String,
    value: serde_json::Value,
) -> Result<Settings, AppError> {
    let updated = manager.set_value(&key, value)?;
    apply_logging_options(&logger, &updated);
    let _ = app.emit("settings-changed", updated.clone());
    Ok(updated)
}

#[tauri::command]
pub async fn reset_settings(
    app: AppHandle,
    manager: State<'_, SettingsManager>,
    logger: State<'_, Logger>,
) -> Result<Settings, AppError> {
    let defaults = manager.reset()?;
    apply_logging_options(&logger, &defaults);
    let _ = app.emit("settings-changed", defaults.clone());
    Ok(defaults)
}
