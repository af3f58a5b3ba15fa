use std::path::Path;

use tauri::{AppHandle, Manager, State};

pub mod bookmarks;
pub mod favorites;
pub mod history;
pub mod media;
pub mod player;
pub mod profiles;
pub mod settings;
pub mod shortcuts;
pub mod subtitles;
pub mod tags;
pub mod transcode;

use crate::errors::AppError;
use crate::files::{self, FileEntry, FileMetadata};
use crate::logger::{LogLevel, Logger};

// ── Window controls ──────────────────────────────────────────────

#[tauri::command]
pub fn minimize_window(window: tauri::Window) {
    let _ = window.minimize();
}

#[tauri::command]
pub fn toggle_maximize_window(window: tauri::Window) {
    if window.is_maximized().unwrap_or(false) {
        let _ = window.unmaximize();
    } else {
        let _ = window.maximize();
    }
}

#[tauri::command]
pub fn close_window(window: tauri::Window) {
    let _ = window.close();
}

#[tauri::command]
pub fn get_maximize_state(window: tauri::Window) -> bool {
    window.is_maximized().unwrap_or(false)
}

// ── App info / logging ───────────────────────────────────────────

#[tauri::command]
pub fn get_app_version(app: AppHandle) -> String {
    app.config()
        .version
        .clone()
        .unwrap_or_else(|| "unknown".to_string())
}

/// Log sink for the UI process; its console output funnels through here.
#[tauri::command]
pub fn log_message(
    level: String,
    message: String,
    elapsed_ms: Option<u64>,
    logger: State<'_, Logger>,
) {
    logger.log(LogLevel::parse(&level), &message, elapsed_ms);
}

#[tauri::command]
pub fn get_log_file_path(logger: State<'_, Logger>) -> String {
    logger.log_file_path().to_string_lossy().to_string()
}

// ── File system ──────────────────────────────────────────────────

#[tauri::command]
pub async fn list_directory(path: String) -> Result<Vec<FileEntry>, AppError> {
    files::list_directory(Path::new(&path))
}

#[tauri::command]
pub async fn pick_directory(app: AppHandle) -> Result<Option<String>, AppError> {
    use tauri_plugin_dialog::DialogExt;

    let folder = app.dialog().file().blocking_pick_folder();
    Ok(folder.map(|p| p.to_string()))
}

#[tauri::command]
pub async fn get_file_metadata(path: String) -> Result<FileMetadata, AppError> {
    files::file_metadata(Path::new(&path))
}
