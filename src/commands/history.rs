use tauri::{command, State};

use crate::errors::AppError;
use crate::history::models::HistoryEntry;
use crate::history::HistoryManager;

const DEFAULT_HISTORY_LIMIT: i64 = 50;

#[command]
pub async fn record_playback(
    manager: State<'_, HistoryManager>,
    file_path: String,
    name: String,
    media_type: Option<String>,
    position: Option<f64>,
) -> Result<(), AppError> {
    manager
        .record_playback(
            &file_path,
            &name,
            media_type.as_deref(),
            position.unwrap_or(0.0),
        )
        .await
}

#[command]
pub async fn get_history(
    manager: State<'_, HistoryManager>,
    limit: Option<i64>,
) -> Result<Vec<HistoryEntry>, AppError> {
    manager
        .get_recent(limit.unwrap_or(DEFAULT_HISTORY_LIMIT))
        .await
}

#[command]
pub async fn get_history_entry(
    manager: State<'_, HistoryManager>,
    file_path: String,
) -> Result<Option<HistoryEntry>, AppError> {
    manager.get_entry(&file_path).await
}

#[command]
pub async fn clear_history(manager: State<'_, HistoryManager>) -> Result<(), AppError> {
    manager.clear().await
}
