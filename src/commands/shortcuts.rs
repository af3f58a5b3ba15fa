use tauri::{command, State};

use crate::errors::AppError;
use crate::shortcuts::{Shortcut, ShortcutsManager};

#[command]
pub async fn save_shortcut(
    manager: State<'_, ShortcutsManager>,
    action: String,
    keys: serde_json::Value,
) -> Result<(), AppError> {
    manager.save_shortcut(&action, &keys).await
}

#[command]
pub async fn get_shortcut(
    manager: State<'_, ShortcutsManager>,
    action: String,
) -> Result<Option<Shortcut>, AppError> {
    manager.get_shortcut(&action).await
}

#[command]
pub async fn get_shortcuts(
    manager: State<'_, ShortcutsManager>,
) -> Result<Vec<Shortcut>, AppError> {
    manager.get_shortcuts().await
}
