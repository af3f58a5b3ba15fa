use tauri::{command, State};

use crate::bookmarks::models::Bookmark;
use crate::bookmarks::BookmarksManager;
use crate::errors::AppError;

#[command]
pub async fn add_bookmark(
    manager: State<'_, BookmarksManager>,
    file_path: String,
    position: f64,
    label: Option<String>,
) -> Result<i64, AppError> {
    manager
        .add_bookmark(&file_path, position, label.as_deref())
        .await
}

#[command]
pub async fn get_bookmarks(
    manager: State<'_, BookmarksManager>,
    file_path: String,
) -> Result<Vec<Bookmark>, AppError> {
    manager.get_bookmarks(&file_path).await
}

#[command]
pub async fn delete_bookmark(
    manager: State<'_, BookmarksManager>,
    id: i64,
) -> Result<(), AppError> {
    manager.delete_bookmark(id).await
}
