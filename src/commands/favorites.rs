use tauri::{command, State};

use crate::errors::AppError;
use crate::favorites::models::Favorite;
use crate::favorites::FavoritesManager;

#[command]
pub async fn add_favorite(
    manager: State<'_, FavoritesManager>,
    file_path: String,
    name: String,
    media_type: Option<String>,
) -> Result<(), AppError> {
    manager
        .add_favorite(&file_path, &name, media_type.as_deref())
        .await
}

#[command]
pub async fn remove_favorite(
    manager: State<'_, FavoritesManager>,
    file_path: String,
) -> Result<(), AppError> {
    manager.remove_favorite(&file_path).await
}

#[command]
pub async fn is_favorite(
    manager: State<'_, FavoritesManager>,
    file_path: String,
) -> Result<bool, AppError> {
    manager.is_favorite(&file_path).await
}

#[command]
pub async fn get_favorites(
    manager: State<'_, FavoritesManager>,
) -> Result<Vec<Favorite>, AppError> {
    manager.get_favorites().await
}
