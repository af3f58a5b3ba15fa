use tauri::{command, State};

use crate::errors::AppError;
use crate::tags::models::{Tag, TagAssignment};
use crate::tags::TagsManager;

#[command]
pub async fn create_tag(manager: State<'_, TagsManager>, name: String) -> Result<i64, AppError> {
    manager.create_tag(&name).await
}

#[command]
pub async fn get_tags(manager: State<'_, TagsManager>) -> Result<Vec<Tag>, AppError> {
    manager.get_tags().await
}

#[command]
pub async fn delete_tag(manager: State<'_, TagsManager>, tag_id: i64) -> Result<(), AppError> {
    manager.delete_tag(tag_id).await
}

#[command]
pub async fn assign_tag(
    manager: State<'_, TagsManager>,
    file_path: String,
    tag_id: i64,
) -> Result<i64, AppError> {
    manager.assign_tag(&file_path, tag_id).await
}

#[command]
pub async fn unassign_tag(
    manager: State<'_, TagsManager>,
    file_path: String,
    tag_id: i64,
) -> Result<(), AppError> {
    manager.unassign_tag(&file_path, tag_id).await
}

#[command]
pub async fn get_files_for_tag(
    manager: State<'_, TagsManager>,
    tag_id: i64,
) -> Result<Vec<TagAssignment>, AppError> {
    manager.files_for_tag(tag_id).await
}

#[command]
pub async fn get_tags_for_file(
    manager: State<'_, TagsManager>,
    file_path: String,
) -> Result<Vec<Tag>, AppError> {
    manager.tags_for_file(&file_path).await
}
