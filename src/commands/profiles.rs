use tauri::{command, State};

use crate::errors::AppError;
use crate::profiles::{PlaybackProfile, ProfilesManager};

#[command]
pub async fn save_playback_profile(
    manager: State<'_, ProfilesManager>,
    name: String,
    settings: serde_json::Value,
) -> Result<(), AppError> {
    manager.save_profile(&name, &settings).await
}

#[command]
pub async fn get_playback_profile(
    manager: State<'_, ProfilesManager>,
    name: String,
) -> Result<Option<PlaybackProfile>, AppError> {
    manager.get_profile(&name).await
}

#[command]
pub async fn get_playback_profiles(
    manager: State<'_, ProfilesManager>,
) -> Result<Vec<PlaybackProfile>, AppError> {
    manager.get_profiles().await
}

#[command]
pub async fn delete_playback_profile(
    manager: State<'_, ProfilesManager>,
    name: String,
) -> Result<(), AppError> {
    manager.delete_profile(&name).await
}
