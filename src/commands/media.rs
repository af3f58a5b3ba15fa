use tauri::State;

use crate::errors::AppError;
use crate::media::probe::AudioTrack;
use crate::media::{MediaTools, TranscodeOptions};
use crate::settings::SettingsManager;
use crate::thumbnails::ThumbnailStore;

const DEFAULT_THUMBNAIL_SEEK: f64 = 5.0;

/// Base64 JPEG for a file, cached in the record store. A cache hit skips the
/// tool entirely; a miss generates, stores and prunes to `cacheSize`.
#[tauri::command]
pub async fn generate_thumbnail(
    tools: State<'_, MediaTools>,
    store: State<'_, ThumbnailStore>,
    settings: State<'_, SettingsManager>,
    path: String,
    seek_seconds: Option<f64>,
) -> Result<String, AppError> {
    if let Some(cached) = store.get_thumbnail(&path).await? {
        return Ok(cached.data);
    }

    let data = tools
        .generate_thumbnail(&path, seek_seconds.unwrap_or(DEFAULT_THUMBNAIL_SEEK))
        .await?;

    let cache_size = settings.get().cache_size;
    if let Err(e) = store.save_thumbnail(&path, &data, cache_size).await {
        log::warn!("Failed to cache thumbnail for {}: {}", path, e);
    }

    Ok(data)
}

#[tauri::command]
pub async fn get_cached_thumbnail(
    store: State<'_, ThumbnailStore>,
    path: String,
) -> Result<Option<String>, AppError> {
    Ok(store.get_thumbnail(&path).await?.map(|t| t.data))
}

#[tauri::command]
pub async fn capture_screenshot(
    tools: State<'_, MediaTools>,
    path: String,
    seek_seconds: f64,
) -> Result<String, AppError> {
    tools.capture_screenshot(&path, seek_seconds).await
}

#[tauri::command]
pub async fn start_transcode(
    tools: State<'_, MediaTools>,
    input_path: String,
    output_path: String,
    options: TranscodeOptions,
) -> Result<String, AppError> {
    tools.transcode(&input_path, &output_path, &options).await
}

/// Probe failures surface as an empty list, not an error.
#[tauri::command]
pub async fn get_audio_tracks(
    tools: State<'_, MediaTools>,
    path: String,
) -> Result<Vec<AudioTrack>, AppError> {
    Ok(tools.audio_tracks(&path).await)
}
