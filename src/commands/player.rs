use serde::Serialize;
use tauri::{AppHandle, Emitter, State};

use crate::errors::AppError;
use crate::files::{self, MediaType};
use crate::player::models::{LoopMode, MediaEndAction, PlaybackSnapshot, PlaylistItem};
use crate::player::Player;
use crate::settings::SettingsManager;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeState {
    pub volume: u8,
    pub muted: bool,
}

fn emit_state(app: &AppHandle, player: &Player) {
    let snapshot = player.state.read().snapshot();
    let _ = app.emit("playback-state-changed", snapshot);
}

fn emit_track(app: &AppHandle, item: &PlaylistItem) {
    let _ = app.emit("track-changed", item.clone());
}

#[tauri::command]
pub async fn add_playlist_item(
    app: AppHandle,
    player: State<'_, Player>,
    name: String,
    source: String,
    media_type: Option<MediaType>,
) -> Result<usize, AppError> {
    // Drag-drop validation happens here: unknown extensions are rejected
    // unless the UI already resolved a type.
    let media_type = media_type
        .or_else(|| files::media_type_for(std::path::Path::new(&name)))
        .ok_or_else(|| AppError::Parse(format!("Unsupported media file: {}", name)))?;

    let index = player.state.write().add_item(PlaylistItem {
        name,
        source,
        media_type,
    });
    emit_state(&app, &player);
    Ok(index)
}

#[tauri::command]
pub async fn remove_playlist_item(
    app: AppHandle,
    player: State<'_, Player>,
    index: usize,
) -> Result<(), AppError> {
    player.state.write().remove_item(index);
    emit_state(&app, &player);
    Ok(())
}

#[tauri::command]
pub async fn clear_playlist(app: AppHandle, player: State<'_, Player>) -> Result<(), AppError> {
    player.state.write().clear();
    emit_state(&app, &player);
    Ok(())
}

#[tauri::command]
pub async fn select_playlist_item(
    app: AppHandle,
    player: State<'_, Player>,
    index: usize,
) -> Result<Option<PlaylistItem>, AppError> {
    let item = player.state.write().select(index);
    if let Some(ref item) = item {
        emit_track(&app, item);
    }
    emit_state(&app, &player);
    Ok(item)
}

#[tauri::command]
pub async fn next_track(
    app: AppHandle,
    player: State<'_, Player>,
) -> Result<Option<PlaylistItem>, AppError> {
    let item = player.state.write().next();
    if let Some(ref item) = item {
        emit_track(&app, item);
    }
    emit_state(&app, &player);
    Ok(item)
}

#[tauri::command]
pub async fn previous_track(
    app: AppHandle,
    player: State<'_, Player>,
) -> Result<Option<PlaylistItem>, AppError> {
    let item = player.state.write().previous();
    if let Some(ref item) = item {
        emit_track(&app, item);
    }
    emit_state(&app, &player);
    Ok(item)
}

#[tauri::command]
pub async fn playback_started(app: AppHandle, player: State<'_, Player>) -> Result<(), AppError> {
    player.state.write().is_playing = true;
    emit_state(&app, &player);
    Ok(())
}

#[tauri::command]
pub async fn playback_paused(app: AppHandle, player: State<'_, Player>) -> Result<(), AppError> {
    player.state.write().is_playing = false;
    emit_state(&app, &player);
    Ok(())
}

#[tauri::command]
pub async fn stop_playback(app: AppHandle, player: State<'_, Player>) -> Result<(), AppError> {
    player.state.write().is_playing = false;
    emit_state(&app, &player);
    Ok(())
}

/// The media element finished loading metadata; remember the duration so
/// seeks can be clamped.
#[tauri::command]
pub async fn media_loaded(player: State<'_, Player>, duration: f64) -> Result<(), AppError> {
    player.state.write().set_duration(duration);
    Ok(())
}

#[tauri::command]
pub async fn media_ended(
    app: AppHandle,
    player: State<'_, Player>,
    settings: State<'_, SettingsManager>,
) -> Result<MediaEndAction, AppError> {
    let current = settings.get();
    let action = player
        .state
        .write()
        .on_media_ended(current.auto_play, current.loop_playlist);
    if let MediaEndAction::Advance { ref item, .. } = action {
        emit_track(&app, item);
    }
    emit_state(&app, &player);
    Ok(action)
}

#[tauri::command]
pub async fn seek_to(player: State<'_, Player>, position: f64) -> Result<f64, AppError> {
    Ok(player.state.read().clamp_seek(position))
}

#[tauri::command]
pub async fn set_volume(
    app: AppHandle,
    player: State<'_, Player>,
    volume: i64,
) -> Result<VolumeState, AppError> {
    let (volume, muted) = player.state.write().set_volume(volume);
    emit_state(&app, &player);
    Ok(VolumeState { volume, muted })
}

#[tauri::command]
pub async fn toggle_mute(app: AppHandle, player: State<'_, Player>) -> Result<VolumeState, AppError> {
    let (volume, muted) = player.state.write().toggle_mute();
    emit_state(&app, &player);
    Ok(VolumeState { volume, muted })
}

#[tauri::command]
pub async fn cycle_speed(app: AppHandle, player: State<'_, Player>) -> Result<f64, AppError> {
    let speed = player.state.write().cycle_speed();
    emit_state(&app, &player);
    Ok(speed)
}

#[tauri::command]
pub async fn set_loop_mode(
    app: AppHandle,
    player: State<'_, Player>,
    mode: LoopMode,
) -> Result<(), AppError> {
    player.state.write().set_loop_mode(mode);
    emit_state(&app, &player);
    Ok(())
}

#[tauri::command]
pub async fn toggle_shuffle(app: AppHandle, player: State<'_, Player>) -> Result<bool, AppError> {
    let shuffle = player.state.write().toggle_shuffle();
    emit_state(&app, &player);
    Ok(shuffle)
}

#[tauri::command]
pub async fn get_playback_state(player: State<'_, Player>) -> Result<PlaybackSnapshot, AppError> {
    Ok(player.state.read().snapshot())
}
