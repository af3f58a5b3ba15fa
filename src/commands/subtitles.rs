use std::path::Path;

use tauri::State;

use crate::errors::AppError;
use crate::subtitles::{self, SubtitleCue, SubtitleManager};

/// Stateless parse: timings in seconds, for callers that keep their own copy.
#[tauri::command]
pub async fn parse_subtitle_file(path: String) -> Result<Vec<SubtitleCue>, AppError> {
    let entries = subtitles::parse_subtitle_file(Path::new(&path))?;
    Ok(entries.iter().map(SubtitleCue::from).collect())
}

/// Parse and make the result the active track; returns the entry count.
#[tauri::command]
pub async fn load_subtitles(
    manager: State<'_, SubtitleManager>,
    path: String,
) -> Result<usize, AppError> {
    let entries = subtitles::parse_subtitle_file(Path::new(&path))?;
    Ok(manager.load(entries))
}

#[tauri::command]
pub async fn set_subtitle_offset(
    manager: State<'_, SubtitleManager>,
    offset_ms: i64,
) -> Result<(), AppError> {
    manager.set_offset(offset_ms);
    Ok(())
}

#[tauri::command]
pub async fn get_active_subtitle(
    manager: State<'_, SubtitleManager>,
    position_ms: u64,
) -> Result<Option<String>, AppError> {
    Ok(manager.active_text(position_ms))
}

#[tauri::command]
pub async fn set_subtitle_timing(
    manager: State<'_, SubtitleManager>,
    index: usize,
    start_ms: u64,
    end_ms: u64,
) -> Result<(), AppError> {
    manager.set_timing(index, start_ms, end_ms)
}

#[tauri::command]
pub async fn export_subtitles(manager: State<'_, SubtitleManager>) -> Result<String, AppError> {
    Ok(manager.export())
}
