use std::fs;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mkv", "avi", "mov", "flv", "wmv"];
pub const AUDIO_EXTENSIONS: &[&str] = &["m4a", "mp3", "wav", "aac", "ogg", "flac"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Video,
    Audio,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub name: String,
    pub path: String,
    pub is_directory: bool,
    pub size: u64,
    pub modified: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub size: u64,
    pub created: String,
    pub modified: String,
    pub ext: Option<String>,
}

pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

pub fn media_type_for(path: &Path) -> Option<MediaType> {
    let ext = extension_of(path)?;
    if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaType::Video)
    } else if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaType::Audio)
    } else {
        None
    }
}

pub fn is_media_file(path: &Path) -> bool {
    media_type_for(path).is_some()
}

fn to_iso8601(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// List one directory level. Directories sort before files, lexicographic by
/// name within each group; files outside the media allow-list are omitted.
/// Entries whose metadata cannot be read are skipped, not fatal.
pub fn list_directory(dir: &Path) -> Result<Vec<FileEntry>, AppError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| AppError::Io(format!("Failed to read {}: {}", dir.display(), e)))?;

    let mut listed = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };
        let path = entry.path();
        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                log::warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        if !metadata.is_dir() && !is_media_file(&path) {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        let modified = metadata
            .modified()
            .map(to_iso8601)
            .unwrap_or_else(|_| String::new());

        listed.push(FileEntry {
            name,
            path: path.to_string_lossy().to_string(),
            is_directory: metadata.is_dir(),
            size: metadata.len(),
            modified,
            ext: if metadata.is_dir() {
                None
            } else {
                extension_of(&path)
            },
        });
    }

    listed.sort_by(|a, b| {
        b.is_directory
            .cmp(&a.is_directory)
            .then_with(|| a.name.cmp(&b.name))
    });

    Ok(listed)
}

pub fn file_metadata(path: &Path) -> Result<FileMetadata, AppError> {
    let metadata = fs::metadata(path)
        .map_err(|e| AppError::Io(format!("Failed to stat {}: {}", path.display(), e)))?;

    let modified = metadata.modified().map(to_iso8601).map_err(AppError::from)?;
    let created = metadata
        .created()
        .map(to_iso8601)
        .unwrap_or_else(|_| modified.clone());

    Ok(FileMetadata {
        size: metadata.len(),
        created,
        modified,
        ext: extension_of(path),
    })
}
