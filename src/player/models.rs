use serde::{Deserialize, Serialize};

use crate::files::MediaType;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopMode {
    Off,
    All,
    One,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItem {
    pub name: String,
    /// Opaque source handle (object URL or path); valid for this process only.
    pub source: String,
    pub media_type: MediaType,
}

/// What the UI should do when the media element reports end-of-media.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum MediaEndAction {
    /// Restart the current item from the beginning.
    Replay,
    /// Load and play the given playlist entry.
    Advance { index: usize, item: PlaylistItem },
    /// Stay stopped on the current item.
    Stop,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSnapshot {
    pub playlist: Vec<PlaylistItem>,
    pub current_index: Option<usize>,
    pub is_playing: bool,
    pub loop_mode: LoopMode,
    pub shuffle: bool,
    pub speed: f64,
    pub volume: u8,
    pub muted: bool,
}
