pub mod models;

use parking_lot::RwLock;
use rand::seq::SliceRandom;

use models::{LoopMode, MediaEndAction, PlaybackSnapshot, PlaylistItem};

pub const PLAYBACK_SPEEDS: &[f64] = &[0.5, 0.75, 1.0, 1.25, 1.5, 2.0];
const DEFAULT_SPEED_INDEX: usize = 2;
const VOLUME_FALLBACK: u8 = 70;

/// The playback state machine. One instance per process, mutated only by
/// command handlers; the UI's media element is the sole event source.
pub struct PlayerState {
    playlist: Vec<PlaylistItem>,
    /// Permutation of playlist indices, active while `shuffle` is set.
    shuffled_indices: Vec<usize>,
    /// Position in play order (the permutation when shuffled).
    current_index: Option<usize>,
    pub is_playing: bool,
    pub loop_mode: LoopMode,
    pub shuffle: bool,
    speed_index: usize,
    volume: u8,
    muted: bool,
    previous_volume: u8,
    duration: Option<f64>,
}

impl PlayerState {
    pub fn new(default_volume: u8) -> Self {
        Self {
            playlist: Vec::new(),
            shuffled_indices: Vec::new(),
            current_index: None,
            is_playing: false,
            loop_mode: LoopMode::Off,
            shuffle: false,
            speed_index: DEFAULT_SPEED_INDEX,
            volume: default_volume.min(100),
            muted: false,
            previous_volume: default_volume.min(100),
            duration: None,
        }
    }

    fn item_at(&self, order_index: usize) -> Option<&PlaylistItem> {
        if self.shuffle {
            let real = *self.shuffled_indices.get(order_index)?;
            self.playlist.get(real)
        } else {
            self.playlist.get(order_index)
        }
    }

    /// Playlist-order index of the item at a play-order position.
    fn resolve(&self, order_index: usize) -> Option<usize> {
        if self.shuffle {
            self.shuffled_indices.get(order_index).copied()
        } else {
            (order_index < self.playlist.len()).then_some(order_index)
        }
    }

    pub fn current_item(&self) -> Option<PlaylistItem> {
        self.current_index.and_then(|i| self.item_at(i)).cloned()
    }

    pub fn current_playlist_index(&self) -> Option<usize> {
        self.current_index.and_then(|i| self.resolve(i))
    }

    fn reshuffle(&mut self) {
        let mut rng = rand::rng();
        self.shuffled_indices = (0..self.playlist.len()).collect();
        self.shuffled_indices.shuffle(&mut rng);
    }

    /// Regenerate the permutation, keeping the current item current.
    fn reshuffle_preserving_current(&mut self) {
        let current = self.current_playlist_index();
        self.reshuffle();
        if let Some(real_idx) = current {
            if let Some(pos) = self.shuffled_indices.iter().position(|&i| i == real_idx) {
                self.current_index = Some(pos);
            }
        }
    }

    pub fn add_item(&mut self, item: PlaylistItem) -> usize {
        self.playlist.push(item);
        if self.shuffle {
            self.reshuffle_preserving_current();
        }
        if self.current_index.is_none() {
            self.current_index = Some(0);
        }
        self.playlist.len() - 1
    }

    pub fn remove_item(&mut self, playlist_index: usize) {
        if playlist_index >= self.playlist.len() {
            return;
        }
        let current_real = self.current_playlist_index();
        self.playlist.remove(playlist_index);

        if self.playlist.is_empty() {
            self.current_index = None;
            self.is_playing = false;
            self.shuffled_indices.clear();
            return;
        }

        // Keep pointing at the same item where possible, else clamp.
        let new_real = match current_real {
            Some(real) if real > playlist_index => Some(real - 1),
            Some(real) if real == playlist_index => Some(real.min(self.playlist.len() - 1)),
            other => other,
        };

        if self.shuffle {
            self.reshuffle();
            self.current_index = new_real
                .and_then(|real| self.shuffled_indices.iter().position(|&i| i == real));
        } else {
            self.current_index = new_real;
        }
    }

    pub fn clear(&mut self) {
        self.playlist.clear();
        self.shuffled_indices.clear();
        self.current_index = None;
        self.is_playing = false;
        self.duration = None;
    }

    pub fn select(&mut self, playlist_index: usize) -> Option<PlaylistItem> {
        if playlist_index >= self.playlist.len() {
            return None;
        }
        self.current_index = if self.shuffle {
            self.shuffled_indices.iter().position(|&i| i == playlist_index)
        } else {
            Some(playlist_index)
        };
        self.duration = None;
        self.current_item()
    }

    /// Manual skip: always wraps modulo the playlist length.
    pub fn next(&mut self) -> Option<PlaylistItem> {
        if self.playlist.is_empty() {
            return None;
        }
        let len = self.playlist.len();
        self.current_index = Some(match self.current_index {
            Some(idx) => (idx + 1) % len,
            None => 0,
        });
        self.duration = None;
        self.current_item()
    }

    pub fn previous(&mut self) -> Option<PlaylistItem> {
        if self.playlist.is_empty() {
            return None;
        }
        let len = self.playlist.len();
        self.current_index = Some(match self.current_index {
            Some(idx) => (idx + len - 1) % len,
            None => 0,
        });
        self.duration = None;
        self.current_item()
    }

    /// End-of-media branching. Loop `one` replays; otherwise playback only
    /// advances when auto-play is on, and only wraps past the end when the
    /// playlist is set to repeat.
    pub fn on_media_ended(&mut self, auto_play: bool, loop_playlist: bool) -> MediaEndAction {
        let Some(current) = self.current_index else {
            self.is_playing = false;
            return MediaEndAction::Stop;
        };

        if self.loop_mode == LoopMode::One {
            return MediaEndAction::Replay;
        }

        if !auto_play {
            self.is_playing = false;
            return MediaEndAction::Stop;
        }

        let len = self.playlist.len();
        let next = if current + 1 < len {
            Some(current + 1)
        } else if self.loop_mode == LoopMode::All || loop_playlist {
            Some(0)
        } else {
            None
        };

        match next {
            Some(idx) => {
                self.current_index = Some(idx);
                self.duration = None;
                let index = self.resolve(idx).unwrap_or(0);
                match self.item_at(idx).cloned() {
                    Some(item) => MediaEndAction::Advance { index, item },
                    None => {
                        self.is_playing = false;
                        MediaEndAction::Stop
                    }
                }
            }
            None => {
                self.is_playing = false;
                MediaEndAction::Stop
            }
        }
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.duration = (duration.is_finite() && duration > 0.0).then_some(duration);
    }

    /// Clamp a seek target to `[0, duration]`.
    pub fn clamp_seek(&self, position: f64) -> f64 {
        let lower = position.max(0.0);
        match self.duration {
            Some(d) => lower.min(d),
            None => lower,
        }
    }

    /// Clamp to `[0, 100]`; volume 0 mutes, any other value unmutes and
    /// becomes the restore point.
    pub fn set_volume(&mut self, volume: i64) -> (u8, bool) {
        let clamped = volume.clamp(0, 100) as u8;
        self.volume = clamped;
        if clamped == 0 {
            self.muted = true;
        } else {
            self.muted = false;
            self.previous_volume = clamped;
        }
        (self.volume, self.muted)
    }

    pub fn toggle_mute(&mut self) -> (u8, bool) {
        if self.muted {
            self.muted = false;
            self.volume = if self.previous_volume > 0 {
                self.previous_volume
            } else {
                VOLUME_FALLBACK
            };
        } else {
            if self.volume > 0 {
                self.previous_volume = self.volume;
            }
            self.volume = 0;
            self.muted = true;
        }
        (self.volume, self.muted)
    }

    pub fn speed(&self) -> f64 {
        PLAYBACK_SPEEDS[self.speed_index]
    }

    pub fn cycle_speed(&mut self) -> f64 {
        self.speed_index = (self.speed_index + 1) % PLAYBACK_SPEEDS.len();
        self.speed()
    }

    pub fn set_loop_mode(&mut self, mode: LoopMode) {
        self.loop_mode = mode;
    }

    pub fn toggle_shuffle(&mut self) -> bool {
        let current_real = self.current_playlist_index();
        self.shuffle = !self.shuffle;

        if self.shuffle {
            self.reshuffle();
            if let Some(real) = current_real {
                if let Some(pos) = self.shuffled_indices.iter().position(|&i| i == real) {
                    self.current_index = Some(pos);
                }
            }
        } else {
            self.current_index = current_real;
        }
        self.shuffle
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            playlist: self.playlist.clone(),
            current_index: self.current_playlist_index(),
            is_playing: self.is_playing,
            loop_mode: self.loop_mode,
            shuffle: self.shuffle,
            speed: self.speed(),
            volume: self.volume,
            muted: self.muted,
        }
    }
}

/// Tauri-managed wrapper; all mutation goes through this lock.
pub struct Player {
    pub state: RwLock<PlayerState>,
}

impl Player {
    pub fn new(default_volume: u8) -> Self {
        Self {
            state: RwLock::new(PlayerState::new(default_volume)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::MediaType;

    fn item(name: &str) -> PlaylistItem {
        PlaylistItem {
            name: name.to_string(),
            source: format!("blob:{}", name),
            media_type: MediaType::Video,
        }
    }

    fn player_with(names: &[&str]) -> PlayerState {
        let mut state = PlayerState::new(70);
        for name in names {
            state.add_item(item(name));
        }
        state
    }

    #[test]
    fn first_item_becomes_current() {
        let mut state = PlayerState::new(70);
        assert!(state.current_item().is_none());
        state.add_item(item("a.mp4"));
        assert_eq!(state.current_item().unwrap().name, "a.mp4");
        assert_eq!(state.current_playlist_index(), Some(0));
    }

    #[test]
    fn next_and_previous_wrap_modulo() {
        let mut state = player_with(&["a.mp4", "b.mp4", "c.mp4"]);
        assert_eq!(state.next().unwrap().name, "b.mp4");
        assert_eq!(state.next().unwrap().name, "c.mp4");
        assert_eq!(state.next().unwrap().name, "a.mp4");
        assert_eq!(state.previous().unwrap().name, "c.mp4");

        for _ in 0..10 {
            state.next();
            let idx = state.current_playlist_index().unwrap();
            assert!(idx < 3);
        }
    }

    #[test]
    fn skip_on_empty_playlist_is_noop() {
        let mut state = PlayerState::new(70);
        assert!(state.next().is_none());
        assert!(state.previous().is_none());
        assert!(state.current_playlist_index().is_none());
    }

    #[test]
    fn media_end_without_autoplay_stops_at_last_index() {
        // Playlist a/b/c, current c, loop off, autoplay off -> stays at 2.
        let mut state = player_with(&["a.mp4", "b.mp4", "c.mp4"]);
        state.select(2);
        state.is_playing = true;

        let action = state.on_media_ended(false, false);
        assert_eq!(action, MediaEndAction::Stop);
        assert!(!state.is_playing);
        assert_eq!(state.current_playlist_index(), Some(2));
    }

    #[test]
    fn media_end_loop_one_replays() {
        let mut state = player_with(&["a.mp4", "b.mp4"]);
        state.set_loop_mode(LoopMode::One);
        let action = state.on_media_ended(true, true);
        assert_eq!(action, MediaEndAction::Replay);
        assert_eq!(state.current_playlist_index(), Some(0));
    }

    #[test]
    fn media_end_with_autoplay_advances() {
        let mut state = player_with(&["a.mp4", "b.mp4"]);
        match state.on_media_ended(true, false) {
            MediaEndAction::Advance { index, item } => {
                assert_eq!(index, 1);
                assert_eq!(item.name, "b.mp4");
            }
            other => panic!("expected advance, got {:?}", other),
        }
    }

    #[test]
    fn media_end_at_tail_wraps_only_when_looping() {
        let mut state = player_with(&["a.mp4", "b.mp4"]);
        state.select(1);
        assert_eq!(state.on_media_ended(true, false), MediaEndAction::Stop);

        state.select(1);
        match state.on_media_ended(true, true) {
            MediaEndAction::Advance { index, .. } => assert_eq!(index, 0),
            other => panic!("expected wrap to start, got {:?}", other),
        }

        state.select(1);
        state.set_loop_mode(LoopMode::All);
        match state.on_media_ended(true, false) {
            MediaEndAction::Advance { index, .. } => assert_eq!(index, 0),
            other => panic!("expected wrap to start, got {:?}", other),
        }
    }

    #[test]
    fn volume_clamps_and_tracks_mute() {
        let mut state = PlayerState::new(70);
        assert_eq!(state.set_volume(150), (100, false));
        assert_eq!(state.set_volume(-20), (0, true));
        // Unmuting restores the last non-zero volume.
        assert_eq!(state.toggle_mute(), (100, false));

        state.set_volume(40);
        assert_eq!(state.toggle_mute(), (0, true));
        assert_eq!(state.toggle_mute(), (40, false));
    }

    #[test]
    fn unmute_falls_back_to_70_when_nothing_recorded() {
        let mut state = PlayerState::new(0);
        state.toggle_mute();
        assert_eq!(state.toggle_mute(), (70, false));
    }

    #[test]
    fn seek_clamps_to_duration() {
        let mut state = player_with(&["a.mp4"]);
        state.set_duration(120.0);
        assert_eq!(state.clamp_seek(-5.0), 0.0);
        assert_eq!(state.clamp_seek(60.0), 60.0);
        assert_eq!(state.clamp_seek(500.0), 120.0);
    }

    #[test]
    fn speed_cycles_through_fixed_set() {
        let mut state = PlayerState::new(70);
        assert_eq!(state.speed(), 1.0);
        assert_eq!(state.cycle_speed(), 1.25);
        assert_eq!(state.cycle_speed(), 1.5);
        assert_eq!(state.cycle_speed(), 2.0);
        assert_eq!(state.cycle_speed(), 0.5);
        assert_eq!(state.cycle_speed(), 0.75);
        assert_eq!(state.cycle_speed(), 1.0);
    }

    #[test]
    fn shuffle_toggle_preserves_current_item() {
        let mut state = player_with(&["a.mp4", "b.mp4", "c.mp4", "d.mp4"]);
        state.select(2);
        state.toggle_shuffle();
        assert_eq!(state.current_item().unwrap().name, "c.mp4");
        state.toggle_shuffle();
        assert_eq!(state.current_item().unwrap().name, "c.mp4");
        assert_eq!(state.current_playlist_index(), Some(2));
    }

    #[test]
    fn shuffled_cycle_visits_every_item_once() {
        let mut state = player_with(&["a.mp4", "b.mp4", "c.mp4", "d.mp4", "e.mp4"]);
        state.toggle_shuffle();

        let mut seen = std::collections::HashSet::new();
        seen.insert(state.current_item().unwrap().name);
        for _ in 0..4 {
            seen.insert(state.next().unwrap().name);
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn removing_current_item_clamps_index() {
        let mut state = player_with(&["a.mp4", "b.mp4", "c.mp4"]);
        state.select(2);
        state.remove_item(2);
        assert_eq!(state.current_playlist_index(), Some(1));
        assert_eq!(state.current_item().unwrap().name, "b.mp4");

        state.remove_item(0);
        assert_eq!(state.current_item().unwrap().name, "b.mp4");

        state.remove_item(0);
        assert!(state.current_item().is_none());
        assert!(state.next().is_none());
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut state = player_with(&["a.mp4", "b.mp4"]);
        state.next();
        state.set_volume(30);
        let snap = state.snapshot();
        assert_eq!(snap.playlist.len(), 2);
        assert_eq!(snap.current_index, Some(1));
        assert_eq!(snap.volume, 30);
        assert_eq!(snap.speed, 1.0);
        assert!(!snap.shuffle);
    }
}
