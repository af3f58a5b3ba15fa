use std::fs;
use std::path::Path;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleEntry {
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: String,
}

/// Command-boundary shape: timings in seconds.
#[derive(Debug, Clone, Serialize)]
pub struct SubtitleCue {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl From<&SubtitleEntry> for SubtitleCue {
    fn from(entry: &SubtitleEntry) -> Self {
        Self {
            start: entry.start_ms as f64 / 1000.0,
            end: entry.end_ms as f64 / 1000.0,
            text: entry.text.clone(),
        }
    }
}

/// Parse `HH:MM:SS,mmm` / `HH:MM:SS.mmm` (or `MM:SS.mmm`) into milliseconds.
fn parse_timestamp(raw: &str) -> Option<u64> {
    let cleaned = raw.trim().replace(',', ".");
    let parts: Vec<&str> = cleaned.split(':').collect();

    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m, s] => (h.parse::<u64>().ok()?, m.parse::<u64>().ok()?, s.parse::<f64>().ok()?),
        [m, s] => (0, m.parse::<u64>().ok()?, s.parse::<f64>().ok()?),
        _ => return None,
    };
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }

    Some(hours * 3_600_000 + minutes * 60_000 + (seconds * 1000.0).round() as u64)
}

fn format_timestamp(ms: u64) -> String {
    let total_seconds = ms / 1000;
    format!(
        "{:02}:{:02}:{:02},{:03}",
        total_seconds / 3600,
        (total_seconds % 3600) / 60,
        total_seconds % 60,
        ms % 1000
    )
}

fn parse_timing_line(line: &str) -> Option<(u64, u64)> {
    let (start, end) = line.split_once("-->")?;
    Some((parse_timestamp(start)?, parse_timestamp(end)?))
}

/// SRT: blank-line-delimited blocks of index line, timing line, text lines.
/// Malformed blocks are skipped rather than failing the whole file.
pub fn parse_srt(content: &str) -> Vec<SubtitleEntry> {
    let normalized = content.replace("\r\n", "\n");
    let mut entries = Vec::new();

    for block in normalized.split("\n\n") {
        let lines: Vec<&str> = block.trim().lines().collect();
        if lines.len() < 2 {
            continue;
        }
        let Some((start_ms, end_ms)) = parse_timing_line(lines[1]) else {
            continue;
        };
        entries.push(SubtitleEntry {
            start_ms,
            end_ms,
            text: lines[2..].join("\n"),
        });
    }

    entries
}

/// VTT: any line containing `-->` starts a cue whose text is the following
/// line only. Multi-line cues are not supported.
pub fn parse_vtt(content: &str) -> Vec<SubtitleEntry> {
    let lines: Vec<&str> = content.lines().collect();
    let mut entries = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if !line.contains("-->") {
            continue;
        }
        let Some((start_ms, end_ms)) = parse_timing_line(line) else {
            continue;
        };
        entries.push(SubtitleEntry {
            start_ms,
            end_ms,
            text: lines.get(i + 1).map(|l| l.trim().to_string()).unwrap_or_default(),
        });
    }

    entries
}

pub fn parse_subtitle_content(content: &str, format: &str) -> Result<Vec<SubtitleEntry>, AppError> {
    match format {
        "srt" => Ok(parse_srt(content)),
        "vtt" => Ok(parse_vtt(content)),
        other => Err(AppError::Parse(format!(
            "Unrecognized subtitle format: {}",
            other
        ))),
    }
}

pub fn parse_subtitle_file(path: &Path) -> Result<Vec<SubtitleEntry>, AppError> {
    let format = crate::files::extension_of(path)
        .ok_or_else(|| AppError::Parse("Subtitle file has no extension".to_string()))?;
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    parse_subtitle_content(&content, &format)
}

pub fn export_srt(entries: &[SubtitleEntry]) -> String {
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        out.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            i + 1,
            format_timestamp(entry.start_ms),
            format_timestamp(entry.end_ms),
            entry.text
        ));
    }
    out
}

/// Linear first-match lookup over `[start, end)` intervals. The offset is a
/// uniform shift applied at lookup time; entries are never rewritten by it.
pub fn active_entry(entries: &[SubtitleEntry], position_ms: u64, offset_ms: i64) -> Option<&SubtitleEntry> {
    let adjusted = position_ms as i64 + offset_ms;
    if adjusted < 0 {
        return None;
    }
    let adjusted = adjusted as u64;
    entries
        .iter()
        .find(|e| adjusted >= e.start_ms && adjusted < e.end_ms)
}

#[derive(Default)]
struct SubtitleState {
    entries: Vec<SubtitleEntry>,
    offset_ms: i64,
}

/// The currently loaded subtitle track plus its lookup offset.
pub struct SubtitleManager {
    state: Mutex<SubtitleState>,
}

impl SubtitleManager {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SubtitleState::default()),
        }
    }

    pub fn load(&self, entries: Vec<SubtitleEntry>) -> usize {
        let mut state = self.state.lock();
        state.entries = entries;
        state.offset_ms = 0;
        state.entries.len()
    }

    pub fn set_offset(&self, offset_ms: i64) {
        self.state.lock().offset_ms = offset_ms;
    }

    pub fn active_text(&self, position_ms: u64) -> Option<String> {
        let state = self.state.lock();
        active_entry(&state.entries, position_ms, state.offset_ms).map(|e| e.text.clone())
    }

    /// Timing editor: rewrite one entry in place.
    pub fn set_timing(&self, index: usize, start_ms: u64, end_ms: u64) -> Result<(), AppError> {
        let mut state = self.state.lock();
        let entry = state
            .entries
            .get_mut(index)
            .ok_or_else(|| AppError::Internal(format!("No subtitle entry at index {}", index)))?;
        entry.start_ms = start_ms;
        entry.end_ms = end_ms;
        Ok(())
    }

    pub fn export(&self) -> String {
        export_srt(&self.state.lock().entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_srt_block() {
        let entries = parse_srt("1\n00:00:01,000 --> 00:00:03,000\nHello");
        assert_eq!(
            entries,
            vec![SubtitleEntry {
                start_ms: 1000,
                end_ms: 3000,
                text: "Hello".to_string(),
            }]
        );
    }

    #[test]
    fn srt_joins_multi_line_text_and_keeps_millis() {
        let src = "1\n00:00:01,250 --> 00:00:02,750\nfirst\nsecond\n\n2\n00:01:00,000 --> 00:01:02,000\nlater\n";
        let entries = parse_srt(src);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].start_ms, 1250);
        assert_eq!(entries[0].end_ms, 2750);
        assert_eq!(entries[0].text, "first\nsecond");
        assert_eq!(entries[1].start_ms, 60_000);
    }

    #[test]
    fn srt_skips_malformed_blocks() {
        let src = "1\nnot a timing line\noops\n\n2\n00:00:05,000 --> 00:00:06,000\nok";
        let entries = parse_srt(src);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "ok");
    }

    #[test]
    fn vtt_takes_only_the_following_line() {
        let src = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nfirst line\nsecond line ignored\n\n00:00:03.000 --> 00:00:04.000\nnext cue";
        let entries = parse_vtt(src);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "first line");
        assert_eq!(entries[1].start_ms, 3000);
        assert_eq!(entries[1].text, "next cue");
    }

    #[test]
    fn unrecognized_format_is_parse_error() {
        let err = parse_subtitle_content("whatever", "ass").unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn lookup_is_half_open_first_match() {
        let entries = vec![
            SubtitleEntry { start_ms: 1000, end_ms: 3000, text: "a".into() },
            SubtitleEntry { start_ms: 3000, end_ms: 5000, text: "b".into() },
        ];
        assert_eq!(active_entry(&entries, 1500, 0).unwrap().text, "a");
        // End boundary is exclusive, start inclusive.
        assert_eq!(active_entry(&entries, 3000, 0).unwrap().text, "b");
        assert!(active_entry(&entries, 999, 0).is_none());
        assert!(active_entry(&entries, 5000, 0).is_none());
    }

    #[test]
    fn offset_shifts_lookup_not_entries() {
        let entries = vec![SubtitleEntry { start_ms: 1000, end_ms: 2000, text: "a".into() }];
        assert!(active_entry(&entries, 500, 0).is_none());
        assert_eq!(active_entry(&entries, 500, 700).unwrap().text, "a");
        assert!(active_entry(&entries, 1500, -700).is_none());
        assert_eq!(entries[0].start_ms, 1000);
    }

    #[test]
    fn negative_adjusted_time_has_no_active_entry() {
        let entries = vec![SubtitleEntry { start_ms: 0, end_ms: 1000, text: "a".into() }];
        assert!(active_entry(&entries, 100, -500).is_none());
    }

    #[test]
    fn manager_edits_timing_in_place() {
        let manager = SubtitleManager::new();
        manager.load(vec![SubtitleEntry { start_ms: 0, end_ms: 1000, text: "a".into() }]);
        manager.set_timing(0, 500, 1500).unwrap();
        assert!(manager.active_text(400).is_none());
        assert_eq!(manager.active_text(600).as_deref(), Some("a"));
        assert!(manager.set_timing(7, 0, 1).is_err());
    }

    #[test]
    fn export_round_trips_through_srt_parser() {
        let entries = vec![
            SubtitleEntry { start_ms: 1000, end_ms: 3000, text: "Hello".into() },
            SubtitleEntry { start_ms: 4500, end_ms: 6250, text: "World".into() },
        ];
        let exported = export_srt(&entries);
        assert!(exported.starts_with("1\n00:00:01,000 --> 00:00:03,000\nHello\n"));
        assert_eq!(parse_srt(&exported), entries);
    }
}
