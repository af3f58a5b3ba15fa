use serde::{Deserialize, Serialize};

use super::{run_tool, PROBE_TIMEOUT};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioTrack {
    pub id: u32,
    pub title: String,
    pub language: String,
    pub codec: String,
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    index: u32,
    codec_name: Option<String>,
    #[serde(default)]
    tags: ProbeTags,
}

#[derive(Debug, Default, Deserialize)]
struct ProbeTags {
    title: Option<String>,
    language: Option<String>,
}

fn tracks_from_json(json: &str) -> Option<Vec<AudioTrack>> {
    let parsed: ProbeOutput = serde_json::from_str(json).ok()?;
    Some(
        parsed
            .streams
            .into_iter()
            .enumerate()
            .map(|(n, stream)| AudioTrack {
                id: stream.index,
                title: stream
                    .tags
                    .title
                    .unwrap_or_else(|| format!("Track {}", n + 1)),
                language: stream.tags.language.unwrap_or_else(|| "unknown".to_string()),
                codec: stream.codec_name.unwrap_or_else(|| "unknown".to_string()),
            })
            .collect(),
    )
}

/// Probe the audio streams of a media file. Probe failures of any kind
/// (missing tool, timeout, non-zero exit, malformed JSON) yield an empty
/// list rather than an error.
pub async fn audio_tracks(ffprobe: &str, input: &str) -> Vec<AudioTrack> {
    let args = vec![
        "-v".to_string(),
        "error".to_string(),
        "-print_format".to_string(),
        "json".to_string(),
        "-show_streams".to_string(),
        "-select_streams".to_string(),
        "a".to_string(),
        input.to_string(),
    ];

    let output = match run_tool(ffprobe, &args, Some(PROBE_TIMEOUT)).await {
        Ok(o) => o,
        Err(e) => {
            log::warn!("Audio track probe failed for {}: {}", input, e);
            return Vec::new();
        }
    };

    if !output.status.success() {
        log::warn!(
            "Audio track probe exited with {} for {}",
            output.status,
            input
        );
        return Vec::new();
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    tracks_from_json(&stdout).unwrap_or_else(|| {
        log::warn!("Audio track probe returned malformed JSON for {}", input);
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_probe_streams() {
        let json = r#"{
            "streams": [
                {"index": 1, "codec_name": "aac", "tags": {"title": "Commentary", "language": "eng"}},
                {"index": 2, "codec_name": "ac3"}
            ]
        }"#;
        let tracks = tracks_from_json(json).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].id, 1);
        assert_eq!(tracks[0].title, "Commentary");
        assert_eq!(tracks[0].language, "eng");
        assert_eq!(tracks[0].codec, "aac");
        assert_eq!(tracks[1].title, "Track 2");
        assert_eq!(tracks[1].language, "unknown");
    }

    #[test]
    fn malformed_json_is_none() {
        assert!(tracks_from_json("not json").is_none());
    }

    #[tokio::test]
    async fn missing_tool_yields_empty_list() {
        let tracks = audio_tracks("pulse-no-such-probe", "/media/a.mp4").await;
        assert!(tracks.is_empty());
    }
}
