pub mod probe;

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use uuid::Uuid;

use crate::errors::AppError;

pub const THUMBNAIL_TIMEOUT: Duration = Duration::from_secs(30);
pub const SCREENSHOT_TIMEOUT: Duration = Duration::from_secs(30);
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

const THUMBNAIL_SIZE: &str = "320:180";
const SCREENSHOT_SIZE: &str = "1920:1080";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscodeOptions {
    pub video_codec: String,
    pub preset: String,
    pub crf: u32,
    pub audio_codec: String,
    pub audio_bitrate: String,
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            preset: "medium".to_string(),
            crf: 23,
            audio_codec: "aac".to_string(),
            audio_bitrate: "256k".to_string(),
        }
    }
}

/// Wrapper around the external ffmpeg/ffprobe binaries. Every invocation is
/// an argument vector (never a shell string); bounded operations run under a
/// timeout and all failure modes map to `AppError::Tool`.
pub struct MediaTools {
    ffmpeg: String,
    ffprobe: String,
    screenshot_dir: PathBuf,
}

fn tool_path(name: &str) -> String {
    // Prefer a binary bundled next to the executable, fall back to PATH.
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(dir) = exe_path.parent() {
            let candidate = dir.join("bin").join(name);
            if candidate.exists() {
                return candidate.to_string_lossy().to_string();
            }
        }
    }
    name.to_string()
}

fn new_command(program: &str) -> Command {
    let mut cmd = Command::new(program);
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    cmd
}

async fn run_tool(
    program: &str,
    args: &[String],
    timeout: Option<Duration>,
) -> Result<std::process::Output, AppError> {
    let future = new_command(program).args(args).output();

    let output = match timeout {
        Some(limit) => tokio::time::timeout(limit, future).await.map_err(|_| {
            AppError::Tool(format!(
                "{} timed out after {}s",
                program,
                limit.as_secs()
            ))
        })?,
        None => future.await,
    };

    output.map_err(|e| AppError::Tool(format!("Failed to run {}: {}", program, e)))
}

fn check_exit(program: &str, output: &std::process::Output) -> Result<(), AppError> {
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    let detail: String = stderr
        .lines()
        .rev()
        .take(5)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n");
    Err(AppError::Tool(format!(
        "{} exited with {}: {}",
        program, output.status, detail
    )))
}

pub fn thumbnail_args(input: &str, seek_seconds: f64, output: &Path) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-ss".to_string(),
        format!("{}", seek_seconds),
        "-i".to_string(),
        input.to_string(),
        "-frames:v".to_string(),
        "1".to_string(),
        "-vf".to_string(),
        format!("scale={}", THUMBNAIL_SIZE),
        "-q:v".to_string(),
        "4".to_string(),
        output.to_string_lossy().to_string(),
    ]
}

pub fn screenshot_args(input: &str, seek_seconds: f64, output: &Path) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-ss".to_string(),
        format!("{}", seek_seconds),
        "-i".to_string(),
        input.to_string(),
        "-frames:v".to_string(),
        "1".to_string(),
        "-vf".to_string(),
        format!("scale={}", SCREENSHOT_SIZE),
        "-q:v".to_string(),
        "2".to_string(),
        output.to_string_lossy().to_string(),
    ]
}

pub fn transcode_args(input: &str, output: &str, options: &TranscodeOptions) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-i".to_string(),
        input.to_string(),
        "-c:v".to_string(),
        options.video_codec.clone(),
        "-preset".to_string(),
        options.preset.clone(),
        "-crf".to_string(),
        options.crf.to_string(),
        "-c:a".to_string(),
        options.audio_codec.clone(),
        "-b:a".to_string(),
        options.audio_bitrate.clone(),
        output.to_string(),
    ]
}

impl MediaTools {
    pub fn new(screenshot_dir: PathBuf) -> Self {
        Self {
            ffmpeg: tool_path("ffmpeg"),
            ffprobe: tool_path("ffprobe"),
            screenshot_dir,
        }
    }

    /// Extract one frame as a 320x180 JPEG and return it base64-encoded. The
    /// intermediate file lives only for the duration of the call.
    pub async fn generate_thumbnail(
        &self,
        input: &str,
        seek_seconds: f64,
    ) -> Result<String, AppError> {
        let temp = std::env::temp_dir().join(format!(".pulse-thumb-{}.jpg", Uuid::new_v4()));
        let args = thumbnail_args(input, seek_seconds, &temp);

        let result = async {
            let output = run_tool(&self.ffmpeg, &args, Some(THUMBNAIL_TIMEOUT)).await?;
            check_exit(&self.ffmpeg, &output)?;
            let bytes = tokio::fs::read(&temp)
                .await
                .map_err(|e| AppError::Tool(format!("Thumbnail output unreadable: {}", e)))?;
            Ok(general_purpose::STANDARD.encode(bytes))
        }
        .await;

        let _ = tokio::fs::remove_file(&temp).await;
        result
    }

    /// Capture one full-resolution (1920x1080) frame to a file in the
    /// screenshot directory and return its path.
    pub async fn capture_screenshot(
        &self,
        input: &str,
        seek_seconds: f64,
    ) -> Result<String, AppError> {
        tokio::fs::create_dir_all(&self.screenshot_dir)
            .await
            .map_err(|e| AppError::Io(e.to_string()))?;

        let output_path = self.screenshot_dir.join(format!(
            "screenshot_{}.jpg",
            chrono::Local::now().format("%Y%m%d_%H%M%S%.3f")
        ));
        let args = screenshot_args(input, seek_seconds, &output_path);

        let output = run_tool(&self.ffmpeg, &args, Some(SCREENSHOT_TIMEOUT)).await?;
        check_exit(&self.ffmpeg, &output)?;
        Ok(output_path.to_string_lossy().to_string())
    }

    /// Run a full transcode. Deliberately unbounded: there is no sensible
    /// upper limit for long inputs. Tool stderr is streamed to the log, which
    /// is the only progress channel.
    pub async fn transcode(
        &self,
        input: &str,
        output: &str,
        options: &TranscodeOptions,
    ) -> Result<String, AppError> {
        let args = transcode_args(input, output, options);
        log::info!("Starting transcode: {} -> {}", input, output);

        let mut child = Command::new(&self.ffmpeg)
            .args(&args)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| AppError::Tool(format!("Failed to run {}: {}", self.ffmpeg, e)))?;

        let mut tail: Vec<String> = Vec::new();
        if let Some(stderr) = child.stderr.take() {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                log::debug!("[ffmpeg] {}", line);
                tail.push(line);
                if tail.len() > 10 {
                    tail.remove(0);
                }
            }
        }

        let status = child
            .wait()
            .await
            .map_err(|e| AppError::Tool(format!("Failed to wait on {}: {}", self.ffmpeg, e)))?;

        if !status.success() {
            return Err(AppError::Tool(format!(
                "{} exited with {}: {}",
                self.ffmpeg,
                status,
                tail.join("\n")
            )));
        }

        log::info!("Transcode complete: {}", output);
        Ok(output.to_string())
    }

    pub async fn audio_tracks(&self, input: &str) -> Vec<probe::AudioTrack> {
        probe::audio_tracks(&self.ffprobe, input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnail_args_seek_before_input() {
        let args = thumbnail_args("/media/a.mp4", 5.0, Path::new("/tmp/t.jpg"));
        let ss = args.iter().position(|a| a == "-ss").unwrap();
        let input = args.iter().position(|a| a == "-i").unwrap();
        assert!(ss < input);
        assert_eq!(args[ss + 1], "5");
        assert!(args.contains(&"scale=320:180".to_string()));
    }

    #[test]
    fn screenshot_uses_full_resolution() {
        let args = screenshot_args("/media/a.mp4", 12.5, Path::new("/tmp/s.jpg"));
        assert!(args.contains(&"scale=1920:1080".to_string()));
        assert_eq!(args[args.iter().position(|a| a == "-ss").unwrap() + 1], "12.5");
    }

    #[test]
    fn transcode_args_carry_all_options() {
        let options = TranscodeOptions {
            video_codec: "libx265".to_string(),
            preset: "slow".to_string(),
            crf: 28,
            audio_codec: "libopus".to_string(),
            audio_bitrate: "128k".to_string(),
        };
        let args = transcode_args("in.mkv", "out.mp4", &options);
        for expected in ["-c:v", "libx265", "-preset", "slow", "-crf", "28", "-c:a", "libopus", "-b:a", "128k"] {
            assert!(args.contains(&expected.to_string()), "missing {}", expected);
        }
        assert_eq!(args.last().unwrap(), "out.mp4");
        // No shell metacharacter handling anywhere: each value is one argv entry.
        assert_eq!(args.iter().filter(|a| a.contains(' ')).count(), 0);
    }

    #[tokio::test]
    async fn missing_binary_maps_to_tool_error() {
        let err = run_tool("pulse-no-such-binary", &["-version".to_string()], None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Tool(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn timeout_maps_to_tool_error() {
        let err = run_tool(
            "sleep",
            &["5".to_string()],
            Some(Duration::from_millis(100)),
        )
        .await
        .unwrap_err();
        match err {
            AppError::Tool(msg) => assert!(msg.contains("timed out")),
            other => panic!("expected Tool error, got {:?}", other),
        }
    }
}
