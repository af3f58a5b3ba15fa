use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Local;
use parking_lot::Mutex;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn parse(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "DEBUG" => LogLevel::Debug,
            "WARN" | "WARNING" => LogLevel::Warning,
            "ERROR" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }

    fn label(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Application file logger. Every line goes to a per-run timestamped file and
/// to a rolling `latest.log` that is truncated on startup, mirrored to the
/// console through the `log` facade.
pub struct Logger {
    run_file: PathBuf,
    latest_file: PathBuf,
    enabled: AtomicBool,
    timestamps: AtomicBool,
    min_level: Mutex<LogLevel>,
}

impl Logger {
    pub fn new(log_dir: &Path) -> Result<Self, AppError> {
        fs::create_dir_all(log_dir)?;

        let now = Local::now();
        let run_file = log_dir.join(format!(
            "LOG_{}_{}.log",
            now.format("%Y-%m-%d"),
            now.format("%H-%M-%S")
        ));
        let latest_file = log_dir.join("latest.log");

        fs::write(&latest_file, "")?;

        let logger = Self {
            run_file,
            latest_file,
            enabled: AtomicBool::new(true),
            timestamps: AtomicBool::new(true),
            min_level: Mutex::new(LogLevel::Info),
        };
        logger.log(LogLevel::Info, "Logger initialized", None);
        Ok(logger)
    }

    /// Re-apply the logging options from the settings document.
    pub fn configure(&self, enabled: bool, level: &str, timestamps: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
        self.timestamps.store(timestamps, Ordering::Relaxed);
        *self.min_level.lock() = LogLevel::parse(level);
    }

    pub fn log_file_path(&self) -> &Path {
        &self.run_file
    }

    pub fn log(&self, level: LogLevel, message: &str, elapsed_ms: Option<u64>) {
        if !self.enabled.load(Ordering::Relaxed) || level < *self.min_level.lock() {
            return;
        }

        let line = self.format_line(level, message, elapsed_ms);

        match level {
            LogLevel::Error => log::error!("{}", message),
            LogLevel::Warning => log::warn!("{}", message),
            LogLevel::Info => log::info!("{}", message),
            LogLevel::Debug => log::debug!("{}", message),
        }

        if let Err(e) = self.write_line(&line) {
            eprintln!("Failed to write to log file: {}", e);
        }
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message, None);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warning, message, None);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, None);
    }

    fn format_line(&self, level: LogLevel, message: &str, elapsed_ms: Option<u64>) -> String {
        let clock = if self.timestamps.load(Ordering::Relaxed) {
            format!("[{}] ", Local::now().format("%H:%M:%S"))
        } else {
            String::new()
        };

        match elapsed_ms {
            Some(ms) => format!(
                "[{}] {}[{}] {}",
                level.label(),
                clock,
                format_elapsed(ms),
                message
            ),
            None => format!("[{}] {}{}", level.label(), clock, message),
        }
    }

    fn write_line(&self, line: &str) -> std::io::Result<()> {
        for path in [&self.run_file, &self.latest_file] {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }
}

fn format_elapsed(ms: u64) -> String {
    let seconds = ms / 1000;
    let millis = ms % 1000;
    if seconds > 0 {
        format!("{}s {}ms", seconds, millis)
    } else {
        format!("{}ms", millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_renders_seconds_and_millis() {
        assert_eq!(format_elapsed(0), "0ms");
        assert_eq!(format_elapsed(950), "950ms");
        assert_eq!(format_elapsed(1000), "1s 0ms");
        assert_eq!(format_elapsed(12345), "12s 345ms");
    }

    #[test]
    fn writes_to_run_file_and_latest() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Logger::new(dir.path()).unwrap();
        logger.log(LogLevel::Info, "hello from test", Some(42));

        let latest = fs::read_to_string(dir.path().join("latest.log")).unwrap();
        let run = fs::read_to_string(logger.log_file_path()).unwrap();
        assert_eq!(latest, run);

        let line = latest.lines().last().unwrap();
        assert!(line.starts_with("[INFO] ["));
        assert!(line.ends_with("[42ms] hello from test"));
    }

    #[test]
    fn latest_log_truncated_per_run() {
        let dir = tempfile::tempdir().unwrap();
        {
            let logger = Logger::new(dir.path()).unwrap();
            logger.info("first run");
        }
        let logger = Logger::new(dir.path()).unwrap();
        logger.info("second run");

        let latest = fs::read_to_string(dir.path().join("latest.log")).unwrap();
        assert!(!latest.contains("first run"));
        assert!(latest.contains("second run"));
    }

    #[test]
    fn disabled_logger_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Logger::new(dir.path()).unwrap();
        logger.configure(false, "info", true);
        logger.error("should not appear");

        let latest = fs::read_to_string(dir.path().join("latest.log")).unwrap();
        assert!(!latest.contains("should not appear"));
    }

    #[test]
    fn level_filter_applies() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Logger::new(dir.path()).unwrap();
        logger.configure(true, "error", true);
        logger.info("info line");
        logger.error("error line");

        let latest = fs::read_to_string(dir.path().join("latest.log")).unwrap();
        assert!(!latest.contains("info line"));
        assert!(latest.contains("error line"));
    }
}
