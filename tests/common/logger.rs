//! Phase-tracked test logging for the integration tests.
#![allow(dead_code)]
//!
//! Each test creates a `TestLogger`, marks its phases (setup, execute,
//! verify) and finishes with `finish_ok`. Output goes to stderr, so it only
//! shows for failing tests or with `--nocapture`.
//!
//! ```rust,ignore
//! let log = TestLogger::new("login_stores_session_key");
//! log.phase("setup");
//! log.mock("PUT", "/rest/login");
//! log.phase("execute");
//! log.outcome(&result);
//! log.finish_ok();
//! ```
//!
//! # Environment Variables
//!
//! - `SLEEPIQ_TEST_LOG` - minimum level: trace, debug, info, warn, error (default: info)
//! - `SLEEPIQ_TEST_LOG_JSON` - "1" or "true" for one JSON object per line

use std::env;
use std::fmt::{Debug, Display};
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::log_capture::TestLogCapture;

// =============================================================================
// Log Levels
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Serialize)]
struct LogEntry<'a> {
    timestamp: DateTime<Utc>,
    level: LogLevel,
    test: &'a str,
    phase: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_ms: Option<u64>,
}

struct Settings {
    min_level: LogLevel,
    json: bool,
}

fn settings() -> &'static Settings {
    static SETTINGS: OnceLock<Settings> = OnceLock::new();
    SETTINGS.get_or_init(|| Settings {
        min_level: env::var("SLEEPIQ_TEST_LOG")
            .ok()
            .and_then(|s| LogLevel::parse(&s))
            .unwrap_or(LogLevel::Info),
        json: env::var("SLEEPIQ_TEST_LOG_JSON")
            .is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true")),
    })
}

// =============================================================================
// TestLogger
// =============================================================================

pub struct TestLogger {
    test_name: String,
    start_time: Instant,
    current_phase: Mutex<String>,
}

impl TestLogger {
    #[must_use]
    pub fn new(test_name: &str) -> Self {
        let logger = Self {
            test_name: test_name.to_string(),
            start_time: Instant::now(),
            current_phase: Mutex::new("init".to_string()),
        };
        logger.log(LogLevel::Info, "Test starting", None);
        logger
    }

    /// Logger plus a capture of the crate's tracing output on this thread.
    pub fn with_capture(test_name: &str) -> (Self, TestLogCapture) {
        let capture = TestLogCapture::start();
        (Self::new(test_name), capture)
    }

    pub fn phase(&self, phase: &str) {
        if let Ok(mut current) = self.current_phase.lock() {
            *current = phase.to_string();
        }
        self.log(LogLevel::Debug, &format!("Phase: {phase}"), None);
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, None);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, None);
    }

    /// Record a mock endpoint being mounted.
    pub fn mock(&self, method: &str, path: &str) {
        self.debug(&format!("mock {method} {path}"));
    }

    /// Record the result of the call under test.
    pub fn outcome<T: Debug, E: Display>(&self, result: &Result<T, E>) {
        match result {
            Ok(value) => self.debug(&format!("ok: {value:?}")),
            Err(err) => self.info(&format!("err: {err}")),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn finish_ok(&self) {
        let duration_ms = self.start_time.elapsed().as_millis() as u64;
        self.log(
            LogLevel::Info,
            &format!("Test passed (duration: {duration_ms}ms)"),
            Some(duration_ms),
        );
    }

    fn log(&self, level: LogLevel, message: &str, duration_ms: Option<u64>) {
        let settings = settings();
        if level < settings.min_level {
            return;
        }

        let phase = self
            .current_phase
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default();

        if settings.json {
            let entry = LogEntry {
                timestamp: Utc::now(),
                level,
                test: &self.test_name,
                phase: &phase,
                message,
                duration_ms,
            };
            if let Ok(json) = serde_json::to_string(&entry) {
                eprintln!("{json}");
            }
        } else {
            let ts = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
            eprintln!("[{ts}] [{level}] [{}:{phase}] {message}", self.test_name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_parsing() {
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("loud"), None);
        assert!(LogLevel::Debug < LogLevel::Warn);
    }

    #[test]
    fn logger_phases_and_outcome() {
        let log = TestLogger::new("logger_phases_and_outcome");
        log.phase("execute");
        log.outcome::<u8, String>(&Ok(1));
        log.outcome::<u8, String>(&Err("boom".to_string()));
        log.finish_ok();
    }
}
