use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Unified error type for version derivation
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("\"{tool}\" binary was not found, version cannot be derived")]
    ToolNotFound { tool: String },

    #[error("{tool} describe failed with {}{}", exit_label(.code), stderr_suffix(.stderr))]
    ToolExecutionFailed {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{tool} describe did not finish within {}s", .timeout.as_secs())]
    ToolTimedOut { tool: String, timeout: Duration },

    #[error("Cannot parse version from {text:?} using pattern {pattern:?}")]
    ParseFailure { text: String, pattern: String },

    #[error("Cannot write version file {}", .path.display())]
    FileWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid tag prefix pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in describe-version
pub type Result<T> = std::result::Result<T, VersionError>;

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    // keep the diagnostic on a single line
    match stderr.lines().map(str::trim).find(|line| !line.is_empty()) {
        Some(line) => format!(": {}", line),
        None => String::new(),
    }
}

impl VersionError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VersionError::Config(msg.into())
    }

    /// Create an invalid pattern error, keeping only the summary line of the regex report
    pub fn invalid_pattern(pattern: impl Into<String>, source: &regex::Error) -> Self {
        let report = source.to_string();
        let reason = report
            .lines()
            .rev()
            .map(str::trim)
            .find_map(|line| line.strip_prefix("error:"))
            .map(str::trim)
            .unwrap_or_else(|| report.lines().next().unwrap_or_default().trim());

        VersionError::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid version error with context
    pub fn invalid_version(msg: impl Into<String>) -> Self {
        VersionError::InvalidVersion(msg.into())
    }
}
