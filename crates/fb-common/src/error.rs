//! Error types for flowbeacon.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Remediation suggestions for humans
//!
//! # Human-Facing Output
//!
//! Errors can be formatted for human consumption with headline, reason, and fix:
//! ```text
//! ✗ Feed Parse Error
//!   Reason: line 7: timestamp field "abc" is not numeric
//!   Fix: Check that the upstream sorter/extractor emits entity|timestamp lines.
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for flowbeacon operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Run configuration errors (precision, tolerance, epoch).
    Config,
    /// Feed record parse errors.
    Parse,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Parse => write!(f, "parse"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for flowbeacon.
///
/// Both error kinds that can abort a run are fatal: there is no partial
/// output and no per-record recovery. The run is a single deterministic
/// batch pass, so fail-fast is the whole propagation policy.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    // Feed parse errors (20-29)
    #[error("line {line}: {reason}")]
    Parse { line: u64, reason: String },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Feed parse errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::Parse { .. } => 20,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) => ErrorCategory::Config,
            Error::Parse { .. } => ErrorCategory::Parse,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Config(_) => "Configuration Error",
            Error::Parse { .. } => "Feed Parse Error",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Serialization Error",
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Config(_) => {
                "Pass a positive precision (bin width in seconds) and a non-negative tolerance fraction."
            }
            Error::Parse { .. } => {
                "Check that the upstream sorter/extractor emits entity|timestamp lines. The run aborts on the first malformed record; no partial report is produced."
            }
            Error::Io(_) => {
                "Check that the input path exists and is readable, and that stdout is writable."
            }
            Error::Json(_) => {
                "Re-run with '--format text'. If the failure persists, report it as a bug."
            }
        }
    }
}

/// Format an error for human-readable stderr output.
///
/// Output format:
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        red = red,
        cyan = cyan,
        reset = reset,
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}
