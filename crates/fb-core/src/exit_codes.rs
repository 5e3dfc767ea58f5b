//! Exit codes for the fb-core CLI.
//!
//! Exit codes communicate run outcome without requiring output parsing.
//!
//! Exit code ranges:
//! - 0: clean run
//! - 10-19: user/environment errors (recoverable by user action)
//! - 20-29: internal/I-O errors

use fb_common::Error;

/// Exit codes for fb-core operations.
///
/// These codes are a stable contract for wrapping automation. Changes
/// require a major version bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Run completed and the report was emitted
    Clean = 0,

    /// Invalid arguments or configuration
    ArgsError = 10,

    /// The input stream contained a malformed record
    InputError = 11,

    /// I/O failure reading the feed or writing the report
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Check if this exit code indicates an error.
    pub fn is_error(self) -> bool {
        (self as i32) >= 10
    }

    /// Get the error code name as a string constant.
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::InputError => "ERR_INPUT",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config(_) => ExitCode::ArgsError,
            Error::Parse { .. } => ExitCode::InputError,
            Error::Io(_) | Error::Json(_) => ExitCode::IoError,
        }
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}
