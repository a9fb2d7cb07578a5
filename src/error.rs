//! Error types for the doit CLI.
//!
//! Uses thiserror for derive macros. Every error that reaches the
//! dispatcher maps to exit code 3; the [`ErrorKind`] decides whether the
//! user sees a single `ERROR:` line or a full diagnostic trace.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for doit operations.
#[derive(Error, Debug)]
pub enum DoitError {
    /// Malformed command line: unknown flag, missing or unparsable value.
    #[error("{0}")]
    OptionParse(String),

    /// Manifest missing, unreadable, or declaring no usable tasks.
    #[error("{0}")]
    InvalidManifest(String),

    /// Unknown command name used where one is required.
    #[error("{0}")]
    InvalidCommand(String),

    /// A requested task or target does not resolve.
    #[error("{0}")]
    InvalidTask(String),

    /// Anything else. Reported with its full cause chain.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Classification of [`DoitError`] used at the reporting boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    OptionParse,
    InvalidManifest,
    InvalidCommand,
    InvalidTask,
    Internal,
}

impl ErrorKind {
    /// User errors are reported as one line; internal errors get a trace.
    pub fn shows_trace(self) -> bool {
        matches!(self, ErrorKind::Internal)
    }
}

impl DoitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DoitError::OptionParse(_) => ErrorKind::OptionParse,
            DoitError::InvalidManifest(_) => ErrorKind::InvalidManifest,
            DoitError::InvalidCommand(_) => ErrorKind::InvalidCommand,
            DoitError::InvalidTask(_) => ErrorKind::InvalidTask,
            DoitError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Returns the exit code for this error.
    ///
    /// Errors only exist before task execution starts; failures during
    /// execution are reported through the engine's return value instead.
    pub fn exit_code(&self) -> i32 {
        exit_codes::SETUP_ERROR
    }

    /// Render the error the way the dispatcher writes it to stderr.
    pub fn render(&self) -> String {
        if self.kind().shows_trace() {
            format!("{}\n", self.trace())
        } else {
            format!("ERROR: {}\n", self)
        }
    }

    /// Full diagnostic: message, cause chain and, when enabled through
    /// `RUST_BACKTRACE`, the captured backtrace.
    fn trace(&self) -> String {
        match self {
            DoitError::Internal(inner) => format!("{:?}", inner),
            other => other.to_string(),
        }
    }
}

/// Result type alias for doit operations.
pub type Result<T> = std::result::Result<T, DoitError>;
