//! Error types for memoir
//!
//! Each error type has a corresponding error code for programmatic handling.
//! Workflow validation outcomes are NOT errors: the validator returns
//! `ValidationResult` values and callers branch on them. Errors here are for
//! store, I/O and malformed-input failures that must propagate.

use thiserror::Error;

/// Result type alias for memoir operations
pub type Result<T> = std::result::Result<T, MemoirError>;

/// Main error type for all memoir operations
#[derive(Debug, Error)]
pub enum MemoirError {
    /// Data root not found - no .memoir directory
    #[error("Data root not found: {0}")]
    RootNotFound(String),

    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Session not found in the session store
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Draft not found in the draft store
    #[error("Draft not found: {0}")]
    DraftNotFound(String),

    /// Optimistic concurrency check failed on save
    #[error("Version conflict for draft {draft_id}: expected {expected}, found {found}")]
    VersionConflict {
        draft_id: String,
        expected: u32,
        found: u32,
    },

    /// Completion event that cannot be processed (e.g. interview not completed)
    #[error("Invalid completion event: {0}")]
    InvalidEvent(String),

    /// Workflow stage transition error
    #[error("Stage transition error: {0}")]
    StageTransition(String),

    /// Unparseable stage name supplied by a caller
    #[error("Unknown stage: {0}")]
    UnknownStage(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error with context
    #[error("{context}: {message}")]
    Wrapped { context: String, message: String },
}

impl MemoirError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            MemoirError::RootNotFound(_) => "ROOT_NOT_FOUND",
            MemoirError::InvalidJson(_) => "INVALID_JSON",
            MemoirError::FileNotFound(_) => "FILE_NOT_FOUND",
            MemoirError::ConfigError(_) => "CONFIG_ERROR",
            MemoirError::SessionNotFound(_) => "SESSION_NOT_FOUND",
            MemoirError::DraftNotFound(_) => "DRAFT_NOT_FOUND",
            MemoirError::VersionConflict { .. } => "VERSION_CONFLICT",
            MemoirError::InvalidEvent(_) => "INVALID_EVENT",
            MemoirError::StageTransition(_) => "STAGE_TRANSITION",
            MemoirError::UnknownStage(_) => "UNKNOWN_STAGE",
            MemoirError::Io(_) => "IO_ERROR",
            MemoirError::Wrapped { .. } => "WRAPPED_ERROR",
        }
    }

    /// Wrap an error with additional context
    pub fn wrap<E: std::fmt::Display>(error: E, context: impl Into<String>) -> Self {
        MemoirError::Wrapped {
            context: context.into(),
            message: error.to_string(),
        }
    }
}

/// Convert an error to an appropriate exit code
pub fn to_exit_code(error: &MemoirError) -> i32 {
    match error {
        MemoirError::VersionConflict { .. } => 3,
        _ => 1,
    }
}
