//! # Error Types
//!
//! This module defines the error type shared by every stage of label
//! generation. Each variant carries a message meant to be shown to the user
//! as-is; nothing is retried internally.

use thiserror::Error;

/// Main error type for hangtag operations
#[derive(Debug, Error)]
pub enum HangtagError {
    /// The mandatory product name column could not be located
    #[error("Schema error: {0}")]
    Schema(String),

    /// Headers were found but no usable product rows survived
    #[error("No products: {0}")]
    EmptyResult(String),

    /// The source file could not be read as a spreadsheet
    #[error("Source read error: {0}")]
    SourceRead(String),

    /// The job configuration cannot produce any labels
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Font file missing or unparsable
    #[error("Font error: {0}")]
    Font(String),

    /// PDF or image encoding failure
    #[error("Render error: {0}")]
    Render(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HangtagError {
    /// True for errors caused by the caller's input rather than the system.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Schema(_) | Self::EmptyResult(_) | Self::SourceRead(_) | Self::Configuration(_)
        )
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, HangtagError>;
