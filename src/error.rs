use std::io;
use thiserror::Error;

/// Error type for the core layer (bootstrap, parsing, extraction)
#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Installation failed: {0}")]
    Install(String),

    #[error("Unsupported platform: {0}")]
    Unsupported(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for the core layer
pub type Result<T> = std::result::Result<T, HarvestError>;

impl HarvestError {
    /// Create a tool-not-found error
    pub fn tool_not_found<S: Into<String>>(msg: S) -> Self {
        HarvestError::ToolNotFound(msg.into())
    }

    /// Create an installation error
    pub fn install<S: Into<String>>(msg: S) -> Self {
        HarvestError::Install(msg.into())
    }

    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        HarvestError::Unsupported(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        HarvestError::Other(msg.into())
    }
}
