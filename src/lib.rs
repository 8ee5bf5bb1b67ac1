//! Bookmark-Sweep: a bookmark liveness sweeper and re-organizer
//!
//! This crate ingests a Netscape-format bookmark export, checks every link
//! for liveness, optionally re-categorizes live links through an external
//! classification service, and writes a cleaned bookmark file plus a JSON
//! progress report that doubles as a resumable checkpoint.

pub mod bookmarks;
pub mod config;
pub mod pipeline;
pub mod progress;
pub mod prompt;
pub mod state;

use thiserror::Error;

/// Main error type for Bookmark-Sweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input file not found: {path}")]
    MissingInput { path: String },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Progress store error: {0}")]
    Progress(#[from] progress::ProgressError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Missing credential: environment variable {0} is not set")]
    MissingCredential(String),
}

/// Result type alias for Bookmark-Sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use pipeline::{ClassifyOutcome, Coordinator, HealthChecker, RunOutcome};
pub use progress::ProgressStore;
pub use state::{Link, LinkStatus, ProcessedResult};
