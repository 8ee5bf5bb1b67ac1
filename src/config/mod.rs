//! Configuration module for Bookmark-Sweep
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every tunable has a default, so an empty config file is a valid config.
//!
//! # Example
//!
//! ```no_run
//! use bookmark_sweep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sweep.toml")).unwrap();
//! println!("Concurrency ceiling: {}", config.pipeline.concurrent_limit);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ClassifierConfig, Config, FilesConfig, HealthConfig, PipelineConfig};

// Re-export parser functions
pub use parser::{load_config, resolve_api_key};

// Re-export validation
pub use validation::validate;
