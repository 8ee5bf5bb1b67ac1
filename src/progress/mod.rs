//! Progress store: durable checkpointing of per-link results
//!
//! The store owns the on-disk representation and is the sole writer to
//! persisted state. Every save deduplicates by URL (latest entry wins),
//! overwrites the JSON report wholesale, and re-renders the cleaned
//! bookmark file from the same data, so the two outputs never diverge.

use crate::bookmarks::render_netscape;
use crate::state::ProcessedResult;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while persisting progress
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for progress store operations
pub type ProgressResult<T> = Result<T, ProgressError>;

/// Crash-safe persistence of per-link results
pub struct ProgressStore {
    report_path: PathBuf,
    output_path: PathBuf,
}

impl ProgressStore {
    pub fn new(report_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            report_path: report_path.into(),
            output_path: output_path.into(),
        }
    }

    pub fn report_path(&self) -> &Path {
        &self.report_path
    }

    /// Loads the persisted report if present and well-formed
    ///
    /// A missing, malformed, or empty report is treated as "no prior
    /// progress"; no error escapes this method.
    pub fn load(&self) -> Vec<ProcessedResult> {
        let content = match std::fs::read_to_string(&self.report_path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_str::<Vec<ProcessedResult>>(&content) {
            Ok(results) if !results.is_empty() => {
                tracing::info!(
                    "Loaded {} entries from {}",
                    results.len(),
                    self.report_path.display()
                );
                results
            }
            Ok(_) => Vec::new(),
            Err(e) => {
                tracing::warn!(
                    "Ignoring malformed report {}: {}",
                    self.report_path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Persists results and re-renders the cleaned bookmark file
    ///
    /// No-op on empty input. Deduplicates by URL keeping the most recent
    /// entry, preserving the survivors' original relative order. Safe to
    /// call from the interrupt path as well as normal completion.
    pub fn save(&self, results: &[ProcessedResult]) -> ProgressResult<()> {
        if results.is_empty() {
            return Ok(());
        }

        let unique = dedup_latest(results);

        let json = serde_json::to_string_pretty(&unique)?;
        std::fs::write(&self.report_path, json)?;
        std::fs::write(&self.output_path, render_netscape(&unique))?;

        tracing::info!(
            "Checkpoint saved: {} entries ({} before dedup)",
            unique.len(),
            results.len()
        );
        Ok(())
    }
}

/// Deduplicates results by URL, keeping the latest occurrence
///
/// Scans from most recent to oldest so the first hit per URL is the
/// last-appended entry, then restores the original relative order.
pub fn dedup_latest(results: &[ProcessedResult]) -> Vec<ProcessedResult> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut unique: Vec<ProcessedResult> = results
        .iter()
        .rev()
        .filter(|r| seen.insert(r.url.as_str()))
        .cloned()
        .collect();
    unique.reverse();
    unique
}
