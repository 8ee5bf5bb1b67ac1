/// Link data model shared by the parser, pipeline, and progress store.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Health verdict for a single link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkStatus {
    /// Not yet checked
    Pending,

    /// Reachable and not recognized as spam
    Alive,

    /// 404, server error, or unreachable
    Dead,

    /// Reachable but the body matched a spam keyword (parked domain etc.)
    Spam,
}

impl LinkStatus {
    /// Returns true if the link survived the health check
    pub fn is_alive(&self) -> bool {
        matches!(self, Self::Alive)
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Alive => "ALIVE",
            Self::Dead => "DEAD",
            Self::Spam => "SPAM",
        };
        write!(f, "{}", s)
    }
}

/// A bookmark link extracted from the export file
///
/// Immutable after parsing except for `status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// Display title from the anchor text
    pub title: String,

    /// Target URL (http or https)
    pub url: String,

    /// Joined ancestor-folder chain from the export, top-level first
    pub original_path: String,

    /// Health verdict, `Pending` until checked
    pub status: LinkStatus,
}

impl Link {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        original_path: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            original_path: original_path.into(),
            status: LinkStatus::Pending,
        }
    }
}

/// A fully processed link as persisted in the progress report
///
/// Field names serialize in camelCase so reports written by earlier runs
/// load unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedResult {
    pub title: String,
    pub url: String,
    pub original_path: String,
    pub status: LinkStatus,

    /// Short health-check description ("OK", "404", error text)
    pub msg: String,

    /// Category path the link files under in the rendered output.
    /// Defaults to `original_path`; replaced only by a successful
    /// classification of an ALIVE link.
    pub final_category: String,
}

impl ProcessedResult {
    /// Builds a result from a link and its health verdict, with
    /// `final_category` defaulting to the original path.
    pub fn from_verdict(link: &Link, status: LinkStatus, msg: impl Into<String>) -> Self {
        Self {
            title: link.title.clone(),
            url: link.url.clone(),
            original_path: link.original_path.clone(),
            status,
            msg: msg.into(),
            final_category: link.original_path.clone(),
        }
    }
}
