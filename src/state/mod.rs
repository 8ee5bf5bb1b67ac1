//! State module for the link data model
//!
//! # Components
//!
//! - `LinkStatus`: health verdict for a link (PENDING/ALIVE/DEAD/SPAM)
//! - `Link`: a bookmark extracted from the export file
//! - `ProcessedResult`: a completed link as persisted in the progress report

mod link;

// Re-export main types
pub use link::{Link, LinkStatus, ProcessedResult};
