//! Bookmark transform module
//!
//! Handles the two edges of the pipeline: parsing the exported bookmark
//! file into a flat link list, and rendering processed results back into
//! a cleaned Netscape bookmark file.

mod parser;
mod render;
mod tree;

pub use parser::{parse_bookmarks, UNCATEGORIZED};
pub use render::{render_netscape, DEAD_ARCHIVE_FOLDER, DEAD_TITLE_MARKER};
pub use tree::{FolderNode, TreeLink};
