//! Netscape bookmark file rendering
//!
//! Rebuilds a bookmark HTML file from processed results. Live links file
//! under their final category; dead and spam links are moved into a fixed
//! archive folder under their original path, with a marker prefixed to
//! the title.

use crate::bookmarks::tree::{FolderNode, TreeLink};
use crate::state::ProcessedResult;

/// Root folder collecting links that failed the health check
pub const DEAD_ARCHIVE_FOLDER: &str = "🗑 Dead Link Archive";

/// Title prefix for archived dead links
pub const DEAD_TITLE_MARKER: &str = "[dead]";

/// Fallback segment when an archived link has no recorded original path
const UNKNOWN_LOCATION: &str = "Unknown location";

/// Renders processed results as a Netscape bookmark file
pub fn render_netscape(results: &[ProcessedResult]) -> String {
    let mut root = FolderNode::default();

    for result in results {
        let (path_str, title) = if result.status.is_alive() {
            (
                normalize_separators(&result.final_category),
                result.title.clone(),
            )
        } else {
            let original = if result.original_path.trim().is_empty() {
                UNKNOWN_LOCATION.to_string()
            } else {
                normalize_separators(&result.original_path)
            };
            (
                format!("{}/{}", DEAD_ARCHIVE_FOLDER, original),
                format!("{} {}", DEAD_TITLE_MARKER, result.title),
            )
        };

        let segments: Vec<String> = path_str
            .split('/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        root.insert(
            &segments,
            TreeLink {
                title,
                url: result.url.clone(),
            },
        );
    }

    let mut body = String::new();
    render_node(&root, &mut body);

    format!(
        "<!DOCTYPE NETSCAPE-Bookmark-file-1>\n\
         <META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=UTF-8\">\n\
         <TITLE>Bookmarks</TITLE>\n\
         <H1>Bookmarks</H1>\n\
         <DL><p>\n{}</DL><p>\n",
        body
    )
}

/// Some exports write folder separators as " / "; collapse to "/"
fn normalize_separators(path: &str) -> String {
    path.replace(" / ", "/")
}

fn render_node(node: &FolderNode, out: &mut String) {
    for (name, child) in node.children() {
        out.push_str("    <DT><H3>");
        out.push_str(&escape_html(name));
        out.push_str("</H3>\n    <DL><p>\n");
        render_node(child, out);
        out.push_str("    </DL><p>\n");
    }
    for link in node.links() {
        out.push_str("        <DT><A HREF=\"");
        out.push_str(&escape_html(&link.url));
        out.push_str("\">");
        out.push_str(&escape_html(&link.title));
        out.push_str("</A>\n");
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Link, LinkStatus, ProcessedResult};

    fn result(url: &str, title: &str, path: &str, status: LinkStatus) -> ProcessedResult {
        let link = Link::new(title, url, path);
        ProcessedResult::from_verdict(&link, status, "test")
    }

    #[test]
    fn alive_links_file_under_final_category() {
        let mut r = result("https://a.example.com", "A", "Old/Path", LinkStatus::Alive);
        r.final_category = "Tech/AI".to_string();
        let html = render_netscape(&[r]);

        assert!(html.contains("<H3>Tech</H3>"));
        assert!(html.contains("<H3>AI</H3>"));
        assert!(html.contains("HREF=\"https://a.example.com\""));
        assert!(!html.contains("<H3>Old</H3>"));
    }

    #[test]
    fn dead_links_move_to_archive_with_marker() {
        let r = result("https://gone.example.com", "Gone", "Reading", LinkStatus::Dead);
        let html = render_netscape(&[r]);

        assert!(html.contains(&format!("<H3>{}</H3>", DEAD_ARCHIVE_FOLDER)));
        assert!(html.contains("<H3>Reading</H3>"));
        assert!(html.contains("[dead] Gone"));
    }

    #[test]
    fn spam_links_are_archived_too() {
        let r = result("https://parked.example.com", "Parked", "", LinkStatus::Spam);
        let html = render_netscape(&[r]);

        assert!(html.contains(&format!("<H3>{}</H3>", DEAD_ARCHIVE_FOLDER)));
        assert!(html.contains("<H3>Unknown location</H3>"));
    }

    #[test]
    fn category_segments_are_trimmed() {
        let mut r = result("https://a.example.com", "A", "x", LinkStatus::Alive);
        r.final_category = "Tech / Frontend /  Vue ".to_string();
        let html = render_netscape(&[r]);

        assert!(html.contains("<H3>Tech</H3>"));
        assert!(html.contains("<H3>Frontend</H3>"));
        assert!(html.contains("<H3>Vue</H3>"));
    }

    #[test]
    fn titles_and_urls_are_escaped() {
        let r = result(
            "https://a.example.com/?q=1&r=2",
            "Tom & Jerry <3",
            "Misc",
            LinkStatus::Alive,
        );
        let html = render_netscape(&[r]);

        assert!(html.contains("q=1&amp;r=2"));
        assert!(html.contains("Tom &amp; Jerry &lt;3"));
    }

    #[test]
    fn rendered_file_reparses() {
        let mut alive = result("https://a.example.com", "A", "x", LinkStatus::Alive);
        alive.final_category = "Tech/AI".to_string();
        let dead = result("https://b.example.com", "B", "Reading", LinkStatus::Dead);
        let html = render_netscape(&[alive, dead]);

        let links = crate::bookmarks::parse_bookmarks(&html);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].original_path, "Tech/AI");
        assert_eq!(
            links[1].original_path,
            format!("{}/Reading", DEAD_ARCHIVE_FOLDER)
        );
    }
}
