//! Netscape bookmark export parser
//!
//! Extracts a flat list of links from an exported bookmark HTML file.
//! Only anchors with an http(s) target become links; everything else
//! (javascript:, place:, ftp:) is skipped. Each link carries the folder
//! chain it was found under, joined top-level first.

use crate::state::Link;
use scraper::{ElementRef, Html, Selector};

/// Folder label used when a link has no ancestor folders
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Parses bookmark HTML into a flat list of links
///
/// # Arguments
///
/// * `html` - Content of the exported bookmark file
///
/// # Returns
///
/// Links in document order, each with its `original_path` set to the
/// joined ancestor-folder chain (or [`UNCATEGORIZED`]).
pub fn parse_bookmarks(html: &str) -> Vec<Link> {
    let document = Html::parse_document(html);
    let anchor_selector = Selector::parse("a").expect("static selector");

    let mut links = Vec::new();
    for anchor in document.select(&anchor_selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !is_http_url(href) {
            continue;
        }

        let title = anchor.text().collect::<String>().trim().to_string();
        let folders = ancestor_folders(&anchor);
        let original_path = if folders.is_empty() {
            UNCATEGORIZED.to_string()
        } else {
            folders.join("/")
        };

        links.push(Link::new(title, href, original_path));
    }

    tracing::debug!("Parsed {} http(s) links from export", links.len());
    links
}

fn is_http_url(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}

/// Collects the folder headings above an anchor, top-level first
///
/// In the Netscape format each folder is a `<dl>` list whose preceding
/// sibling element is the `<h3>` folder heading. Walking the anchor's
/// ancestors yields the chain innermost-first, so it is reversed before
/// returning.
fn ancestor_folders(anchor: &ElementRef) -> Vec<String> {
    let mut folders = Vec::new();

    for node in anchor.ancestors() {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        if !element.value().name().eq_ignore_ascii_case("dl") {
            continue;
        }

        let heading = element
            .prev_siblings()
            .find_map(ElementRef::wrap)
            .filter(|e| e.value().name().eq_ignore_ascii_case("h3"));

        if let Some(h3) = heading {
            let text = h3.text().collect::<String>().trim().to_string();
            if !text.is_empty() {
                folders.push(text);
            }
        }
    }

    folders.reverse();
    folders
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LinkStatus;

    #[test]
    fn extracts_links_with_folder_chain() {
        let html = r#"
            <dl>
                <dt><h3>Tech</h3>
                <dl>
                    <dt><h3>Frontend</h3>
                    <dl>
                        <dt><a href="https://vuejs.org">Vue</a>
                    </dl>
                </dl>
            </dl>
        "#;
        let links = parse_bookmarks(html);

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].title, "Vue");
        assert_eq!(links[0].url, "https://vuejs.org");
        assert_eq!(links[0].original_path, "Tech/Frontend");
        assert_eq!(links[0].status, LinkStatus::Pending);
    }

    #[test]
    fn link_without_folders_is_uncategorized() {
        let html = r#"<a href="http://example.com">Loose link</a>"#;
        let links = parse_bookmarks(html);

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].original_path, UNCATEGORIZED);
    }

    #[test]
    fn non_http_targets_are_skipped() {
        let html = r#"
            <a href="javascript:void(0)">JS</a>
            <a href="place:folder=BOOKMARKS">Places</a>
            <a href="ftp://files.example.com">FTP</a>
            <a>No href</a>
            <a href="https://kept.example.com">Kept</a>
        "#;
        let links = parse_bookmarks(html);

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://kept.example.com");
    }

    #[test]
    fn sibling_links_share_their_folder() {
        let html = r#"
            <dl>
                <dt><h3>Reading</h3>
                <dl>
                    <dt><a href="https://a.example.com">A</a>
                    <dt><a href="https://b.example.com">B</a>
                </dl>
            </dl>
        "#;
        let links = parse_bookmarks(html);

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].original_path, "Reading");
        assert_eq!(links[1].original_path, "Reading");
    }
}
