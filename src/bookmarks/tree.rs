//! Explicit folder tree for output rendering
//!
//! Each node owns its children by name. Children keep insertion order so
//! the rendered file lists folders in the order they were first filed.

/// A link placed in the output tree
#[derive(Debug, Clone)]
pub struct TreeLink {
    pub title: String,
    pub url: String,
}

/// A folder node owning sub-folders and links
#[derive(Debug, Default)]
pub struct FolderNode {
    children: Vec<(String, FolderNode)>,
    links: Vec<TreeLink>,
}

impl FolderNode {
    /// Inserts a link under the given path, creating folders as needed
    ///
    /// An empty path files the link at this node.
    pub fn insert(&mut self, path: &[String], link: TreeLink) {
        let mut node = self;
        for segment in path {
            node = node.child_mut(segment);
        }
        node.links.push(link);
    }

    /// Sub-folders in insertion order
    pub fn children(&self) -> impl Iterator<Item = (&str, &FolderNode)> {
        self.children.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Links filed directly at this node
    pub fn links(&self) -> &[TreeLink] {
        &self.links
    }

    fn child_mut(&mut self, name: &str) -> &mut FolderNode {
        if let Some(pos) = self.children.iter().position(|(n, _)| n == name) {
            &mut self.children[pos].1
        } else {
            self.children.push((name.to_string(), FolderNode::default()));
            &mut self.children.last_mut().expect("just pushed").1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(title: &str) -> TreeLink {
        TreeLink {
            title: title.to_string(),
            url: format!("https://example.com/{}", title),
        }
    }

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn insert_creates_nested_folders() {
        let mut root = FolderNode::default();
        root.insert(&path(&["Tech", "AI"]), link("a"));

        let (name, tech) = root.children().next().unwrap();
        assert_eq!(name, "Tech");
        let (name, ai) = tech.children().next().unwrap();
        assert_eq!(name, "AI");
        assert_eq!(ai.links().len(), 1);
    }

    #[test]
    fn shared_prefix_reuses_folders() {
        let mut root = FolderNode::default();
        root.insert(&path(&["Tech", "AI"]), link("a"));
        root.insert(&path(&["Tech", "Web"]), link("b"));

        assert_eq!(root.children().count(), 1);
        let (_, tech) = root.children().next().unwrap();
        assert_eq!(tech.children().count(), 2);
    }

    #[test]
    fn children_keep_insertion_order() {
        let mut root = FolderNode::default();
        root.insert(&path(&["Zebra"]), link("z"));
        root.insert(&path(&["Alpha"]), link("a"));

        let names: Vec<_> = root.children().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Zebra", "Alpha"]);
    }

    #[test]
    fn empty_path_files_at_root() {
        let mut root = FolderNode::default();
        root.insert(&[], link("r"));
        assert_eq!(root.links().len(), 1);
    }
}
