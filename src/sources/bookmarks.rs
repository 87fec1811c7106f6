use crate::models::{BookmarkItem, BookmarkNode};

/// Collect every node carrying a URL, depth first in tree order
///
/// Folder nodes are skipped but their children are still visited.
pub fn flatten_bookmark_tree(roots: &[BookmarkNode]) -> Vec<BookmarkItem> {
    let mut bookmarks = Vec::new();
    let mut stack: Vec<&BookmarkNode> = roots.iter().rev().collect();

    while let Some(node) = stack.pop() {
        if let Some(url) = node.url.as_deref().filter(|url| !url.is_empty()) {
            bookmarks.push(BookmarkItem {
                id: node.id.clone(),
                title: node.title.clone(),
                url: url.to_string(),
                date_added: node.date_added,
            });
        }
        stack.extend(node.children.iter().rev());
    }

    bookmarks
}
