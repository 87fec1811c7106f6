use std::path::{Path, PathBuf};

use anyhow::Result;

use super::BrowserSources;
use super::bookmarks::flatten_bookmark_tree;
use crate::models::{BookmarkItem, HistoryItem, OpenTab};
use crate::parsers::{parse_bookmark_tree, parse_json_array};

pub const TABS_FILENAME: &str = "tabs.json";
pub const HISTORY_FILENAME: &str = "history.json";
pub const BOOKMARKS_FILENAME: &str = "bookmarks.json";

/// Browser sources backed by JSON exports in one directory
///
/// Layout:
/// - `tabs.json`: array of tabs; the tab with `"active": true` is the current one
/// - `history.json`: array of history items
/// - `bookmarks.json`: the bookmark tree (array of roots or a single root)
///
/// Files are re-read on every fetch so edits show up on the next cache miss.
#[derive(Debug, Clone)]
pub struct JsonFileSources {
    dir: PathBuf,
}

impl JsonFileSources {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl BrowserSources for JsonFileSources {
    fn open_tabs(&self) -> Result<Vec<OpenTab>> {
        parse_json_array(&self.dir.join(TABS_FILENAME))
    }

    fn history(&self, max_results: usize) -> Result<Vec<HistoryItem>> {
        let mut items: Vec<HistoryItem> = parse_json_array(&self.dir.join(HISTORY_FILENAME))?;
        // The browser answers most recent first; exports may be in any order
        items.sort_by(|a, b| b.last_visit_time.cmp(&a.last_visit_time));
        items.truncate(max_results);
        Ok(items)
    }

    fn bookmarks(&self) -> Result<Vec<BookmarkItem>> {
        let roots = parse_bookmark_tree(&self.dir.join(BOOKMARKS_FILENAME))?;
        Ok(flatten_bookmark_tree(&roots))
    }

    fn active_tab_id(&self) -> Option<String> {
        self.open_tabs().ok()?.into_iter().find(|tab| tab.active).map(|tab| tab.id)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn data_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(TABS_FILENAME),
            r#"[
                {"id": 1, "title": "Inbox", "url": "https://mail.example", "lastAccessed": 300},
                {"id": 2, "title": "Editor", "url": "https://code.example", "active": true}
            ]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join(HISTORY_FILENAME),
            r#"[
                {"id": "a", "title": "Old", "url": "https://old.example", "lastVisitTime": 10},
                {"id": "b", "title": "New", "url": "https://new.example", "lastVisitTime": 90},
                {"id": "c", "title": "Mid", "url": "https://mid.example", "lastVisitTime": 50}
            ]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join(BOOKMARKS_FILENAME),
            r#"[{"id": "0", "children": [
                {"id": "1", "title": "Bar", "children": [
                    {"id": "7", "title": "Docs", "url": "https://docs.rs"}
                ]}
            ]}]"#,
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_active_tab_id_from_flag() {
        let dir = data_dir();
        let sources = JsonFileSources::new(dir.path());
        assert_eq!(sources.active_tab_id().as_deref(), Some("2"));
    }

    #[test]
    fn test_history_most_recent_first_and_limited() {
        let dir = data_dir();
        let sources = JsonFileSources::new(dir.path());
        let items = sources.history(2).unwrap();
        let ids: Vec<&str> = items.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_bookmarks_flattened() {
        let dir = data_dir();
        let sources = JsonFileSources::new(dir.path());
        let bookmarks = sources.bookmarks().unwrap();
        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].title, "Docs");
    }

    #[test]
    fn test_missing_export_is_error() {
        let dir = TempDir::new().unwrap();
        let sources = JsonFileSources::new(dir.path());
        assert!(sources.history(10).is_err());
        assert!(sources.active_tab_id().is_none());
    }
}
