//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, anyhow};
use browser_omnisearch::models::{BookmarkItem, HistoryItem, OpenTab};
use browser_omnisearch::sources::BrowserSources;
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use tempfile::TempDir;

pub fn ts(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

pub fn tab(id: &str, title: &str, url: &str, last_accessed: i64) -> OpenTab {
    OpenTab {
        id: id.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        last_accessed: ts(last_accessed),
        fav_icon_url: None,
        active: false,
    }
}

pub fn history(id: &str, title: &str, url: &str, last_visit: i64) -> HistoryItem {
    HistoryItem {
        id: id.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        last_visit_time: ts(last_visit),
    }
}

pub fn bookmark(id: &str, title: &str, url: &str) -> BookmarkItem {
    BookmarkItem { id: id.to_string(), title: title.to_string(), url: url.to_string(), date_added: None }
}

/// In-memory browser sources with per-source failure switches
#[derive(Default)]
pub struct FakeSources {
    pub tabs: Vec<OpenTab>,
    pub history: Vec<HistoryItem>,
    pub bookmarks: Vec<BookmarkItem>,
    pub active_tab_id: Option<String>,
    pub fail_tabs: bool,
    pub fail_history: bool,
    pub fail_bookmarks: bool,
    history_fetches: AtomicUsize,
}

impl FakeSources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tab(mut self, tab: OpenTab) -> Self {
        self.tabs.push(tab);
        self
    }

    pub fn with_history(mut self, item: HistoryItem) -> Self {
        self.history.push(item);
        self
    }

    pub fn with_bookmark(mut self, item: BookmarkItem) -> Self {
        self.bookmarks.push(item);
        self
    }

    pub fn with_active_tab(mut self, id: &str) -> Self {
        self.active_tab_id = Some(id.to_string());
        self
    }

    /// Number of index builds, counted through history fetches
    pub fn history_fetches(&self) -> usize {
        self.history_fetches.load(Ordering::SeqCst)
    }
}

impl BrowserSources for FakeSources {
    fn open_tabs(&self) -> Result<Vec<OpenTab>> {
        if self.fail_tabs {
            return Err(anyhow!("tabs permission denied"));
        }
        Ok(self.tabs.clone())
    }

    fn history(&self, max_results: usize) -> Result<Vec<HistoryItem>> {
        self.history_fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_history {
            return Err(anyhow!("history permission denied"));
        }
        Ok(self.history.iter().take(max_results).cloned().collect())
    }

    fn bookmarks(&self) -> Result<Vec<BookmarkItem>> {
        if self.fail_bookmarks {
            return Err(anyhow!("bookmarks permission denied"));
        }
        Ok(self.bookmarks.clone())
    }

    fn active_tab_id(&self) -> Option<String> {
        self.active_tab_id.clone()
    }
}

/// Builder for a data directory of browser export files
pub struct DataDirBuilder {
    temp_dir: TempDir,
    tabs: Vec<Value>,
    history: Vec<Value>,
    bookmarks: Vec<Value>,
}

impl DataDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir, tabs: Vec::new(), history: Vec::new(), bookmarks: Vec::new() }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn tab(mut self, id: i64, title: &str, url: &str, last_accessed: i64) -> Self {
        self.tabs.push(json!({
            "id": id,
            "title": title,
            "url": url,
            "lastAccessed": last_accessed,
        }));
        self
    }

    pub fn active_tab(mut self, id: i64, title: &str, url: &str) -> Self {
        self.tabs.push(json!({ "id": id, "title": title, "url": url, "active": true }));
        self
    }

    pub fn history(mut self, id: &str, title: &str, url: &str, last_visit: i64) -> Self {
        self.history.push(json!({
            "id": id,
            "title": title,
            "url": url,
            "lastVisitTime": last_visit,
        }));
        self
    }

    /// Bookmarks are written as one folder so tree flattening is exercised
    pub fn bookmark(mut self, id: &str, title: &str, url: &str) -> Self {
        self.bookmarks.push(json!({ "id": id, "title": title, "url": url }));
        self
    }

    pub fn config(self, content: &str) -> Self {
        fs::write(self.temp_dir.path().join("config.json"), content)
            .expect("Failed to write config.json");
        self
    }

    /// Write the export files and return the directory (consumes self)
    pub fn build(self) -> TempDir {
        let dir = self.temp_dir.path();
        write_json(&dir.join("tabs.json"), &Value::Array(self.tabs));
        write_json(&dir.join("history.json"), &Value::Array(self.history));
        let tree = json!([{
            "id": "0",
            "title": "",
            "children": [{ "id": "1", "title": "Bookmarks Bar", "children": self.bookmarks }],
        }]);
        write_json(&dir.join("bookmarks.json"), &tree);
        self.temp_dir
    }
}

impl Default for DataDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn write_json(path: &Path, value: &Value) {
    let content = serde_json::to_string_pretty(value).expect("Failed to serialize export");
    fs::write(path, content).expect("Failed to write export file");
}

/// A data directory resembling a real browser profile
pub fn realistic_data_dir() -> TempDir {
    DataDirBuilder::new()
        .active_tab(1, "Browser Omnisearch", "https://omnisearch.example/")
        .tab(2, "Google", "https://www.google.com/", 1_700_000_300_000)
        .tab(3, "谷歌翻译", "https://translate.google.com/", 1_700_000_200_000)
        .tab(4, "Rust Documentation", "https://doc.rust-lang.org/", 1_700_000_100_000)
        .history("h1", "GitHub", "https://github.com/", 1_700_000_050_000)
        .history("h2", "Google", "https://www.google.com/", 1_600_000_000_000)
        .history("h3", "中国新闻网", "https://www.chinanews.com/", 1_690_000_000_000)
        .bookmark("b1", "The Rust Standard Library", "https://doc.rust-lang.org/std/")
        .bookmark("b2", "Crates", "https://crates.io/")
        .build()
}
