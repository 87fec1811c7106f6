//! Raw items as delivered by the browser's tab, history, and bookmark APIs.
//!
//! Field names follow the browser's camelCase JSON so exported data can be
//! read without translation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::parsers::deserializers::{deserialize_id, deserialize_optional_timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenTab {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub last_accessed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fav_icon_url: Option<String>,
    #[serde(default)]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub last_visit_time: Option<DateTime<Utc>>,
}

/// A bookmark that carries a URL, already lifted out of the bookmark tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkItem {
    pub id: String,
    pub title: String,
    pub url: String,
    pub date_added: Option<DateTime<Utc>>,
}

/// A node of the bookmark tree; folders have children and no URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkNode {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub date_added: Option<DateTime<Utc>>,
    #[serde(default)]
    pub children: Vec<BookmarkNode>,
}
