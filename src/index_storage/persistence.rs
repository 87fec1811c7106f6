//! Snapshot encoding and atomic file writes

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use bincode::config;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::indexer::IndexSnapshot;

/// Blob format version; bump when the snapshot layout changes
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    snapshot: &'a IndexSnapshot,
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    snapshot: IndexSnapshot,
}

#[derive(Deserialize)]
struct VersionHeader {
    version: u32,
}

/// Encode a snapshot into an opaque blob
pub fn encode_snapshot(snapshot: &IndexSnapshot) -> Result<Vec<u8>, SearchError> {
    let envelope = EnvelopeRef { version: SNAPSHOT_VERSION, snapshot };
    bincode::serde::encode_to_vec(&envelope, config::standard()).map_err(encode_failure)
}

// An encode failure says nothing about the snapshot held in the cache
fn encode_failure(e: bincode::error::EncodeError) -> SearchError {
    SearchError::SnapshotEncode(e.to_string())
}

/// Decode a blob produced by [`encode_snapshot`]
///
/// Truncated or foreign bytes and blobs from another format version are all
/// reported as [`SearchError::CacheCorruption`].
pub fn decode_snapshot(bytes: &[u8]) -> Result<IndexSnapshot, SearchError> {
    // The version leads the envelope, so it can be checked before the body
    let (header, _): (VersionHeader, usize) =
        bincode::serde::decode_from_slice(bytes, config::standard())
            .map_err(|e| SearchError::CacheCorruption(format!("unreadable header: {}", e)))?;
    if header.version != SNAPSHOT_VERSION {
        return Err(SearchError::CacheCorruption(format!(
            "snapshot version mismatch (expected {}, found {})",
            SNAPSHOT_VERSION, header.version
        )));
    }

    let (envelope, read): (Envelope, usize) =
        bincode::serde::decode_from_slice(bytes, config::standard())
            .map_err(|e| SearchError::CacheCorruption(e.to_string()))?;
    if read != bytes.len() {
        return Err(SearchError::CacheCorruption(format!(
            "{} trailing bytes after snapshot",
            bytes.len() - read
        )));
    }

    Ok(envelope.snapshot)
}

/// Write a snapshot blob atomically (temp file + rename)
pub fn save_snapshot(path: &Path, snapshot: &IndexSnapshot) -> Result<()> {
    let bytes = encode_snapshot(snapshot)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);

    fs::write(temp_path, bytes).context("Failed to write snapshot temp file")?;
    fs::rename(temp_path, path).context("Failed to rename snapshot temp file")?;

    Ok(())
}

/// Read a snapshot blob written by [`save_snapshot`]
pub fn load_snapshot(path: &Path) -> Result<IndexSnapshot> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read snapshot file {}", path.display()))?;
    let snapshot = decode_snapshot(&bytes)
        .with_context(|| format!("Failed to load snapshot from {}", path.display()))?;
    Ok(snapshot)
}
