use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::BookmarkNode;

// Maximum size for an exported source file: 10MB
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Reject files larger than [`MAX_FILE_SIZE_BYTES`]
///
/// Takes the already-open handle so the size check and the read see the same file.
pub fn validate_file_size(file: &File, path: &Path) -> Result<()> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    let file_size = metadata.len();
    if file_size > MAX_FILE_SIZE_BYTES {
        bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            file_size,
            MAX_FILE_SIZE_BYTES
        );
    }

    Ok(())
}

fn read_json_value(path: &Path) -> Result<Value> {
    let file =
        File::open(path).with_context(|| format!("Failed to open export: {}", path.display()))?;
    validate_file_size(&file, path)?;

    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))
}

/// Parse a JSON array export, skipping malformed elements
///
/// Returns an error if the file is not an array or if more than half of the
/// elements fail to deserialize.
pub fn parse_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let value = read_json_value(path)?;
    let Value::Array(elements) = value else {
        bail!("Expected a JSON array in {}", path.display());
    };

    let total = elements.len();
    let mut items = Vec::with_capacity(total);
    let mut skipped_count = 0;

    for (position, element) in elements.into_iter().enumerate() {
        match serde_json::from_value::<T>(element) {
            Ok(item) => items.push(item),
            Err(e) => {
                warn!(path = %path.display(), position, error = %e, "skipping malformed element");
                skipped_count += 1;
            }
        }
    }

    if total > 0 {
        let failure_rate = (skipped_count as f64) / (total as f64);
        if failure_rate > 0.5 {
            bail!(
                "Too many parse failures in {}: {} of {} elements failed ({:.1}%)",
                path.display(),
                skipped_count,
                total,
                failure_rate * 100.0
            );
        }
    }

    debug!(path = %path.display(), parsed = items.len(), skipped = skipped_count, "parsed export");
    Ok(items)
}

/// Parse a bookmark tree export
///
/// The browser returns the tree as an array of root nodes; a single root object
/// is accepted as well.
pub fn parse_bookmark_tree(path: &Path) -> Result<Vec<BookmarkNode>> {
    let value = read_json_value(path)?;
    let roots = match value {
        Value::Array(_) => serde_json::from_value::<Vec<BookmarkNode>>(value),
        Value::Object(_) => serde_json::from_value::<BookmarkNode>(value).map(|root| vec![root]),
        _ => bail!("Expected a bookmark tree object or array in {}", path.display()),
    };

    roots.with_context(|| format!("Failed to parse bookmark tree in {}", path.display()))
}
