use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DATA_DIR_ENV: &str = "OMNISEARCH_DATA_DIR";
const APP_DIR_NAME: &str = "browser-omnisearch";

/// Directory holding the browser exports and `config.json`
///
/// `OMNISEARCH_DATA_DIR` wins when set and non-empty; otherwise the platform data
/// directory is used.
pub fn get_data_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    let base = dirs::data_dir().context("Could not determine the platform data directory")?;
    Ok(base.join(APP_DIR_NAME))
}
