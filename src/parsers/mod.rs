//! Readers for browser data exported as JSON
//!
//! # Error Handling Strategy
//!
//! - **Individual element failures**: Malformed array elements are logged and skipped,
//!   so one bad history row does not hide the rest of the export.
//!
//! - **Catastrophic failure detection**: If more than half of the elements fail to
//!   deserialize, the whole file is rejected as corrupted.
//!
//! - **Error propagation**: Uses `anyhow::Result` with file context. Callers in the
//!   sources layer turn these into per-source fetch failures.

pub mod deserializers;
pub mod exports;

pub use exports::{parse_bookmark_tree, parse_json_array, validate_file_size};
