//! Snapshot blobs for moving a built index across a process boundary
//!
//! A blob is a bincode-encoded envelope `{ version, snapshot }`. Consumers treat it
//! as opaque bytes: decode it with [`decode_snapshot`] and hand the result to
//! `engine::answer`. Blobs may also be written to disk with [`save_snapshot`], which
//! uses a temp file + rename so readers never observe a partial file.

pub mod persistence;

pub use persistence::{
    SNAPSHOT_VERSION, decode_snapshot, encode_snapshot, load_snapshot, save_snapshot,
};
