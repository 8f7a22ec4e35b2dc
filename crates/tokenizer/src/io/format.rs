//! Format definitions for vocabulary serialization.
//!
//! Binary layout (all integers little-endian `u32`):
//!
//! ```text
//! magic "BPEV" | version | record count | target vocab size | (left, right) * count
//! ```
//!
//! The new ID of record `i` is implicit: `256 + i`.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Magic bytes at the start of a binary vocabulary file.
pub const MAGIC: [u8; 4] = *b"BPEV";

/// Current format version (binary and JSON).
pub const FORMAT_VERSION: u32 = 1;

/// Size of the binary header in bytes.
pub const HEADER_LEN: usize = 16;

/// Size of one binary merge record in bytes.
pub const RECORD_LEN: usize = 8;

/// Model format types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    /// Compact binary record list
    Binary,
    /// JSON document (`.json` files)
    Json,
}

impl ModelFormat {
    /// Pick the format from a file extension; anything but `.json` is binary.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Binary,
        }
    }
}

/// Complete vocabulary serialization format (JSON).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedVocabulary {
    /// Format version
    pub version: u32,
    /// Configured target vocabulary size
    pub vocab_size: usize,
    /// Merge pairs in creation order
    pub merges: Vec<[u32; 2]>,
}
