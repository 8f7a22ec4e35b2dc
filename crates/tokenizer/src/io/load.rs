//! Load functionality for trained vocabularies.
//!
//! Every loader ends in [`Vocabulary::from_pairs`], so both formats get the
//! same acyclicity and size checks. Any structural problem is reported as
//! `CorruptVocabulary`; a bad file must never decode to wrong bytes.

use super::format::{
    ModelFormat, SerializedVocabulary, FORMAT_VERSION, HEADER_LEN, MAGIC, RECORD_LEN,
};
use bytemerge_core::{Result, TokenizerError, Vocabulary};
use log::info;
use std::path::Path;

/// Vocabulary loader - handles reading trained models.
pub struct TokenizerLoader;

impl TokenizerLoader {
    /// Load a vocabulary, choosing the format from the file extension.
    pub fn load(path: &Path) -> Result<Vocabulary> {
        Self::load_as(path, ModelFormat::from_path(path))
    }

    /// Load a vocabulary in the given format.
    pub fn load_as(path: &Path, format: ModelFormat) -> Result<Vocabulary> {
        let bytes = std::fs::read(path).map_err(|e| TokenizerError::io(path, e))?;

        let vocab = match format {
            ModelFormat::Binary => Self::from_bytes(&bytes)?,
            ModelFormat::Json => Self::from_json(&bytes)?,
        };

        info!(
            "loaded {} merges (target size {}) from {}",
            vocab.num_merges(),
            vocab.max_size(),
            path.display()
        );
        Ok(vocab)
    }

    /// Decode the binary record list.
    pub fn from_bytes(bytes: &[u8]) -> Result<Vocabulary> {
        if bytes.len() < HEADER_LEN {
            return Err(corrupt(format!(
                "file is {} bytes, shorter than the {}-byte header",
                bytes.len(),
                HEADER_LEN
            )));
        }
        if bytes[0..4] != MAGIC {
            return Err(corrupt("bad magic bytes".to_string()));
        }

        let version = read_u32(bytes, 4);
        if version != FORMAT_VERSION {
            return Err(corrupt(format!("unsupported format version {}", version)));
        }

        let count = read_u32(bytes, 8) as usize;
        let max_size = read_u32(bytes, 12) as usize;

        let expected = count
            .checked_mul(RECORD_LEN)
            .and_then(|n| n.checked_add(HEADER_LEN));
        if expected != Some(bytes.len()) {
            return Err(corrupt(format!(
                "header declares {} records but file holds {} bytes of records",
                count,
                bytes.len() - HEADER_LEN
            )));
        }

        let pairs = bytes[HEADER_LEN..]
            .chunks_exact(RECORD_LEN)
            .map(|record| (read_u32(record, 0), read_u32(record, 4)));

        Vocabulary::from_pairs(pairs, max_size)
    }

    /// Decode the JSON document.
    pub fn from_json(bytes: &[u8]) -> Result<Vocabulary> {
        let data: SerializedVocabulary = serde_json::from_slice(bytes)?;
        Self::deserialize(data)
    }

    /// Rebuild from a deserialized structure.
    fn deserialize(data: SerializedVocabulary) -> Result<Vocabulary> {
        if data.version != FORMAT_VERSION {
            return Err(corrupt(format!(
                "unsupported format version {}",
                data.version
            )));
        }

        if data.vocab_size > u32::MAX as usize {
            return Err(corrupt(format!(
                "vocabulary size {} does not fit in 32 bits",
                data.vocab_size
            )));
        }

        let pairs = data.merges.into_iter().map(|[left, right]| (left, right));
        Vocabulary::from_pairs(pairs, data.vocab_size)
    }
}

fn corrupt(message: String) -> TokenizerError {
    TokenizerError::CorruptVocabulary(message)
}

// Callers check lengths first.
fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_le_bytes(word)
}
