//! Save functionality for trained vocabularies.

use super::format::{
    ModelFormat, SerializedVocabulary, FORMAT_VERSION, HEADER_LEN, MAGIC, RECORD_LEN,
};
use bytemerge_core::{Result, TokenizerError, Vocabulary};
use log::info;
use std::path::Path;

/// Vocabulary saver - handles writing trained models.
pub struct TokenizerSaver<'a> {
    /// Vocabulary reference
    vocab: &'a Vocabulary,
}

impl<'a> TokenizerSaver<'a> {
    /// Create a new saver.
    pub fn new(vocab: &'a Vocabulary) -> Self {
        Self { vocab }
    }

    /// Save to `path`, choosing the format from its extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.save_as(path, ModelFormat::from_path(path))
    }

    /// Save to `path` in the given format.
    pub fn save_as(&self, path: &Path, format: ModelFormat) -> Result<()> {
        let bytes = match format {
            ModelFormat::Binary => self.to_bytes()?,
            ModelFormat::Json => serde_json::to_vec_pretty(&self.serialize())?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TokenizerError::io(parent, e))?;
        }
        std::fs::write(path, bytes).map_err(|e| TokenizerError::io(path, e))?;

        info!(
            "saved {} merges ({:?}) to {}",
            self.vocab.num_merges(),
            format,
            path.display()
        );
        Ok(())
    }

    /// Encode the binary record list.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(HEADER_LEN + RECORD_LEN * self.vocab.num_merges());

        buf.extend_from_slice(&MAGIC);
        buf.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        buf.extend_from_slice(&u32_field(self.vocab.num_merges(), "record count")?.to_le_bytes());
        buf.extend_from_slice(&u32_field(self.vocab.max_size(), "vocabulary size")?.to_le_bytes());

        for rule in self.vocab.rules() {
            buf.extend_from_slice(&rule.left.to_le_bytes());
            buf.extend_from_slice(&rule.right.to_le_bytes());
        }

        Ok(buf)
    }

    /// Serialize the vocabulary to its JSON structure.
    pub fn serialize(&self) -> SerializedVocabulary {
        SerializedVocabulary {
            version: FORMAT_VERSION,
            vocab_size: self.vocab.max_size(),
            merges: self
                .vocab
                .rules()
                .iter()
                .map(|rule| [rule.left, rule.right])
                .collect(),
        }
    }
}

fn u32_field(value: usize, what: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        TokenizerError::InvalidConfig(format!("{} {} does not fit in 32 bits", what, value))
    })
}
