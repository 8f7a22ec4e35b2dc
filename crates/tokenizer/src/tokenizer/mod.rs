//! Main tokenizer implementation.
//!
//! This module provides the high-level `Tokenizer` struct that ties the
//! vocabulary, the trainer and the byte-level encoder together.

use crate::io::{ModelFormat, TokenizerLoader, TokenizerSaver};
use bytemerge_core::{ByteLevelEncoder, Result, TokenId, Vocabulary};
use bytemerge_training::{BpeTrainer, TrainingConfig, TrainingOutput};
use std::path::Path;
use std::sync::Arc;

/// Builder for creating a tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    config: TrainingConfig,
}

impl TokenizerBuilder {
    /// Create a new tokenizer builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target vocabulary size.
    pub fn vocab_size(mut self, size: usize) -> Self {
        self.config.vocab_size = size;
        self
    }

    /// Set how often (in merges) training logs progress.
    pub fn log_interval(mut self, interval: usize) -> Self {
        self.config.log_interval = interval;
        self
    }

    /// Build the tokenizer.
    ///
    /// Fails with `InvalidConfig` if the target size leaves no room for merges.
    pub fn build(self) -> Result<Tokenizer> {
        self.config.validate()?;
        Ok(Tokenizer::from_parts(
            Vocabulary::new(self.config.vocab_size),
            self.config,
        ))
    }
}

/// Main tokenizer struct.
///
/// Holds a frozen vocabulary shared with its encoder. Training replaces the
/// vocabulary wholesale; it is never mutated in place.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// Vocabulary (shared with the encoder)
    vocab: Arc<Vocabulary>,
    /// Byte-level encoder
    encoder: ByteLevelEncoder,
    /// Training configuration
    config: TrainingConfig,
}

impl Tokenizer {
    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    /// Wrap an existing vocabulary.
    pub fn from_vocab(vocab: Vocabulary) -> Self {
        let config = TrainingConfig {
            vocab_size: vocab.max_size(),
            ..Default::default()
        };
        Self::from_parts(vocab, config)
    }

    fn from_parts(vocab: Vocabulary, config: TrainingConfig) -> Self {
        let vocab = Arc::new(vocab);
        Self {
            encoder: ByteLevelEncoder::with_arc(Arc::clone(&vocab)),
            vocab,
            config,
        }
    }

    /// Train a fresh vocabulary on `data`, replacing the current one.
    pub fn train(&mut self, data: &[u8]) -> Result<TrainingOutput> {
        let output = BpeTrainer::new(self.config.clone()).train(data)?;
        *self = Self::from_parts(output.vocabulary.clone(), self.config.clone());
        Ok(output)
    }

    /// Encode raw bytes to token IDs.
    pub fn encode(&self, bytes: &[u8]) -> Encoding {
        Encoding {
            ids: self.encoder.encode(bytes),
        }
    }

    /// Encode UTF-8 text to token IDs.
    pub fn encode_str(&self, text: &str) -> Encoding {
        self.encode(text.as_bytes())
    }

    /// Decode token IDs back to raw bytes.
    ///
    /// Fails with `CorruptVocabulary` if any ID is not in the vocabulary.
    pub fn decode(&self, ids: &[TokenId]) -> Result<Vec<u8>> {
        self.encoder.decode(ids)
    }

    /// Decode token IDs and interpret the bytes as UTF-8.
    pub fn decode_to_string(&self, ids: &[TokenId]) -> Result<String> {
        Ok(String::from_utf8(self.decode(ids)?)?)
    }

    /// Get the vocabulary size.
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Get a reference to the vocabulary.
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Save the vocabulary; the format follows the file extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        TokenizerSaver::new(&self.vocab).save(path)
    }

    /// Save the vocabulary in an explicit format.
    pub fn save_as(&self, path: &Path, format: ModelFormat) -> Result<()> {
        TokenizerSaver::new(&self.vocab).save_as(path, format)
    }

    /// Load a tokenizer from a vocabulary file.
    pub fn load(path: &Path) -> Result<Self> {
        TokenizerLoader::load(path).map(Self::from_vocab)
    }
}

/// Result of encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    /// Token IDs
    pub ids: Vec<TokenId>,
}

impl Encoding {
    /// Get the number of tokens.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if the encoding is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
