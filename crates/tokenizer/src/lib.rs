//! Bytemerge - byte-level BPE tokenizer
//!
//! This crate provides the user-facing API: train a vocabulary on raw bytes,
//! encode and decode with it, and persist it to disk.
//!
//! # Features
//!
//! - Simple builder pattern for tokenizer configuration
//! - Exact round trip: `decode(encode(bytes)) == bytes` for any input
//! - Binary and JSON vocabulary formats with validation on load
//!
//! # Example
//!
//! ```rust
//! use bytemerge::Tokenizer;
//!
//! let mut tokenizer = Tokenizer::builder().vocab_size(258).build()?;
//! tokenizer.train(b"aabaab")?;
//!
//! let encoding = tokenizer.encode(b"aabaab");
//! assert_eq!(encoding.ids, vec![257, 257]);
//! assert_eq!(tokenizer.decode(&encoding.ids)?, b"aabaab".to_vec());
//! # Ok::<(), bytemerge::TokenizerError>(())
//! ```

// Re-export core types
pub use bytemerge_core::{Result, TokenId, TokenizerError, Vocabulary, BASE_VOCAB_SIZE};
pub use bytemerge_training::{StopReason, TrainingConfig, TrainingOutput, DEFAULT_VOCAB_SIZE};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{Encoding, Tokenizer, TokenizerBuilder};

// IO/Serialization
pub mod io;
pub use io::{ModelFormat, TokenizerLoader, TokenizerSaver};
