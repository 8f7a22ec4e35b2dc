//! Bytemerge-core - Core BPE algorithm implementation
//!
//! This crate provides the fundamental data structures and algorithms for
//! byte-level byte-pair encoding (BPE).
//!
//! # Features
//!
//! - A vocabulary of 256 fixed byte tokens plus an ordered list of merge rules
//! - A single rewriting routine shared by training and encoding
//! - Exact inverse decoding of any token sequence
//!
//! # Example
//!
//! ```rust
//! use bytemerge_core::{ByteLevelEncoder, Vocabulary};
//!
//! let mut vocab = Vocabulary::new(258);
//! let aa = vocab.add_merge(b'a' as u32, b'a' as u32)?;
//! vocab.add_merge(aa, b'b' as u32)?;
//!
//! let encoder = ByteLevelEncoder::new(vocab);
//! let ids = encoder.encode(b"aabaab");
//! assert_eq!(ids, vec![257, 257]);
//! assert_eq!(encoder.decode(&ids)?, b"aabaab".to_vec());
//! # Ok::<(), bytemerge_core::TokenizerError>(())
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

// Core BPE algorithm modules
pub mod core;
pub use self::core::{
    Expansion, MergeRule, Pair, SequenceRewriter, TokenId, Vocabulary, BASE_VOCAB_SIZE,
};

// Encoding
pub mod encoding;
pub use encoding::ByteLevelEncoder;
