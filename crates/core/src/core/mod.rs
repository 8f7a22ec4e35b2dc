//! Core BPE algorithm implementation.
//!
//! This module contains the fundamental data structures for byte-pair
//! encoding: the vocabulary, merge rules and the shared sequence rewriter.

pub mod merges;
pub mod rewrite;
pub mod vocab;

pub use merges::{MergeRule, Pair, TokenId, BASE_VOCAB_SIZE};
pub use rewrite::SequenceRewriter;
pub use vocab::{Expansion, Vocabulary};
