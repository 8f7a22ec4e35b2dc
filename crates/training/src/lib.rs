//! Bytemerge-training - BPE training infrastructure
//!
//! This crate learns byte-level BPE merge rules from a corpus held in memory.
//!
//! # Features
//!
//! - Full pair-frequency recount per iteration with a deterministic tie-break
//! - An explicit, steppable trainer state machine
//! - Integration with bytemerge-core for the vocabulary and rewriting
//!
//! # Example
//!
//! ```rust
//! use bytemerge_training::{BpeTrainer, StopReason, TrainingConfig};
//!
//! let trainer = BpeTrainer::new(TrainingConfig {
//!     vocab_size: 258,
//!     ..Default::default()
//! });
//! let output = trainer.train(b"aabaab")?;
//!
//! assert_eq!(output.vocabulary.len(), 258);
//! assert_eq!(output.stop_reason, StopReason::TargetVocabReached);
//! # Ok::<(), bytemerge_training::TokenizerError>(())
//! ```

pub use bytemerge_core::{Result, TokenizerError};

// Training infrastructure
pub mod training;
pub use training::{
    count_pairs, BpeTrainer, MergeCandidate, PairCounter, StopReason, TrainingConfig,
    TrainingOutput, TrainingRun, TrainingState, DEFAULT_VOCAB_SIZE,
};
