//! Training infrastructure for BPE tokenizers.
//!
//! This module provides the pair counter and the trainer state machine that
//! learn byte-level merge rules from a corpus.

pub mod counter;
pub mod trainer;

pub use counter::{count_pairs, MergeCandidate, PairCounter};
pub use trainer::{
    BpeTrainer, StopReason, TrainingConfig, TrainingOutput, TrainingRun, TrainingState,
    DEFAULT_VOCAB_SIZE,
};
