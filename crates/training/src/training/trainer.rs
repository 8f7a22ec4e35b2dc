//! BPE trainer implementation.
//!
//! Training is a small state machine:
//!
//! ```text
//! Idle -> Counting -> Selecting -> Merging -> Counting -> ... -> Done
//! ```
//!
//! Every accepted iteration appends exactly one merge rule and rewrites the
//! whole corpus representation with it. The loop stops when the vocabulary
//! reaches its target size or when no adjacent pair occurs more than once.

use super::counter::{MergeCandidate, PairCounter};
use bytemerge_core::{
    MergeRule, Result, SequenceRewriter, TokenId, TokenizerError, Vocabulary, BASE_VOCAB_SIZE,
};
use log::{debug, info, warn};

/// Default target vocabulary size (GPT-2's).
pub const DEFAULT_VOCAB_SIZE: usize = 50_257;

/// Configuration for BPE training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingConfig {
    /// Target vocabulary size, including the 256 base byte tokens
    pub vocab_size: usize,
    /// Log a progress line every N merges (0 disables)
    pub log_interval: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            vocab_size: DEFAULT_VOCAB_SIZE,
            log_interval: 1000,
        }
    }
}

impl TrainingConfig {
    /// Reject target sizes that leave no room for a single merge.
    pub fn validate(&self) -> Result<()> {
        if self.vocab_size <= BASE_VOCAB_SIZE {
            return Err(TokenizerError::InvalidConfig(format!(
                "vocabulary size must be greater than {} (got {})",
                BASE_VOCAB_SIZE, self.vocab_size
            )));
        }
        if self.vocab_size > TokenId::MAX as usize {
            return Err(TokenizerError::InvalidConfig(format!(
                "vocabulary size {} does not fit in a 32-bit token id",
                self.vocab_size
            )));
        }
        Ok(())
    }
}

/// Why training stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The vocabulary reached its configured target size
    TargetVocabReached,
    /// No adjacent pair occurs more than once in the corpus representation
    NoRepeatedPair,
}

/// Trainer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingState {
    /// Not started yet
    Idle,
    /// Next step recounts pair frequencies
    Counting,
    /// Next step picks the best pair from the fresh counts
    Selecting,
    /// Next step adds this candidate as a merge and rewrites the corpus
    Merging(MergeCandidate),
    /// Terminal
    Done(StopReason),
}

/// Result of a finished training run.
#[derive(Debug, Clone)]
pub struct TrainingOutput {
    /// The frozen vocabulary
    pub vocabulary: Vocabulary,
    /// Why the loop stopped
    pub stop_reason: StopReason,
    /// Number of accepted merge iterations
    pub iterations: usize,
    /// Length of the corpus representation when training stopped
    pub corpus_len: usize,
}

/// BPE trainer.
///
/// Trains a byte-level vocabulary by iteratively merging the most frequent
/// adjacent pair of tokens.
#[derive(Debug, Clone, Default)]
pub struct BpeTrainer {
    config: TrainingConfig,
}

impl BpeTrainer {
    /// Create a new BPE trainer with the given configuration.
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Create a new BPE trainer with default configuration.
    pub fn with_vocab_size(vocab_size: usize) -> Self {
        Self::new(TrainingConfig {
            vocab_size,
            ..Default::default()
        })
    }

    /// Get the trainer configuration.
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Start a run over `corpus` without advancing it.
    pub fn start(&self, corpus: &[u8]) -> TrainingRun {
        TrainingRun::new(corpus, &self.config)
    }

    /// Train on the given bytes until the run is done.
    ///
    /// An empty corpus, or a target size of 256 or less, yields the base
    /// vocabulary with zero merges.
    pub fn train(&self, corpus: &[u8]) -> Result<TrainingOutput> {
        info!(
            "training on {} bytes, target vocabulary size {}",
            corpus.len(),
            self.config.vocab_size
        );

        let mut run = self.start(corpus);
        while !run.is_done() {
            run.step()?;
        }

        let output = run.finish();
        info!(
            "training stopped ({:?}) after {} merges; vocab size {}, corpus {} tokens",
            output.stop_reason,
            output.iterations,
            output.vocabulary.len(),
            output.corpus_len
        );
        Ok(output)
    }
}

/// A single training run, advanced one state transition at a time.
///
/// The corpus representation and pair table are owned exclusively by the
/// run and dropped with it.
#[derive(Debug)]
pub struct TrainingRun {
    vocab: Vocabulary,
    corpus: Vec<TokenId>,
    counter: PairCounter,
    rewriter: SequenceRewriter,
    state: TrainingState,
    log_interval: usize,
}

impl TrainingRun {
    fn new(corpus: &[u8], config: &TrainingConfig) -> Self {
        let corpus: Vec<TokenId> = corpus.iter().map(|&b| TokenId::from(b)).collect();

        Self {
            vocab: Vocabulary::new(config.vocab_size),
            rewriter: SequenceRewriter::with_capacity(corpus.len()),
            corpus,
            counter: PairCounter::new(),
            state: TrainingState::Idle,
            log_interval: config.log_interval,
        }
    }

    /// Current state.
    pub fn state(&self) -> TrainingState {
        self.state
    }

    /// Whether the run reached `Done`.
    pub fn is_done(&self) -> bool {
        matches!(self.state, TrainingState::Done(_))
    }

    /// Vocabulary learned so far.
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Current corpus representation.
    pub fn corpus(&self) -> &[TokenId] {
        &self.corpus
    }

    /// Perform one state transition and return the new state.
    ///
    /// Stepping a finished run is a no-op.
    pub fn step(&mut self) -> Result<TrainingState> {
        let state = self.state;
        self.state = match state {
            TrainingState::Idle => {
                if self.vocab.is_full() {
                    warn!(
                        "target vocabulary size {} leaves no room for merges",
                        self.vocab.max_size()
                    );
                    TrainingState::Done(StopReason::TargetVocabReached)
                } else {
                    TrainingState::Counting
                }
            }
            TrainingState::Counting => {
                self.counter.count(&self.corpus);
                TrainingState::Selecting
            }
            TrainingState::Selecting => match self.counter.best_pair() {
                Some(candidate) => TrainingState::Merging(candidate),
                None => TrainingState::Done(StopReason::NoRepeatedPair),
            },
            TrainingState::Merging(candidate) => self.merge(candidate)?,
            done @ TrainingState::Done(_) => done,
        };

        Ok(self.state)
    }

    fn merge(&mut self, candidate: MergeCandidate) -> Result<TrainingState> {
        let (left, right) = candidate.pair;
        let new_id = match self.vocab.add_merge(left, right) {
            Ok(id) => id,
            Err(TokenizerError::VocabularyFull { .. }) => {
                return Ok(TrainingState::Done(StopReason::TargetVocabReached))
            }
            Err(err) => return Err(err),
        };

        let rule = MergeRule::new(left, right, new_id);
        let replaced = self.rewriter.rewrite(&mut self.corpus, &rule);

        let merges = self.vocab.num_merges();
        if self.log_interval > 0 && merges % self.log_interval == 0 {
            debug!(
                "merge {:>6}: ({}, {}) -> {} freq {} replaced {} corpus {}",
                merges,
                left,
                right,
                new_id,
                candidate.count,
                replaced,
                self.corpus.len()
            );
        }

        if self.vocab.is_full() {
            Ok(TrainingState::Done(StopReason::TargetVocabReached))
        } else {
            Ok(TrainingState::Counting)
        }
    }

    /// Freeze the vocabulary and drop the corpus representation.
    pub fn finish(self) -> TrainingOutput {
        let stop_reason = match self.state {
            TrainingState::Done(reason) => reason,
            _ if self.vocab.is_full() => StopReason::TargetVocabReached,
            _ => StopReason::NoRepeatedPair,
        };

        TrainingOutput {
            iterations: self.vocab.num_merges(),
            corpus_len: self.corpus.len(),
            vocabulary: self.vocab,
            stop_reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytemerge_core::ByteLevelEncoder;
    use proptest::prelude::*;

    #[test]
    fn test_aabaab_scenario() {
        let output = BpeTrainer::with_vocab_size(258).train(b"aabaab").unwrap();
        let rules = output.vocabulary.rules();

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0], MergeRule::new(97, 97, 256));
        assert_eq!(rules[1], MergeRule::new(256, 98, 257));
        assert_eq!(output.corpus_len, 2);

        let encoder = ByteLevelEncoder::new(output.vocabulary);
        assert_eq!(encoder.encode(b"aabaab"), vec![257, 257]);
        assert_eq!(encoder.decode(&[257, 257]).unwrap(), b"aabaab".to_vec());
    }

    #[test]
    fn test_aabaab_stops_without_repeated_pair() {
        // Room for more merges, but (257, 257) only occurs once.
        let output = BpeTrainer::with_vocab_size(1000).train(b"aabaab").unwrap();
        assert_eq!(output.vocabulary.num_merges(), 2);
        assert_eq!(output.stop_reason, StopReason::NoRepeatedPair);
    }

    #[test]
    fn test_stops_at_target_size() {
        let output = BpeTrainer::with_vocab_size(257).train(b"aabaab").unwrap();
        assert_eq!(output.vocabulary.len(), 257);
        assert_eq!(output.iterations, 1);
        assert_eq!(output.stop_reason, StopReason::TargetVocabReached);
    }

    #[test]
    fn test_base_target_size_yields_no_merges() {
        let output = BpeTrainer::with_vocab_size(256).train(b"aaaaaaaa").unwrap();
        assert_eq!(output.vocabulary.num_merges(), 0);
        assert_eq!(output.stop_reason, StopReason::TargetVocabReached);

        let output = BpeTrainer::with_vocab_size(10).train(b"aaaaaaaa").unwrap();
        assert_eq!(output.vocabulary.num_merges(), 0);
    }

    #[test]
    fn test_empty_corpus_yields_no_merges() {
        let output = BpeTrainer::with_vocab_size(300).train(b"").unwrap();
        assert_eq!(output.vocabulary.len(), 256);
        assert_eq!(output.stop_reason, StopReason::NoRepeatedPair);
        assert_eq!(output.corpus_len, 0);
    }

    #[test]
    fn test_state_transitions() {
        let trainer = BpeTrainer::with_vocab_size(258);
        let mut run = trainer.start(b"aabaab");
        assert_eq!(run.state(), TrainingState::Idle);

        assert_eq!(run.step().unwrap(), TrainingState::Counting);
        assert_eq!(run.step().unwrap(), TrainingState::Selecting);
        assert_eq!(
            run.step().unwrap(),
            TrainingState::Merging(MergeCandidate::new((97, 97), 2))
        );
        assert_eq!(run.step().unwrap(), TrainingState::Counting);
        assert_eq!(run.corpus(), &[256, 98, 256, 98]);

        assert_eq!(run.step().unwrap(), TrainingState::Selecting);
        assert_eq!(
            run.step().unwrap(),
            TrainingState::Merging(MergeCandidate::new((256, 98), 2))
        );
        assert_eq!(
            run.step().unwrap(),
            TrainingState::Done(StopReason::TargetVocabReached)
        );
        assert!(run.is_done());
        assert_eq!(
            run.step().unwrap(),
            TrainingState::Done(StopReason::TargetVocabReached)
        );
        assert_eq!(run.vocab().len(), 258);
    }

    #[test]
    fn test_training_is_deterministic() {
        let corpus = b"the cat sat on the mat; the cat ate the rat".repeat(4);
        let first = BpeTrainer::with_vocab_size(300).train(&corpus).unwrap();
        let second = BpeTrainer::with_vocab_size(300).train(&corpus).unwrap();
        assert_eq!(first.vocabulary, second.vocabulary);
    }

    #[test]
    fn test_validate() {
        assert!(TrainingConfig::default().validate().is_ok());

        let config = TrainingConfig {
            vocab_size: 256,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TokenizerError::InvalidConfig(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_trained_vocab_invariants(
            corpus in proptest::collection::vec(0u8..4, 0..200),
            target in 256usize..300,
        ) {
            let output = BpeTrainer::with_vocab_size(target).train(&corpus).unwrap();
            let vocab = &output.vocabulary;

            prop_assert_eq!(vocab.len(), 256 + output.iterations);
            prop_assert!(output.iterations <= target.saturating_sub(256));
            for (index, rule) in vocab.rules().iter().enumerate() {
                prop_assert_eq!(rule.new_id as usize, 256 + index);
                prop_assert!(rule.is_acyclic());
            }
        }

        #[test]
        fn prop_roundtrip_after_training(
            corpus in proptest::collection::vec(0u8..6, 0..200),
            input in proptest::collection::vec(any::<u8>(), 0..100),
        ) {
            let output = BpeTrainer::with_vocab_size(320).train(&corpus).unwrap();
            let encoder = ByteLevelEncoder::new(output.vocabulary);

            let ids = encoder.encode(&corpus);
            prop_assert_eq!(ids.len(), output.corpus_len);
            prop_assert_eq!(encoder.decode(&ids).unwrap(), corpus);
            prop_assert_eq!(encoder.decode(&encoder.encode(&input)).unwrap(), input);
        }
    }
}
