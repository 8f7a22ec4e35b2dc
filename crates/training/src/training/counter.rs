//! Pair counting for BPE training.
//!
//! This module counts adjacent token-pair frequencies over the corpus
//! representation and selects the next pair to merge.

use ahash::AHashMap;
use bytemerge_core::{Pair, TokenId};
use std::cmp::{Ordering, Reverse};

/// A merge candidate during BPE training.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeCandidate {
    /// The pair of token IDs to merge
    pub pair: Pair,
    /// The frequency/count of this pair
    pub count: u64,
}

impl MergeCandidate {
    /// Create a new merge candidate.
    pub fn new(pair: Pair, count: u64) -> Self {
        Self { pair, count }
    }
}

// Higher count wins; on equal counts the lexicographically smaller pair wins.
impl Ord for MergeCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.count
            .cmp(&other.count)
            .then_with(|| Reverse(self.pair).cmp(&Reverse(other.pair)))
    }
}

impl PartialOrd for MergeCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Counter for adjacent pair frequencies.
///
/// The table is rebuilt from scratch on every [`count`](Self::count) call;
/// the backing map is kept between calls so its allocation is reused.
#[derive(Debug, Default)]
pub struct PairCounter {
    /// Pair -> frequency count
    pair_counts: AHashMap<Pair, u64>,
}

impl PairCounter {
    /// Create a new pair counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every adjacent pair `(seq[i], seq[i + 1])`.
    ///
    /// Windows overlap, so `[a, a, a]` counts `(a, a)` twice.
    pub fn count(&mut self, sequence: &[TokenId]) {
        self.pair_counts.clear();

        for window in sequence.windows(2) {
            *self.pair_counts.entry((window[0], window[1])).or_insert(0) += 1;
        }
    }

    /// Select the most frequent pair.
    ///
    /// Ties go to the lexicographically smallest `(left, right)`. Returns
    /// `None` when no pair occurs more than once.
    pub fn best_pair(&self) -> Option<MergeCandidate> {
        self.pair_counts
            .iter()
            .map(|(&pair, &count)| MergeCandidate::new(pair, count))
            .max()
            .filter(|candidate| candidate.count > 1)
    }

    /// Get the count for a pair (zero if never seen).
    #[inline]
    pub fn get(&self, pair: Pair) -> u64 {
        self.pair_counts.get(&pair).copied().unwrap_or(0)
    }

    /// Number of distinct pairs in the current table.
    #[inline]
    pub fn len(&self) -> usize {
        self.pair_counts.len()
    }

    /// Check if the current table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pair_counts.is_empty()
    }
}

/// Count adjacent pairs of `sequence` into a fresh table.
pub fn count_pairs(sequence: &[TokenId]) -> PairCounter {
    let mut counter = PairCounter::new();
    counter.count(sequence);
    counter
}
