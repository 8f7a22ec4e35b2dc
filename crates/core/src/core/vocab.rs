//! Vocabulary storage and lookup.
//!
//! The vocabulary is the single source of truth for what a token ID means:
//! IDs `0..256` are raw bytes, every higher ID is a merge rule stored at
//! index `id - 256` of an ordered list.

use crate::core::merges::{MergeRule, Pair, TokenId, BASE_VOCAB_SIZE};
use crate::error::{Result, TokenizerError};

/// What a single token ID stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    /// A base token: the byte value itself
    Byte(u8),
    /// A merge token: its left and right children
    Pair(TokenId, TokenId),
}

/// Base byte tokens plus learned merge rules, bounded by a target size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    /// Merge rules in creation order; rule `i` creates token `256 + i`
    merges: Vec<MergeRule>,
    /// Configured target vocabulary size
    max_size: usize,
}

impl Vocabulary {
    /// Create a vocabulary holding only the 256 base byte tokens.
    pub fn new(max_size: usize) -> Self {
        Self {
            merges: Vec::new(),
            max_size,
        }
    }

    /// Rebuild a vocabulary from persisted pairs in creation order.
    ///
    /// The new ID of pair `i` is `256 + i`. Any pair referencing a token that
    /// is not older than its own, or more pairs than `max_size` leaves room
    /// for, is reported as [`TokenizerError::CorruptVocabulary`].
    pub fn from_pairs(pairs: impl IntoIterator<Item = Pair>, max_size: usize) -> Result<Self> {
        let pairs = pairs.into_iter();
        let mut vocab = Self::new(max_size);
        vocab.merges.reserve(pairs.size_hint().0);

        for (index, (left, right)) in pairs.enumerate() {
            let new_id = (BASE_VOCAB_SIZE + index) as TokenId;
            let rule = MergeRule::new(left, right, new_id);

            if !rule.is_acyclic() {
                return Err(TokenizerError::CorruptVocabulary(format!(
                    "record {} ({}, {}) references a token not older than {}",
                    index, left, right, new_id
                )));
            }
            if vocab.is_full() {
                return Err(TokenizerError::CorruptVocabulary(format!(
                    "more merge records than target size {} allows",
                    max_size
                )));
            }

            vocab.merges.push(rule);
        }

        Ok(vocab)
    }

    /// Append a merge rule and return the ID of the new token.
    ///
    /// Fails with [`TokenizerError::VocabularyFull`] once the target size is
    /// reached, and with [`TokenizerError::InvalidMerge`] if either child does
    /// not exist yet.
    pub fn add_merge(&mut self, left: TokenId, right: TokenId) -> Result<TokenId> {
        if self.is_full() {
            return Err(TokenizerError::VocabularyFull {
                max: self.max_size,
            });
        }

        let new_id = self.len() as TokenId;
        let rule = MergeRule::new(left, right, new_id);
        if !rule.is_acyclic() {
            return Err(TokenizerError::InvalidMerge(format!(
                "({}, {}) references a token >= {}",
                left, right, new_id
            )));
        }

        self.merges.push(rule);
        Ok(new_id)
    }

    /// Look up what a token ID stands for.
    #[inline]
    pub fn expand(&self, id: TokenId) -> Result<Expansion> {
        let index = id as usize;
        if index < BASE_VOCAB_SIZE {
            return Ok(Expansion::Byte(id as u8));
        }

        self.merges
            .get(index - BASE_VOCAB_SIZE)
            .map(|rule| Expansion::Pair(rule.left, rule.right))
            .ok_or_else(|| {
                TokenizerError::CorruptVocabulary(format!(
                    "token id {} out of range for vocabulary of size {}",
                    id,
                    self.len()
                ))
            })
    }

    /// Whether `id` names a base or merge token of this vocabulary.
    #[inline]
    pub fn contains(&self, id: TokenId) -> bool {
        (id as usize) < self.len()
    }

    /// Merge rules in creation order (which is also encode replay order).
    #[inline]
    pub fn rules(&self) -> &[MergeRule] {
        &self.merges
    }

    /// Get the number of tokens: 256 base tokens plus one per merge.
    #[inline]
    pub fn len(&self) -> usize {
        BASE_VOCAB_SIZE + self.merges.len()
    }

    /// Always false: the base tokens are always present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of learned merge rules.
    #[inline]
    pub fn num_merges(&self) -> usize {
        self.merges.len()
    }

    /// Configured target vocabulary size.
    #[inline]
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Whether another merge would exceed the target size.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() >= self.max_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_base_tokens_only() {
        let vocab = Vocabulary::new(1000);
        assert_eq!(vocab.len(), 256);
        assert_eq!(vocab.num_merges(), 0);
        assert!(vocab.rules().is_empty());
        assert_eq!(vocab.expand(0).unwrap(), Expansion::Byte(0));
        assert_eq!(vocab.expand(255).unwrap(), Expansion::Byte(255));
    }

    #[test]
    fn test_add_merge_assigns_sequential_ids() {
        let mut vocab = Vocabulary::new(1000);
        assert_eq!(vocab.add_merge(97, 97).unwrap(), 256);
        assert_eq!(vocab.add_merge(256, 98).unwrap(), 257);

        assert_eq!(vocab.len(), 258);
        assert_eq!(vocab.expand(256).unwrap(), Expansion::Pair(97, 97));
        assert_eq!(vocab.expand(257).unwrap(), Expansion::Pair(256, 98));
        assert_eq!(vocab.rules()[1], MergeRule::new(256, 98, 257));
    }

    #[test]
    fn test_add_merge_when_full() {
        let mut vocab = Vocabulary::new(257);
        vocab.add_merge(1, 2).unwrap();

        let err = vocab.add_merge(3, 4).unwrap_err();
        assert!(matches!(err, TokenizerError::VocabularyFull { max: 257 }));
        assert_eq!(vocab.len(), 257);
    }

    #[test]
    fn test_base_sized_vocab_is_full() {
        let mut vocab = Vocabulary::new(256);
        assert!(vocab.is_full());
        assert!(vocab.add_merge(0, 1).is_err());
    }

    #[test]
    fn test_add_merge_rejects_unknown_child() {
        let mut vocab = Vocabulary::new(1000);
        let err = vocab.add_merge(256, 1).unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidMerge(_)));
        assert_eq!(vocab.num_merges(), 0);
    }

    #[test]
    fn test_expand_out_of_range() {
        let mut vocab = Vocabulary::new(1000);
        vocab.add_merge(1, 2).unwrap();

        let err = vocab.expand(vocab.len() as TokenId).unwrap_err();
        assert!(matches!(err, TokenizerError::CorruptVocabulary(_)));
        assert!(!vocab.contains(257));
        assert!(vocab.contains(256));
    }

    #[test]
    fn test_from_pairs() {
        let vocab = Vocabulary::from_pairs(vec![(97, 97), (256, 98)], 300).unwrap();
        assert_eq!(vocab.len(), 258);
        assert_eq!(vocab.max_size(), 300);
        assert_eq!(vocab.expand(257).unwrap(), Expansion::Pair(256, 98));
    }

    #[test]
    fn test_from_pairs_with_huge_target() {
        let vocab = Vocabulary::from_pairs(vec![(97, 97)], usize::MAX).unwrap();
        assert_eq!(vocab.max_size(), usize::MAX);
        assert_eq!(vocab.num_merges(), 1);
        assert!(!vocab.is_full());
    }

    #[test]
    fn test_from_pairs_rejects_cycle() {
        let err = Vocabulary::from_pairs(vec![(97, 97), (257, 98)], 300).unwrap_err();
        assert!(matches!(err, TokenizerError::CorruptVocabulary(_)));
    }

    #[test]
    fn test_from_pairs_rejects_overflow() {
        let err = Vocabulary::from_pairs(vec![(1, 2), (3, 4)], 257).unwrap_err();
        assert!(matches!(err, TokenizerError::CorruptVocabulary(_)));
    }
}
