//! Byte-level BPE encoding.
//!
//! Text is treated as raw bytes: every byte is already a base token, so
//! encoding never fails. Merge rules are replayed in creation order through
//! the same rewriter the trainer uses, and decoding expands each token back
//! down to its bytes.

use crate::core::{Expansion, SequenceRewriter, TokenId, Vocabulary};
use crate::Result;
use std::sync::Arc;

/// Byte-level BPE encoder/decoder over a frozen vocabulary.
///
/// The vocabulary is held behind an `Arc` so several encoders (or a tokenizer
/// and its encoder) can share it without cloning the rule list.
#[derive(Debug, Clone)]
pub struct ByteLevelEncoder {
    vocab: Arc<Vocabulary>,
}

impl ByteLevelEncoder {
    /// Create an encoder that owns its vocabulary.
    pub fn new(vocab: Vocabulary) -> Self {
        Self::with_arc(Arc::new(vocab))
    }

    /// Create an encoder over a shared vocabulary.
    pub fn with_arc(vocab: Arc<Vocabulary>) -> Self {
        Self { vocab }
    }

    /// The vocabulary this encoder replays.
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Encode raw bytes to token IDs.
    ///
    /// Each rule is applied with a single left-to-right pass, in the order the
    /// rules were learned.
    pub fn encode(&self, bytes: &[u8]) -> Vec<TokenId> {
        let mut tokens: Vec<TokenId> = bytes.iter().map(|&b| TokenId::from(b)).collect();
        let mut rewriter = SequenceRewriter::with_capacity(tokens.len());

        for rule in self.vocab.rules() {
            // A sequence of length < 2 can never change again.
            if tokens.len() < 2 {
                break;
            }
            rewriter.rewrite(&mut tokens, rule);
        }

        tokens
    }

    /// Decode token IDs back to raw bytes.
    ///
    /// Fails with `CorruptVocabulary` if any ID is not part of the vocabulary;
    /// no partial output is returned.
    pub fn decode(&self, ids: &[TokenId]) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(ids.len() * 2);
        let mut stack = Vec::new();

        for &id in ids {
            self.expand_into(id, &mut stack, &mut bytes)?;
        }

        Ok(bytes)
    }

    /// Expand one token into `out`, left child before right child.
    ///
    /// Uses an explicit stack: merge chains can be as deep as the vocabulary
    /// is large.
    fn expand_into(&self, id: TokenId, stack: &mut Vec<TokenId>, out: &mut Vec<u8>) -> Result<()> {
        stack.clear();
        stack.push(id);

        while let Some(top) = stack.pop() {
            match self.vocab.expand(top)? {
                Expansion::Byte(b) => out.push(b),
                Expansion::Pair(left, right) => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenizerError;
    use proptest::prelude::*;

    fn aab_vocab() -> Vocabulary {
        let mut vocab = Vocabulary::new(258);
        vocab.add_merge(97, 97).unwrap();
        vocab.add_merge(256, 98).unwrap();
        vocab
    }

    #[test]
    fn test_encode_without_merges_is_identity() {
        let encoder = ByteLevelEncoder::new(Vocabulary::new(256));
        assert_eq!(encoder.encode(b"Hi!"), vec![72, 105, 33]);
        assert!(encoder.encode(b"").is_empty());
    }

    #[test]
    fn test_encode_replays_rules_in_order() {
        let encoder = ByteLevelEncoder::new(aab_vocab());
        assert_eq!(encoder.encode(b"aabaab"), vec![257, 257]);
        assert_eq!(encoder.encode(b"aaab"), vec![256, 97, 98]);
        assert_eq!(encoder.encode(b"baab"), vec![98, 257]);
    }

    #[test]
    fn test_decode_expands_nested_tokens() {
        let encoder = ByteLevelEncoder::new(aab_vocab());
        assert_eq!(encoder.decode(&[257, 257]).unwrap(), b"aabaab".to_vec());
        assert_eq!(encoder.decode(&[256, 120]).unwrap(), b"aax".to_vec());
        assert!(encoder.decode(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_unknown_id() {
        let encoder = ByteLevelEncoder::new(aab_vocab());
        let size = encoder.vocab().len() as TokenId;

        let err = encoder.decode(&[97, size]).unwrap_err();
        assert!(matches!(err, TokenizerError::CorruptVocabulary(_)));
    }

    #[test]
    fn test_decode_deep_chain() {
        // Each token extends the previous one by a single 'a'.
        let mut vocab = Vocabulary::new(256 + 5000);
        let mut prev = 97;
        for _ in 0..5000 {
            prev = vocab.add_merge(prev, 97).unwrap();
        }

        let encoder = ByteLevelEncoder::new(vocab);
        let bytes = encoder.decode(&[prev]).unwrap();
        assert_eq!(bytes.len(), 5001);
        assert!(bytes.iter().all(|&b| b == b'a'));
    }

    proptest! {
        #[test]
        fn prop_roundtrip_fixed_vocab(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            let encoder = ByteLevelEncoder::new(aab_vocab());
            let ids = encoder.encode(&bytes);
            prop_assert_eq!(encoder.decode(&ids).unwrap(), bytes);
        }
    }
}
