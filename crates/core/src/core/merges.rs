//! Merge rule types for BPE.
//!
//! Merge rules are stored using token IDs rather than byte strings. A rule's
//! position in the vocabulary's rule list fixes both its new token ID and its
//! replay order during encoding.

/// A token ID. IDs below [`BASE_VOCAB_SIZE`] are raw bytes.
pub type TokenId = u32;

/// A pair of token IDs that can be merged.
pub type Pair = (TokenId, TokenId);

/// Number of base tokens: one per possible byte value.
pub const BASE_VOCAB_SIZE: usize = 256;

/// A single learned merge: `(left, right) -> new_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MergeRule {
    /// Left token of the merged pair
    pub left: TokenId,
    /// Right token of the merged pair
    pub right: TokenId,
    /// ID of the token created by this merge
    pub new_id: TokenId,
}

impl MergeRule {
    /// Create a new merge rule.
    #[inline]
    pub fn new(left: TokenId, right: TokenId, new_id: TokenId) -> Self {
        Self {
            left,
            right,
            new_id,
        }
    }

    /// The pair this rule replaces.
    #[inline]
    pub fn pair(&self) -> Pair {
        (self.left, self.right)
    }

    /// Whether both children were created before this rule's token.
    #[inline]
    pub fn is_acyclic(&self) -> bool {
        self.left < self.new_id && self.right < self.new_id
    }
}
