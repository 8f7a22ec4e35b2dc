//! Single-rule sequence rewriting.
//!
//! Both training (corpus rewriting) and encoding (rule replay) go through
//! [`SequenceRewriter`], so a rule is applied identically in both places.

use crate::core::merges::{MergeRule, TokenId};

/// Apply one merge rule with a left-to-right, non-overlapping scan.
///
/// Whenever the next two unconsumed tokens equal the rule's pair they are
/// replaced by the rule's new ID and the scan advances by two.
pub fn apply(sequence: &[TokenId], rule: &MergeRule) -> Vec<TokenId> {
    let mut output = Vec::with_capacity(sequence.len());
    rewrite_into(sequence, rule, &mut output);
    output
}

/// Rewrite `sequence` into `output` (cleared first). Returns the number of
/// replacements made.
fn rewrite_into(sequence: &[TokenId], rule: &MergeRule, output: &mut Vec<TokenId>) -> usize {
    output.clear();
    let mut replaced = 0;
    let mut i = 0;

    while i < sequence.len() {
        if i + 1 < sequence.len() && sequence[i] == rule.left && sequence[i + 1] == rule.right {
            output.push(rule.new_id);
            replaced += 1;
            i += 2;
        } else {
            output.push(sequence[i]);
            i += 1;
        }
    }

    replaced
}

/// Double-buffered rewriter.
///
/// The caller owns the current sequence; each rewrite fills a scratch buffer
/// and swaps it with the caller's, so the previous allocation is reused on
/// the next call instead of being reallocated.
#[derive(Debug, Default)]
pub struct SequenceRewriter {
    scratch: Vec<TokenId>,
}

impl SequenceRewriter {
    /// Create a new rewriter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a rewriter whose scratch buffer holds `capacity` tokens.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            scratch: Vec::with_capacity(capacity),
        }
    }

    /// Apply `rule` to `sequence` in place. Returns the number of replacements.
    pub fn rewrite(&mut self, sequence: &mut Vec<TokenId>, rule: &MergeRule) -> usize {
        let replaced = rewrite_into(sequence, rule, &mut self.scratch);
        if replaced > 0 {
            std::mem::swap(sequence, &mut self.scratch);
        }
        replaced
    }
}
