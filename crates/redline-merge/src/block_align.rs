//! Block alignment: pair old and new top-level blocks by similarity.
//!
//! This is the same LCS used for words, with equality replaced by
//! "similarity at or above the threshold". Because the predicate is not an
//! equivalence, the result is a valid monotone pairing but not necessarily
//! the one that maximizes total similarity.

use tracing::debug;

use redline_diff::{align, Alignment, WordBag};

/// Align two sequences of block texts.
///
/// Blocks `old[i]` and `new[j]` may be paired when their similarity is at
/// least `threshold`.
pub fn align_blocks<S: AsRef<str>>(old: &[S], new: &[S], threshold: f64) -> Alignment {
    let old_bags: Vec<WordBag<'_>> = old.iter().map(|t| WordBag::new(t.as_ref())).collect();
    let new_bags: Vec<WordBag<'_>> = new.iter().map(|t| WordBag::new(t.as_ref())).collect();

    let alignment = align(old_bags.len(), new_bags.len(), |i, j| {
        old_bags[i].similarity(&new_bags[j]) >= threshold
    });

    debug!(
        old_blocks = old.len(),
        new_blocks = new.len(),
        matched = alignment.len(),
        threshold,
        "aligned blocks"
    );
    alignment
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: f64 = 0.3;

    #[test]
    fn identical_sequences_pair_in_order() {
        let texts = ["Alpha", "Beta", "Gamma"];
        let a = align_blocks(&texts, &texts, T);
        assert_eq!(a.pairs(), &[(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn inserted_block_is_unpaired() {
        let a = align_blocks(&["Alpha"], &["Alpha", "Beta"], T);
        assert_eq!(a.pairs(), &[(0, 0)]);
    }

    #[test]
    fn edited_block_pairs_when_similar() {
        let a = align_blocks(
            &["the quick brown fox jumps"],
            &["the quick red fox jumps"],
            T,
        );
        assert_eq!(a.pairs(), &[(0, 0)]);
    }

    #[test]
    fn rewritten_block_does_not_pair() {
        let a = align_blocks(
            &["The cat sat on the mat."],
            &["Quantum entanglement defies locality."],
            T,
        );
        assert!(a.is_empty());
    }

    #[test]
    fn threshold_controls_pairing() {
        // Jaccard 0.5.
        let old = ["the quick fox"];
        let new = ["the slow fox"];
        assert_eq!(align_blocks(&old, &new, 0.5).len(), 1);
        assert_eq!(align_blocks(&old, &new, 0.51).len(), 0);
    }

    #[test]
    fn empty_blocks_pair_with_each_other() {
        let a = align_blocks(&["", "text"], &["", "text"], T);
        assert_eq!(a.pairs(), &[(0, 0), (1, 1)]);
    }

    #[test]
    fn works_with_owned_strings() {
        let old = vec!["one two".to_string()];
        let new = vec!["one two three".to_string()];
        assert_eq!(align_blocks(&old, &new, T).len(), 1);
    }
}
