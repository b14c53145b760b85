//! Word-level diff between two plain strings.
//!
//! Both strings are tokenized, the token sequences are aligned by exact
//! equality, and the alignment walk is emitted as one [`Segment`] per token.
//! Run [`compact`](crate::compact) over the result to merge neighbours.

use serde::{Deserialize, Serialize};

use redline_types::DiffTag;

use crate::align::{align_slices, Step};
use crate::tokenize::tokenize;

/// A contiguous span of text with its diff state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub tag: DiffTag,
    pub text: String,
}

impl Segment {
    pub fn new(tag: DiffTag, text: impl Into<String>) -> Self {
        Self {
            tag,
            text: text.into(),
        }
    }

    pub fn unchanged(text: impl Into<String>) -> Self {
        Self::new(DiffTag::Unchanged, text)
    }

    pub fn added(text: impl Into<String>) -> Self {
        Self::new(DiffTag::Added, text)
    }

    pub fn removed(text: impl Into<String>) -> Self {
        Self::new(DiffTag::Removed, text)
    }
}

/// Compute the word diff of `old` against `new`.
///
/// Concatenating the unchanged and removed segments reproduces `old`;
/// concatenating the unchanged and added segments reproduces `new`.
pub fn diff_words(old: &str, new: &str) -> Vec<Segment> {
    let old_tokens = tokenize(old);
    let new_tokens = tokenize(new);
    let alignment = align_slices(&old_tokens, &new_tokens);

    alignment
        .steps()
        .map(|step| match step {
            Step::Removed(i) => Segment::removed(old_tokens[i]),
            Step::Added(j) => Segment::added(new_tokens[j]),
            Step::Matched(i, _) => Segment::unchanged(old_tokens[i]),
        })
        .collect()
}

/// Reconstruction and counting helpers over a segment list.
pub trait SegmentsExt {
    /// The text of the old side (unchanged + removed).
    fn old_text(&self) -> String;

    /// The text of the new side (unchanged + added).
    fn new_text(&self) -> String;

    /// Number of words in added segments.
    fn additions(&self) -> usize;

    /// Number of words in removed segments.
    fn removals(&self) -> usize;

    /// Returns `true` if every segment is unchanged.
    fn is_unchanged(&self) -> bool;
}

impl SegmentsExt for [Segment] {
    fn old_text(&self) -> String {
        self.iter()
            .filter(|s| s.tag.in_old())
            .map(|s| s.text.as_str())
            .collect()
    }

    fn new_text(&self) -> String {
        self.iter()
            .filter(|s| s.tag.in_new())
            .map(|s| s.text.as_str())
            .collect()
    }

    fn additions(&self) -> usize {
        word_count(self, DiffTag::Added)
    }

    fn removals(&self) -> usize {
        word_count(self, DiffTag::Removed)
    }

    fn is_unchanged(&self) -> bool {
        self.iter().all(|s| s.tag == DiffTag::Unchanged)
    }
}

fn word_count(segments: &[Segment], tag: DiffTag) -> usize {
    segments
        .iter()
        .filter(|s| s.tag == tag)
        .map(|s| s.text.split_whitespace().count())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compact::compact;
    use proptest::prelude::*;

    #[test]
    fn substituted_word() {
        let segments = compact(diff_words("the quick fox", "the slow fox"));
        assert_eq!(
            segments,
            vec![
                Segment::unchanged("the "),
                Segment::removed("quick"),
                Segment::added("slow"),
                Segment::unchanged(" fox"),
            ]
        );
        assert_eq!(segments.additions(), 1);
        assert_eq!(segments.removals(), 1);
    }

    #[test]
    fn identical_strings_collapse_to_one_segment() {
        let text = "nothing  changed\there";
        assert_eq!(compact(diff_words(text, text)), vec![Segment::unchanged(text)]);
        assert!(diff_words(text, text).is_unchanged());
    }

    #[test]
    fn empty_inputs() {
        assert_eq!(diff_words("", "x"), vec![Segment::added("x")]);
        assert_eq!(diff_words("x", ""), vec![Segment::removed("x")]);
        assert!(diff_words("", "").is_empty());
    }

    #[test]
    fn appended_sentence() {
        let segments = compact(diff_words("Hello world.", "Hello world. Bye now."));
        assert_eq!(
            segments,
            vec![
                Segment::unchanged("Hello world."),
                Segment::added(" Bye now."),
            ]
        );
        assert_eq!(segments.additions(), 2);
        assert_eq!(segments.removals(), 0);
    }

    #[test]
    fn whitespace_change_is_visible() {
        let segments = compact(diff_words("a b", "a  b"));
        assert_eq!(
            segments,
            vec![
                Segment::unchanged("a"),
                Segment::removed(" "),
                Segment::added("  "),
                Segment::unchanged("b"),
            ]
        );
        assert_eq!(segments.additions(), 0);
    }

    #[test]
    fn serde_shape() {
        let json = serde_json::to_value(Segment::added("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"tag": "added", "text": "hi"}));
    }

    proptest! {
        #[test]
        fn round_trip_reconstructs_both_sides(
            old in "[ab \n]{0,24}",
            new in "[ab \n]{0,24}",
        ) {
            let segments = diff_words(&old, &new);
            prop_assert_eq!(segments.old_text(), old.clone());
            prop_assert_eq!(segments.new_text(), new.clone());

            let compacted = compact(segments);
            prop_assert_eq!(compacted.old_text(), old);
            prop_assert_eq!(compacted.new_text(), new);
        }

        #[test]
        fn round_trip_on_words(
            old in prop::collection::vec("[a-e]{1,3}", 0..10).prop_map(|w| w.join(" ")),
            new in prop::collection::vec("[a-e]{1,3}", 0..10).prop_map(|w| w.join(" ")),
        ) {
            let segments = compact(diff_words(&old, &new));
            prop_assert_eq!(segments.old_text(), old);
            prop_assert_eq!(segments.new_text(), new);
        }

        #[test]
        fn identity_is_single_unchanged_segment(text in "[a-z \t]{1,40}") {
            prop_assert_eq!(compact(diff_words(&text, &text)), vec![Segment::unchanged(text)]);
        }
    }
}
