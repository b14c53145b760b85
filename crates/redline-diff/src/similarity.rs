//! Bag-of-words similarity between two strings.
//!
//! The score is the Jaccard index of the two lowercase word sets. Word
//! order and repetition are ignored, which keeps block pairing cheap at the
//! cost of pairing reordered paragraphs that share vocabulary.

use std::collections::HashSet;

/// Similarity at or above which two blocks are considered the same block,
/// edited, rather than one removed and one added.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.3;

/// A string together with its pre-computed lowercase word set.
///
/// Build one per block when scoring many pairs, so each text is split and
/// lowercased only once.
#[derive(Clone, Debug)]
pub struct WordBag<'a> {
    text: &'a str,
    words: HashSet<String>,
}

impl<'a> WordBag<'a> {
    pub fn new(text: &'a str) -> Self {
        let words = text
            .to_lowercase()
            .split_whitespace()
            .map(str::to_owned)
            .collect();
        Self { text, words }
    }

    /// The original text.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Number of distinct lowercase words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the text contains no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Similarity score in `[0, 1]`.
    ///
    /// Identical texts score 1.0 (two empty texts included), a non-empty
    /// text against an empty one scores 0.0, and otherwise the Jaccard
    /// index of the word sets is returned. Two differing texts with no
    /// words at all (whitespace only) score 1.0.
    pub fn similarity(&self, other: &WordBag<'_>) -> f64 {
        if self.text == other.text {
            return 1.0;
        }
        if self.text.is_empty() || other.text.is_empty() {
            return 0.0;
        }

        let shared = self.words.intersection(&other.words).count();
        let union = self.words.len() + other.words.len() - shared;
        if union == 0 {
            return 1.0;
        }
        shared as f64 / union as f64
    }
}

/// Similarity score in `[0, 1]` between two strings. See
/// [`WordBag::similarity`].
pub fn similarity(a: &str, b: &str) -> f64 {
    WordBag::new(a).similarity(&WordBag::new(b))
}
