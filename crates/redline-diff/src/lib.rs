//! Diff primitives for Redline.
//!
//! Provides the text-level half of the document diff engine: a generic
//! longest-common-subsequence aligner shared by word and block alignment,
//! a whitespace-preserving tokenizer, the word diff itself, segment
//! compaction, and the bag-of-words similarity score used to pair blocks.
//!
//! # Key Types
//!
//! - [`Alignment`] / [`Step`] -- Order-preserving index correspondence and its reconstruction walk
//! - [`Segment`] -- A tagged run of text produced by [`diff_words`]
//! - [`WordBag`] -- Pre-computed word set for repeated [`similarity`] queries

pub mod align;
pub mod compact;
pub mod similarity;
pub mod tokenize;
pub mod word_diff;

pub use align::{align, align_slices, Alignment, Step, Steps};
pub use compact::compact;
pub use similarity::{similarity, WordBag, DEFAULT_SIMILARITY_THRESHOLD};
pub use tokenize::tokenize;
pub use word_diff::{diff_words, Segment, SegmentsExt};
