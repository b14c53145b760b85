//! Structural merge engine for Redline.
//!
//! Takes two snapshots of a document (the original and a suggested edit)
//! and produces a single document in which every run is annotated as
//! unchanged, added, or removed. Blocks are paired by word-bag similarity;
//! paired blocks with edited text get a word-level diff, unpaired or
//! substantially rewritten blocks are marked wholesale.
//!
//! # Entry Points
//!
//! - [`diff_words`] / [`compact`] -- Flat word-level diff of two strings
//! - [`merge_documents`] / [`MergeEngine::merge`] -- Annotated structural merge
//! - [`extract_plain_text`] -- Flatten a document to text, one line per text block
//! - [`accept_all`] / [`reject_all`] -- Resolve a merged document to one side
//! - [`ChangeSummary`] -- Counts of what a merged document changes

pub mod block_align;
pub mod config;
pub mod error;
pub mod extract;
pub mod render;
pub mod review;

pub use block_align::align_blocks;
pub use config::MergeConfig;
pub use error::{MergeError, MergeResult};
pub use extract::{extract_block_texts, extract_plain_text};
pub use redline_diff::{compact, diff_words, similarity, Segment, SegmentsExt};
pub use render::{merge_documents, MergeEngine};
pub use review::{accept_all, reject_all, ChangeSummary};
