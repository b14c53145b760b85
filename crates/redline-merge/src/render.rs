//! Merge rendering: build one annotated document from two snapshots.
//!
//! The block alignment is walked in order. Unpaired old blocks are emitted
//! with every run marked removed, unpaired new blocks with every run marked
//! added. A paired block with identical text is copied from the old side
//! untouched. A paired block whose text changed is either shown as a full
//! replacement (old removed, then new added) when the two are too
//! dissimilar, or rebuilt as a single block of the old block's type whose
//! runs are the compacted word diff.
//!
//! # Invariants
//!
//! - Reading the unchanged and removed runs in order yields the old text.
//! - Reading the unchanged and added runs in order yields the new text.
//! - A run carries at most one diff mark.

use tracing::{debug, trace};

use redline_diff::{compact, diff_words, similarity, Step};
use redline_types::{Block, DiffTag, Document, Mark, Node, Run};

use crate::block_align::align_blocks;
use crate::config::MergeConfig;
use crate::error::MergeResult;
use crate::extract::extract_block_texts;

/// Merge `old` and `new` with the default configuration.
pub fn merge_documents(old: &Document, new: &Document) -> Document {
    MergeEngine::default().merge(old, new)
}

/// A configured structural merge.
///
/// The engine holds no state between calls and can be shared freely across
/// threads.
#[derive(Clone, Debug, Default)]
pub struct MergeEngine {
    config: MergeConfig,
}

/// How a paired block was rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PairOutcome {
    Verbatim,
    Replaced,
    WordDiff,
}

impl MergeEngine {
    /// Create an engine, validating the configuration.
    pub fn new(config: MergeConfig) -> MergeResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Produce the annotated merge of `old` and `new`.
    ///
    /// Total over well-formed documents: an empty side simply yields the
    /// other side marked wholesale.
    pub fn merge(&self, old: &Document, new: &Document) -> Document {
        let threshold = self.config.similarity_threshold;
        let old_texts = extract_block_texts(old);
        let new_texts = extract_block_texts(new);
        let alignment = align_blocks(&old_texts, &new_texts, threshold);

        let mut blocks = Vec::with_capacity(old.len() + new.len());
        for step in alignment.steps() {
            match step {
                Step::Removed(i) => blocks.push(old.blocks[i].with_diff_tag(DiffTag::Removed)),
                Step::Added(j) => blocks.push(new.blocks[j].with_diff_tag(DiffTag::Added)),
                Step::Matched(i, j) => {
                    let outcome = self.merge_pair(
                        &old.blocks[i],
                        &new.blocks[j],
                        &old_texts[i],
                        &new_texts[j],
                        &mut blocks,
                    );
                    trace!(old = i, new = j, ?outcome, "merged block pair");
                }
            }
        }

        debug!(
            old_blocks = old.len(),
            new_blocks = new.len(),
            paired = alignment.len(),
            merged_blocks = blocks.len(),
            "merged documents"
        );
        Document::new(blocks)
    }

    fn merge_pair(
        &self,
        old: &Block,
        new: &Block,
        old_text: &str,
        new_text: &str,
        out: &mut Vec<Block>,
    ) -> PairOutcome {
        if old_text == new_text {
            out.push(old.clone());
            return PairOutcome::Verbatim;
        }

        if similarity(old_text, new_text) < self.config.similarity_threshold {
            out.push(old.with_diff_tag(DiffTag::Removed));
            out.push(new.with_diff_tag(DiffTag::Added));
            return PairOutcome::Replaced;
        }

        let mut children: Vec<Node> = compact(diff_words(old_text, new_text))
            .into_iter()
            .filter(|segment| !segment.text.is_empty())
            .map(|segment| {
                Node::Run(Run {
                    text: segment.text,
                    marks: Mark::diff(segment.tag).into_iter().collect(),
                })
            })
            .collect();
        if children.is_empty() {
            children.push(Node::Run(Run::new("")));
        }
        out.push(old.with_children(children));
        PairOutcome::WordDiff
    }
}
