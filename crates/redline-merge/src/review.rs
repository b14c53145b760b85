//! Review resolution and change summaries for merged documents.
//!
//! A merged document carries both versions at once. Accepting keeps the
//! suggested side, rejecting keeps the original side; either way the result
//! is a clean document with no diff marks.

use serde::Serialize;

use redline_types::{Block, DiffTag, Document, Node, Run};

/// Keep the suggested version: drop removed runs and clear added marks.
pub fn accept_all(doc: &Document) -> Document {
    resolve(doc, DiffTag::Removed)
}

/// Keep the original version: drop added runs and clear removed marks.
pub fn reject_all(doc: &Document) -> Document {
    resolve(doc, DiffTag::Added)
}

/// Drop runs tagged `discard` and clear the diff state of the rest.
///
/// A top-level block that had runs and loses all of them is dropped too,
/// which is how wholesale added/removed blocks disappear. Wholesale tagged
/// blocks always carry at least an empty run, so blocks that never had runs
/// are unchanged ones and are kept.
fn resolve(doc: &Document, discard: DiffTag) -> Document {
    let blocks = doc
        .blocks
        .iter()
        .filter_map(|block| {
            let had_runs = block.runs().next().is_some();
            let resolved = block.filter_map_runs(&mut |run: &Run| {
                (run.diff_tag() != discard).then(|| run.with_diff_tag(DiffTag::Unchanged))
            });
            if had_runs && resolved.runs().next().is_none() {
                None
            } else {
                Some(coalesce_runs(&resolved))
            }
        })
        .collect();
    Document::new(blocks)
}

/// Merge adjacent sibling runs that carry identical marks and drop empty ones.
fn coalesce_runs(block: &Block) -> Block {
    let mut children: Vec<Node> = Vec::with_capacity(block.children.len());
    for child in &block.children {
        match (children.last_mut(), child) {
            (_, Node::Run(run)) if run.text.is_empty() => {}
            (Some(Node::Run(last)), Node::Run(run)) if last.marks == run.marks => {
                last.text.push_str(&run.text);
            }
            (_, Node::Block(inner)) => children.push(Node::Block(coalesce_runs(inner))),
            (_, Node::Run(run)) => children.push(Node::Run(run.clone())),
        }
    }
    block.with_children(children)
}

/// What a merged document changes.
///
/// Character and word counts are taken per run; block counts consider
/// top-level blocks only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSummary {
    pub unchanged_chars: usize,
    pub added_chars: usize,
    pub removed_chars: usize,
    pub added_words: usize,
    pub removed_words: usize,
    /// Blocks whose runs are all added.
    pub added_blocks: usize,
    /// Blocks whose runs are all removed.
    pub removed_blocks: usize,
    /// Blocks that mix changed and unchanged runs, or added and removed ones.
    pub modified_blocks: usize,
}

impl ChangeSummary {
    /// Summarize a merged document.
    pub fn of(doc: &Document) -> Self {
        let mut summary = Self::default();
        for block in &doc.blocks {
            let mut tags = [false; 3];
            for run in block.runs() {
                let chars = run.text.chars().count();
                let words = run.text.split_whitespace().count();
                match run.diff_tag() {
                    DiffTag::Unchanged => {
                        summary.unchanged_chars += chars;
                        tags[0] = true;
                    }
                    DiffTag::Added => {
                        summary.added_chars += chars;
                        summary.added_words += words;
                        tags[1] = true;
                    }
                    DiffTag::Removed => {
                        summary.removed_chars += chars;
                        summary.removed_words += words;
                        tags[2] = true;
                    }
                }
            }
            match tags {
                [false, true, false] => summary.added_blocks += 1,
                [false, false, true] => summary.removed_blocks += 1,
                [_, true, _] | [_, _, true] => summary.modified_blocks += 1,
                _ => {}
            }
        }
        summary
    }

    /// Returns `true` if the document contains no changes.
    pub fn is_empty(&self) -> bool {
        self.added_chars == 0
            && self.removed_chars == 0
            && self.added_blocks == 0
            && self.removed_blocks == 0
            && self.modified_blocks == 0
    }
}
