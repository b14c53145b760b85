//! The document tree: blocks, runs, and the document root.
//!
//! A [`Document`] is an ordered forest of [`Block`]s. Blocks carry only
//! structure (a type tag and free-form attributes) and an ordered list of
//! children; visible text lives exclusively in leaf [`Run`]s. Nodes have no
//! persistent identity: two versions of a document are compared purely by
//! position and content.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};
use crate::mark::{DiffTag, Mark};
use crate::wire::RawNode;

/// Free-form node attributes (heading level, link target, ...).
pub type Attrs = BTreeMap<String, serde_json::Value>;

/// A leaf text span with its formatting marks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub marks: Vec<Mark>,
}

impl Run {
    /// Create an unformatted run.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    /// Builder-style mark append.
    pub fn with_mark(mut self, mark: Mark) -> Self {
        self.marks.push(mark);
        self
    }

    /// Returns `true` if the run carries a mark with this name.
    pub fn has_mark(&self, name: &str) -> bool {
        self.marks.iter().any(|m| m.name == name)
    }

    /// The diff state recorded on this run. Runs without a diff mark are
    /// [`DiffTag::Unchanged`].
    pub fn diff_tag(&self) -> DiffTag {
        self.marks
            .iter()
            .find_map(Mark::diff_tag)
            .unwrap_or(DiffTag::Unchanged)
    }

    /// A copy of this run whose diff state is `tag`.
    ///
    /// Formatting marks are kept in order; any previous diff mark is
    /// replaced, so a run never carries more than one.
    pub fn with_diff_tag(&self, tag: DiffTag) -> Run {
        let mut marks: Vec<Mark> = self.marks.iter().filter(|m| !m.is_diff()).cloned().collect();
        marks.extend(Mark::diff(tag));
        Run {
            text: self.text.clone(),
            marks,
        }
    }
}

/// A structural node: paragraph, heading, list item, blockquote, ...
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub kind: String,
    pub attrs: Attrs,
    pub children: Vec<Node>,
}

impl Block {
    /// Create an empty block of the given type.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attrs: Attrs::new(),
            children: Vec::new(),
        }
    }

    /// A paragraph holding a single unformatted run.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new("paragraph").with_run(Run::new(text))
    }

    /// A heading of the given level holding a single unformatted run.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::new("heading")
            .with_attr("level", serde_json::Value::from(level))
            .with_run(Run::new(text))
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attrs.insert(key.into(), value);
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Builder-style run append.
    pub fn with_run(self, run: Run) -> Self {
        self.with_child(run)
    }

    /// A block with the same type and attributes but different children.
    pub fn with_children(&self, children: Vec<Node>) -> Block {
        Block {
            kind: self.kind.clone(),
            attrs: self.attrs.clone(),
            children,
        }
    }

    /// All descendant runs, depth-first in document order.
    pub fn runs(&self) -> Runs<'_> {
        Runs {
            stack: vec![self.children.iter()],
        }
    }

    /// The concatenated text of all descendant runs.
    ///
    /// Nested block boundaries contribute no characters.
    pub fn text(&self) -> String {
        self.runs().map(|r| r.text.as_str()).collect()
    }

    /// Returns `true` if no child is itself a block.
    pub fn is_textblock(&self) -> bool {
        !self.children.iter().any(|c| matches!(c, Node::Block(_)))
    }

    /// Rebuild this block with every descendant run passed through `f`.
    ///
    /// Runs for which `f` returns `None` are dropped. Nested blocks are
    /// kept even when they end up empty.
    pub fn filter_map_runs<F>(&self, f: &mut F) -> Block
    where
        F: FnMut(&Run) -> Option<Run>,
    {
        let children = self
            .children
            .iter()
            .filter_map(|child| match child {
                Node::Run(run) => f(run).map(Node::Run),
                Node::Block(block) => Some(Node::Block(block.filter_map_runs(&mut *f))),
            })
            .collect();
        self.with_children(children)
    }

    /// Rebuild this block with every descendant run passed through `f`.
    pub fn map_runs<F>(&self, f: &mut F) -> Block
    where
        F: FnMut(&Run) -> Run,
    {
        self.filter_map_runs(&mut |run: &Run| Some(f(run)))
    }

    /// A copy of this block with every descendant run set to `tag`.
    ///
    /// A block with no runs at all gets a single empty run carrying the diff
    /// mark, so the side it belongs to is still recorded.
    pub fn with_diff_tag(&self, tag: DiffTag) -> Block {
        let mut tagged = self.map_runs(&mut |run: &Run| run.with_diff_tag(tag));
        if tag != DiffTag::Unchanged && self.runs().next().is_none() {
            tagged.children.push(Node::Run(Run::new("").with_diff_tag(tag)));
        }
        tagged
    }
}

/// A child of a block: either a nested block or a text run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub enum Node {
    Block(Block),
    Run(Run),
}

impl From<Block> for Node {
    fn from(block: Block) -> Self {
        Node::Block(block)
    }
}

impl From<Run> for Node {
    fn from(run: Run) -> Self {
        Node::Run(run)
    }
}

/// Depth-first iterator over the runs beneath a block.
pub struct Runs<'a> {
    stack: Vec<std::slice::Iter<'a, Node>>,
}

impl<'a> Iterator for Runs<'a> {
    type Item = &'a Run;

    fn next(&mut self) -> Option<&'a Run> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(Node::Run(run)) => return Some(run),
                Some(Node::Block(block)) => self.stack.push(block.children.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// A complete document: an ordered sequence of top-level blocks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a document from its top-level blocks.
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// An empty document.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of top-level blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// All runs in document order.
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.blocks.iter().flat_map(Block::runs)
    }

    /// Parse a document from its JSON representation.
    pub fn from_json(json: &str) -> TypeResult<Self> {
        serde_json::from_str(json).map_err(|e| TypeError::Serialization(e.to_string()))
    }

    /// Parse a document from an already-decoded JSON value.
    pub fn from_value(value: serde_json::Value) -> TypeResult<Self> {
        serde_json::from_value(value).map_err(|e| TypeError::Serialization(e.to_string()))
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> TypeResult<String> {
        serde_json::to_string(self).map_err(|e| TypeError::Serialization(e.to_string()))
    }

    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> TypeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| TypeError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mark::{DIFF_ADDED_MARK, DIFF_REMOVED_MARK};

    fn bullet_list() -> Block {
        Block::new("bulletList")
            .with_child(Block::new("listItem").with_child(Block::paragraph("one")))
            .with_child(
                Block::new("listItem").with_child(
                    Block::new("paragraph")
                        .with_run(Run::new("two "))
                        .with_run(Run::new("items").with_mark(Mark::new("bold"))),
                ),
            )
    }

    #[test]
    fn runs_are_depth_first() {
        let list = bullet_list();
        let texts: Vec<&str> = list.runs().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two ", "items"]);
    }

    #[test]
    fn text_ignores_block_boundaries() {
        assert_eq!(bullet_list().text(), "onetwo items");
        assert_eq!(Block::new("paragraph").text(), "");
    }

    #[test]
    fn textblock_detection() {
        assert!(Block::paragraph("x").is_textblock());
        assert!(Block::new("paragraph").is_textblock());
        assert!(!bullet_list().is_textblock());
    }

    #[test]
    fn with_diff_tag_preserves_formatting() {
        let run = Run::new("hi").with_mark(Mark::new("bold"));
        let added = run.with_diff_tag(DiffTag::Added);
        assert_eq!(added.diff_tag(), DiffTag::Added);
        assert!(added.has_mark("bold"));
        assert_eq!(added.marks.len(), 2);
    }

    #[test]
    fn with_diff_tag_replaces_previous_diff_mark() {
        let run = Run::new("hi").with_diff_tag(DiffTag::Added);
        let removed = run.with_diff_tag(DiffTag::Removed);
        assert!(removed.has_mark(DIFF_REMOVED_MARK));
        assert!(!removed.has_mark(DIFF_ADDED_MARK));
        assert_eq!(removed.marks.len(), 1);

        let cleared = removed.with_diff_tag(DiffTag::Unchanged);
        assert!(cleared.marks.is_empty());
        assert_eq!(cleared.diff_tag(), DiffTag::Unchanged);
    }

    #[test]
    fn block_with_diff_tag_is_recursive() {
        let list = bullet_list().with_diff_tag(DiffTag::Removed);
        assert!(list.runs().all(|r| r.diff_tag() == DiffTag::Removed));
        assert_eq!(list.kind, "bulletList");
        assert_eq!(list.text(), "onetwo items");
        let bold = list.runs().find(|r| r.text == "items").unwrap();
        assert!(bold.has_mark("bold"));
    }

    #[test]
    fn runless_block_gets_a_tagged_empty_run() {
        let rule = Block::new("horizontalRule").with_diff_tag(DiffTag::Added);
        let runs: Vec<&Run> = rule.runs().collect();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "");
        assert_eq!(runs[0].diff_tag(), DiffTag::Added);

        let untouched = Block::new("paragraph").with_diff_tag(DiffTag::Unchanged);
        assert_eq!(untouched, Block::new("paragraph"));
    }

    #[test]
    fn filter_map_runs_keeps_empty_blocks() {
        let stripped = bullet_list().filter_map_runs(&mut |_: &Run| None);
        assert_eq!(stripped.runs().count(), 0);
        assert_eq!(stripped.children.len(), 2);
    }

    #[test]
    fn heading_carries_level() {
        let h = Block::heading(2, "Title");
        assert_eq!(h.attrs.get("level"), Some(&serde_json::json!(2)));
        assert_eq!(h.text(), "Title");
    }

    #[test]
    fn document_runs_span_blocks() {
        let doc = Document::new(vec![Block::paragraph("a"), bullet_list()]);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.runs().count(), 4);
        assert!(Document::empty().is_empty());
    }
}
