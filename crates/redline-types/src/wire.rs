//! JSON wire shape for document trees.
//!
//! Every node is an object with a `type` field. Text runs use
//! `{"type": "text", "text": ..., "marks": [...]}`, blocks use
//! `{"type": <kind>, "attrs": {...}, "content": [...]}`, and the root is a
//! block of type `doc`. Empty `attrs`, `marks` and `content` are omitted.
//! Validation happens here so malformed trees are rejected at load time
//! rather than reaching the diff engine.

use serde::{Deserialize, Serialize};

use crate::document::{Attrs, Block, Document, Node, Run};
use crate::error::TypeError;
use crate::mark::Mark;

pub(crate) const TEXT_TYPE: &str = "text";
pub(crate) const DOC_TYPE: &str = "doc";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawNode {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Attrs::is_empty")]
    attrs: Attrs,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    marks: Vec<Mark>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    content: Vec<RawNode>,
}

impl RawNode {
    fn block(kind: String, attrs: Attrs, content: Vec<RawNode>) -> Self {
        Self {
            kind,
            text: None,
            attrs,
            marks: Vec::new(),
            content,
        }
    }
}

impl TryFrom<RawNode> for Node {
    type Error = TypeError;

    fn try_from(raw: RawNode) -> Result<Self, TypeError> {
        if raw.kind.is_empty() {
            return Err(TypeError::EmptyNodeType);
        }
        if raw.marks.iter().any(|m| m.name.is_empty()) {
            return Err(TypeError::EmptyMarkName);
        }

        if raw.kind == TEXT_TYPE {
            if !raw.content.is_empty() {
                return Err(TypeError::TextNodeWithContent);
            }
            let text = raw.text.ok_or(TypeError::MissingText)?;
            return Ok(Node::Run(Run {
                text,
                marks: raw.marks,
            }));
        }

        if raw.text.is_some() {
            return Err(TypeError::UnexpectedText { kind: raw.kind });
        }
        let children = raw
            .content
            .into_iter()
            .map(Node::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Node::Block(Block {
            kind: raw.kind,
            attrs: raw.attrs,
            children,
        }))
    }
}

impl From<Node> for RawNode {
    fn from(node: Node) -> Self {
        match node {
            Node::Run(run) => RawNode {
                kind: TEXT_TYPE.to_string(),
                text: Some(run.text),
                attrs: Attrs::new(),
                marks: run.marks,
                content: Vec::new(),
            },
            Node::Block(block) => RawNode::block(
                block.kind,
                block.attrs,
                block.children.into_iter().map(RawNode::from).collect(),
            ),
        }
    }
}

impl TryFrom<RawNode> for Document {
    type Error = TypeError;

    fn try_from(raw: RawNode) -> Result<Self, TypeError> {
        if raw.kind != DOC_TYPE {
            return Err(TypeError::NotADocument { kind: raw.kind });
        }
        if raw.text.is_some() {
            return Err(TypeError::UnexpectedText { kind: raw.kind });
        }
        let blocks = raw
            .content
            .into_iter()
            .map(|child| match Node::try_from(child)? {
                Node::Block(block) => Ok(block),
                Node::Run(_) => Err(TypeError::RunAtRoot),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Document { blocks })
    }
}

impl From<Document> for RawNode {
    fn from(doc: Document) -> Self {
        RawNode::block(
            DOC_TYPE.to_string(),
            Attrs::new(),
            doc.blocks
                .into_iter()
                .map(|b| RawNode::from(Node::Block(b)))
                .collect(),
        )
    }
}
