//! Block text extraction.

use redline_types::{Block, Document, Node};

/// The flattened text of each top-level block, in document order.
///
/// A block's text is the concatenation of all its descendant runs; nested
/// block boundaries add no characters.
pub fn extract_block_texts(doc: &Document) -> Vec<String> {
    doc.blocks.iter().map(Block::text).collect()
}

/// Flatten a document to plain text.
///
/// Each text block (a block with no nested blocks) becomes one line;
/// container blocks such as lists and blockquotes contribute the lines of
/// their children. Text a container holds directly starts a line of its own
/// whenever it follows a nested block or opens the container.
pub fn extract_plain_text(doc: &Document) -> String {
    let mut out = String::new();
    let mut first = true;
    for block in &doc.blocks {
        write_block(block, &mut out, &mut first);
    }
    out
}

fn write_block(block: &Block, out: &mut String, first: &mut bool) {
    // Whether the line being written belongs to this block.
    let mut own_line = block.is_textblock();
    if own_line {
        start_line(out, first);
    }
    for child in &block.children {
        match child {
            Node::Run(run) => {
                if !own_line && !run.text.is_empty() {
                    start_line(out, first);
                    own_line = true;
                }
                out.push_str(&run.text);
            }
            Node::Block(inner) => {
                write_block(inner, out, first);
                own_line = false;
            }
        }
    }
}

fn start_line(out: &mut String, first: &mut bool) {
    if !*first {
        out.push('\n');
    }
    *first = false;
}
