//! Segment compaction.

use crate::word_diff::Segment;

/// Merge consecutive segments that share a tag, preserving order.
///
/// Segments are never merged across a tag change, empty ones included.
/// The operation is idempotent.
pub fn compact<I>(segments: I) -> Vec<Segment>
where
    I: IntoIterator<Item = Segment>,
{
    let mut out: Vec<Segment> = Vec::new();
    for segment in segments {
        match out.last_mut() {
            Some(last) if last.tag == segment.tag => last.text.push_str(&segment.text),
            _ => out.push(segment),
        }
    }
    out
}
