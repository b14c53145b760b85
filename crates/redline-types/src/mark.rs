//! Formatting marks and the diff-state annotation layered on top of them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::Attrs;

/// Mark name carried by runs that exist only in the suggested document.
pub const DIFF_ADDED_MARK: &str = "diffAdded";

/// Mark name carried by runs that exist only in the original document.
pub const DIFF_REMOVED_MARK: &str = "diffRemoved";

/// The diff state of a piece of text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffTag {
    /// Present in both versions.
    Unchanged,
    /// Present only in the new version.
    Added,
    /// Present only in the old version.
    Removed,
}

impl DiffTag {
    /// The mark name that encodes this state on a run, if any.
    ///
    /// Unchanged text carries no diff mark.
    pub fn mark_name(self) -> Option<&'static str> {
        match self {
            DiffTag::Unchanged => None,
            DiffTag::Added => Some(DIFF_ADDED_MARK),
            DiffTag::Removed => Some(DIFF_REMOVED_MARK),
        }
    }

    /// Returns `true` if this text belongs to the old version.
    pub fn in_old(self) -> bool {
        matches!(self, DiffTag::Unchanged | DiffTag::Removed)
    }

    /// Returns `true` if this text belongs to the new version.
    pub fn in_new(self) -> bool {
        matches!(self, DiffTag::Unchanged | DiffTag::Added)
    }
}

impl fmt::Display for DiffTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiffTag::Unchanged => "unchanged",
            DiffTag::Added => "added",
            DiffTag::Removed => "removed",
        };
        f.write_str(s)
    }
}

/// A named formatting annotation on a run (bold, link, diff state, ...).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Attrs::is_empty")]
    pub attrs: Attrs,
}

impl Mark {
    /// Create a mark with no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Attrs::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attrs.insert(key.into(), value);
        self
    }

    /// The diff mark for `tag`, or `None` for [`DiffTag::Unchanged`].
    pub fn diff(tag: DiffTag) -> Option<Self> {
        tag.mark_name().map(Mark::new)
    }

    /// The diff state this mark encodes, if it is a diff mark.
    pub fn diff_tag(&self) -> Option<DiffTag> {
        match self.name.as_str() {
            DIFF_ADDED_MARK => Some(DiffTag::Added),
            DIFF_REMOVED_MARK => Some(DiffTag::Removed),
            _ => None,
        }
    }

    /// Returns `true` if this is one of the diff marks.
    pub fn is_diff(&self) -> bool {
        self.diff_tag().is_some()
    }
}
