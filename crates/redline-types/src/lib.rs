//! Document tree model for Redline.
//!
//! This crate provides the structured document types that the diff and merge
//! engines operate on. Every other Redline crate depends on `redline-types`.
//!
//! # Key Types
//!
//! - [`Document`] — An ordered forest of top-level blocks
//! - [`Block`] — A structural node (paragraph, heading, list item, ...) with attributes and children
//! - [`Run`] — A leaf text span carrying formatting marks
//! - [`Mark`] — A named formatting annotation, including the diff marks
//! - [`DiffTag`] — The diff state of a run or segment (unchanged / added / removed)

pub mod document;
pub mod error;
pub mod mark;
mod wire;

pub use document::{Attrs, Block, Document, Node, Run, Runs};
pub use error::{TypeError, TypeResult};
pub use mark::{DiffTag, Mark, DIFF_ADDED_MARK, DIFF_REMOVED_MARK};
