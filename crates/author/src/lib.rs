//! Authoring operations over map and actor documents.
//!
//! # Invariants
//! - Every operation is a pure function: it borrows the current document and
//!   returns a new one, leaving the input untouched.
//! - A failed operation returns an error and no document.
//! - Map grids stay non-empty and rectangular; keyframe lists stay non-empty.

pub mod actor;
pub mod map;

pub use actor::Selection;
pub use map::{CellSelection, MAX_GRID_DIMENSION, Resize};

/// Errors from editing operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error("{target} index {index} out of range (len {len})")]
    IndexOutOfRange {
        target: &'static str,
        index: usize,
        len: usize,
    },
    #[error("name must not be empty")]
    InvalidName,
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),
}

pub(crate) fn out_of_range(target: &'static str, index: usize, len: usize) -> EditError {
    EditError::IndexOutOfRange { target, index, len }
}
