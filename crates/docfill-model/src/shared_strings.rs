use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while resolving a cell through the shared-string pool.
///
/// These are data-integrity errors: a well-formed package never references an
/// index outside the pool. They abort the enclosing rewrite rather than being
/// skipped, since continuing would propagate a corrupt column mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SharedStringError {
    #[error("shared string index {index} out of bounds (pool has {len} entries)")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("shared-string cell has no index value")]
    MissingIndex,
    #[error("shared-string cell index {raw:?} is not an integer")]
    InvalidIndex { raw: String },
}

/// The deduplicated string pool of an embedded workbook
/// (`xl/sharedStrings.xml`).
///
/// Cells of kind shared-string store an index into `items`. A
/// synchronization pass may probe the pool but never reorders or removes
/// entries; untouched cells elsewhere in the workbook may reference existing
/// indices.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SharedStrings {
    pub items: Vec<String>,
}

/// How a string value is represented in a rewritten cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellAssignment {
    /// The pool already holds the value; the cell references it by index.
    Shared(usize),
    /// One-off value carried inline in the cell itself.
    Inline(String),
}

impl SharedStrings {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find the pool index of `value` by exact equality. Linear scan; pools
    /// in this domain stay small.
    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.items.iter().position(|item| item == value)
    }

    /// Resolve a pool index back to its string.
    pub fn resolve(&self, index: usize) -> Result<&str, SharedStringError> {
        self.items
            .get(index)
            .map(String::as_str)
            .ok_or(SharedStringError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            })
    }

    /// Produce the cell representation for a string value: a shared-string
    /// reference when the pool already holds it, an inline string otherwise.
    ///
    /// The pool is never grown here. One-off values trade a small size cost
    /// for stable indices across the rest of the workbook.
    pub fn intern_or_inline(&self, value: &str) -> CellAssignment {
        match self.index_of(value) {
            Some(index) => CellAssignment::Shared(index),
            None => CellAssignment::Inline(value.to_string()),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for SharedStrings {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}
