//! Error types for code-field.
//!
//! Rejected keystrokes are not errors (see [`crate::Transition::Rejected`]).
//! These cover construction, restoration and layout failures only.

use thiserror::Error;

/// Errors raised while building, restoring or laying out a field.
#[derive(Debug, Error)]
pub enum FieldError {
    /// A field needs at least one box.
    #[error("code field length must be at least 1, got {length}")]
    InvalidLength { length: usize },

    /// Snapshot does not match the field's box count.
    #[error("snapshot has {found} segments, field has {expected}")]
    SnapshotLength { expected: usize, found: usize },

    /// Snapshot holds a character the field's class rejects.
    #[error("segment {index} cannot hold {ch:?}")]
    InvalidCharacter { index: usize, ch: char },

    #[error("malformed snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("layout failed: {0}")]
    Layout(#[from] taffy::TaffyError),
}
