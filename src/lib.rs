//! # code-field
//!
//! Segmented code entry for terminal UIs: a row of single-character boxes
//! (digits or any character) that behaves like one text input, as used for
//! OTP, PIN and verification codes.
//!
//! ## Architecture
//!
//! The [`CodeField`] controller owns one [`Segment`] and one [`FocusHandle`]
//! per box. Every edit event updates one segment, recomputes the aggregate
//! value and, when a box was filled or delete was pressed on an empty box,
//! asks the host's [`FocusHost`] to move focus:
//!
//! ```text
//! key event → route_key → on_value_changed / on_delete_key
//!                               │                │
//!                          aggregate + listeners  FocusHost::request_focus
//!                                                 │
//!                          FocusQueue::deliver → on_focus_changed
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Field props, character classes, cell primitives
//! - [`state`] - Segments, focus routing, keyboard routing, snapshots
//! - [`primitives`] - The [`CodeField`] controller
//! - [`layout`] - Taffy row layout for the boxes
//! - [`renderer`] - Frame buffer and diff renderer

pub mod error;
pub mod layout;
pub mod primitives;
pub mod renderer;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::FieldError;

pub use layout::{layout_row, BoxRect, RowLayout};

pub use primitives::{ChangeListener, Cleanup, CodeField};

pub use renderer::{DiffRenderer, FrameBuffer};

pub use state::{
    // Segments
    Segment, SegmentValue, SegmentView, Transition,
    // Focus
    backward_target, forward_target, FieldId, FocusHandle, FocusHost, FocusQueue,
    // Keyboard
    route_key, KeyState, KeyboardEvent, Modifiers,
    // Restoration
    Snapshot,
};
