//! State Module - Per-box state and the systems around it
//!
//! - **Segment** - One box's value and its edit state machine
//! - **Focus** - Focus handles, routing arithmetic, queueing focus host
//! - **Keyboard** - Key events and routing into a field
//! - **Restore** - Snapshots for state restoration

pub mod focus;
pub mod keyboard;
pub mod restore;
pub mod segment;

pub use focus::{backward_target, forward_target, FieldId, FocusHandle, FocusHost, FocusQueue};
pub use keyboard::{route_key, KeyState, KeyboardEvent, Modifiers};
pub use restore::Snapshot;
pub use segment::{Segment, SegmentValue, SegmentView, Transition};
