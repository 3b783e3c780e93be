//! Focus - Focus handles, routing arithmetic and a queueing focus host.
//!
//! The controller never moves focus itself. It hands [`FocusHandle`]s to a
//! [`FocusHost`], and the host later reports the actual focus change back
//! through [`CodeField::on_focus_changed`]. Because the host is borrowed
//! only for the duration of one event handler, it cannot call back into the
//! controller synchronously.
//!
//! # Example
//!
//! ```ignore
//! use code_field::{CodeField, FieldProps, FocusQueue};
//!
//! let mut field = CodeField::new(FieldProps::digits(4))?;
//! let mut focus = FocusQueue::new();
//!
//! focus.focus_index(&mut field, 0);
//! field.on_value_changed(0, "1", &mut focus); // queues a request for box 1
//! focus.deliver(&mut field);                  // box 0 blurs, box 1 focuses
//! ```

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::primitives::CodeField;

// =============================================================================
// HANDLES
// =============================================================================

/// Identity of one code field instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(u64);

static NEXT_FIELD_ID: AtomicU64 = AtomicU64::new(0);

impl FieldId {
    pub(crate) fn next() -> Self {
        Self(NEXT_FIELD_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Capability to focus one box of one field.
///
/// Handles are created with the field and are only meaningful for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FocusHandle {
    field: FieldId,
    index: usize,
}

impl FocusHandle {
    pub(crate) fn new(field: FieldId, index: usize) -> Self {
        Self { field, index }
    }

    /// Box index this handle is bound to.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Field this handle belongs to.
    pub fn field(&self) -> FieldId {
        self.field
    }
}

/// Host-side focus system.
pub trait FocusHost {
    /// Ask for input focus to move to `handle`'s box.
    fn request_focus(&mut self, handle: FocusHandle);
}

// =============================================================================
// ROUTING
// =============================================================================

/// Box that receives focus after `index` is filled.
///
/// Clamped, so the last box targets itself.
pub fn forward_target(index: usize, length: usize) -> usize {
    (index + 1).min(length.saturating_sub(1))
}

/// Box that receives focus after delete on an empty `index`.
///
/// Clamped, so the first box targets itself.
pub fn backward_target(index: usize, length: usize) -> usize {
    index.saturating_sub(1).min(length.saturating_sub(1))
}

// =============================================================================
// FOCUS QUEUE
// =============================================================================

/// Most recent requests kept by [`FocusQueue::requests`].
pub const MAX_REQUEST_LOG: usize = 32;

/// Focus host that defers delivery.
///
/// Requests are queued during event handling and applied by [`deliver`],
/// which fires blur/focus callbacks on the field in that order. Use one
/// queue per field.
///
/// [`deliver`]: FocusQueue::deliver
#[derive(Debug, Default)]
pub struct FocusQueue {
    pending: VecDeque<FocusHandle>,
    focused: Option<usize>,
    requested: Vec<FocusHandle>,
}

impl FocusHost for FocusQueue {
    fn request_focus(&mut self, handle: FocusHandle) {
        self.pending.push_back(handle);
        self.requested.push(handle);
        if self.requested.len() > MAX_REQUEST_LOG {
            self.requested.remove(0);
        }
    }
}

impl FocusQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently focused box, if any.
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Number of requests waiting for delivery.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Recent requests, delivered or not, oldest first.
    ///
    /// Holds at most [`MAX_REQUEST_LOG`] entries.
    pub fn requests(&self) -> &[FocusHandle] {
        &self.requested
    }

    /// Drain the request log.
    pub fn take_requests(&mut self) -> Vec<FocusHandle> {
        std::mem::take(&mut self.requested)
    }

    /// Apply queued requests that belong to `field`.
    ///
    /// Re-requesting the focused box is a no-op. Returns the number of
    /// requests applied.
    pub fn deliver(&mut self, field: &mut CodeField) -> usize {
        let mut applied = 0;
        let mut kept = VecDeque::new();

        while let Some(handle) = self.pending.pop_front() {
            if handle.field() != field.id() {
                kept.push_back(handle);
                continue;
            }
            self.move_focus(field, Some(handle.index()));
            applied += 1;
        }

        self.pending = kept;
        applied
    }

    /// Focus a box immediately (e.g. the user tapped or tabbed into it).
    pub fn focus_now(&mut self, field: &mut CodeField, handle: FocusHandle) {
        if handle.field() == field.id() {
            self.move_focus(field, Some(handle.index()));
        }
    }

    /// Focus box `index` of `field` immediately. Unknown indices are ignored.
    pub fn focus_index(&mut self, field: &mut CodeField, index: usize) {
        if let Some(handle) = field.handle(index) {
            self.focus_now(field, handle);
        }
    }

    /// Remove focus from the field entirely.
    pub fn blur(&mut self, field: &mut CodeField) {
        self.move_focus(field, None);
    }

    fn move_focus(&mut self, field: &mut CodeField, target: Option<usize>) {
        if self.focused == target {
            return;
        }
        if let Some(old) = self.focused {
            field.on_focus_changed(old, false);
        }
        self.focused = target;
        if let Some(new) = target {
            field.on_focus_changed(new, true);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldProps;

    #[test]
    fn test_forward_target() {
        assert_eq!(forward_target(0, 4), 1);
        assert_eq!(forward_target(2, 4), 3);
        assert_eq!(forward_target(3, 4), 3);
        assert_eq!(forward_target(0, 1), 0);
    }

    #[test]
    fn test_backward_target() {
        assert_eq!(backward_target(3, 4), 2);
        assert_eq!(backward_target(1, 4), 0);
        assert_eq!(backward_target(0, 4), 0);
        assert_eq!(backward_target(0, 1), 0);
    }

    #[test]
    fn test_deliver_moves_focus() {
        let mut field = CodeField::new(FieldProps::digits(4)).unwrap();
        let mut focus = FocusQueue::new();

        focus.focus_index(&mut field, 0);
        assert_eq!(field.focused_index(), Some(0));

        focus.request_focus(field.handle(2).unwrap());
        assert_eq!(focus.pending(), 1);
        // Nothing happens until delivery
        assert_eq!(field.focused_index(), Some(0));

        assert_eq!(focus.deliver(&mut field), 1);
        assert_eq!(focus.focused(), Some(2));
        assert_eq!(field.focused_index(), Some(2));
        assert!(!field.segment(0).unwrap().is_focused());
    }

    #[test]
    fn test_deliver_keeps_foreign_handles() {
        let mut a = CodeField::new(FieldProps::digits(4)).unwrap();
        let b = CodeField::new(FieldProps::digits(4)).unwrap();
        let mut focus = FocusQueue::new();

        focus.request_focus(b.handle(1).unwrap());
        assert_eq!(focus.deliver(&mut a), 0);
        assert_eq!(focus.pending(), 1);
        assert_eq!(a.focused_index(), None);
    }

    #[test]
    fn test_request_log_is_bounded() {
        let mut field = CodeField::new(FieldProps::digits(4)).unwrap();
        let mut focus = FocusQueue::new();

        for n in 0..MAX_REQUEST_LOG * 3 {
            focus.request_focus(field.handle(n % 4).unwrap());
            focus.deliver(&mut field);
        }

        assert_eq!(focus.requests().len(), MAX_REQUEST_LOG);
        let last = (MAX_REQUEST_LOG * 3 - 1) % 4;
        assert_eq!(focus.requests().last().map(FocusHandle::index), Some(last));
        assert_eq!(focus.pending(), 0);
    }

    #[test]
    fn test_blur() {
        let mut field = CodeField::new(FieldProps::characters(5)).unwrap();
        let mut focus = FocusQueue::new();

        focus.focus_index(&mut field, 3);
        focus.blur(&mut field);
        assert_eq!(focus.focused(), None);
        assert_eq!(field.focused_index(), None);
    }
}
