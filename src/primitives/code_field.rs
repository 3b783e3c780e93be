//! Code Field - Composite segmented input controller.
//!
//! A row of single-character boxes that behaves like one text input. The
//! controller owns the boxes and their focus handles, derives the aggregate
//! string after every mutation, and decides where focus goes next:
//!
//! - filling an empty box requests focus on the next box
//! - delete on an already-empty box requests focus on the previous box
//! - overtyping, clearing and rejected input never move focus
//!
//! # Example
//!
//! ```ignore
//! use code_field::{CodeField, FieldProps, FocusQueue};
//!
//! let mut field = CodeField::new(FieldProps::digits(4))?;
//! let mut focus = FocusQueue::new();
//!
//! let cleanup = field.subscribe(|value| println!("code: {value}"));
//!
//! for (i, digit) in ["1", "2", "3", "9"].iter().enumerate() {
//!     field.on_value_changed(i, digit, &mut focus);
//!     focus.deliver(&mut field);
//! }
//! assert_eq!(field.aggregate(), "1239");
//! cleanup();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use spark_signals::{signal, Signal};

use crate::error::FieldError;
use crate::state::focus::{backward_target, forward_target, FieldId, FocusHandle, FocusHost};
use crate::state::restore::Snapshot;
use crate::state::segment::{Segment, SegmentValue, SegmentView, Transition};
use crate::types::FieldProps;

use super::Cleanup;

/// Listener notified with the new aggregate after every mutation.
pub type ChangeListener = Rc<dyn Fn(&str)>;

// =============================================================================
// LISTENER REGISTRY
// =============================================================================

#[derive(Default)]
struct ListenerRegistry {
    listeners: Vec<(usize, ChangeListener)>,
    next_id: usize,
}

impl ListenerRegistry {
    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

// =============================================================================
// CODE FIELD
// =============================================================================

/// The composite input controller.
///
/// Scoped to the screen hosting it: build it when the screen appears and
/// drop it when the screen goes away.
pub struct CodeField {
    id: FieldId,
    props: FieldProps,
    segments: Vec<Segment>,
    handles: Vec<FocusHandle>,
    aggregate: Signal<String>,
    listeners: Rc<RefCell<ListenerRegistry>>,
}

impl CodeField {
    /// Build a field with `props.length` unset boxes.
    ///
    /// Fails with [`FieldError::InvalidLength`] when the length is zero.
    pub fn new(props: FieldProps) -> Result<Self, FieldError> {
        if props.length == 0 {
            return Err(FieldError::InvalidLength { length: props.length });
        }

        let id = FieldId::next();
        let segments = vec![Segment::new(); props.length];
        let handles = (0..props.length).map(|i| FocusHandle::new(id, i)).collect();
        let initial = project(&segments, &props);

        debug!(
            "code field {:?}: {} boxes, {:?}",
            id, props.length, props.character_class
        );

        Ok(Self {
            id,
            props,
            segments,
            handles,
            aggregate: signal(initial),
            listeners: Rc::new(RefCell::new(ListenerRegistry::default())),
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn props(&self) -> &FieldProps {
        &self.props
    }

    /// Number of boxes.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; a field has at least one box.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn handle(&self, index: usize) -> Option<FocusHandle> {
        self.handles.get(index).copied()
    }

    pub fn handles(&self) -> &[FocusHandle] {
        &self.handles
    }

    /// Render state for box `index`.
    pub fn view(&self, index: usize) -> Option<SegmentView> {
        self.segments
            .get(index)
            .map(|s| s.view(self.props.placeholder))
    }

    /// Box that last reported focus, if any.
    pub fn focused_index(&self) -> Option<usize> {
        self.segments.iter().position(Segment::is_focused)
    }

    /// Current aggregate value.
    pub fn aggregate(&self) -> String {
        self.aggregate.get()
    }

    /// Reactive handle on the aggregate value.
    pub fn aggregate_signal(&self) -> &Signal<String> {
        &self.aggregate
    }

    /// Whether every box holds a character.
    ///
    /// Convenience for hosts. The field never validates the code itself.
    pub fn is_complete(&self) -> bool {
        self.segments.iter().all(|s| !s.is_empty())
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Text surface of box `index` proposes `candidate` as its new text.
    pub fn on_value_changed(
        &mut self,
        index: usize,
        candidate: &str,
        host: &mut dyn FocusHost,
    ) -> Transition {
        let class = self.props.character_class;
        let Some(segment) = self.segments.get_mut(index) else {
            warn!("code field {:?}: edit for unknown box {}", self.id, index);
            return Transition::Rejected;
        };

        let transition = segment.propose(candidate, class);
        match transition {
            Transition::Rejected => {
                debug!("code field {:?}: box {} rejected {:?}", self.id, index, candidate);
            }
            t if t.is_mutation() => self.refresh(),
            _ => {}
        }

        if transition.advances_focus() {
            let target = forward_target(index, self.len());
            debug!("code field {:?}: box {} filled, focus -> {}", self.id, index, target);
            host.request_focus(self.handles[target]);
        }

        transition
    }

    /// Delete/backspace was pressed on box `index`.
    ///
    /// Only an already-empty box retreats; deleting a character is reported
    /// separately as an empty candidate. Returns true when focus was
    /// requested.
    pub fn on_delete_key(&mut self, index: usize, host: &mut dyn FocusHost) -> bool {
        let Some(segment) = self.segments.get(index) else {
            warn!("code field {:?}: delete for unknown box {}", self.id, index);
            return false;
        };
        if !segment.is_empty() {
            return false;
        }

        let target = backward_target(index, self.len());
        debug!("code field {:?}: delete on empty box {}, focus -> {}", self.id, index, target);
        host.request_focus(self.handles[target]);
        true
    }

    /// Focus system reports that box `index` gained or lost focus.
    pub fn on_focus_changed(&mut self, index: usize, focused: bool) {
        match self.segments.get_mut(index) {
            Some(segment) => segment.set_focused(focused),
            None => warn!("code field {:?}: focus change for unknown box {}", self.id, index),
        }
    }

    // -------------------------------------------------------------------------
    // Bulk operations
    // -------------------------------------------------------------------------

    /// Reset every box to unset.
    pub fn clear(&mut self) {
        for segment in &mut self.segments {
            segment.set_value(SegmentValue::Unset);
        }
        self.refresh();
    }

    /// Capture box values for state restoration.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.segments)
    }

    /// Replace box values from a snapshot.
    ///
    /// The snapshot is validated first; on error the field is untouched.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), FieldError> {
        let values = snapshot.values_for(&self.props)?;
        for (segment, value) in self.segments.iter_mut().zip(values) {
            segment.set_value(value);
        }
        self.refresh();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Observers
    // -------------------------------------------------------------------------

    /// Subscribe to aggregate changes.
    /// Returns cleanup function.
    pub fn subscribe<F>(&self, listener: F) -> Cleanup
    where
        F: Fn(&str) + 'static,
    {
        let id = {
            let mut reg = self.listeners.borrow_mut();
            let id = reg.next_id();
            reg.listeners.push((id, Rc::new(listener)));
            id
        };

        let registry = Rc::downgrade(&self.listeners);
        Box::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry
                    .borrow_mut()
                    .listeners
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }

    fn refresh(&mut self) {
        let value = project(&self.segments, &self.props);
        self.aggregate.set(value.clone());

        // Listeners may subscribe or unsubscribe while being notified
        let listeners: Vec<ChangeListener> = self
            .listeners
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(&value);
        }
    }
}

/// Concatenate every box's contribution in index order.
fn project(segments: &[Segment], props: &FieldProps) -> String {
    let mut out = String::with_capacity(segments.len());
    for segment in segments {
        segment.value().write_to(&mut out, props.unset_rendering);
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================
