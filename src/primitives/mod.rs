//! Primitives - Component building blocks.
//!
//! - [`CodeField`] - Row of single-character boxes acting as one input
//!
//! Components return a [`Cleanup`] from every subscription so hosts can
//! detach observers when a screen goes away.

mod code_field;

pub use code_field::{ChangeListener, CodeField};

/// Cleanup function returned by subscriptions.
///
/// Call this to detach the subscriber.
pub type Cleanup = Box<dyn FnOnce()>;
