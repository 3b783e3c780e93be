//! Keyboard - Terminal text surface for a code field.
//!
//! Turns key presses on a focused box into the two events the controller
//! understands: a proposed text for the box, and "delete pressed".
//!
//! # Routing
//!
//! - printable character: proposed as the box's new text (the terminal
//!   surface replaces the box content rather than appending to it)
//! - Backspace / Delete: reported as a delete key first, so an empty box
//!   retreats; then, if the box held a character, the empty text is
//!   proposed to clear it
//! - anything else, and chords with Ctrl/Alt/Meta: not consumed
//!
//! # Example
//!
//! ```ignore
//! use code_field::state::keyboard::{route_key, KeyboardEvent};
//!
//! let consumed = route_key(&mut field, 0, &KeyboardEvent::new("7"), &mut focus);
//! ```

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::primitives::CodeField;
use crate::state::focus::FocusHost;

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Create empty modifiers
    pub fn none() -> Self {
        Self::default()
    }

    /// Create modifiers with ctrl
    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }

    /// Create modifiers with alt
    pub fn alt() -> Self {
        Self { alt: true, ..Self::default() }
    }

    /// Whether a command chord is held (shift alone does not count).
    pub fn is_chord(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        Self {
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
            shift: mods.contains(KeyModifiers::SHIFT),
            meta: mods.contains(KeyModifiers::SUPER) || mods.contains(KeyModifiers::META),
        }
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

impl From<KeyEventKind> for KeyState {
    fn from(kind: KeyEventKind) -> Self {
        match kind {
            KeyEventKind::Press => Self::Press,
            KeyEventKind::Repeat => Self::Repeat,
            KeyEventKind::Release => Self::Release,
        }
    }
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed (e.g., "a", "Backspace", "Tab")
    pub key: String,
    /// Modifier keys state
    pub modifiers: Modifiers,
    /// Press/repeat/release state
    pub state: KeyState,
}

impl KeyboardEvent {
    /// Create a simple key press event
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            state: KeyState::Press,
        }
    }

    /// Check if this is a press event
    pub fn is_press(&self) -> bool {
        self.state == KeyState::Press
    }

    /// Backspace or Delete.
    pub fn is_delete(&self) -> bool {
        self.key == "Backspace" || self.key == "Delete"
    }

    /// The single printable character this key produces, if any.
    pub fn printable(&self) -> Option<char> {
        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_control() => Some(c),
            _ => None,
        }
    }
}

impl From<KeyEvent> for KeyboardEvent {
    fn from(event: KeyEvent) -> Self {
        let key = match event.code {
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "BackTab".to_string(),
            KeyCode::Esc => "Escape".to_string(),
            KeyCode::Left => "ArrowLeft".to_string(),
            KeyCode::Right => "ArrowRight".to_string(),
            KeyCode::Up => "ArrowUp".to_string(),
            KeyCode::Down => "ArrowDown".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            other => format!("{other:?}"),
        };

        Self {
            key,
            modifiers: event.modifiers.into(),
            state: event.kind.into(),
        }
    }
}

// =============================================================================
// ROUTING
// =============================================================================

/// Route a key event on box `index` of `field`.
/// Returns true if the event was consumed.
pub fn route_key(
    field: &mut CodeField,
    index: usize,
    event: &KeyboardEvent,
    host: &mut dyn FocusHost,
) -> bool {
    if event.state == KeyState::Release || event.modifiers.is_chord() {
        return false;
    }

    if event.is_delete() {
        let was_filled = field.segment(index).is_some_and(|s| !s.is_empty());
        field.on_delete_key(index, host);
        if was_filled {
            field.on_value_changed(index, "", host);
        }
        return true;
    }

    // Holding a character key should not spray it across boxes
    if event.state == KeyState::Repeat {
        return false;
    }

    match event.printable() {
        Some(c) => {
            let mut buf = [0u8; 4];
            field.on_value_changed(index, c.encode_utf8(&mut buf), host);
            true
        }
        None => false,
    }
}

// =============================================================================
// TESTS
// =============================================================================
