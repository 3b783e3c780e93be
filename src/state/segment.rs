//! Segment - One single-character box of a code field.
//!
//! Each segment is a two-state machine (`Empty` / `Filled(c)`) driven by
//! "proposed text" events coming from the text surface. The segment only
//! decides what happens to its own value; focus routing is the controller's
//! job and keys off the returned [`Transition`].

use crate::types::{CharacterClass, UnsetRendering};

// =============================================================================
// VALUE
// =============================================================================

/// Value held by a segment.
///
/// `Unset` and `Blank` are both the empty state. They differ only in how they
/// contribute to the aggregate: a box that was never filled (or a digit box
/// that was cleared) is `Unset`, while a character box cleared by the user
/// holds an empty string and is `Blank`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentValue {
    #[default]
    Unset,
    Blank,
    Filled(char),
}

impl SegmentValue {
    pub fn is_empty(&self) -> bool {
        !matches!(self, Self::Filled(_))
    }

    /// The stored character, if any.
    pub fn char(&self) -> Option<char> {
        match *self {
            Self::Filled(c) => Some(c),
            _ => None,
        }
    }

    /// Append this value's contribution to the aggregate.
    pub(crate) fn write_to(&self, out: &mut String, unset: UnsetRendering) {
        match *self {
            Self::Unset => out.push_str(unset.as_str()),
            Self::Blank => {}
            Self::Filled(c) => out.push(c),
        }
    }
}

// =============================================================================
// TRANSITION
// =============================================================================

/// Outcome of proposing new text to a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Candidate was too long or outside the character class. Value kept.
    Rejected,
    /// `Empty` → `Filled(c)`. The only transition that advances focus.
    Filled(char),
    /// `Filled(from)` → `Filled(to)` (overtyping).
    Replaced { from: char, to: char },
    /// `Filled` → `Empty`.
    Cleared,
    /// Accepted, but the value did not change.
    Unchanged,
}

impl Transition {
    /// Whether the segment's value changed.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Filled(_) | Self::Replaced { .. } | Self::Cleared)
    }

    /// Whether this transition requests focus on the next segment.
    pub fn advances_focus(&self) -> bool {
        matches!(self, Self::Filled(_))
    }
}

// =============================================================================
// SEGMENT
// =============================================================================

/// What the text surface should display for a segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentView {
    /// Text inside the box (`""` or the single character).
    pub text: String,
    /// Cursor position within `text`: 1 when filled, 0 otherwise.
    pub cursor: usize,
    /// Glyph to draw when the box is empty and not focused.
    pub placeholder: Option<char>,
}

/// One box of the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segment {
    value: SegmentValue,
    focused: bool,
}

impl Segment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> SegmentValue {
        self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub(crate) fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub(crate) fn set_value(&mut self, value: SegmentValue) {
        self.value = value;
    }

    /// Apply a proposed text edit.
    ///
    /// Candidates longer than one character are rejected. An empty candidate
    /// clears the box: digit boxes go back to `Unset`, character boxes become
    /// `Blank`.
    pub fn propose(&mut self, candidate: &str, class: CharacterClass) -> Transition {
        let mut chars = candidate.chars();
        let first = chars.next();
        if chars.next().is_some() {
            return Transition::Rejected;
        }

        match (first, self.value) {
            (None, SegmentValue::Filled(_)) => {
                self.value = match class {
                    CharacterClass::Digits => SegmentValue::Unset,
                    CharacterClass::Any => SegmentValue::Blank,
                };
                Transition::Cleared
            }
            (None, _) => Transition::Unchanged,
            (Some(c), _) if !class.accepts(c) => Transition::Rejected,
            (Some(c), SegmentValue::Filled(old)) if old == c => Transition::Unchanged,
            (Some(c), SegmentValue::Filled(old)) => {
                self.value = SegmentValue::Filled(c);
                Transition::Replaced { from: old, to: c }
            }
            (Some(c), _) => {
                self.value = SegmentValue::Filled(c);
                Transition::Filled(c)
            }
        }
    }

    /// Render state for the text surface.
    pub fn view(&self, placeholder: char) -> SegmentView {
        match self.value {
            SegmentValue::Filled(c) => SegmentView {
                text: c.to_string(),
                cursor: 1,
                placeholder: None,
            },
            _ => SegmentView {
                text: String::new(),
                cursor: 0,
                placeholder: (!self.focused).then_some(placeholder),
            },
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let segment = Segment::new();
        assert_eq!(segment.value(), SegmentValue::Unset);
        assert!(segment.is_empty());
        assert!(!segment.is_focused());
    }

    #[test]
    fn test_digit_fill() {
        let mut segment = Segment::new();
        assert_eq!(segment.propose("7", CharacterClass::Digits), Transition::Filled('7'));
        assert_eq!(segment.value(), SegmentValue::Filled('7'));
    }

    #[test]
    fn test_digit_rejects_letters() {
        let mut segment = Segment::new();
        for candidate in ["a", "-", " ", "x"] {
            assert_eq!(segment.propose(candidate, CharacterClass::Digits), Transition::Rejected);
            assert_eq!(segment.value(), SegmentValue::Unset);
        }

        segment.propose("3", CharacterClass::Digits);
        assert_eq!(segment.propose("b", CharacterClass::Digits), Transition::Rejected);
        assert_eq!(segment.value(), SegmentValue::Filled('3'));
    }

    #[test]
    fn test_rejects_long_candidates() {
        let mut segment = Segment::new();
        assert_eq!(segment.propose("12", CharacterClass::Digits), Transition::Rejected);
        assert_eq!(segment.propose("ab", CharacterClass::Any), Transition::Rejected);
        assert!(segment.is_empty());
    }

    #[test]
    fn test_overtype_replaces() {
        let mut segment = Segment::new();
        segment.propose("a", CharacterClass::Any);
        let transition = segment.propose("b", CharacterClass::Any);
        assert_eq!(transition, Transition::Replaced { from: 'a', to: 'b' });
        assert!(!transition.advances_focus());
        assert_eq!(segment.value(), SegmentValue::Filled('b'));

        assert_eq!(segment.propose("b", CharacterClass::Any), Transition::Unchanged);
    }

    #[test]
    fn test_clear_differs_by_class() {
        let mut digit = Segment::new();
        digit.propose("1", CharacterClass::Digits);
        assert_eq!(digit.propose("", CharacterClass::Digits), Transition::Cleared);
        assert_eq!(digit.value(), SegmentValue::Unset);

        let mut letter = Segment::new();
        letter.propose("q", CharacterClass::Any);
        assert_eq!(letter.propose("", CharacterClass::Any), Transition::Cleared);
        assert_eq!(letter.value(), SegmentValue::Blank);
    }

    #[test]
    fn test_empty_candidate_on_empty_segment() {
        let mut segment = Segment::new();
        assert_eq!(segment.propose("", CharacterClass::Any), Transition::Unchanged);
        assert_eq!(segment.value(), SegmentValue::Unset);
    }

    #[test]
    fn test_contribution() {
        let mut out = String::new();
        SegmentValue::Unset.write_to(&mut out, UnsetRendering::Null);
        SegmentValue::Blank.write_to(&mut out, UnsetRendering::Null);
        SegmentValue::Filled('4').write_to(&mut out, UnsetRendering::Null);
        SegmentValue::Unset.write_to(&mut out, UnsetRendering::Blank);
        assert_eq!(out, "null4");
    }

    #[test]
    fn test_view_placeholder_only_when_unfocused() {
        let mut segment = Segment::new();
        assert_eq!(segment.view('-').placeholder, Some('-'));

        segment.set_focused(true);
        let view = segment.view('-');
        assert_eq!(view.placeholder, None);
        assert_eq!(view.cursor, 0);

        segment.propose("5", CharacterClass::Digits);
        segment.set_focused(false);
        let view = segment.view('-');
        assert_eq!(view.text, "5");
        assert_eq!(view.cursor, 1);
        assert_eq!(view.placeholder, None);
    }
}
