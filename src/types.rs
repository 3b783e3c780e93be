//! Core types for code-field.
//!
//! Field configuration (props) plus the small set of cell primitives the
//! renderer understands.

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Special value: r=-1 means "terminal default" (let terminal pick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub a: i16,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as i16,
            g: g as i16,
            b: b as i16,
            a: a as i16,
        }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Terminal default color (let terminal decide).
    pub const TERMINAL_DEFAULT: Self = Self {
        r: -1,
        g: -1,
        b: -1,
        a: -1,
    };

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Accent used for borders, digits, cursor and placeholder.
    pub const ACCENT: Self = Self::rgb(0x2e, 0x7d, 0x32);
    /// Fill behind each box.
    pub const BOX_BACKGROUND: Self = Self::rgb(0xee, 0xee, 0xee);

    /// Check if this is the terminal default color.
    #[inline]
    pub const fn is_terminal_default(&self) -> bool {
        self.r == -1
    }
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield for efficient storage and comparison.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::INVERSE`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const UNDERLINE = 1 << 2;
        const INVERSE = 1 << 3;
    }
}

// =============================================================================
// Cell - The atomic unit of terminal rendering
// =============================================================================

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Character shown in the cell (' ' when blank).
    pub char: char,
    /// Foreground color.
    pub fg: Rgba,
    /// Background color.
    pub bg: Rgba,
    /// Attribute flags.
    pub attrs: Attr,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: ' ',
            fg: Rgba::TERMINAL_DEFAULT,
            bg: Rgba::TERMINAL_DEFAULT,
            attrs: Attr::NONE,
        }
    }
}

// =============================================================================
// Field configuration
// =============================================================================

/// Which characters a segment accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharacterClass {
    /// ASCII digits `0-9` only.
    #[default]
    Digits,
    /// Any single character.
    Any,
}

impl CharacterClass {
    /// Whether `ch` may be stored in a segment of this class.
    pub fn accepts(self, ch: char) -> bool {
        match self {
            Self::Digits => ch.is_ascii_digit(),
            Self::Any => true,
        }
    }
}

/// How an unset segment contributes to the aggregate value.
///
/// `Null` keeps the legacy behaviour where an absent value was stringified
/// as the literal text `"null"`. `Blank` contributes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnsetRendering {
    #[default]
    Null,
    Blank,
}

impl UnsetRendering {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Blank => "",
        }
    }
}

/// Props for a code field.
///
/// Only `length`, `character_class` and `unset_rendering` affect behaviour.
/// The remaining fields are layout/render parameters passed through to the
/// layout and renderer modules.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldProps {
    /// Number of boxes. Must be at least 1.
    pub length: usize,
    pub character_class: CharacterClass,
    pub unset_rendering: UnsetRendering,
    /// Box width in cells (border included).
    pub box_width: u16,
    /// Box height in cells (border included).
    pub box_height: u16,
    /// Font size hint for hosts that can scale text. Unused by the terminal renderer.
    pub font_size: f32,
    /// Gap between neighbouring boxes.
    pub spacing: u16,
    /// Inset around the whole row.
    pub padding: u16,
    /// Glyph shown in an empty, unfocused box.
    pub placeholder: char,
}

impl Default for FieldProps {
    fn default() -> Self {
        Self {
            length: 4,
            character_class: CharacterClass::Digits,
            unset_rendering: UnsetRendering::Null,
            box_width: 5,
            box_height: 3,
            font_size: 36.0,
            spacing: 1,
            padding: 1,
            placeholder: '-',
        }
    }
}

impl FieldProps {
    /// Digits-only field with `length` boxes.
    pub fn digits(length: usize) -> Self {
        Self {
            length,
            character_class: CharacterClass::Digits,
            ..Default::default()
        }
    }

    /// Any-character field with `length` boxes.
    pub fn characters(length: usize) -> Self {
        Self {
            length,
            character_class: CharacterClass::Any,
            ..Default::default()
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_class() {
        assert!(CharacterClass::Digits.accepts('0'));
        assert!(CharacterClass::Digits.accepts('9'));
        assert!(!CharacterClass::Digits.accepts('a'));
        assert!(!CharacterClass::Digits.accepts(' '));
        // Non-ASCII digits are rejected
        assert!(!CharacterClass::Digits.accepts('٣'));
    }

    #[test]
    fn test_any_class() {
        for ch in ['a', 'Z', '7', '#', ' ', 'é'] {
            assert!(CharacterClass::Any.accepts(ch));
        }
    }

    #[test]
    fn test_sample_props() {
        let digits = FieldProps::digits(4);
        assert_eq!(digits.length, 4);
        assert_eq!(digits.character_class, CharacterClass::Digits);
        assert_eq!(digits.placeholder, '-');

        let chars = FieldProps::characters(5);
        assert_eq!(chars.length, 5);
        assert_eq!(chars.character_class, CharacterClass::Any);
        assert_eq!(chars.unset_rendering, UnsetRendering::Null);
    }

    #[test]
    fn test_unset_rendering_text() {
        assert_eq!(UnsetRendering::Null.as_str(), "null");
        assert_eq!(UnsetRendering::Blank.as_str(), "");
    }
}
