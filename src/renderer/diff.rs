//! Differential renderer.
//!
//! The DiffRenderer compares the current frame to the previous frame and only
//! outputs cells that have changed, using crossterm commands.
//!
//! # Algorithm
//!
//! 1. For each cell in the new frame:
//!    - If previous frame exists and cell is unchanged: skip
//!    - Otherwise: move there, set style, print the character
//! 2. Flush the writer once
//! 3. Store current frame as previous for next comparison

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};

use super::buffer::FrameBuffer;
use crate::types::{Attr, Cell, Rgba};

/// Differential renderer writing to any `Write` sink.
pub struct DiffRenderer<W: Write> {
    out: W,
    previous: Option<FrameBuffer>,
}

impl<W: Write> DiffRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, previous: None }
    }

    /// Render a frame, outputting only changed cells.
    ///
    /// Returns true if any cells were changed.
    pub fn render(&mut self, buffer: &FrameBuffer) -> io::Result<bool> {
        let mut has_changes = false;

        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                let Some(cell) = buffer.get(x, y) else { continue };

                let changed = match &self.previous {
                    Some(prev) if prev.width() == buffer.width() && prev.height() == buffer.height() => {
                        prev.get(x, y) != Some(cell)
                    }
                    _ => true, // No previous or size changed
                };

                if changed {
                    has_changes = true;
                    write_cell(&mut self.out, x, y, cell)?;
                }
            }
        }

        if has_changes {
            queue!(self.out, SetAttribute(Attribute::Reset))?;
        }
        self.out.flush()?;

        self.previous = Some(buffer.clone());
        Ok(has_changes)
    }

    /// Invalidate the previous frame.
    ///
    /// Next render will be a full redraw.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Check if we have a previous frame to diff against.
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }
}

fn to_color(color: Rgba) -> Color {
    if color.is_terminal_default() {
        Color::Reset
    } else {
        Color::Rgb {
            r: color.r as u8,
            g: color.g as u8,
            b: color.b as u8,
        }
    }
}

fn write_cell<W: Write>(out: &mut W, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
    queue!(
        out,
        MoveTo(x, y),
        SetAttribute(Attribute::Reset),
        SetForegroundColor(to_color(cell.fg)),
        SetBackgroundColor(to_color(cell.bg))
    )?;

    for (flag, attribute) in [
        (Attr::BOLD, Attribute::Bold),
        (Attr::DIM, Attribute::Dim),
        (Attr::UNDERLINE, Attribute::Underlined),
        (Attr::INVERSE, Attribute::Reverse),
    ] {
        if cell.attrs.contains(flag) {
            queue!(out, SetAttribute(attribute))?;
        }
    }

    queue!(out, Print(cell.char))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_renderer_creation() {
        let renderer = DiffRenderer::new(Vec::new());
        assert!(!renderer.has_previous());
    }

    #[test]
    fn test_first_frame_draws_everything() {
        let mut renderer = DiffRenderer::new(Vec::new());
        let mut buffer = FrameBuffer::new(3, 1);
        buffer.draw_text(0, 0, "abc", Rgba::WHITE, Attr::NONE);

        assert!(renderer.render(&buffer).unwrap());
        let output = String::from_utf8_lossy(renderer.writer()).to_string();
        assert!(output.contains('a'));
        assert!(output.contains('b'));
        assert!(output.contains('c'));
    }

    #[test]
    fn test_only_changed_cells_are_written() {
        let mut renderer = DiffRenderer::new(Vec::new());
        let mut buffer = FrameBuffer::new(3, 1);
        buffer.draw_text(0, 0, "abc", Rgba::WHITE, Attr::NONE);
        renderer.render(&buffer).unwrap();

        // Same frame: nothing to do
        renderer.writer_mut().clear();
        assert!(!renderer.render(&buffer).unwrap());
        assert!(renderer.writer().is_empty());

        buffer.draw_text(1, 0, "z", Rgba::WHITE, Attr::NONE);
        assert!(renderer.render(&buffer).unwrap());
        let output = String::from_utf8_lossy(renderer.writer()).to_string();
        assert!(output.contains('z'));
        assert!(!output.contains('a'));
        assert!(!output.contains('c'));
    }

    #[test]
    fn test_invalidate() {
        let mut renderer = DiffRenderer::new(Vec::new());
        let buffer = FrameBuffer::new(10, 10);

        renderer.render(&buffer).unwrap();
        assert!(renderer.has_previous());

        renderer.invalidate();
        assert!(!renderer.has_previous());
    }
}
