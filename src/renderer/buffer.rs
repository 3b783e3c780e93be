//! Frame buffer - A grid of cells plus drawing helpers for code fields.

use crate::layout::RowLayout;
use crate::primitives::CodeField;
use crate::types::{Attr, Cell, Rgba};

/// A 2D grid of terminal cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a blank buffer.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.offset(x, y).map(|i| &self.cells[i])
    }

    /// Write a cell. Out-of-bounds writes are clipped.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.offset(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Draw a single line of text starting at (x, y), clipped to the buffer.
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, fg: Rgba, attrs: Attr) {
        for (i, ch) in text.chars().enumerate() {
            let Some(cx) = x.checked_add(i as u16) else { break };
            self.set(cx, y, Cell { char: ch, fg, bg: Rgba::TERMINAL_DEFAULT, attrs });
        }
    }

    /// Text content of row `y`, for inspection.
    pub fn line(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|c| c.char)
            .collect()
    }

    /// Draw every box of `field` at `origin`, using positions from `row`.
    ///
    /// Empty unfocused boxes show the placeholder glyph. The focused box
    /// shows an inverse block cursor at its center.
    pub fn draw_field(&mut self, field: &CodeField, row: &RowLayout, origin: (u16, u16)) {
        let (ox, oy) = origin;

        for (index, rect) in row.boxes.iter().enumerate() {
            let Some(view) = field.view(index) else { break };
            let focused = field.segment(index).is_some_and(|s| s.is_focused());

            let x0 = ox.saturating_add(rect.x);
            let y0 = oy.saturating_add(rect.y);
            if x0 >= self.width || y0 >= self.height {
                continue;
            }
            let x1 = x0.saturating_add(rect.width.saturating_sub(1));
            let y1 = y0.saturating_add(rect.height.saturating_sub(1));

            let fill = Cell {
                char: ' ',
                fg: Rgba::ACCENT,
                bg: Rgba::BOX_BACKGROUND,
                attrs: Attr::NONE,
            };
            for y in y0..=y1 {
                for x in x0..=x1 {
                    self.set(x, y, fill);
                }
            }

            if rect.width >= 3 && rect.height >= 3 {
                let border = |ch| Cell { char: ch, ..fill };
                for x in x0.saturating_add(1)..x1 {
                    self.set(x, y0, border('─'));
                    self.set(x, y1, border('─'));
                }
                for y in y0.saturating_add(1)..y1 {
                    self.set(x0, y, border('│'));
                    self.set(x1, y, border('│'));
                }
                self.set(x0, y0, border('┌'));
                self.set(x1, y0, border('┐'));
                self.set(x0, y1, border('└'));
                self.set(x1, y1, border('┘'));
            }

            let (cx, cy) = rect.center();
            let glyph = view.text.chars().next().or(view.placeholder).unwrap_or(' ');
            let attrs = if focused { Attr::INVERSE } else { Attr::NONE };
            self.set(
                ox.saturating_add(cx),
                oy.saturating_add(cy),
                Cell { char: glyph, attrs, ..fill },
            );
        }
    }
}
