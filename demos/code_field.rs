//! Two code fields on one screen: 4 digits and 5 characters.
//!
//! The current value of each field is shown above its boxes. Tab / Shift+Tab
//! switch between fields, Esc quits.
//!
//! Run with: cargo run --example code_field

use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute};

use code_field::{
    layout_row, route_key, Attr, CodeField, DiffRenderer, FieldProps, FocusQueue, FrameBuffer,
    KeyboardEvent, Rgba, RowLayout,
};

struct Entry {
    label: &'static str,
    field: CodeField,
    focus: FocusQueue,
    row: RowLayout,
}

impl Entry {
    fn new(label: &'static str, props: FieldProps) -> Result<Self> {
        let row = layout_row(&props)?;
        Ok(Self {
            label,
            field: CodeField::new(props)?,
            focus: FocusQueue::new(),
            row,
        })
    }
}

fn draw(entries: &[Entry], width: u16, height: u16) -> FrameBuffer {
    let mut buf = FrameBuffer::new(width, height);
    let mut y = 1;
    for entry in entries {
        buf.draw_text(2, y, entry.label, Rgba::WHITE, Attr::BOLD);
        buf.draw_text(2, y + 1, &entry.field.aggregate(), Rgba::ACCENT, Attr::NONE);
        buf.draw_field(&entry.field, &entry.row, (1, y + 2));
        y += entry.row.height + 4;
    }
    buf.draw_text(2, y, "Tab: switch field   Esc: quit", Rgba::WHITE, Attr::DIM);
    buf
}

fn run(renderer: &mut DiffRenderer<Stdout>) -> Result<()> {
    let mut entries = [
        Entry::new("Code (number)", FieldProps::digits(4))?,
        Entry::new("Code (character)", FieldProps::characters(5))?,
    ];
    let mut active = 0;
    {
        let Entry { field, focus, .. } = &mut entries[active];
        focus.focus_index(field, 0);
    }

    loop {
        let (width, height) = terminal::size()?;
        renderer.render(&draw(&entries, width, height))?;

        let Event::Key(key) = event::read()? else { continue };
        if key.kind == KeyEventKind::Release {
            continue;
        }

        match key.code {
            KeyCode::Esc => return Ok(()),
            KeyCode::Tab | KeyCode::BackTab => {
                let Entry { field, focus, .. } = &mut entries[active];
                focus.blur(field);
                active = (active + 1) % entries.len();
                let Entry { field, focus, .. } = &mut entries[active];
                focus.focus_index(field, 0);
            }
            _ => {
                let Entry { field, focus, .. } = &mut entries[active];
                if let Some(index) = focus.focused() {
                    route_key(field, index, &KeyboardEvent::from(key), focus);
                    focus.deliver(field);
                }
            }
        }
    }
}

fn main() -> Result<()> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let mut renderer = DiffRenderer::new(stdout);
    let result = run(&mut renderer);

    let stdout = renderer.writer_mut();
    execute!(stdout, cursor::Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}
