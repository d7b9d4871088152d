//! Scrolling text screen

use heapless::Vec;

use super::font::C64;
use super::glyph::{draw_string, ROWS_PER_CHAR};
use crate::dac::{Dac, DisplayError};

/// Character cells per row
pub const SCREEN_COLS: usize = 8;

/// Text rows on screen
pub const SCREEN_ROWS: usize = 4;

/// Banner shown by the `logo` command
pub const LOGO: [&str; SCREEN_ROWS] = ["````````", "Trevor  ", "  Makes!", "````````"];

type Row = Vec<u8, SCREEN_COLS>;

/// Grid of short text rows, top row first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextScreen {
    rows: [Row; SCREEN_ROWS],
}

impl TextScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank every row
    pub fn clear(&mut self) {
        for row in self.rows.iter_mut() {
            row.clear();
        }
    }

    /// Shift all rows up by one and put `message` in the bottom row
    ///
    /// Anything past [`SCREEN_COLS`] bytes is dropped.
    pub fn scroll_and_append(&mut self, message: &[u8]) {
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            *last = truncated(message);
        }
    }

    /// Replace the screen with the logo banner
    pub fn logo(&mut self) {
        for (row, text) in self.rows.iter_mut().zip(LOGO) {
            *row = truncated(text.as_bytes());
        }
    }

    /// Text of one row
    pub fn row(&self, index: usize) -> &[u8] {
        self.rows.get(index).map(|r| r.as_slice()).unwrap_or(&[])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.rows.iter().map(|r| r.as_slice())
    }
}

fn truncated(text: &[u8]) -> Row {
    text.iter().copied().take(SCREEN_COLS).collect()
}

/// Trace every row of the screen
pub fn draw_screen<D: Dac + ?Sized>(out: &mut D, screen: &TextScreen) -> Result<(), DisplayError> {
    for (index, row) in screen.rows().enumerate() {
        draw_string(out, &C64, 0, index as u8 * ROWS_PER_CHAR, row, SCREEN_COLS)?;
    }
    Ok(())
}
