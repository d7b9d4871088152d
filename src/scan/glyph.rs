//! Glyph scan-out

use super::write_bits;
use crate::dac::{Dac, DisplayError};

/// Rows in one glyph, also the byte stride between glyphs
pub const ROWS_PER_CHAR: u8 = 8;

/// Pixels per glyph column
pub const COLS_PER_CHAR: u8 = 8;

/// Each glyph row is traced this many times on consecutive beam lines, the
/// ladder pitch is square but the character cells are not
pub const PIXELS_PER_ROW: u8 = 2;

/// Monospace 8x8 bitmap font covering a contiguous ASCII range
#[derive(Debug, Clone, Copy)]
pub struct Font {
    first: u8,
    last: u8,
    data: &'static [u8],
}

impl Font {
    /// `data` holds `ROWS_PER_CHAR` bytes for every character in `first..=last`
    pub const fn new(first: u8, last: u8, data: &'static [u8]) -> Self {
        Font { first, last, data }
    }

    /// Scan rows of `c`, or `None` when the font has no glyph for it
    pub fn glyph(&self, c: u8) -> Option<&'static [u8]> {
        if c < self.first || c > self.last {
            return None;
        }
        let offset = usize::from(c - self.first) * usize::from(ROWS_PER_CHAR);
        self.data.get(offset..offset + usize::from(ROWS_PER_CHAR))
    }
}

/// Trace up to `cols` characters of `text` starting at cell `(x, y)`
///
/// `x` is in pixels, `y` is in glyph rows and gets scaled by
/// [`PIXELS_PER_ROW`]. A NUL byte ends the string early, characters the font
/// does not cover leave their cell empty.
pub fn draw_string<D: Dac + ?Sized>(
    out: &mut D,
    font: &Font,
    x: u8,
    y: u8,
    text: &[u8],
    cols: usize,
) -> Result<(), DisplayError> {
    for (col, &c) in text.iter().take(cols).enumerate() {
        // End early if we find end of string
        if c == 0 {
            break;
        }
        let Some(rows) = font.glyph(c) else {
            continue;
        };

        // Trace each character fully before advancing to the next one
        let char_x = x.saturating_add((col as u8).saturating_mul(COLS_PER_CHAR));
        for (row, &scan) in rows.iter().enumerate() {
            let char_y = y.saturating_add(row as u8).saturating_mul(PIXELS_PER_ROW);
            for pixel in 0..PIXELS_PER_ROW {
                write_bits(out, char_x, char_y.saturating_add(pixel), scan)?;
            }
        }
    }
    Ok(())
}
