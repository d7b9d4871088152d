//! Raster scan-out: bitmaps and text traced as points
//!
//! Both renderers share [`write_bits`], which turns one packed byte into a
//! Y write followed by one X write per lit pixel.

use crate::dac::{Dac, DisplayError};

pub mod bitmap;
pub mod font;
pub mod glyph;
pub mod rom;
pub mod text;

pub use bitmap::{draw_bitmap, Bitmap, BITMAP_BYTES, BITMAP_COLS, BITMAP_ROWS};
pub use glyph::{draw_string, Font};
pub use text::{draw_screen, TextScreen};

/// Pixels packed in one byte
pub const BITS_PER_BYTE: u8 = 8;

/// Trace the set bits of an 8 pixel segment starting at `(x, y)`
///
/// Bit 7 is the leftmost pixel. An empty segment writes nothing at all, not
/// even the Y coordinate.
pub fn write_bits<D: Dac + ?Sized>(out: &mut D, x: u8, y: u8, bits: u8) -> Result<(), DisplayError> {
    if bits == 0 {
        return Ok(());
    }
    out.write_y(y)?;
    for bit in 0..BITS_PER_BYTE {
        if bits & (0x80 >> bit) != 0 {
            out.write_x(x.saturating_add(bit))?;
        }
    }
    Ok(())
}
