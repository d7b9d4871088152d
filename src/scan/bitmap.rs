//! Packed 1-bit raster and its scan-out
//!
//! Rows are stored top to bottom, eight pixels per byte with bit 7 leftmost.
//! Bitmaps baked by `build.rs` and the RAM bitmap share this layout, so an
//! asset can be copied into RAM byte for byte.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use super::{write_bits, BITS_PER_BYTE};
use crate::dac::{Dac, DisplayError};

/// Pixel rows in a bitmap
pub const BITMAP_ROWS: u8 = 64;

/// Bytes per bitmap row
pub const BITMAP_COLS: u8 = 8;

/// Size of a packed bitmap in bytes
pub const BITMAP_BYTES: usize = BITMAP_ROWS as usize * BITMAP_COLS as usize;

const ROW_BYTES: usize = BITMAP_COLS as usize;

/// 64x64 monochrome raster
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    data: [u8; BITMAP_BYTES],
}

impl core::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let lit: u32 = self.data.iter().map(|b| b.count_ones()).sum();
        f.debug_struct("Bitmap").field("lit", &lit).finish()
    }
}

impl Default for Bitmap {
    fn default() -> Self {
        Self::new()
    }
}

impl Bitmap {
    /// Blank bitmap
    pub const fn new() -> Self {
        Bitmap {
            data: [0; BITMAP_BYTES],
        }
    }

    /// Bitmap from a packed dump, extra bytes are dropped and missing ones
    /// stay blank
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut bitmap = Self::new();
        bitmap.load(bytes);
        bitmap
    }

    /// Overwrite with a packed dump, see [`Bitmap::from_bytes`]
    pub fn load(&mut self, bytes: &[u8]) {
        self.clear();
        let len = bytes.len().min(BITMAP_BYTES);
        self.data[..len].copy_from_slice(&bytes[..len]);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Packed bytes of one row
    pub fn row(&self, y: u8) -> Option<&[u8]> {
        let start = usize::from(y) * ROW_BYTES;
        self.data.get(start..start + ROW_BYTES)
    }

    /// Whether the pixel is lit, out of range pixels are dark
    pub fn get(&self, x: u8, y: u8) -> bool {
        match Self::index(x, y) {
            Some((i, mask)) => self.data[i] & mask != 0,
            None => false,
        }
    }

    /// Light or clear one pixel, out of range pixels are ignored
    pub fn set(&mut self, x: u8, y: u8, lit: bool) {
        if let Some((i, mask)) = Self::index(x, y) {
            if lit {
                self.data[i] |= mask;
            } else {
                self.data[i] &= !mask;
            }
        }
    }

    fn index(x: u8, y: u8) -> Option<(usize, u8)> {
        if x >= BITMAP_COLS * BITS_PER_BYTE || y >= BITMAP_ROWS {
            return None;
        }
        let i = usize::from(y) * ROW_BYTES + usize::from(x / BITS_PER_BYTE);
        Some((i, 0x80 >> (x % BITS_PER_BYTE)))
    }

    /// Mirror left to right
    pub fn flip_horizontal(&mut self) {
        for row in self.data.chunks_exact_mut(ROW_BYTES) {
            row.reverse();
            for byte in row.iter_mut() {
                *byte = byte.reverse_bits();
            }
        }
    }

    /// Mirror top to bottom
    pub fn flip_vertical(&mut self) {
        let rows = usize::from(BITMAP_ROWS);
        for top in 0..rows / 2 {
            let bottom = rows - 1 - top;
            let (head, tail) = self.data.split_at_mut(bottom * ROW_BYTES);
            head[top * ROW_BYTES..(top + 1) * ROW_BYTES].swap_with_slice(&mut tail[..ROW_BYTES]);
        }
    }

    /// Move every row up by one, the bottom row keeps its old content
    pub fn scroll_up(&mut self) {
        self.data.copy_within(ROW_BYTES.., 0);
    }

    /// Paste one row of 8x8 cells with its top edge at pixel row `top`
    ///
    /// The rows covered by the cells are cleared first. Cells running past the
    /// bottom edge are cut off, cells past the last column are dropped.
    pub fn stamp_cells(&mut self, top: u8, cells: &[[u8; 8]]) {
        let rows = usize::from(BITMAP_ROWS.saturating_sub(top)).min(8);
        let start = usize::from(top) * ROW_BYTES;
        if rows == 0 {
            return;
        }
        self.data[start..start + rows * ROW_BYTES].fill(0);
        for (col, cell) in cells.iter().take(ROW_BYTES).enumerate() {
            for (row, &scan) in cell.iter().take(rows).enumerate() {
                self.data[start + row * ROW_BYTES + col] = scan;
            }
        }
    }
}

impl OriginDimensions for Bitmap {
    fn size(&self) -> Size {
        Size::new(
            u32::from(BITMAP_COLS * BITS_PER_BYTE),
            u32::from(BITMAP_ROWS),
        )
    }
}

impl DrawTarget for Bitmap {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            // Reject out-of-bounds coordinates
            if let (Ok(x), Ok(y)) = (u8::try_from(point.x), u8::try_from(point.y)) {
                self.set(x, y, color.is_on());
            }
        }
        Ok(())
    }
}

/// Trace every lit pixel of `bitmap`, row by row
pub fn draw_bitmap<D: Dac + ?Sized>(out: &mut D, bitmap: &Bitmap) -> Result<(), DisplayError> {
    for (row, bytes) in bitmap.data.chunks_exact(ROW_BYTES).enumerate() {
        for (col, &scan) in bytes.iter().enumerate() {
            write_bits(out, col as u8 * BITS_PER_BYTE, row as u8, scan)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dac::trace::{TraceDac, Write};
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    #[test]
    fn blank_bitmap_is_silent() {
        let mut dac = TraceDac::new();
        draw_bitmap(&mut dac, &Bitmap::new()).unwrap();
        assert!(dac.writes().is_empty());
    }

    #[test]
    fn x_writes_land_on_set_bits() {
        let mut bitmap = Bitmap::new();
        bitmap.set(0, 0, true);
        bitmap.set(9, 0, true);
        bitmap.set(63, 40, true);
        let mut dac = TraceDac::new();
        draw_bitmap(&mut dac, &bitmap).unwrap();
        assert_eq!(
            dac.writes(),
            &[
                Write::Y(0),
                Write::X(0),
                Write::Y(0),
                Write::X(9),
                Write::Y(40),
                Write::X(63),
            ]
        );
    }

    #[test]
    fn scan_matches_asset_bits() {
        let bitmap = Bitmap::from_bytes(crate::scan::rom::DOGE);
        let mut dac = TraceDac::new();
        draw_bitmap(&mut dac, &bitmap).unwrap();

        let lit: Vec<(u8, u8)> = (0..BITMAP_ROWS)
            .flat_map(|y| (0..64).map(move |x| (x, y)))
            .filter(|&(x, y)| bitmap.get(x, y))
            .collect();
        let mut traced = Vec::new();
        let mut y = 0;
        for w in dac.writes() {
            match *w {
                Write::Y(v) => y = v,
                Write::X(x) => traced.push((x, y)),
            }
        }
        assert_eq!(traced, lit);

        // One Y write per non-blank byte
        let segments = bitmap.as_bytes().iter().filter(|&&b| b != 0).count();
        assert_eq!(dac.ys().len(), segments);
    }

    #[test]
    fn from_bytes_pads_and_truncates() {
        let short = Bitmap::from_bytes(&[0xFF]);
        assert_eq!(short.row(0), Some(&[0xFF, 0, 0, 0, 0, 0, 0, 0][..]));

        let long = Bitmap::from_bytes(&[0x01; BITMAP_BYTES + 10]);
        assert!(long.as_bytes().iter().all(|&b| b == 0x01));
    }

    #[test]
    fn flips_mirror_pixels() {
        let mut bitmap = Bitmap::new();
        bitmap.set(1, 2, true);
        bitmap.flip_horizontal();
        assert!(bitmap.get(62, 2));
        assert!(!bitmap.get(1, 2));

        bitmap.flip_vertical();
        assert!(bitmap.get(62, 61));

        bitmap.flip_vertical();
        bitmap.flip_horizontal();
        assert!(bitmap.get(1, 2));
        assert_eq!(bitmap.as_bytes().iter().map(|b| b.count_ones()).sum::<u32>(), 1);
    }

    #[test]
    fn scroll_moves_rows_up() {
        let mut bitmap = Bitmap::new();
        bitmap.set(5, 10, true);
        bitmap.set(6, 63, true);
        bitmap.scroll_up();
        assert!(bitmap.get(5, 9));
        assert!(bitmap.get(6, 62));
        assert!(bitmap.get(6, 63));
    }

    #[test]
    fn stamp_clips_at_the_bottom() {
        let mut bitmap = Bitmap::from_bytes(&[0xAA; BITMAP_BYTES]);
        let cell = [0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88];
        bitmap.stamp_cells(61, &[cell]);
        assert_eq!(bitmap.row(60).map(|r| r[0]), Some(0xAA));
        assert_eq!(bitmap.row(61), Some(&[0x11, 0, 0, 0, 0, 0, 0, 0][..]));
        assert_eq!(bitmap.row(63).map(|r| r[0]), Some(0x33));

        bitmap.stamp_cells(64, &[cell]);
        assert_eq!(bitmap.row(63).map(|r| r[0]), Some(0x33));
    }

    #[test]
    fn draws_with_embedded_graphics() {
        let mut bitmap = Bitmap::new();
        Rectangle::new(Point::new(60, 60), Size::new(10, 10))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut bitmap)
            .unwrap();
        assert!(bitmap.get(60, 60));
        assert!(bitmap.get(63, 63));
        assert!(!bitmap.get(59, 60));
    }
}
