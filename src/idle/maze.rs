//! Endless 10 PRINT maze scrolling up through the RAM bitmap

use rand::Rng;

use super::Frame;
use crate::dac::DisplayError;
use crate::scan::bitmap::{BITMAP_COLS, BITMAP_ROWS};
use crate::scan::draw_bitmap;
use crate::scan::glyph::ROWS_PER_CHAR;

/// Full cell diagonals, unlike the font slashes they touch the cell corners
/// so neighbouring tiles join up
pub const RISING: [u8; 8] = [0x03, 0x07, 0x0E, 0x1C, 0x38, 0x70, 0xE0, 0xC0];
pub const FALLING: [u8; 8] = [0xC0, 0xE0, 0x70, 0x38, 0x1C, 0x0E, 0x07, 0x03];

/// Scroll on every frame where `frame & SCROLL_EVERY_MASK == 0`
const SCROLL_EVERY_MASK: u8 = 0x07;

const TILES: usize = BITMAP_COLS as usize;

#[derive(Debug, Clone, Default)]
pub struct Maze {
    frame: u8,
    /// Pixel rows of the current tile row already on screen
    scroll_count: u8,
    tiles: [[u8; 8]; TILES],
}

impl Maze {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, frame: &mut Frame<'_>) -> Result<(), DisplayError> {
        if self.frame & SCROLL_EVERY_MASK == 0 {
            if self.scroll_count == 0 {
                let rng = &mut frame.shared.rng;
                for tile in self.tiles.iter_mut() {
                    *tile = if rng.gen() { RISING } else { FALLING };
                }
            }
            self.scroll_count += 1;

            // Scroll up by one pixel and reveal one more row of the tiles
            let ram = &mut frame.shared.ram;
            ram.scroll_up();
            ram.stamp_cells(BITMAP_ROWS - self.scroll_count, &self.tiles);
            if self.scroll_count == ROWS_PER_CHAR {
                self.scroll_count = 0;
            }
        }
        self.frame = self.frame.wrapping_add(1);

        draw_bitmap(frame.out, &frame.shared.ram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dac::trace::MeterDac;
    use crate::idle::Shared;

    fn run(maze: &mut Maze, shared: &mut Shared, frames: usize) {
        let mut dac = MeterDac::new();
        for _ in 0..frames {
            let mut frame = Frame {
                out: &mut dac,
                shared: &mut *shared,
                now_ms: 0,
            };
            maze.tick(&mut frame).unwrap();
        }
    }

    fn is_tile(cell: &[u8]) -> bool {
        cell == RISING || cell == FALLING
    }

    #[test]
    fn scrolls_every_eighth_frame() {
        let mut shared = Shared::default();
        let mut maze = Maze::new();
        run(&mut maze, &mut shared, 1);
        // First tile row peeks in at the bottom
        assert_ne!(shared.ram.row(63), Some(&[0u8; 8][..]));
        assert_eq!(shared.ram.row(62), Some(&[0u8; 8][..]));

        run(&mut maze, &mut shared, 7);
        assert_eq!(shared.ram.row(62), Some(&[0u8; 8][..]));
        run(&mut maze, &mut shared, 1);
        assert_ne!(shared.ram.row(62), Some(&[0u8; 8][..]));
    }

    #[test]
    fn whole_tiles_after_a_full_cycle() {
        let mut shared = Shared::default();
        let mut maze = Maze::new();
        run(&mut maze, &mut shared, 8 * 8 * 3);

        // Three tile rows have scrolled fully into view
        let bytes = shared.ram.as_bytes();
        for tile_row in 5..8 {
            for col in 0..8 {
                let cell: Vec<u8> = (0..8)
                    .map(|r| bytes[(tile_row * 8 + r) * 8 + col])
                    .collect();
                assert!(is_tile(&cell), "row {} col {}", tile_row, col);
            }
        }
        assert!(bytes[..5 * 64].iter().all(|&b| b == 0));
    }
}
