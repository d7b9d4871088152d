//! 8x8 character set
//!
//! Commodore 64 glyphs in ASCII order from `' '` to `'~'`, eight bytes per
//! character, top row first. Bit 7 is the leftmost pixel, as in `'A'`:
//!
//! ```text
//! ...##... 0x18
//! ..####.. 0x3C
//! .##..##. 0x66
//! .######. 0x7E
//! .##..##. 0x66
//! .##..##. 0x66
//! .##..##. 0x66
//! ........ 0x00
//! ```

use super::glyph::Font;

/// Font used by the text screen
pub static C64: Font = Font::new(b' ', b'~', &C64_ROM);

#[rustfmt::skip]
static C64_ROM: [u8; 95 * 8] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // space
    0x18, 0x18, 0x18, 0x18, 0x00, 0x00, 0x18, 0x00, // !
    0x66, 0x66, 0x66, 0x00, 0x00, 0x00, 0x00, 0x00, // "
    0x66, 0x66, 0xFF, 0x66, 0xFF, 0x66, 0x66, 0x00, // #
    0x18, 0x3E, 0x60, 0x3C, 0x06, 0x7C, 0x18, 0x00, // $
    0x62, 0x66, 0x0C, 0x18, 0x30, 0x66, 0x46, 0x00, // %
    0x3C, 0x66, 0x3C, 0x38, 0x67, 0x66, 0x3F, 0x00, // &
    0x06, 0x0C, 0x18, 0x00, 0x00, 0x00, 0x00, 0x00, // '
    0x0C, 0x18, 0x30, 0x30, 0x30, 0x18, 0x0C, 0x00, // (
    0x30, 0x18, 0x0C, 0x0C, 0x0C, 0x18, 0x30, 0x00, // )
    0x00, 0x66, 0x3C, 0xFF, 0x3C, 0x66, 0x00, 0x00, // *
    0x00, 0x18, 0x18, 0x7E, 0x18, 0x18, 0x00, 0x00, // +
    0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x30, // ,
    0x00, 0x00, 0x00, 0x7E, 0x00, 0x00, 0x00, 0x00, // -
    0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x00, // .
    0x00, 0x03, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x00, // /
    0x3C, 0x66, 0x6E, 0x76, 0x66, 0x66, 0x3C, 0x00, // 0
    0x18, 0x18, 0x38, 0x18, 0x18, 0x18, 0x7E, 0x00, // 1
    0x3C, 0x66, 0x06, 0x0C, 0x30, 0x60, 0x7E, 0x00, // 2
    0x3C, 0x66, 0x06, 0x1C, 0x06, 0x66, 0x3C, 0x00, // 3
    0x06, 0x0E, 0x1E, 0x66, 0x7F, 0x06, 0x06, 0x00, // 4
    0x7E, 0x60, 0x7C, 0x06, 0x06, 0x66, 0x3C, 0x00, // 5
    0x3C, 0x66, 0x60, 0x7C, 0x66, 0x66, 0x3C, 0x00, // 6
    0x7E, 0x66, 0x0C, 0x18, 0x18, 0x18, 0x18, 0x00, // 7
    0x3C, 0x66, 0x66, 0x3C, 0x66, 0x66, 0x3C, 0x00, // 8
    0x3C, 0x66, 0x66, 0x3E, 0x06, 0x66, 0x3C, 0x00, // 9
    0x00, 0x00, 0x18, 0x00, 0x00, 0x18, 0x00, 0x00, // :
    0x00, 0x00, 0x18, 0x00, 0x00, 0x18, 0x18, 0x30, // ;
    0x0E, 0x18, 0x30, 0x60, 0x30, 0x18, 0x0E, 0x00, // <
    0x00, 0x00, 0x7E, 0x00, 0x7E, 0x00, 0x00, 0x00, // =
    0x70, 0x18, 0x0C, 0x06, 0x0C, 0x18, 0x70, 0x00, // >
    0x3C, 0x66, 0x06, 0x0C, 0x18, 0x00, 0x18, 0x00, // ?
    0x3C, 0x66, 0x6E, 0x6E, 0x60, 0x62, 0x3C, 0x00, // @
    0x18, 0x3C, 0x66, 0x7E, 0x66, 0x66, 0x66, 0x00, // A
    0x7C, 0x66, 0x66, 0x7C, 0x66, 0x66, 0x7C, 0x00, // B
    0x3C, 0x66, 0x60, 0x60, 0x60, 0x66, 0x3C, 0x00, // C
    0x78, 0x6C, 0x66, 0x66, 0x66, 0x6C, 0x78, 0x00, // D
    0x7E, 0x60, 0x60, 0x78, 0x60, 0x60, 0x7E, 0x00, // E
    0x7E, 0x60, 0x60, 0x78, 0x60, 0x60, 0x60, 0x00, // F
    0x3C, 0x66, 0x60, 0x6E, 0x66, 0x66, 0x3C, 0x00, // G
    0x66, 0x66, 0x66, 0x7E, 0x66, 0x66, 0x66, 0x00, // H
    0x3C, 0x18, 0x18, 0x18, 0x18, 0x18, 0x3C, 0x00, // I
    0x1E, 0x0C, 0x0C, 0x0C, 0x0C, 0x6C, 0x66, 0x00, // J
    0x66, 0x6C, 0x78, 0x70, 0x78, 0x6C, 0x66, 0x00, // K
    0x60, 0x60, 0x60, 0x60, 0x60, 0x60, 0x7E, 0x00, // L
    0x63, 0x77, 0x7F, 0x6B, 0x63, 0x63, 0x63, 0x00, // M
    0x66, 0x76, 0x7E, 0x7E, 0x6E, 0x66, 0x66, 0x00, // N
    0x3C, 0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x00, // O
    0x7C, 0x66, 0x66, 0x7C, 0x60, 0x60, 0x60, 0x00, // P
    0x3C, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x0E, 0x00, // Q
    0x7C, 0x66, 0x66, 0x7C, 0x78, 0x6C, 0x66, 0x00, // R
    0x3C, 0x66, 0x60, 0x3C, 0x06, 0x66, 0x3C, 0x00, // S
    0x7E, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x00, // T
    0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x00, // U
    0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x18, 0x00, // V
    0x63, 0x63, 0x63, 0x6B, 0x7F, 0x77, 0x63, 0x00, // W
    0x66, 0x66, 0x3C, 0x18, 0x3C, 0x66, 0x66, 0x00, // X
    0x66, 0x66, 0x66, 0x3C, 0x18, 0x18, 0x18, 0x00, // Y
    0x7E, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x7E, 0x00, // Z
    0x3C, 0x30, 0x30, 0x30, 0x30, 0x30, 0x3C, 0x00, // [
    0x0C, 0x12, 0x30, 0x7C, 0x30, 0x62, 0xFC, 0x00, // pound sign
    0x3C, 0x0C, 0x0C, 0x0C, 0x0C, 0x0C, 0x3C, 0x00, // ]
    0x00, 0x18, 0x3C, 0x7E, 0x18, 0x18, 0x18, 0x18, // up arrow
    0x00, 0x10, 0x30, 0x7F, 0x7F, 0x30, 0x10, 0x00, // left arrow
    0x00, 0x00, 0x00, 0xFF, 0xFF, 0x00, 0x00, 0x00, // thick bar
    0x00, 0x00, 0x3C, 0x06, 0x3E, 0x66, 0x3E, 0x00, // a
    0x00, 0x60, 0x60, 0x7C, 0x66, 0x66, 0x7C, 0x00, // b
    0x00, 0x00, 0x3C, 0x60, 0x60, 0x60, 0x3C, 0x00, // c
    0x00, 0x06, 0x06, 0x3E, 0x66, 0x66, 0x3E, 0x00, // d
    0x00, 0x00, 0x3C, 0x66, 0x7E, 0x60, 0x3C, 0x00, // e
    0x00, 0x0E, 0x18, 0x3E, 0x18, 0x18, 0x18, 0x00, // f
    0x00, 0x00, 0x3E, 0x66, 0x66, 0x3E, 0x06, 0x7C, // g
    0x00, 0x60, 0x60, 0x7C, 0x66, 0x66, 0x66, 0x00, // h
    0x00, 0x18, 0x00, 0x38, 0x18, 0x18, 0x3C, 0x00, // i
    0x00, 0x06, 0x00, 0x06, 0x06, 0x06, 0x06, 0x3C, // j
    0x00, 0x60, 0x60, 0x6C, 0x78, 0x6C, 0x66, 0x00, // k
    0x00, 0x38, 0x18, 0x18, 0x18, 0x18, 0x3C, 0x00, // l
    0x00, 0x00, 0x66, 0x7F, 0x7F, 0x6B, 0x63, 0x00, // m
    0x00, 0x00, 0x7C, 0x66, 0x66, 0x66, 0x66, 0x00, // n
    0x00, 0x00, 0x3C, 0x66, 0x66, 0x66, 0x3C, 0x00, // o
    0x00, 0x00, 0x7C, 0x66, 0x66, 0x7C, 0x60, 0x60, // p
    0x00, 0x00, 0x3E, 0x66, 0x66, 0x3E, 0x06, 0x06, // q
    0x00, 0x00, 0x7C, 0x66, 0x60, 0x60, 0x60, 0x00, // r
    0x00, 0x00, 0x3E, 0x60, 0x3C, 0x06, 0x7C, 0x00, // s
    0x00, 0x18, 0x7E, 0x18, 0x18, 0x18, 0x0E, 0x00, // t
    0x00, 0x00, 0x66, 0x66, 0x66, 0x66, 0x3E, 0x00, // u
    0x00, 0x00, 0x66, 0x66, 0x66, 0x3C, 0x18, 0x00, // v
    0x00, 0x00, 0x63, 0x6B, 0x7F, 0x3E, 0x36, 0x00, // w
    0x00, 0x00, 0x66, 0x3C, 0x18, 0x3C, 0x66, 0x00, // x
    0x00, 0x00, 0x66, 0x66, 0x66, 0x3E, 0x0C, 0x78, // y
    0x00, 0x00, 0x7E, 0x0C, 0x18, 0x30, 0x7E, 0x00, // z
    0x1C, 0x30, 0x30, 0x60, 0x30, 0x30, 0x1C, 0x00, // {
    0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x00, // |
    0x38, 0x0C, 0x0C, 0x06, 0x0C, 0x0C, 0x38, 0x00, // }
    0x22, 0x77, 0x7F, 0x7F, 0x3E, 0x1C, 0x08, 0x00, // heart
];
