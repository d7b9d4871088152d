//! Pin definitions for the two resistor ladders
//!
//! Each axis uses six GPIOs, listed least significant bit first. The resistor
//! next to each entry is the ladder leg the pin drives.
//!
//! ```text
//!            X axis                 Y axis
//!   bit 0 - GPIO4  - 32R     bit 0 - GPIO13 - 32R
//!   bit 1 - GPIO5  - 16R     bit 1 - GPIO14 - 16R
//!   bit 2 - GPIO6  -  8R     bit 2 - GPIO15 -  8R
//!   bit 3 - GPIO7  -  4R     bit 3 - GPIO16 -  4R
//!   bit 4 - GPIO8  -  2R     bit 4 - GPIO17 -  2R
//!   bit 5 - GPIO9  -   R     bit 5 - GPIO18 -   R
//! ```

/// Pin configuration constants for the ladder DAC
pub struct Pins;

impl Pins {
    /// Ladder bits per axis
    pub const BITS: usize = 6;

    /// X ladder, LSB first
    pub const X: [u8; Pins::BITS] = [4, 5, 6, 7, 8, 9];

    /// Y ladder, LSB first
    pub const Y: [u8; Pins::BITS] = [13, 14, 15, 16, 17, 18];

    /// Power LED indicator
    pub const PIN_POWER_LED: u8 = 41;
}
