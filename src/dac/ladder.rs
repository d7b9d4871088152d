//! Ladder interface using one GPIO per bit
use super::{Dac, DisplayError};
use embedded_hal::digital::OutputPin;

/// Two R-2R ladders, one per oscilloscope input
///
/// Pins are ordered least significant bit first. A code is written by driving
/// every pin of the axis, so the ladder output settles once per write.
pub struct LadderDac<P, const BITS: usize> {
    /// Horizontal deflection ladder
    x: [P; BITS],
    /// Vertical deflection ladder
    y: [P; BITS],
}

impl<P, const BITS: usize> LadderDac<P, BITS> {
    /// Create a ladder from already configured output pins
    pub fn new(x: [P; BITS], y: [P; BITS]) -> Self {
        LadderDac { x, y }
    }

    /// Hand the pins back
    pub fn release(self) -> ([P; BITS], [P; BITS]) {
        (self.x, self.y)
    }
}

impl<P: OutputPin, const BITS: usize> LadderDac<P, BITS> {
    /// Pull every ladder leg low so the beam parks in the corner
    pub fn park(&mut self) -> Result<(), DisplayError> {
        log::info!("Parking beam at the origin");
        drive(&mut self.x, 0)?;
        drive(&mut self.y, 0)
    }
}

/// Basic function for putting one code on a ladder
fn drive<P: OutputPin>(pins: &mut [P], value: u8) -> Result<(), DisplayError> {
    for (bit, pin) in pins.iter_mut().enumerate() {
        let result = if (value >> bit) & 1 == 1 {
            pin.set_high()
        } else {
            pin.set_low()
        };
        if result.is_err() {
            log::error!("GPIO write error on ladder bit {}", bit);
            return Err(DisplayError::BusWriteError);
        }
    }
    Ok(())
}

impl<P: OutputPin, const BITS: usize> Dac for LadderDac<P, BITS> {
    fn write_x(&mut self, x: u8) -> Result<(), DisplayError> {
        drive(&mut self.x, x)
    }

    fn write_y(&mut self, y: u8) -> Result<(), DisplayError> {
        drive(&mut self.y, y)
    }
}
