//! Two channel resistor-ladder DAC
//!
//! The oscilloscope runs in XY mode with one ladder on each input. Every
//! value written to an axis moves the beam immediately, there is no frame
//! buffer between the renderer and the ladder.
//!
//! ### Usage
//! 1. wrap a sink (for example [`ladder::LadderDac`]) in a [`Port`] together
//!    with a [`DacConfig`]
//! 1. hand the port to the renderers, which call [`Dac::write_x`] and
//!    [`Dac::write_y`] for every step of the beam
//!
//! The port keeps every coordinate inside `[0, resolution - 1]` and applies
//! the build time axis inversion, so the sinks only ever see valid codes.

pub use display_interface::DisplayError;

pub mod ladder;
pub mod pins;
pub mod trace;

/// Number of distinct codes per axis (6 ladder bits)
pub const RESOLUTION: u8 = 64;

/// Sink for beam coordinates
pub trait Dac {
    /// Move the beam horizontally
    fn write_x(&mut self, x: u8) -> Result<(), DisplayError>;

    /// Move the beam vertically
    fn write_y(&mut self, y: u8) -> Result<(), DisplayError>;
}

impl<T: Dac + ?Sized> Dac for &mut T {
    fn write_x(&mut self, x: u8) -> Result<(), DisplayError> {
        (**self).write_x(x)
    }

    fn write_y(&mut self, y: u8) -> Result<(), DisplayError> {
        (**self).write_y(y)
    }
}

/// Output mapping applied in front of the ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DacConfig {
    /// Codes per axis, coordinates run from 0 to `resolution - 1`
    pub resolution: u8,
    /// Write `resolution - 1 - x` instead of `x`
    pub invert_x: bool,
    /// Write `resolution - 1 - y` instead of `y`
    pub invert_y: bool,
}

impl Default for DacConfig {
    fn default() -> Self {
        Self {
            resolution: RESOLUTION,
            invert_x: cfg!(feature = "invert-x"),
            invert_y: cfg!(feature = "invert-y"),
        }
    }
}

impl DacConfig {
    /// Largest coordinate the ladder can show
    pub fn max(&self) -> u8 {
        self.resolution.saturating_sub(1)
    }

    fn map(&self, value: u8, invert: bool) -> u8 {
        let value = value.min(self.max());
        if invert {
            self.max() - value
        } else {
            value
        }
    }
}

/// Coordinate output port
///
/// Clamps out of range values to the last code instead of letting them wrap
/// around on the ladder.
pub struct Port<D> {
    dac: D,
    config: DacConfig,
}

impl<D: Dac> Port<D> {
    /// Wrap a sink with the given mapping
    pub fn new(dac: D, config: DacConfig) -> Self {
        Port { dac, config }
    }

    /// Mapping in use
    pub fn config(&self) -> &DacConfig {
        &self.config
    }

    /// Sink behind the port
    pub fn inner(&self) -> &D {
        &self.dac
    }

    /// Sink behind the port, mutably
    pub fn inner_mut(&mut self) -> &mut D {
        &mut self.dac
    }
}

impl<D: Dac> Dac for Port<D> {
    fn write_x(&mut self, x: u8) -> Result<(), DisplayError> {
        let x = self.config.map(x, self.config.invert_x);
        self.dac.write_x(x)
    }

    fn write_y(&mut self, y: u8) -> Result<(), DisplayError> {
        let y = self.config.map(y, self.config.invert_y);
        self.dac.write_y(y)
    }
}

/// Clamp a signed beam coordinate into the byte range of a ladder code
pub(crate) fn code(value: i16) -> u8 {
    value.clamp(0, u8::MAX as i16) as u8
}
