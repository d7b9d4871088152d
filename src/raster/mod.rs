//! Vector primitives streamed straight to the ladder
//!
//! There is no canvas behind these functions: every step of a line or arc is
//! a write to the DAC, so drawing order is beam order.

use crate::dac::{code, Dac, DisplayError};

pub mod circle;
pub mod line;

pub use circle::{circle_points, draw_circle, draw_quadrant, ArcPoints, Quadrant};
pub use line::{draw_line, LinePoints};

/// One of the two ladders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Write this axis' component of `point`
    pub fn write<D: Dac + ?Sized>(
        self,
        out: &mut D,
        point: (i16, i16),
    ) -> Result<(), DisplayError> {
        match self {
            Axis::X => out.write_x(code(point.0)),
            Axis::Y => out.write_y(code(point.1)),
        }
    }
}

/// Trace a closed outline through `corners`
pub fn draw_polygon<D: Dac + ?Sized>(
    out: &mut D,
    corners: &[(i16, i16)],
) -> Result<(), DisplayError> {
    for (i, &(x0, y0)) in corners.iter().enumerate() {
        let (x1, y1) = corners[(i + 1) % corners.len()];
        draw_line(out, x0, y0, x1, y1)?;
    }
    Ok(())
}
