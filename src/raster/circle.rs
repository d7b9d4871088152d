//! Midpoint circle traced one quadrant at a time

use super::Axis;
use crate::dac::{code, Dac, DisplayError};

/// Where a computed quarter arc is placed around the centre
///
/// The arc is always computed in local coordinates with `x` running from
/// `-r` up to `0` and `y` from `0` up to `r`. Each quadrant rotates that arc
/// by a further 90 degrees. With Y growing downward, `Deg0` lands below and
/// right of the centre and the rest follow clockwise on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Quadrant {
    /// Tracing order used for full circles
    pub const ALL: [Quadrant; 4] = [
        Quadrant::Deg0,
        Quadrant::Deg90,
        Quadrant::Deg180,
        Quadrant::Deg270,
    ];

    /// Screen position of local arc point `(x, y)`
    pub fn place(self, cx: i16, cy: i16, x: i16, y: i16) -> (i16, i16) {
        match self {
            Quadrant::Deg0 => (cx - x, cy + y),
            Quadrant::Deg90 => (cx - y, cy - x),
            Quadrant::Deg180 => (cx + x, cy - y),
            Quadrant::Deg270 => (cx + y, cy + x),
        }
    }

    /// Ladder driven by the local `x` coordinate
    fn x_axis(self) -> Axis {
        match self {
            Quadrant::Deg0 | Quadrant::Deg180 => Axis::X,
            Quadrant::Deg90 | Quadrant::Deg270 => Axis::Y,
        }
    }

    /// Ladder driven by the local `y` coordinate
    fn y_axis(self) -> Axis {
        self.x_axis().other()
    }
}

/// Local points of a quarter arc of radius `r`
///
/// Follows the error accumulator from Zingl's "The Beauty of Bresenham's
/// Algorithm". The arc ends once `x` reaches zero, so a zero radius yields
/// just the centre.
#[derive(Debug, Clone)]
pub struct ArcPoints {
    x: i16,
    y: i16,
    err: i32,
    started: bool,
}

impl ArcPoints {
    pub fn new(r: i16) -> Self {
        // Negative radii are degenerate, trace the centre only
        let r = r.max(0);
        ArcPoints {
            x: -r,
            y: 0,
            err: 2 - 2 * i32::from(r),
            started: false,
        }
    }
}

impl Iterator for ArcPoints {
    type Item = (i16, i16);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            return Some((self.x, self.y));
        }
        if self.x == 0 {
            return None;
        }
        let r = self.err;
        if r <= i32::from(self.y) {
            self.y += 1;
            self.err += i32::from(self.y) * 2 + 1;
        }
        if r > i32::from(self.x) || self.err > i32::from(self.y) {
            self.x += 1;
            self.err += i32::from(self.x) * 2 + 1;
        }
        Some((self.x, self.y))
    }
}

/// Trace one quarter of a circle
pub fn draw_quadrant<D: Dac + ?Sized>(
    out: &mut D,
    quadrant: Quadrant,
    cx: i16,
    cy: i16,
    r: i16,
) -> Result<(), DisplayError> {
    let mut last: Option<(i16, i16)> = None;
    for (x, y) in ArcPoints::new(r) {
        let screen = quadrant.place(cx, cy, x, y);
        match last {
            None => {
                out.write_x(code(screen.0))?;
                out.write_y(code(screen.1))?;
            }
            Some((lx, ly)) => {
                if y != ly {
                    quadrant.y_axis().write(out, screen)?;
                }
                if x != lx {
                    quadrant.x_axis().write(out, screen)?;
                }
            }
        }
        last = Some((x, y));
    }
    Ok(())
}

/// Trace a full circle by running the quarter arc once per quadrant
///
/// No clipping happens here, keep `r` small enough for the canvas.
pub fn draw_circle<D: Dac + ?Sized>(
    out: &mut D,
    cx: i16,
    cy: i16,
    r: i16,
) -> Result<(), DisplayError> {
    for quadrant in Quadrant::ALL {
        draw_quadrant(out, quadrant, cx, cy, r)?;
    }
    Ok(())
}

/// Every screen point visited by [`draw_circle`]
pub fn circle_points(cx: i16, cy: i16, r: i16) -> impl Iterator<Item = (i16, i16)> {
    Quadrant::ALL.into_iter().flat_map(move |quadrant| {
        ArcPoints::new(r).map(move |(x, y)| quadrant.place(cx, cy, x, y))
    })
}
