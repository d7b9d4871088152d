//! Integer line rasterizer

use crate::dac::{code, Dac, DisplayError};

/// Points of a line from `(x0, y0)` to `(x1, y1)`, both ends included
///
/// Uses the doubled error form of Bresenham's algorithm, so the only exit is
/// reaching the end point exactly. Every step moves one or both coordinates by
/// one, which keeps the path 8-connected and bounded by `max(|dx|, |dy|) + 1`
/// points.
#[derive(Debug, Clone)]
pub struct LinePoints {
    x: i16,
    y: i16,
    x1: i16,
    y1: i16,
    dx: i32,
    dy: i32,
    sx: i16,
    sy: i16,
    err: i32,
    started: bool,
}

impl LinePoints {
    pub fn new(x0: i16, y0: i16, x1: i16, y1: i16) -> Self {
        let dx = (i32::from(x1) - i32::from(x0)).abs();
        let dy = -(i32::from(y1) - i32::from(y0)).abs();
        LinePoints {
            x: x0,
            y: y0,
            x1,
            y1,
            dx,
            dy,
            sx: if x0 < x1 { 1 } else { -1 },
            sy: if y0 < y1 { 1 } else { -1 },
            err: dx + dy,
            started: false,
        }
    }
}

impl Iterator for LinePoints {
    type Item = (i16, i16);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            return Some((self.x, self.y));
        }
        if self.x == self.x1 && self.y == self.y1 {
            return None;
        }
        let e2 = 2 * self.err;
        if e2 >= self.dy {
            self.err += self.dy;
            self.x += self.sx;
        }
        if e2 <= self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some((self.x, self.y))
    }
}

/// Trace a line with the beam
///
/// Both coordinates are written for the start point, after that only the axis
/// that stepped is written.
pub fn draw_line<D: Dac + ?Sized>(
    out: &mut D,
    x0: i16,
    y0: i16,
    x1: i16,
    y1: i16,
) -> Result<(), DisplayError> {
    let mut last: Option<(i16, i16)> = None;
    for (x, y) in LinePoints::new(x0, y0, x1, y1) {
        match last {
            None => {
                out.write_x(code(x))?;
                out.write_y(code(y))?;
            }
            Some((lx, ly)) => {
                if x != lx {
                    out.write_x(code(x))?;
                }
                if y != ly {
                    out.write_y(code(y))?;
                }
            }
        }
        last = Some((x, y));
    }
    Ok(())
}
