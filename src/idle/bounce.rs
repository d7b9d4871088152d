//! Ball bouncing inside a frame

use super::Frame;
use crate::dac::DisplayError;
use crate::raster::{draw_circle, draw_polygon};

/// Ball radius
pub const RADIUS: u8 = 4;

/// Gap between the play field and the top and bottom edges
pub const INSET: u8 = 4;

/// Speed in 1/256 pixel per frame
const DX: i16 = 5;
const DY: i16 = 3;

/// Position in 8.8 fixed point
const ONE: u16 = 256;

/// Play field edges, inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub min_x: u8,
    pub max_x: u8,
    pub min_y: u8,
    pub max_y: u8,
}

impl Field {
    pub fn new(resolution: u8) -> Self {
        let max = resolution.saturating_sub(1);
        Field {
            min_x: 0,
            max_x: max,
            min_y: INSET,
            max_y: max.saturating_sub(INSET),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Bounce {
    x: u16,
    y: u16,
    dx: i16,
    dy: i16,
}

impl Default for Bounce {
    fn default() -> Self {
        Self::new(crate::dac::RESOLUTION)
    }
}

impl Bounce {
    /// Ball in the top left corner of a `resolution` wide canvas, heading
    /// down and right
    pub fn new(resolution: u8) -> Self {
        let field = Field::new(resolution);
        Bounce {
            x: u16::from(field.min_x + RADIUS) * ONE,
            y: u16::from(field.min_y + RADIUS) * ONE,
            dx: DX,
            dy: DY,
        }
    }

    /// Integer pixel position of the ball centre
    pub fn position(&self) -> (u8, u8) {
        ((self.x >> 8) as u8, (self.y >> 8) as u8)
    }

    pub fn tick(&mut self, frame: &mut Frame<'_>) -> Result<(), DisplayError> {
        let field = Field::new(frame.shared.resolution);
        let (x, y) = self.position();

        draw_circle(frame.out, i16::from(x), i16::from(y), i16::from(RADIUS))?;
        let (x0, y0) = (i16::from(field.min_x), i16::from(field.min_y));
        let (x1, y1) = (i16::from(field.max_x), i16::from(field.max_y));
        draw_polygon(frame.out, &[(x0, y0), (x1, y0), (x1, y1), (x0, y1)])?;

        self.step(&field);
        Ok(())
    }

    /// Turn around before the next step would cross the edge, then move
    fn step(&mut self, field: &Field) {
        let lo_x = u16::from(field.min_x + RADIUS) * ONE;
        let hi_x = u16::from(field.max_x.saturating_sub(RADIUS)) * ONE;
        let lo_y = u16::from(field.min_y + RADIUS) * ONE;
        let hi_y = u16::from(field.max_y.saturating_sub(RADIUS)) * ONE;

        if self.x < lo_x + DX as u16 {
            self.dx = DX;
        }
        if self.x > hi_x.saturating_sub(DX as u16) {
            self.dx = -DX;
        }
        if self.y < lo_y + DY as u16 {
            self.dy = DY;
        }
        if self.y > hi_y.saturating_sub(DY as u16) {
            self.dy = -DY;
        }

        self.x = self.x.wrapping_add_signed(self.dx);
        self.y = self.y.wrapping_add_signed(self.dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dac::trace::MeterDac;
    use crate::idle::{Mode, Shared};

    #[test]
    fn ball_stays_inside_the_field() {
        let mut shared = Shared::default();
        let field = Field::new(shared.resolution);
        let mut bounce = Bounce::new(64);
        let mut dac = MeterDac::new();
        let (mut seen_min_x, mut seen_max_x) = (u8::MAX, 0);

        for _ in 0..10_000 {
            let mut frame = Frame {
                out: &mut dac,
                shared: &mut shared,
                now_ms: 0,
            };
            bounce.tick(&mut frame).unwrap();

            let (x, y) = bounce.position();
            assert!(x >= field.min_x + RADIUS && x <= field.max_x - RADIUS, "x={}", x);
            assert!(y >= field.min_y + RADIUS && y <= field.max_y - RADIUS, "y={}", y);
            seen_min_x = seen_min_x.min(x);
            seen_max_x = seen_max_x.max(x);
        }
        // The ball has crossed the field and come back
        assert_eq!(seen_min_x, field.min_x + RADIUS);
        assert_eq!(seen_max_x, field.max_x - RADIUS);
    }

    #[test]
    fn frame_draws_ball_and_border() {
        let mut shared = Shared::default();
        let mut dac = crate::dac::trace::TraceDac::new();
        let mut frame = Frame {
            out: &mut dac,
            shared: &mut shared,
            now_ms: 0,
        };
        Bounce::new(64).tick(&mut frame).unwrap();
        let positions = dac.positions();
        assert!(positions.contains(&(8, 8)));
        assert!(positions.contains(&(63, 4)));
        assert!(positions.contains(&(0, 59)));
    }

    #[test]
    fn factory_sizes_the_ball_to_the_canvas() {
        let mut shared = Shared::new(32, 0);
        let field = Field::new(32);
        let Mode::Bounce(mut bounce) = crate::idle::bounce(&mut shared) else {
            panic!("bounce factory built another mode");
        };
        assert_eq!(bounce.position(), (field.min_x + RADIUS, field.min_y + RADIUS));

        let mut dac = MeterDac::new();
        for _ in 0..5_000 {
            let mut frame = Frame {
                out: &mut dac,
                shared: &mut shared,
                now_ms: 0,
            };
            bounce.tick(&mut frame).unwrap();
            let (x, y) = bounce.position();
            assert!(x <= field.max_x - RADIUS && y <= field.max_y - RADIUS, "({}, {})", x, y);
        }
    }
}
