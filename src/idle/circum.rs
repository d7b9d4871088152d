//! Fading triangles inscribed in the canvas circle
//!
//! A new random triangle replaces the oldest one every few frames. Newer
//! triangles are traced more often per frame, the phosphor makes them glow
//! brighter while older ones fade out.

use heapless::Deque;
use rand::Rng;

use super::Frame;
use crate::dac::DisplayError;
use crate::raster::draw_polygon;

/// Triangles kept on screen
pub const MAX_TRIS: usize = 8;

/// A triangle is added on every frame where `frame & ADD_EVERY_MASK == 0`
const ADD_EVERY_MASK: u8 = 0x0F;

type Point = (i16, i16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle([Point; 3]);

impl Triangle {
    fn random<R: Rng>(rng: &mut R, max: u8) -> Self {
        Triangle([
            random_point(rng, max),
            random_point(rng, max),
            random_point(rng, max),
        ])
    }

    pub fn corners(&self) -> &[Point; 3] {
        &self.0
    }
}

/// Point on the largest circle inside `[0, max]`, at a whole degree angle
fn random_point<R: Rng>(rng: &mut R, max: u8) -> Point {
    let angle = (rng.gen_range(0..359) as f32).to_radians();
    let scale = 0.5 * f32::from(max);
    (
        ((angle.cos() + 1.0) * scale) as i16,
        ((angle.sin() + 1.0) * scale) as i16,
    )
}

#[derive(Debug, Clone, Default)]
pub struct Circum {
    triangles: Deque<Triangle, MAX_TRIS>,
    frame: u8,
}

impl Circum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Triangles oldest first
    pub fn triangles(&self) -> impl Iterator<Item = &Triangle> {
        self.triangles.iter()
    }

    pub fn tick(&mut self, frame: &mut Frame<'_>) -> Result<(), DisplayError> {
        if self.frame & ADD_EVERY_MASK == 0 {
            if self.triangles.is_full() {
                self.triangles.pop_front();
            }
            let max = frame.shared.max();
            let triangle = Triangle::random(&mut frame.shared.rng, max);
            self.triangles.push_back(triangle).ok();
        }
        self.frame = self.frame.wrapping_add(1);

        for (age, triangle) in self.triangles.iter().enumerate() {
            // Repeat recently inserted triangles so they appear brighter
            for _ in 0..=age {
                draw_polygon(frame.out, triangle.corners())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dac::trace::{MeterDac, TraceDac};
    use crate::idle::Shared;

    #[test]
    fn adds_one_triangle_every_sixteen_frames() {
        let mut shared = Shared::default();
        let mut dac = MeterDac::new();
        let mut circum = Circum::new();
        for n in 0..(16 * MAX_TRIS + 40) {
            let mut frame = Frame {
                out: &mut dac,
                shared: &mut shared,
                now_ms: 0,
            };
            circum.tick(&mut frame).unwrap();
            let expected = (n / 16 + 1).min(MAX_TRIS);
            assert_eq!(circum.triangles().count(), expected, "frame {}", n);
        }
    }

    #[test]
    fn oldest_triangle_is_evicted() {
        let mut shared = Shared::default();
        let mut dac = MeterDac::new();
        let mut circum = Circum::new();
        let mut first = None;
        for n in 0..(16 * MAX_TRIS + 1) {
            let mut frame = Frame {
                out: &mut dac,
                shared: &mut shared,
                now_ms: 0,
            };
            circum.tick(&mut frame).unwrap();
            if n == 0 {
                first = circum.triangles().next().copied();
            }
        }
        assert_eq!(circum.triangles().count(), MAX_TRIS);
        let second = circum.triangles().next().copied();
        assert_ne!(first, second);
    }

    #[test]
    fn corners_lie_on_the_canvas_circle() {
        let mut shared = Shared::new(64, 7);
        for _ in 0..100 {
            let (x, y) = random_point(&mut shared.rng, 63);
            assert!((0..=63).contains(&x) && (0..=63).contains(&y));
            let r = (f32::from(x) - 31.5).hypot(f32::from(y) - 31.5);
            assert!((r - 31.5).abs() < 1.5, "({}, {})", x, y);
        }
    }

    #[test]
    fn newer_triangles_are_traced_more_often() {
        let mut shared = Shared::default();
        let mut circum = Circum::new();
        let mut meter = MeterDac::new();
        for _ in 0..16 {
            let mut frame = Frame {
                out: &mut meter,
                shared: &mut shared,
                now_ms: 0,
            };
            circum.tick(&mut frame).unwrap();
        }

        // Frame 16 adds the second triangle, which is traced twice
        let mut dac = TraceDac::new();
        let mut frame = Frame {
            out: &mut dac,
            shared: &mut shared,
            now_ms: 0,
        };
        circum.tick(&mut frame).unwrap();

        let writes = |t: &Triangle| {
            let mut single = TraceDac::new();
            draw_polygon(&mut single, t.corners()).unwrap();
            single.writes().len()
        };
        let tris: Vec<Triangle> = circum.triangles().copied().collect();
        assert_eq!(tris.len(), 2);
        assert_eq!(dac.writes().len(), writes(&tris[0]) + 2 * writes(&tris[1]));
    }
}
