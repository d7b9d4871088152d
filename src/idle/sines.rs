//! Circle traced from a sine table
//!
//! X gets the table a quarter period ahead of Y, so the beam runs along
//! cosine/sine and draws a circle without any line rasterizing. Small tables
//! give visible corners, large ones a smooth but dimmer circle.

use heapless::Vec;

use super::Frame;
use crate::dac::DisplayError;

pub const MIN_STEPS: u8 = 32;
pub const MAX_STEPS: u8 = 240;

#[derive(Debug, Clone)]
pub struct Sines {
    table: Vec<u8, { MAX_STEPS as usize }>,
}

impl Sines {
    /// Sample one period in `steps` points, clamped to
    /// [`MIN_STEPS`]..=[`MAX_STEPS`]
    pub fn new(steps: u8, resolution: u8) -> Self {
        let steps = clamp_steps(steps);
        let amplitude = f64::from(resolution / 2).max(1.0) - 1.0;
        let rad_per_step = 2.0 * core::f64::consts::PI / f64::from(steps);
        let table = (0..steps)
            .map(|i| (amplitude * (1.0 + (f64::from(i) * rad_per_step).sin()) + 0.5) as u8)
            .collect();
        Sines { table }
    }

    pub fn steps(&self) -> usize {
        self.table.len()
    }

    pub fn table(&self) -> &[u8] {
        &self.table
    }

    pub fn tick(&mut self, frame: &mut Frame<'_>) -> Result<(), DisplayError> {
        let steps = self.table.len();
        for i in 0..steps {
            // Shift phase of X by 90 degrees for cosine
            frame.out.write_x(self.table[(i + steps / 4) % steps])?;
            frame.out.write_y(self.table[i])?;
        }
        Ok(())
    }
}

/// Step count actually used for a requested one
pub fn clamp_steps(steps: u8) -> u8 {
    steps.clamp(MIN_STEPS, MAX_STEPS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dac::trace::TraceDac;
    use crate::idle::Shared;

    #[test]
    fn steps_are_clamped() {
        assert_eq!(Sines::new(0, 64).steps(), 32);
        assert_eq!(Sines::new(100, 64).steps(), 100);
        assert_eq!(Sines::new(255, 64).steps(), 240);
    }

    #[test]
    fn table_spans_the_canvas() {
        let sines = Sines::new(240, 64);
        assert_eq!(sines.table()[0], 31);
        assert_eq!(sines.table().iter().max(), Some(&62));
        assert_eq!(sines.table().iter().min(), Some(&0));
    }

    #[test]
    fn frame_traces_a_circle() {
        let mut shared = Shared::default();
        let mut sines = Sines::new(64, shared.resolution);
        let mut dac = TraceDac::new();
        let mut frame = Frame {
            out: &mut dac,
            shared: &mut shared,
            now_ms: 0,
        };
        sines.tick(&mut frame).unwrap();
        assert_eq!(dac.writes().len(), 128);
        // X leads Y by a quarter period
        assert_eq!(dac.xs()[0], 62);
        assert_eq!(dac.ys()[0], 31);
        for (x, y) in dac.xs().into_iter().zip(dac.ys()) {
            let r = (f64::from(x) - 31.0).hypot(f64::from(y) - 31.0);
            assert!((r - 31.0).abs() < 1.0);
        }
    }
}
