//! Lissajous figures from two phase accumulators
//!
//! Each axis owns an 8 bit phase that wraps once per period. The phase is
//! turned into a coordinate through a 16 entry sine table with linear
//! interpolation on the low four bits, so no floating point runs per frame.

use super::Frame;
use crate::dac::DisplayError;
use crate::raster::draw_line;

/// Drift delay used until the `delay` command changes it
pub const DEFAULT_DRIFT_MS: u32 = 50;

const TABLE_BITS: u32 = 4;
const TABLE_LEN: usize = 1 << TABLE_BITS;
const FRAC_MASK: u8 = (1 << (8 - TABLE_BITS)) as u8 - 1;

/// Full scale of the sine table
const TABLE_MAX: i32 = 63;

/// `round(31.5 + 31.5 * sin(2 * pi * i / 16))`
const SINE_TABLE: [u8; TABLE_LEN] = [
    32, 44, 54, 61, 63, 61, 54, 44, 32, 19, 9, 2, 0, 2, 9, 19,
];

/// Interpolated sine of an 8 bit phase, scaled to `[0, max]`
pub fn sine(phase: u8, max: u8) -> u8 {
    let index = usize::from(phase >> (8 - TABLE_BITS));
    let frac = i32::from(phase & FRAC_MASK);
    let a = i32::from(SINE_TABLE[index]);
    let b = i32::from(SINE_TABLE[(index + 1) % TABLE_LEN]);
    let value = a + (b - a) * frac / (i32::from(FRAC_MASK) + 1);
    (value * i32::from(max) / TABLE_MAX) as u8
}

#[derive(Debug, Clone)]
pub struct Lissajous {
    step_x: u8,
    step_y: u8,
    phase_x: u8,
    phase_y: u8,
    /// Milliseconds between drift nudges, 0 for none
    drift_ms: u32,
    last_drift: Option<u32>,
    last_point: Option<(i16, i16)>,
}

impl Lissajous {
    /// Figure with frequency ratio `step_x : step_y`, both phases at zero
    pub fn new(step_x: u8, step_y: u8, drift_ms: u32) -> Self {
        Lissajous {
            step_x,
            step_y,
            phase_x: 0,
            phase_y: 0,
            drift_ms,
            last_drift: None,
            last_point: None,
        }
    }

    pub fn phases(&self) -> (u8, u8) {
        (self.phase_x, self.phase_y)
    }

    pub fn steps(&self) -> (u8, u8) {
        (self.step_x, self.step_y)
    }

    pub fn tick(&mut self, frame: &mut Frame<'_>) -> Result<(), DisplayError> {
        self.drift(frame.now_ms);

        let max = frame.shared.max();
        let point = (
            i16::from(sine(self.phase_x, max)),
            i16::from(sine(self.phase_y, max)),
        );
        let (x0, y0) = self.last_point.unwrap_or(point);
        draw_line(frame.out, x0, y0, point.0, point.1)?;
        self.last_point = Some(point);

        self.phase_x = self.phase_x.wrapping_add(self.step_x);
        self.phase_y = self.phase_y.wrapping_add(self.step_y);
        Ok(())
    }

    /// Slip the X phase by one once every `drift_ms`, rotating the figure
    fn drift(&mut self, now_ms: u32) {
        if self.drift_ms == 0 {
            return;
        }
        match self.last_drift {
            None => self.last_drift = Some(now_ms),
            Some(last) if now_ms.wrapping_sub(last) >= self.drift_ms => {
                self.phase_x = self.phase_x.wrapping_add(1);
                self.last_drift = Some(now_ms);
            }
            Some(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dac::trace::TraceDac;
    use crate::idle::Shared;

    fn run(lissajous: &mut Lissajous, shared: &mut Shared, dac: &mut TraceDac, times: &[u32]) {
        for &now_ms in times {
            let mut frame = Frame {
                out: &mut *dac,
                shared: &mut *shared,
                now_ms,
            };
            lissajous.tick(&mut frame).unwrap();
        }
    }

    #[test]
    fn table_hits_the_extremes() {
        assert_eq!(sine(0, 63), 32);
        assert_eq!(sine(64, 63), 63);
        assert_eq!(sine(192, 63), 0);
        // Halfway between entries 0 and 1
        assert_eq!(sine(8, 63), 38);
        assert_eq!(sine(64, 31), 31);
    }

    #[test]
    fn interpolation_is_monotonic_on_the_rising_edge() {
        let values: Vec<u8> = (192..=255).chain(0..=64).map(|p| sine(p, 63)).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn unit_steps_repeat_every_256_frames() {
        let mut shared = Shared::default();
        let mut dac = TraceDac::new();
        let mut lissajous = Lissajous::new(1, 1, 0);
        let start = lissajous.phases();
        for n in 1..=256 {
            run(&mut lissajous, &mut shared, &mut dac, &[0]);
            if n < 256 {
                assert_ne!(lissajous.phases(), start);
            }
        }
        assert_eq!(lissajous.phases(), start);
    }

    #[test]
    fn curve_is_continuous() {
        let mut shared = Shared::default();
        let mut dac = TraceDac::new();
        let mut lissajous = Lissajous::new(5, 6, 0);
        run(&mut lissajous, &mut shared, &mut dac, &[0; 300]);
        for pair in dac.positions().windows(2).skip(1) {
            let (ax, ay) = pair[0];
            let (bx, by) = pair[1];
            assert!(ax.abs_diff(bx) <= 1 && ay.abs_diff(by) <= 1);
        }
    }

    #[test]
    fn drift_nudges_x_once_per_delay() {
        let mut shared = Shared::default();
        let mut dac = TraceDac::new();
        let mut lissajous = Lissajous::new(0, 0, 100);
        run(&mut lissajous, &mut shared, &mut dac, &[1000, 1050, 1099]);
        assert_eq!(lissajous.phases(), (0, 0));
        run(&mut lissajous, &mut shared, &mut dac, &[1100, 1150, 1200]);
        assert_eq!(lissajous.phases(), (2, 0));
    }

    #[test]
    fn drift_survives_clock_wrap() {
        let mut shared = Shared::default();
        let mut dac = TraceDac::new();
        let mut lissajous = Lissajous::new(0, 0, 10);
        run(&mut lissajous, &mut shared, &mut dac, &[u32::MAX - 5, 4]);
        assert_eq!(lissajous.phases(), (1, 0));
    }
}
