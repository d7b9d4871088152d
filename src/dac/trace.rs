//! Software sinks used by the host simulator and the tests

use super::{Dac, DisplayError};

/// One write to the ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Write {
    X(u8),
    Y(u8),
}

/// Records every write in order
#[derive(Debug, Default)]
pub struct TraceDac {
    writes: Vec<Write>,
}

impl TraceDac {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> &[Write] {
        &self.writes
    }

    pub fn clear(&mut self) {
        self.writes.clear();
    }

    /// Values written to the X ladder
    pub fn xs(&self) -> Vec<u8> {
        self.writes
            .iter()
            .filter_map(|w| match w {
                Write::X(x) => Some(*x),
                Write::Y(_) => None,
            })
            .collect()
    }

    /// Values written to the Y ladder
    pub fn ys(&self) -> Vec<u8> {
        self.writes
            .iter()
            .filter_map(|w| match w {
                Write::Y(y) => Some(*y),
                Write::X(_) => None,
            })
            .collect()
    }

    /// Beam position after each write, starting from the origin
    pub fn positions(&self) -> Vec<(u8, u8)> {
        let (mut x, mut y) = (0, 0);
        self.writes
            .iter()
            .map(|w| {
                match *w {
                    Write::X(v) => x = v,
                    Write::Y(v) => y = v,
                }
                (x, y)
            })
            .collect()
    }
}

impl Dac for TraceDac {
    fn write_x(&mut self, x: u8) -> Result<(), DisplayError> {
        self.writes.push(Write::X(x));
        Ok(())
    }

    fn write_y(&mut self, y: u8) -> Result<(), DisplayError> {
        self.writes.push(Write::Y(y));
        Ok(())
    }
}

/// Counts writes without keeping them, for long running simulations
#[derive(Debug, Default, Clone, Copy)]
pub struct MeterDac {
    pub x_writes: u64,
    pub y_writes: u64,
    pub beam: (u8, u8),
}

impl MeterDac {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of writes and reset the counters
    pub fn take(&mut self) -> u64 {
        let total = self.x_writes + self.y_writes;
        self.x_writes = 0;
        self.y_writes = 0;
        total
    }
}

impl Dac for MeterDac {
    fn write_x(&mut self, x: u8) -> Result<(), DisplayError> {
        self.x_writes += 1;
        self.beam.0 = x;
        Ok(())
    }

    fn write_y(&mut self, y: u8) -> Result<(), DisplayError> {
        self.y_writes += 1;
        self.beam.1 = y;
        Ok(())
    }
}
