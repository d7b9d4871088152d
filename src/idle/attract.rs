//! Attract mode: a timed rotation through other modes
//!
//! The scheduler is itself a [`Mode`] wrapping the mode it currently shows.
//! Time is accounted by subtracting the milliseconds elapsed since the last
//! frame, so frames of any length keep the rotation on schedule.

use super::{Factory, Frame, Mode};
use crate::dac::DisplayError;

/// One stop of the rotation
#[derive(Debug, Clone, Copy)]
pub struct Entry {
    pub name: &'static str,
    pub factory: Factory,
    pub duration_ms: u32,
}

/// Rotation used by the `attract` command and at boot
pub static ATTRACT_TABLE: &[Entry] = &[
    Entry {
        name: "logo",
        factory: super::logo,
        duration_ms: 4000,
    },
    Entry {
        name: "maze",
        factory: super::maze,
        duration_ms: 6000,
    },
    Entry {
        name: "doge",
        factory: super::doge,
        duration_ms: 3000,
    },
    Entry {
        name: "bounce",
        factory: super::bounce,
        duration_ms: 10000,
    },
    Entry {
        name: "pepe",
        factory: super::pepe,
        duration_ms: 3000,
    },
    Entry {
        name: "circum",
        factory: super::circum,
        duration_ms: 6000,
    },
    Entry {
        name: "lj56",
        factory: super::lj56,
        duration_ms: 6000,
    },
];

#[derive(Debug)]
pub struct Attract {
    table: &'static [Entry],
    current: Option<usize>,
    countdown_ms: i64,
    last_ms: Option<u32>,
    delegate: Option<Box<Mode>>,
}

impl Attract {
    /// Start before the first entry, which gets installed on the first tick
    pub fn new(table: &'static [Entry]) -> Self {
        Attract {
            table,
            current: None,
            countdown_ms: 0,
            last_ms: None,
            delegate: None,
        }
    }

    /// Table index of the mode on screen
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Mode on screen
    pub fn delegate(&self) -> Option<&Mode> {
        self.delegate.as_deref()
    }

    pub fn tick(&mut self, frame: &mut Frame<'_>) -> Result<(), DisplayError> {
        let elapsed = match self.last_ms {
            Some(last) => frame.now_ms.wrapping_sub(last),
            None => 0,
        };
        self.last_ms = Some(frame.now_ms);
        self.countdown_ms -= i64::from(elapsed);

        if self.countdown_ms <= 0 && !self.table.is_empty() {
            let next = self.current.map_or(0, |i| (i + 1) % self.table.len());
            let entry = &self.table[next];
            log::debug!("attract: {} for {} ms", entry.name, entry.duration_ms);
            self.delegate = Some(Box::new((entry.factory)(frame.shared)));
            self.current = Some(next);
            self.countdown_ms = i64::from(entry.duration_ms);
        }

        match self.delegate.as_mut() {
            Some(mode) => mode.tick(frame),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dac::trace::MeterDac;
    use crate::idle::Shared;

    static TEST_TABLE: &[Entry] = &[
        Entry {
            name: "circle",
            factory: crate::idle::circle,
            duration_ms: 1000,
        },
        Entry {
            name: "cross",
            factory: crate::idle::cross,
            duration_ms: 500,
        },
        Entry {
            name: "bounce",
            factory: crate::idle::bounce,
            duration_ms: 2000,
        },
    ];

    fn tick_at(attract: &mut Attract, shared: &mut Shared, now_ms: u32) -> Option<usize> {
        let mut dac = MeterDac::new();
        let mut frame = Frame {
            out: &mut dac,
            shared,
            now_ms,
        };
        attract.tick(&mut frame).unwrap();
        attract.current_index()
    }

    #[test_log::test]
    fn advances_when_durations_run_out() {
        let mut shared = Shared::default();
        let mut attract = Attract::new(TEST_TABLE);
        let expected = [
            (0, 0),
            (400, 0),
            (999, 0),
            (1000, 1),
            (1300, 1),
            (1499, 1),
            (1500, 2),
            (3499, 2),
            (3500, 0),
            (4499, 0),
            (4500, 1),
        ];
        for (now_ms, index) in expected {
            assert_eq!(tick_at(&mut attract, &mut shared, now_ms), Some(index), "t={}", now_ms);
        }
    }

    #[test]
    fn coarse_frames_still_advance() {
        let mut shared = Shared::default();
        let mut attract = Attract::new(TEST_TABLE);
        tick_at(&mut attract, &mut shared, 0);
        // One long frame overshoots several entries but only advances one
        assert_eq!(tick_at(&mut attract, &mut shared, 5000), Some(1));
        assert_eq!(attract.delegate().map(Mode::name), Some("cross"));
    }

    #[test]
    fn clock_wrap_is_a_short_step() {
        let mut shared = Shared::default();
        let mut attract = Attract::new(TEST_TABLE);
        tick_at(&mut attract, &mut shared, u32::MAX - 100);
        assert_eq!(tick_at(&mut attract, &mut shared, 500), Some(0));
        assert_eq!(tick_at(&mut attract, &mut shared, 899), Some(1));
    }

    #[test]
    fn empty_table_draws_nothing() {
        let mut shared = Shared::default();
        let mut attract = Attract::new(&[]);
        assert_eq!(tick_at(&mut attract, &mut shared, 0), None);
        assert!(attract.delegate().is_none());
    }

    #[test]
    fn default_table_starts_with_the_logo() {
        let mut shared = Shared::default();
        let mut attract = Attract::new(ATTRACT_TABLE);
        tick_at(&mut attract, &mut shared, 0);
        assert_eq!(attract.delegate().map(Mode::name), Some("screen"));
        assert_eq!(shared.screen.row(2), b"  Makes!");
    }
}
