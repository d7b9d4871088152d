//! Frame generators
//!
//! The oscilloscope only shows what the beam traces, so something has to
//! redraw the picture continuously. Exactly one [`Mode`] is active at a time,
//! the main loop calls [`Mode::tick`] once per iteration between command
//! polls. A tick traces one frame and returns, it never blocks.
//!
//! Entering a mode builds its state from scratch. Buffers that outlive a mode
//! (the text screen, the RAM bitmap, the random generator) live in [`Shared`].

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::dac::{Dac, DisplayError, RESOLUTION};
use crate::raster::{draw_circle, draw_line};
use crate::scan::{draw_bitmap, draw_screen, rom, Bitmap, TextScreen};

pub mod attract;
pub mod bounce;
pub mod circum;
pub mod lissajous;
pub mod maze;
pub mod sines;

pub use attract::{Attract, Entry, ATTRACT_TABLE};
pub use bounce::Bounce;
pub use circum::Circum;
pub use lissajous::Lissajous;
pub use maze::Maze;
pub use sines::Sines;

/// Runtime knobs changed from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Table size for the sine sweep
    pub sine_steps: u8,
    /// Milliseconds between Lissajous phase nudges, 0 disables the drift
    pub drift_delay_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sine_steps: sines::MAX_STEPS,
            drift_delay_ms: lissajous::DEFAULT_DRIFT_MS,
        }
    }
}

/// State that survives mode switches
pub struct Shared {
    /// Codes per axis
    pub resolution: u8,
    pub screen: TextScreen,
    pub ram: Bitmap,
    pub rng: SmallRng,
    pub settings: Settings,
}

impl Shared {
    pub fn new(resolution: u8, seed: u64) -> Self {
        Shared {
            resolution,
            screen: TextScreen::new(),
            ram: Bitmap::new(),
            rng: SmallRng::seed_from_u64(seed),
            settings: Settings::default(),
        }
    }

    /// Largest coordinate on either axis
    pub fn max(&self) -> u8 {
        self.resolution.saturating_sub(1)
    }
}

impl Default for Shared {
    fn default() -> Self {
        Self::new(RESOLUTION, 0)
    }
}

/// Everything a generator can touch while tracing one frame
pub struct Frame<'a> {
    pub out: &'a mut dyn Dac,
    pub shared: &'a mut Shared,
    /// Monotonic milliseconds, wrapping
    pub now_ms: u32,
}

/// Builds a freshly initialised mode
pub type Factory = fn(&mut Shared) -> Mode;

/// The active generator
#[derive(Debug)]
pub enum Mode {
    /// Largest circle that fits the canvas
    Circle,
    /// Both canvas diagonals
    Cross,
    Sines(Sines),
    Bounce(Bounce),
    Circum(Circum),
    Lissajous(Lissajous),
    /// Text screen
    Screen,
    /// RAM bitmap
    Bitmap,
    Maze(Maze),
    Attract(Attract),
}

impl Mode {
    /// Trace one frame
    pub fn tick(&mut self, frame: &mut Frame<'_>) -> Result<(), DisplayError> {
        match self {
            Mode::Circle => {
                let center = i16::from(frame.shared.resolution / 2);
                draw_circle(frame.out, center, center, center - 1)
            }
            Mode::Cross => {
                let max = i16::from(frame.shared.max());
                draw_line(frame.out, 0, 0, max, max)?;
                draw_line(frame.out, max, 0, 0, max)
            }
            Mode::Sines(sines) => sines.tick(frame),
            Mode::Bounce(bounce) => bounce.tick(frame),
            Mode::Circum(circum) => circum.tick(frame),
            Mode::Lissajous(lissajous) => lissajous.tick(frame),
            Mode::Screen => draw_screen(frame.out, &frame.shared.screen),
            Mode::Bitmap => draw_bitmap(frame.out, &frame.shared.ram),
            Mode::Maze(maze) => maze.tick(frame),
            Mode::Attract(attract) => attract.tick(frame),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Circle => "circle",
            Mode::Cross => "cross",
            Mode::Sines(_) => "sines",
            Mode::Bounce(_) => "bounce",
            Mode::Circum(_) => "circum",
            Mode::Lissajous(_) => "lissajous",
            Mode::Screen => "screen",
            Mode::Bitmap => "bitmap",
            Mode::Maze(_) => "maze",
            Mode::Attract(_) => "attract",
        }
    }
}

pub fn circle(_: &mut Shared) -> Mode {
    Mode::Circle
}

pub fn cross(_: &mut Shared) -> Mode {
    Mode::Cross
}

pub fn sines(shared: &mut Shared) -> Mode {
    Mode::Sines(Sines::new(shared.settings.sine_steps, shared.resolution))
}

pub fn bounce(shared: &mut Shared) -> Mode {
    Mode::Bounce(Bounce::new(shared.resolution))
}

pub fn circum(_: &mut Shared) -> Mode {
    Mode::Circum(Circum::new())
}

pub fn lj11(shared: &mut Shared) -> Mode {
    Mode::Lissajous(Lissajous::new(1, 1, shared.settings.drift_delay_ms))
}

pub fn lj12(shared: &mut Shared) -> Mode {
    Mode::Lissajous(Lissajous::new(1, 2, shared.settings.drift_delay_ms))
}

pub fn lj56(shared: &mut Shared) -> Mode {
    Mode::Lissajous(Lissajous::new(5, 6, shared.settings.drift_delay_ms))
}

/// Current text screen
pub fn screen(_: &mut Shared) -> Mode {
    Mode::Screen
}

/// Logo banner on the text screen
pub fn logo(shared: &mut Shared) -> Mode {
    shared.screen.logo();
    Mode::Screen
}

/// Current RAM bitmap
pub fn bitmap(_: &mut Shared) -> Mode {
    Mode::Bitmap
}

pub fn doge(shared: &mut Shared) -> Mode {
    shared.ram.load(rom::DOGE);
    Mode::Bitmap
}

pub fn pepe(shared: &mut Shared) -> Mode {
    shared.ram.load(rom::PEPE);
    Mode::Bitmap
}

pub fn maze(_: &mut Shared) -> Mode {
    Mode::Maze(Maze::new())
}

pub fn attract(_: &mut Shared) -> Mode {
    Mode::Attract(Attract::new(ATTRACT_TABLE))
}
