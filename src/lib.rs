//! Oscilloscope XY-mode renderer
//!
//! Vector art, bitmaps and text are traced point by point through a pair of
//! resistor-ladder DACs, one per scope input. The scope only shows what the
//! beam keeps retracing, so a frame generator ([`idle::Mode`]) redraws the
//! picture on every pass of the main loop while console commands switch
//! between generators.
//!
//! Coordinates grow right and down, like the bitmaps. Enable the `invert-y`
//! feature when the Y ladder is wired with 0 at the bottom of the screen.

pub mod clock;
pub mod config;
pub mod dac;
pub mod engine;
#[cfg(feature = "esp32")]
pub mod esp;
pub mod idle;
pub mod ihex;
pub mod input;
pub mod raster;
pub mod scan;
pub mod storage;

pub use config::Config;
pub use engine::Engine;
