//! Boot time configuration
//!
//! Defaults come from the device constants and the cargo features. The host
//! build can override a few of them from the environment.

use std::path::PathBuf;

use crate::dac::DacConfig;

/// Bitmap dump file used by `save` and `load` on the host
pub const STORAGE_ENV: &str = "XYSCOPE_STORAGE";

/// Seed for the random generator, makes mazes and triangles repeatable
pub const SEED_ENV: &str = "XYSCOPE_SEED";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Output mapping in front of the ladder
    pub dac: DacConfig,
    /// Start in attract mode instead of a blank screen
    pub attract_on_boot: bool,
    /// Where the host keeps the saved bitmap
    pub storage_path: PathBuf,
    pub seed: u64,
    /// Frames between RTOS yields, keeps the task watchdog fed
    pub yield_every: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dac: DacConfig::default(),
            attract_on_boot: true,
            storage_path: PathBuf::from("xyscope-bitmap.bin"),
            seed: 0x5eed,
            yield_every: 64,
        }
    }
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up by `var`, unparsable values keep the default
    pub fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = var(STORAGE_ENV) {
            self.storage_path = PathBuf::from(path);
        }
        if let Some(seed) = var(SEED_ENV) {
            match seed.trim().parse() {
                Ok(seed) => self.seed = seed,
                Err(e) => log::warn!("Ignoring {}={:?}: {}", SEED_ENV, seed, e),
            }
        }
        self
    }
}
