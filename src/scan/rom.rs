//! Bitmaps baked from `assets/` by the build script

/// 64x64 Doge
pub static DOGE: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/doge.bin"));

/// 64x64 Pepe
pub static PEPE: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/pepe.bin"));
