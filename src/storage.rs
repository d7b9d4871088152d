//! Persistence for the RAM bitmap
//!
//! The bitmap is stored as its raw packed bytes, nothing else. Backends only
//! move bytes, sizing and validation is up to the caller.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub trait Storage {
    /// Replace the stored dump with `data`
    fn save(&mut self, data: &[u8]) -> Result<()>;

    /// Read the stored dump into `buf`
    ///
    /// Returns the number of bytes read, or `None` when nothing was saved yet.
    fn load(&mut self, buf: &mut [u8]) -> Result<Option<usize>>;
}

/// Dump kept in a file on the host
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStorage { path: path.into() }
    }
}

impl Storage for FileStorage {
    fn save(&mut self, data: &[u8]) -> Result<()> {
        fs::write(&self.path, data)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }

    fn load(&mut self, buf: &mut [u8]) -> Result<Option<usize>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", self.path.display()))
            }
        };
        let len = data.len().min(buf.len());
        buf[..len].copy_from_slice(&data[..len]);
        Ok(Some(len))
    }
}

/// Dump kept in memory, lost on exit
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    data: Option<Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn save(&mut self, data: &[u8]) -> Result<()> {
        self.data = Some(data.to_vec());
        Ok(())
    }

    fn load(&mut self, buf: &mut [u8]) -> Result<Option<usize>> {
        Ok(self.data.as_ref().map(|data| {
            let len = data.len().min(buf.len());
            buf[..len].copy_from_slice(&data[..len]);
            len
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_round_trip() {
        let mut storage = MemoryStorage::new();
        let mut buf = [0u8; 4];
        assert_eq!(storage.load(&mut buf).unwrap(), None);

        storage.save(&[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(storage.load(&mut buf).unwrap(), Some(4));
        assert_eq!(buf, [1, 2, 3, 4]);
    }

    #[test]
    fn file_round_trip() {
        let path = std::env::temp_dir().join(format!("xyscope-storage-{}.bin", std::process::id()));
        let _ = fs::remove_file(&path);

        let mut storage = FileStorage::new(&path);
        let mut buf = [0u8; 3];
        assert_eq!(storage.load(&mut buf).unwrap(), None);

        storage.save(&[7, 8]).unwrap();
        assert_eq!(storage.load(&mut buf).unwrap(), Some(2));
        assert_eq!(buf, [7, 8, 0]);

        let _ = fs::remove_file(&path);
    }
}
