//! The opaque key/value capability calibration profiles persist through.

use crate::error::CalibrationError;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// A storage backend for calibration profiles, keyed by opaque strings
/// (the calibrator uses `calibration:<device_id>`).
///
/// The core never assumes anything about the backend beyond get/put —
/// swapping in a database-backed or cloud-synced store is a matter of
/// implementing this trait.
pub trait CalibrationStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CalibrationError>;
    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), CalibrationError>;
}

/// A non-persistent store, useful for tests and headless demos.
#[derive(Debug, Default)]
pub struct InMemoryCalibrationStore {
    entries: HashMap<String, Vec<u8>>,
}

impl InMemoryCalibrationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CalibrationStore for InMemoryCalibrationStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CalibrationError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), CalibrationError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// A store that serializes each key to its own file under a base
/// directory, one JSON blob per device.
#[derive(Debug, Clone)]
pub struct FileCalibrationStore {
    base_dir: PathBuf,
}

impl FileCalibrationStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let safe_name: String =
            key.chars().map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' }).collect();
        self.base_dir.join(format!("{safe_name}.json"))
    }
}

impl CalibrationStore for FileCalibrationStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CalibrationError> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(CalibrationError::Storage { reason: err.to_string() }),
        }
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), CalibrationError> {
        fs::create_dir_all(&self.base_dir)
            .map_err(|err| CalibrationError::Storage { reason: err.to_string() })?;
        fs::write(self.path_for(key), value).map_err(|err| CalibrationError::Storage { reason: err.to_string() })
    }
}
