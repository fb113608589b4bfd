//! Device database loaded on first use

use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;

use super::database::DeviceDatabase;
use super::FuseLayoutLookup;
use crate::error::LookupError;

/// A [`FuseLayoutLookup`] backed by RON files that are only read when the
/// first query arrives.
///
/// Operations that never consult the fuse layout (image writes) therefore
/// never touch the filesystem. If loading fails, every query reports
/// [`LookupError::Unavailable`]; the load is not retried.
#[derive(Debug)]
pub struct LazyDeviceDatabase {
    path: PathBuf,
    db: OnceCell<Result<DeviceDatabase, String>>,
}

impl LazyDeviceDatabase {
    /// Create a lazy database for a RON file or a directory of RON files
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            db: OnceCell::new(),
        }
    }

    /// Path the database is loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load (once) and return the database
    pub fn get(&self) -> Result<&DeviceDatabase, &str> {
        self.db
            .get_or_init(|| {
                let mut db = DeviceDatabase::new();
                match db.load_path(&self.path) {
                    Ok(count) => {
                        log::debug!("Loaded {} devices from {}", count, self.path.display());
                        Ok(db)
                    }
                    Err(e) => Err(format!("{}: {}", self.path.display(), e)),
                }
            })
            .as_ref()
            .map_err(String::as_str)
    }
}

impl FuseLayoutLookup for LazyDeviceDatabase {
    fn fuse_byte_count(&self, device_id: &str) -> Result<u8, LookupError> {
        match self.get() {
            Ok(db) => db.fuse_byte_count(device_id),
            Err(reason) => Err(LookupError::Unavailable {
                device: device_id.to_string(),
                reason: reason.to_string(),
            }),
        }
    }
}
