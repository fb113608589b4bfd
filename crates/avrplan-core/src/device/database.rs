//! Device database for runtime loading and lookup
//!
//! This module provides the `DeviceDatabase` type for loading AVR device
//! descriptions from RON files at runtime.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use super::types::Device;
use super::FuseLayoutLookup;
use crate::error::LookupError;

/// Error loading device descriptions
#[derive(Debug, Error)]
pub enum DeviceDbError {
    /// A device file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A device file is not valid RON
    #[error("parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// A device description is inconsistent
    #[error("invalid device description: {0}")]
    Validation(String),
}

// RON file format

/// Memory size as written in device files
#[derive(Debug, Clone, Copy, serde::Deserialize)]
pub enum Size {
    /// Bytes
    B(u32),
    /// Kibibytes
    KiB(u32),
    /// Mebibytes
    MiB(u32),
}

impl Size {
    /// Size in bytes, or `None` if it does not fit in a `u32`
    pub fn to_bytes(self) -> Option<u32> {
        match self {
            Size::B(n) => Some(n),
            Size::KiB(n) => n.checked_mul(1 << 10),
            Size::MiB(n) => n.checked_mul(1 << 20),
        }
    }
}

fn size_in_bytes(device: &str, what: &str, size: Size) -> Result<u32, DeviceDbError> {
    size.to_bytes().ok_or_else(|| {
        DeviceDbError::Validation(format!(
            "device '{}': {} {:?} is too large",
            device, what, size
        ))
    })
}

/// Single device definition in RON format
#[derive(Debug, Clone, serde::Deserialize)]
struct DeviceDef {
    id: String,
    name: String,
    avrdude_id: String,
    signature: [u8; 3],
    flash_size: Size,
    #[serde(default = "default_eeprom_size")]
    eeprom_size: Size,
    fuse_bytes: u8,
    #[serde(default = "default_lock_bytes")]
    lock_bytes: u8,
}

fn default_eeprom_size() -> Size {
    Size::B(0)
}

fn default_lock_bytes() -> u8 {
    1
}

/// Vendor definition containing multiple devices
#[derive(Debug, Clone, serde::Deserialize)]
struct VendorDef {
    vendor: String,
    devices: Vec<DeviceDef>,
}

// ============================================================================
// Device database
// ============================================================================

/// Runtime device database
///
/// Holds a collection of AVR device definitions that can be loaded from RON files.
#[derive(Debug, Clone, Default)]
pub struct DeviceDatabase {
    devices: Vec<Device>,
}

impl DeviceDatabase {
    /// Create an empty device database
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
        }
    }

    /// Load device definitions from a single RON file
    pub fn load_file(&mut self, path: &Path) -> Result<usize, DeviceDbError> {
        let content = fs::read_to_string(path)?;
        let count = self.load_ron(&content)?;
        log::debug!("Loaded {} devices from {}", count, path.display());
        Ok(count)
    }

    /// Load device definitions from a RON string
    ///
    /// The whole file is validated before any device is added, so a rejected
    /// file leaves the database unchanged.
    pub fn load_ron(&mut self, content: &str) -> Result<usize, DeviceDbError> {
        let vendor_def: VendorDef = ron::from_str(content)?;
        let count = vendor_def.devices.len();

        let mut parsed = Vec::with_capacity(count);
        for def in vendor_def.devices {
            let id = def.id.trim();
            if id.is_empty() {
                return Err(DeviceDbError::Validation(format!(
                    "device '{}' has an empty id",
                    def.name
                )));
            }
            if def.fuse_bytes > 3 {
                return Err(DeviceDbError::Validation(format!(
                    "device '{}' declares {} fuse bytes (at most 3)",
                    id, def.fuse_bytes
                )));
            }
            let duplicate =
                self.find(id).is_some() || parsed.iter().any(|d: &Device| d.matches_id(id));
            if duplicate {
                return Err(DeviceDbError::Validation(format!(
                    "duplicate device id '{}'",
                    id
                )));
            }

            parsed.push(Device {
                vendor: vendor_def.vendor.clone(),
                id: id.to_string(),
                flash_size: size_in_bytes(id, "flash size", def.flash_size)?,
                eeprom_size: size_in_bytes(id, "EEPROM size", def.eeprom_size)?,
                name: def.name,
                avrdude_id: def.avrdude_id,
                signature: def.signature,
                fuse_bytes: def.fuse_bytes,
                lock_bytes: def.lock_bytes,
            });
        }

        self.devices.extend(parsed);
        Ok(count)
    }

    /// Load all RON files from a directory
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, DeviceDbError> {
        let mut total = 0;

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "ron") {
                paths.push(path);
            }
        }
        // read_dir order is platform dependent
        paths.sort();

        for path in paths {
            total += self.load_file(&path)?;
        }

        Ok(total)
    }

    /// Load from a path that is either a RON file or a directory of RON files
    pub fn load_path(&mut self, path: &Path) -> Result<usize, DeviceDbError> {
        if path.is_dir() {
            self.load_dir(path)
        } else {
            self.load_file(path)
        }
    }

    /// Get all devices in the database
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Get the number of devices in the database
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Check if the database is empty
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Find a device by its id (case-insensitive exact match)
    pub fn find(&self, id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.matches_id(id))
    }

    /// Find a device by its signature bytes
    pub fn find_by_signature(&self, signature: [u8; 3]) -> Option<&Device> {
        self.devices.iter().find(|d| d.matches_signature(signature))
    }

    /// Find devices by name (case-insensitive partial match)
    pub fn find_by_name(&self, name: &str) -> Vec<&Device> {
        let name_lower = name.to_lowercase();
        self.devices
            .iter()
            .filter(|d| d.name.to_lowercase().contains(&name_lower))
            .collect()
    }

    /// Iterate over all devices
    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter()
    }
}

impl FuseLayoutLookup for DeviceDatabase {
    fn fuse_byte_count(&self, device_id: &str) -> Result<u8, LookupError> {
        self.find(device_id)
            .map(|d| d.fuse_bytes)
            .ok_or_else(|| LookupError::UnknownDevice(device_id.to_string()))
    }
}
