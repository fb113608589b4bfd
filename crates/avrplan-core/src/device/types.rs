//! AVR device type definitions

use std::fmt;

/// Description of a single AVR microcontroller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// Vendor name
    pub vendor: String,
    /// Device id used for lookups (e.g. `atmega16`)
    pub id: String,
    /// Display name (e.g. `ATmega16`)
    pub name: String,
    /// Part id passed to avrdude with `-p` (e.g. `m16`)
    pub avrdude_id: String,
    /// Signature bytes
    pub signature: [u8; 3],
    /// Flash size in bytes
    pub flash_size: u32,
    /// EEPROM size in bytes
    pub eeprom_size: u32,
    /// Number of fuse bytes (0-3)
    pub fuse_bytes: u8,
    /// Number of lock bytes
    pub lock_bytes: u8,
}

impl Device {
    /// Check if this device matches the given id (case-insensitive)
    pub fn matches_id(&self, id: &str) -> bool {
        self.id.eq_ignore_ascii_case(id.trim())
    }

    /// Check if this device has the given signature
    pub fn matches_signature(&self, signature: [u8; 3]) -> bool {
        self.signature == signature
    }

    /// Whether the device has any EEPROM
    pub fn has_eeprom(&self) -> bool {
        self.eeprom_size > 0
    }
}

/// Formats signature bytes as `1E 94 03`
pub struct SignatureDisplay(pub [u8; 3]);

impl fmt::Display for SignatureDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{:02X} {:02X} {:02X}", a, b, c)
    }
}
