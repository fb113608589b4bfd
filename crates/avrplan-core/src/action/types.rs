//! Programmer action type definitions

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ActionError;

/// A physical or logical memory area of an AVR device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MemoryRegion {
    /// Program memory
    Flash,
    /// Data EEPROM
    Eeprom,
    /// Device signature bytes (read-only)
    Signature,
    /// Oscillator calibration bytes (read-only)
    Calibration,
    /// Lock bits
    Lock,
    /// Single fuse byte of devices with only one fuse
    Fuse,
    /// Low fuse byte
    LowFuse,
    /// High fuse byte
    HighFuse,
    /// Extended fuse byte
    ExtendedFuse,
}

impl MemoryRegion {
    /// All regions, in declaration order
    pub const ALL: [MemoryRegion; 9] = [
        Self::Flash,
        Self::Eeprom,
        Self::Signature,
        Self::Calibration,
        Self::Lock,
        Self::Fuse,
        Self::LowFuse,
        Self::HighFuse,
        Self::ExtendedFuse,
    ];

    /// Canonical name of the region, as understood by avrdude.
    ///
    /// Backup files for fuse and signature regions are named after this.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Flash => "flash",
            Self::Eeprom => "eeprom",
            Self::Signature => "signature",
            Self::Calibration => "calibration",
            Self::Lock => "lock",
            Self::Fuse => "fuse",
            Self::LowFuse => "lfuse",
            Self::HighFuse => "hfuse",
            Self::ExtendedFuse => "efuse",
        }
    }

    /// Whether the region can only be read
    pub const fn is_read_only(self) -> bool {
        matches!(self, Self::Signature | Self::Calibration)
    }

    /// Whether the region is one of the fuse bytes
    pub const fn is_fuse(self) -> bool {
        matches!(
            self,
            Self::Fuse | Self::LowFuse | Self::HighFuse | Self::ExtendedFuse
        )
    }
}

impl fmt::Display for MemoryRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MemoryRegion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown memory region: {}", s))
    }
}

/// Transfer direction of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Device to file
    Read,
    /// File or value to device
    Write,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => f.write_str("read"),
            Self::Write => f.write_str("write"),
        }
    }
}

/// How the payload of an action is interpreted or produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Intel HEX file
    IntelHex,
    /// Raw hex values (e.g. `0x1e,0x94,0x03`)
    RawHex,
    /// Let the programmer tool detect the file format
    Auto,
    /// Immediate byte value, no file involved
    Numeric,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IntelHex => f.write_str("intel_hex"),
            Self::RawHex => f.write_str("raw_hex"),
            Self::Auto => f.write_str("auto"),
            Self::Numeric => f.write_str("numeric"),
        }
    }
}

/// Data carried by an action
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Payload {
    /// File to read from or write to
    File(PathBuf),
    /// Single byte value
    Value(u8),
}

/// A single abstract programmer operation
///
/// Actions are immutable values. The constructors enforce that the encoding
/// matches the payload and direction, and that read-only regions are never
/// written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProgrammerAction {
    region: MemoryRegion,
    direction: Direction,
    payload: Payload,
    encoding: Encoding,
}

impl ProgrammerAction {
    /// Read `region` into the file at `path`
    pub fn read(
        region: MemoryRegion,
        path: impl Into<PathBuf>,
        encoding: Encoding,
    ) -> Result<Self, ActionError> {
        Self::with_file(region, Direction::Read, path.into(), encoding)
    }

    /// Write the file at `path` into `region`
    pub fn write_file(
        region: MemoryRegion,
        path: impl Into<PathBuf>,
        encoding: Encoding,
    ) -> Result<Self, ActionError> {
        Self::with_file(region, Direction::Write, path.into(), encoding)
    }

    /// Write a single byte value into `region`
    pub fn write_value(region: MemoryRegion, value: u8) -> Result<Self, ActionError> {
        if region.is_read_only() {
            return Err(ActionError::ReadOnlyRegion(region));
        }
        Ok(Self {
            region,
            direction: Direction::Write,
            payload: Payload::Value(value),
            encoding: Encoding::Numeric,
        })
    }

    /// Assemble an action whose fields are already known to be consistent
    pub(crate) fn from_parts(
        region: MemoryRegion,
        direction: Direction,
        payload: Payload,
        encoding: Encoding,
    ) -> Self {
        Self {
            region,
            direction,
            payload,
            encoding,
        }
    }

    fn with_file(
        region: MemoryRegion,
        direction: Direction,
        path: PathBuf,
        encoding: Encoding,
    ) -> Result<Self, ActionError> {
        if path.as_os_str().is_empty() {
            return Err(ActionError::EmptyPath(region));
        }
        if encoding == Encoding::Numeric {
            return Err(ActionError::IncompatibleEncoding(encoding));
        }
        // Format detection only works on existing input files
        if direction == Direction::Read && encoding == Encoding::Auto {
            return Err(ActionError::AutoEncodingOnRead(region));
        }
        if direction == Direction::Write && region.is_read_only() {
            return Err(ActionError::ReadOnlyRegion(region));
        }
        Ok(Self {
            region,
            direction,
            payload: Payload::File(path),
            encoding,
        })
    }

    /// Memory region this action targets
    pub fn region(&self) -> MemoryRegion {
        self.region
    }

    /// Transfer direction
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Payload of the action
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Payload encoding
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// File path, if this is a file based action
    pub fn path(&self) -> Option<&Path> {
        match &self.payload {
            Payload::File(path) => Some(path),
            Payload::Value(_) => None,
        }
    }

    /// Byte value, if this is a numeric action
    pub fn value(&self) -> Option<u8> {
        match self.payload {
            Payload::Value(v) => Some(v),
            Payload::File(_) => None,
        }
    }

    /// Build a copy of this action with its file path transformed by `f`.
    ///
    /// Used to resolve placeholder tokens after planning. Numeric actions are
    /// returned unchanged.
    pub fn map_path(&self, f: impl FnOnce(&Path) -> PathBuf) -> Result<Self, ActionError> {
        match &self.payload {
            Payload::File(path) => {
                Self::with_file(self.region, self.direction, f(path), self.encoding)
            }
            Payload::Value(_) => Ok(self.clone()),
        }
    }
}

impl fmt::Display for ProgrammerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            Payload::File(path) => write!(
                f,
                "{} {} {} ({})",
                self.direction,
                self.region,
                path.display(),
                self.encoding
            ),
            Payload::Value(v) => write!(f, "{} {} = 0x{:02X}", self.direction, self.region, v),
        }
    }
}
