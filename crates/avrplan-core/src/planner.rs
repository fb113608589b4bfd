//! Device action planning
//!
//! Pure functions that turn a requested operation into an ordered list of
//! [`ProgrammerAction`]s. The only outside information they need comes from a
//! [`FuseLayoutLookup`] (fuse byte count of a device) and, for
//! [`plan_write_from_build`], a [`BuildArtifactResolver`].
//!
//! Lock and calibration bytes are not part of a backup yet.

use std::path::Path;

use crate::action::{Direction, Encoding, MemoryRegion, Payload, ProgrammerAction};
use crate::build::{ArtifactKind, BuildArtifactResolver};
use crate::device::FuseLayoutLookup;
use crate::error::{ActionError, LookupError};

/// Fuse regions for devices with 0, 1, 2 or 3 fuse bytes
const FUSE_NAMES: [&[MemoryRegion]; 4] = [
    &[],
    &[MemoryRegion::Fuse],
    &[MemoryRegion::LowFuse, MemoryRegion::HighFuse],
    &[
        MemoryRegion::LowFuse,
        MemoryRegion::HighFuse,
        MemoryRegion::ExtendedFuse,
    ],
];

/// Backup file name for flash contents
pub const FLASH_BACKUP_FILE: &str = "flash.hex";
/// Backup file name for EEPROM contents
pub const EEPROM_BACKUP_FILE: &str = "eeprom.eep";

/// Memory image that can be written from a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageRegion {
    /// Program memory
    Flash,
    /// Data EEPROM
    Eeprom,
}

impl ImageRegion {
    /// Toolchain artifact that produces this image
    pub const fn artifact_kind(self) -> ArtifactKind {
        match self {
            Self::Flash => ArtifactKind::FlashImage,
            Self::Eeprom => ArtifactKind::EepromImage,
        }
    }
}

impl From<ImageRegion> for MemoryRegion {
    fn from(region: ImageRegion) -> Self {
        match region {
            ImageRegion::Flash => MemoryRegion::Flash,
            ImageRegion::Eeprom => MemoryRegion::Eeprom,
        }
    }
}

/// Fuse regions for a given fuse byte count, in low/high/extended order
pub fn fuse_regions(count: u8) -> Option<&'static [MemoryRegion]> {
    FUSE_NAMES.get(count as usize).copied()
}

/// Resolve the fuse regions of a device through the lookup
pub fn device_fuse_regions<L: FuseLayoutLookup + ?Sized>(
    lookup: &L,
    device_id: &str,
) -> Result<&'static [MemoryRegion], LookupError> {
    let count = lookup.fuse_byte_count(device_id)?;
    fuse_regions(count).ok_or_else(|| LookupError::UnsupportedFuseCount {
        device: device_id.to_string(),
        count,
    })
}

/// Plan reading all backed-up memories of a device into `destination`.
///
/// Actions are ordered signature, flash, EEPROM, then one read per fuse
/// byte. The destination folder is not checked. A lookup failure is returned
/// as is; no partial plan is produced.
pub fn plan_backup<L: FuseLayoutLookup + ?Sized>(
    lookup: &L,
    device_id: &str,
    destination: &Path,
) -> Result<Vec<ProgrammerAction>, LookupError> {
    let fuses = device_fuse_regions(lookup, device_id)?;

    let mut actions = Vec::with_capacity(3 + fuses.len());
    actions.push(backup_read(
        MemoryRegion::Signature,
        destination,
        MemoryRegion::Signature.name(),
        Encoding::RawHex,
    ));
    actions.push(backup_read(
        MemoryRegion::Flash,
        destination,
        FLASH_BACKUP_FILE,
        Encoding::IntelHex,
    ));
    actions.push(backup_read(
        MemoryRegion::Eeprom,
        destination,
        EEPROM_BACKUP_FILE,
        Encoding::IntelHex,
    ));
    for &fuse in fuses {
        actions.push(backup_read(fuse, destination, fuse.name(), Encoding::RawHex));
    }

    log::debug!(
        "Planned backup of {} to {}: {} actions",
        device_id,
        destination.display(),
        actions.len()
    );
    Ok(actions)
}

/// Read action for a backup file.
///
/// The joined path always ends in a non-empty file name and the encoding is
/// never numeric.
fn backup_read(
    region: MemoryRegion,
    destination: &Path,
    file_name: &str,
    encoding: Encoding,
) -> ProgrammerAction {
    ProgrammerAction::from_parts(
        region,
        Direction::Read,
        Payload::File(destination.join(file_name)),
        encoding,
    )
}

/// Plan writing an image file to flash or EEPROM.
///
/// The file format is left to the programmer tool (`auto` encoding).
/// Placeholders in `source` are kept verbatim.
pub fn plan_write(
    region: ImageRegion,
    source: impl AsRef<Path>,
) -> Result<ProgrammerAction, ActionError> {
    ProgrammerAction::write_file(region.into(), source.as_ref(), Encoding::Auto)
}

/// Plan writing the image a build configuration declares for `region`.
///
/// Returns `Ok(None)` if the build has no toolchain step for that image.
pub fn plan_write_from_build<R: BuildArtifactResolver + ?Sized>(
    resolver: &R,
    region: ImageRegion,
) -> Result<Option<ProgrammerAction>, ActionError> {
    match resolver.declared_output(region.artifact_kind()) {
        Some(path) => plan_write(region, path).map(Some),
        None => {
            log::debug!("No {} step in build configuration", region.artifact_kind());
            Ok(None)
        }
    }
}

/// Plan writing fuse bytes.
///
/// `values[i]` is written to the i-th fuse byte of the device. Values outside
/// 0..=255 (conventionally -1) mean "leave this byte alone". Extra values or
/// extra fuse bytes are ignored.
///
/// If the fuse layout cannot be looked up, the failure is logged and an
/// empty plan is returned.
pub fn plan_fuse_write<L: FuseLayoutLookup + ?Sized>(
    lookup: &L,
    device_id: &str,
    values: &[i32],
) -> Vec<ProgrammerAction> {
    let fuses = match device_fuse_regions(lookup, device_id) {
        Ok(fuses) => fuses,
        Err(e) => {
            log::error!("Cannot plan fuse writes for {}: {}", device_id, e);
            return Vec::new();
        }
    };

    fuses
        .iter()
        .zip(values)
        .filter_map(|(&region, &value)| match u8::try_from(value) {
            Ok(byte) => Some(byte_write(region, byte)),
            Err(_) => {
                log::trace!("Skipping {} (value {})", region, value);
                None
            }
        })
        .collect()
}

/// Fuse regions are always writable
fn byte_write(region: MemoryRegion, value: u8) -> ProgrammerAction {
    ProgrammerAction::from_parts(region, Direction::Write, Payload::Value(value), Encoding::Numeric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{BuildConfig, Tool};
    use std::collections::HashMap;
    use std::path::PathBuf;

    /// Fixed fuse counts per device id
    struct StaticLookup(HashMap<&'static str, u8>);

    impl StaticLookup {
        fn new() -> Self {
            Self(HashMap::from([
                ("at90s8515", 0),
                ("atmega103", 1),
                ("atmega16", 2),
                ("atmega644", 3),
                ("broken", 7),
            ]))
        }
    }

    impl FuseLayoutLookup for StaticLookup {
        fn fuse_byte_count(&self, device_id: &str) -> Result<u8, LookupError> {
            self.0
                .get(device_id)
                .copied()
                .ok_or_else(|| LookupError::UnknownDevice(device_id.to_string()))
        }
    }

    /// Lookup whose backing source cannot be read
    struct Unreadable;

    impl FuseLayoutLookup for Unreadable {
        fn fuse_byte_count(&self, device_id: &str) -> Result<u8, LookupError> {
            Err(LookupError::Unavailable {
                device: device_id.to_string(),
                reason: "permission denied".to_string(),
            })
        }
    }

    fn read(region: MemoryRegion, path: &str, encoding: Encoding) -> ProgrammerAction {
        ProgrammerAction::read(region, path, encoding).unwrap()
    }

    #[test]
    fn test_fuse_table() {
        assert_eq!(fuse_regions(0), Some::<&[MemoryRegion]>(&[]));
        assert_eq!(fuse_regions(1), Some(&[MemoryRegion::Fuse][..]));
        assert_eq!(
            fuse_regions(3),
            Some(
                &[
                    MemoryRegion::LowFuse,
                    MemoryRegion::HighFuse,
                    MemoryRegion::ExtendedFuse
                ][..]
            )
        );
        assert_eq!(fuse_regions(4), None);
    }

    #[test]
    fn test_backup_two_fuses() {
        let actions = plan_backup(&StaticLookup::new(), "atmega16", Path::new("/tmp/bk")).unwrap();
        assert_eq!(
            actions,
            vec![
                read(MemoryRegion::Signature, "/tmp/bk/signature", Encoding::RawHex),
                read(MemoryRegion::Flash, "/tmp/bk/flash.hex", Encoding::IntelHex),
                read(MemoryRegion::Eeprom, "/tmp/bk/eeprom.eep", Encoding::IntelHex),
                read(MemoryRegion::LowFuse, "/tmp/bk/lfuse", Encoding::RawHex),
                read(MemoryRegion::HighFuse, "/tmp/bk/hfuse", Encoding::RawHex),
            ]
        );
        assert!(actions.iter().all(|a| a.direction() == Direction::Read));
    }

    #[test]
    fn test_backup_without_fuses() {
        let actions = plan_backup(&StaticLookup::new(), "at90s8515", Path::new("bk")).unwrap();
        let regions: Vec<_> = actions.iter().map(|a| a.region()).collect();
        assert_eq!(
            regions,
            vec![
                MemoryRegion::Signature,
                MemoryRegion::Flash,
                MemoryRegion::Eeprom
            ]
        );
    }

    #[test]
    fn test_backup_single_fuse() {
        let actions = plan_backup(&StaticLookup::new(), "atmega103", Path::new("bk")).unwrap();
        assert_eq!(actions.len(), 4);
        assert_eq!(actions[3], read(MemoryRegion::Fuse, "bk/fuse", Encoding::RawHex));
    }

    #[test]
    fn test_backup_never_plans_lock_or_calibration() {
        let actions = plan_backup(&StaticLookup::new(), "atmega644", Path::new("bk")).unwrap();
        assert_eq!(actions.len(), 6);
        assert!(!actions
            .iter()
            .any(|a| matches!(a.region(), MemoryRegion::Lock | MemoryRegion::Calibration)));
    }

    #[test]
    fn test_backup_propagates_lookup_error() {
        assert_eq!(
            plan_backup(&StaticLookup::new(), "atmega328p", Path::new("bk")),
            Err(LookupError::UnknownDevice("atmega328p".to_string()))
        );
        assert_eq!(
            plan_backup(&Unreadable, "atmega16", Path::new("bk")),
            Err(LookupError::Unavailable {
                device: "atmega16".to_string(),
                reason: "permission denied".to_string(),
            })
        );
        assert_eq!(
            plan_backup(&StaticLookup::new(), "broken", Path::new("bk")),
            Err(LookupError::UnsupportedFuseCount {
                device: "broken".to_string(),
                count: 7,
            })
        );
    }

    #[test]
    fn test_write_flash() {
        let first = plan_write(ImageRegion::Flash, "/out/app.hex").unwrap();
        let second = plan_write(ImageRegion::Flash, "/out/app.hex").unwrap();

        assert_eq!(first, second);
        assert_eq!(first.region(), MemoryRegion::Flash);
        assert_eq!(first.direction(), Direction::Write);
        assert_eq!(first.encoding(), Encoding::Auto);
        assert_eq!(first.payload(), &Payload::File(PathBuf::from("/out/app.hex")));
    }

    #[test]
    fn test_write_keeps_placeholders() {
        let action = plan_write(ImageRegion::Eeprom, "${BuildArtifactBaseFileName}.eep").unwrap();
        assert_eq!(action.region(), MemoryRegion::Eeprom);
        assert_eq!(
            action.path(),
            Some(Path::new("${BuildArtifactBaseFileName}.eep"))
        );
    }

    #[test]
    fn test_write_empty_path() {
        assert_eq!(
            plan_write(ImageRegion::Flash, ""),
            Err(ActionError::EmptyPath(MemoryRegion::Flash))
        );
    }

    #[test]
    fn test_write_from_build() {
        let mut config = BuildConfig::new();
        config.add_tool(Tool::new("flash-image", Some("${BuildArtifactBaseFileName}.hex")));

        let flash = plan_write_from_build(&config, ImageRegion::Flash).unwrap();
        assert_eq!(
            flash,
            Some(
                ProgrammerAction::write_file(
                    MemoryRegion::Flash,
                    "${BuildArtifactBaseFileName}.hex",
                    Encoding::Auto
                )
                .unwrap()
            )
        );

        // No eeprom step is not an error
        assert_eq!(plan_write_from_build(&config, ImageRegion::Eeprom), Ok(None));
    }

    #[test]
    fn test_fuse_write_all_three() {
        let actions = plan_fuse_write(&StaticLookup::new(), "atmega644", &[0x62, 0xD9, 0xFF]);
        let planned: Vec<_> = actions.iter().map(|a| (a.region(), a.value())).collect();
        assert_eq!(
            planned,
            vec![
                (MemoryRegion::LowFuse, Some(0x62)),
                (MemoryRegion::HighFuse, Some(0xD9)),
                (MemoryRegion::ExtendedFuse, Some(0xFF)),
            ]
        );
        assert!(actions.iter().all(|a| a.encoding() == Encoding::Numeric));
    }

    #[test]
    fn test_fuse_write_sparse() {
        let actions = plan_fuse_write(&StaticLookup::new(), "atmega644", &[-1, 200, -1]);
        assert_eq!(
            actions,
            vec![ProgrammerAction::write_value(MemoryRegion::HighFuse, 200).unwrap()]
        );

        let actions = plan_fuse_write(&StaticLookup::new(), "atmega644", &[256, -5, 0]);
        assert_eq!(
            actions,
            vec![ProgrammerAction::write_value(MemoryRegion::ExtendedFuse, 0).unwrap()]
        );
    }

    #[test]
    fn test_fuse_write_length_mismatch() {
        // More values than fuse bytes
        let actions = plan_fuse_write(&StaticLookup::new(), "atmega16", &[0xE1, 0x99, 0xFF]);
        assert_eq!(actions.len(), 2);

        // Fewer values than fuse bytes
        let actions = plan_fuse_write(&StaticLookup::new(), "atmega644", &[0xE1]);
        assert_eq!(
            actions,
            vec![ProgrammerAction::write_value(MemoryRegion::LowFuse, 0xE1).unwrap()]
        );

        let actions = plan_fuse_write(&StaticLookup::new(), "atmega103", &[0x42, 0x43]);
        assert_eq!(
            actions,
            vec![ProgrammerAction::write_value(MemoryRegion::Fuse, 0x42).unwrap()]
        );
    }

    #[test]
    fn test_fuse_write_no_fuses() {
        assert!(plan_fuse_write(&StaticLookup::new(), "at90s8515", &[0x00, 0x00, 0x00]).is_empty());
    }

    #[test]
    fn test_fuse_write_lookup_failure_is_empty() {
        assert!(plan_fuse_write(&StaticLookup::new(), "unknown", &[0x62]).is_empty());
        assert!(plan_fuse_write(&Unreadable, "atmega16", &[0x62, 0xD9]).is_empty());
        assert!(plan_fuse_write(&StaticLookup::new(), "broken", &[0x62]).is_empty());
    }
}
