//! Tests against the device database shipped in `devices/`

use std::path::{Path, PathBuf};

use avrplan_core::device::LazyDeviceDatabase;
use avrplan_core::planner;
use avrplan_core::{DeviceDatabase, Encoding, FuseLayoutLookup, MemoryRegion, ProgrammerAction};

fn devices_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../devices")
}

fn load() -> DeviceDatabase {
    let mut db = DeviceDatabase::new();
    db.load_dir(&devices_dir()).unwrap();
    db
}

#[test]
fn shipped_database_is_valid() {
    let db = load();
    assert!(!db.is_empty());

    for device in db.iter() {
        assert!(device.fuse_bytes <= 3, "{} has too many fuses", device.id);
        assert_eq!(device.signature[0], 0x1E, "{} is not an Atmel part", device.id);
        assert!(!device.avrdude_id.is_empty());
        assert_eq!(db.find(&device.id).map(|d| &d.id), Some(&device.id));
    }
}

#[test]
fn atmega16_backup() {
    let db = load();
    let actions = planner::plan_backup(&db, "atmega16", Path::new("/tmp/bk")).unwrap();

    let expected = vec![
        ProgrammerAction::read(MemoryRegion::Signature, "/tmp/bk/signature", Encoding::RawHex),
        ProgrammerAction::read(MemoryRegion::Flash, "/tmp/bk/flash.hex", Encoding::IntelHex),
        ProgrammerAction::read(MemoryRegion::Eeprom, "/tmp/bk/eeprom.eep", Encoding::IntelHex),
        ProgrammerAction::read(MemoryRegion::LowFuse, "/tmp/bk/lfuse", Encoding::RawHex),
        ProgrammerAction::read(MemoryRegion::HighFuse, "/tmp/bk/hfuse", Encoding::RawHex),
    ]
    .into_iter()
    .collect::<Result<Vec<_>, _>>()
    .unwrap();

    assert_eq!(actions, expected);

    let args: Vec<String> = actions.iter().map(|a| a.to_avrdude_arg()).collect();
    assert_eq!(
        args,
        vec![
            "signature:r:/tmp/bk/signature:h",
            "flash:r:/tmp/bk/flash.hex:i",
            "eeprom:r:/tmp/bk/eeprom.eep:i",
            "lfuse:r:/tmp/bk/lfuse:h",
            "hfuse:r:/tmp/bk/hfuse:h",
        ]
    );
}

#[test]
fn atmega328p_fuses() {
    let db = LazyDeviceDatabase::new(devices_dir());
    let actions = planner::plan_fuse_write(&db, "ATmega328P", &[0xFF, 0xDA, 0xFD]);
    let args: Vec<String> = actions.iter().map(|a| a.to_avrdude_arg()).collect();
    assert_eq!(args, vec!["lfuse:w:0xff:m", "hfuse:w:0xda:m", "efuse:w:0xfd:m"]);
}

#[test]
fn fuse_counts_match_names() {
    let db = load();
    assert_eq!(db.fuse_byte_count("at90s2313"), Ok(0));
    assert_eq!(db.fuse_byte_count("attiny12"), Ok(1));
    assert_eq!(db.fuse_byte_count("atmega8"), Ok(2));
    assert_eq!(db.fuse_byte_count("attiny85"), Ok(3));
    assert_eq!(
        planner::device_fuse_regions(&db, "atmega103").unwrap(),
        &[MemoryRegion::Fuse]
    );
}
