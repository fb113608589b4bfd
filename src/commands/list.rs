//! List command implementation

use super::Context;

/// List all known devices
pub fn list_devices(
    ctx: &Context<'_>,
    name_filter: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = ctx.db.get()?;

    let devices = match name_filter {
        Some(name) => db.find_by_name(name),
        None => db.iter().collect(),
    };

    println!("Known devices:");
    println!();
    println!(
        "{:<8} {:<14} {:<12} {:>10} {:>8} {:>6}",
        "Vendor", "Name", "Id", "Flash", "EEPROM", "Fuses"
    );
    println!("{}", "-".repeat(64));

    for device in devices {
        println!(
            "{:<8} {:<14} {:<12} {:>10} {:>8} {:>6}",
            device.vendor,
            device.name,
            device.id,
            format_size(device.flash_size),
            format_size(device.eeprom_size),
            device.fuse_bytes
        );
    }

    Ok(())
}

fn format_size(bytes: u32) -> String {
    if bytes >= 1024 * 1024 {
        format!("{} MiB", bytes / (1024 * 1024))
    } else if bytes >= 1024 {
        format!("{} KiB", bytes / 1024)
    } else {
        format!("{} B", bytes)
    }
}
