//! Info command implementation

use avrplan_core::device::SignatureDisplay;
use avrplan_core::planner;

use super::Context;

/// Show what is known about a device
pub fn run(ctx: &Context<'_>, mcu: &str) -> Result<(), Box<dyn std::error::Error>> {
    let db = ctx.db.get()?;
    let device = db
        .find(mcu)
        .ok_or_else(|| format!("Unknown device: {}", mcu))?;
    let fuses = planner::device_fuse_regions(db, mcu)?;

    println!("Device Information");
    println!("==================");
    println!();
    println!("Vendor:          {}", device.vendor);
    println!("Name:            {}", device.name);
    println!("Id:              {}", device.id);
    println!("avrdude part:    {}", device.avrdude_id);
    println!("Signature:       {}", SignatureDisplay(device.signature));
    println!(
        "Flash:           {} bytes ({} KiB)",
        device.flash_size,
        device.flash_size / 1024
    );
    println!("EEPROM:          {} bytes", device.eeprom_size);
    println!("Lock bytes:      {}", device.lock_bytes);
    if fuses.is_empty() {
        println!("Fuse bytes:      none");
    } else {
        let names: Vec<&str> = fuses.iter().map(|f| f.name()).collect();
        println!("Fuse bytes:      {} ({})", fuses.len(), names.join(", "));
    }

    Ok(())
}
