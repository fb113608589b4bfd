//! CLI command implementations
//!
//! Each command asks the planner for a list of actions and hands it to
//! [`print_plan`], which renders it in the selected [`OutputFormat`].
//!
//! ## Device information
//!
//! Commands receive the device database through [`Context`]. It is a
//! [`LazyDeviceDatabase`], so only commands that need fuse or part
//! information read the RON files.

pub mod backup;
pub mod fuses;
pub mod info;
mod list;
pub mod write;

pub use list::list_devices;

use avrplan_core::action::ProgrammerAction;
use avrplan_core::device::LazyDeviceDatabase;
use avrplan_core::planner::ImageRegion;

use crate::cli::{ImageArg, OutputFormat};
use crate::config::Config;

/// Shared state for all commands
pub struct Context<'a> {
    pub db: &'a LazyDeviceDatabase,
    pub config: &'a Config,
    pub format: OutputFormat,
}

impl Context<'_> {
    /// avrdude part id for a device id.
    ///
    /// Falls back to the device id itself when the database does not know
    /// the device, since avrdude also accepts full part names.
    pub fn avrdude_part(&self, mcu: &str) -> String {
        match self.db.get() {
            Ok(db) => match db.find(mcu) {
                Some(device) => device.avrdude_id.clone(),
                None => {
                    log::warn!("{} not in device database, passing it to avrdude as is", mcu);
                    mcu.to_string()
                }
            },
            Err(e) => {
                log::warn!("Device database unavailable ({}), using {} as part id", e, mcu);
                mcu.to_string()
            }
        }
    }
}

impl From<ImageArg> for ImageRegion {
    fn from(arg: ImageArg) -> Self {
        match arg {
            ImageArg::Flash => ImageRegion::Flash,
            ImageArg::Eeprom => ImageRegion::Eeprom,
        }
    }
}

/// Print a plan in the selected format
///
/// `mcu` is required for avrdude output, which needs a part id.
pub fn print_plan(
    ctx: &Context<'_>,
    mcu: Option<&str>,
    actions: Vec<ProgrammerAction>,
) -> Result<(), Box<dyn std::error::Error>> {
    match ctx.format {
        OutputFormat::Table => {
            if actions.is_empty() {
                println!("Nothing to do.");
                return Ok(());
            }
            println!("{:<4} {:<6} {:<12} {:<10} Target", "#", "Op", "Memory", "Format");
            println!("{}", "-".repeat(60));
            for (i, action) in actions.iter().enumerate() {
                let target = match action.path() {
                    Some(path) => path.display().to_string(),
                    None => format!("0x{:02X}", action.value().unwrap_or_default()),
                };
                println!(
                    "{:<4} {:<6} {:<12} {:<10} {}",
                    i + 1,
                    action.direction(),
                    action.region(),
                    action.encoding(),
                    target
                );
            }
        }
        OutputFormat::Avrdude => {
            let mcu = mcu.ok_or("avrdude output requires --mcu")?;
            if actions.is_empty() {
                log::info!("Plan is empty, avrdude would only verify the signature");
            }
            let cmd = ctx.config.avrdude.command(&ctx.avrdude_part(mcu), actions);
            println!("{}", cmd);
        }
    }
    Ok(())
}
