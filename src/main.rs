//! avrplan - AVR programmer action planner
//!
//! Plans the avrdude operations for backing up a device, writing flash or
//! EEPROM images and writing fuse bytes, and prints them either as a table
//! or as a ready-to-run avrdude command line. Nothing is sent to a device.
//!
//! # Architecture
//!
//! All planning lives in `avrplan-core`. This binary only wires the
//! collaborators together:
//! - the device database (RON files), loaded lazily so that image writes
//!   work without one
//! - build configurations (TOML) for image file names
//! - the user configuration (`avrplan.toml`) for the avrdude invocation

mod cli;
mod commands;
mod config;

use avrplan_core::device::LazyDeviceDatabase;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use std::path::{Path, PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbosity
    match cli.verbose {
        0 => {} // default (info)
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let db = LazyDeviceDatabase::new(device_database_path(cli.device_db.as_deref()));
    log::debug!("Device database: {}", db.path().display());

    let ctx = commands::Context {
        db: &db,
        config: &config,
        format: cli.format,
    };

    match cli.command {
        Commands::Backup { mcu, output } => commands::backup::run(&ctx, &mcu, &output),
        Commands::Write {
            region,
            file,
            build,
            resolve,
            mcu,
        } => {
            let source = match (file, build) {
                (Some(file), _) => commands::write::Source::File(file),
                (None, Some(build)) => commands::write::Source::Build { path: build, resolve },
                (None, None) => return Err("either --file or --build is required".into()),
            };
            commands::write::run(&ctx, region.into(), source, mcu.as_deref())
        }
        Commands::Fuses { mcu, values } => commands::fuses::run(&ctx, &mcu, &values),
        Commands::Info { mcu } => commands::info::run(&ctx, &mcu),
        Commands::ListDevices { name } => commands::list_devices(&ctx, name.as_deref()),
    }
}

/// Pick the device database path: the given one, else the first default
/// location that exists.
///
/// If nothing exists, the first default is returned and the failure shows up
/// when a command actually needs device information.
fn device_database_path(path: Option<&Path>) -> PathBuf {
    if let Some(path) = path {
        return path.to_path_buf();
    }

    let default_paths = [
        PathBuf::from("devices"),
        PathBuf::from("/usr/share/avrplan/devices"),
        PathBuf::from("/usr/local/share/avrplan/devices"),
    ];

    match default_paths.iter().find(|p| p.is_dir()) {
        Some(dir) => dir.clone(),
        None => {
            log::debug!("No device database found in default locations");
            default_paths[0].clone()
        }
    }
}
