//! CLI argument parsing

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Parse a fuse value as hex (0x..), decimal, or a negative "skip" marker
fn parse_fuse_value(s: &str) -> Result<i32, String> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        i32::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value: {}", e))
    } else if s == "-" {
        Ok(-1)
    } else {
        s.parse::<i32>().map_err(|e| format!("Invalid number: {}", e))
    }
}

#[derive(Parser)]
#[command(name = "avrplan")]
#[command(author, version, about = "AVR programmer action planner", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to device database (a .ron file or a directory of .ron files)
    /// Defaults to looking in ./devices/ and /usr/share/avrplan/devices/
    #[arg(long, global = true)]
    pub device_db: Option<PathBuf>,

    /// Configuration file (defaults to ./avrplan.toml, then ~/.config/avrplan/)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// How a plan is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per action
    Table,
    /// A complete avrdude command line
    Avrdude,
}

/// Image region accepted by the write command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImageArg {
    /// Program memory
    Flash,
    /// Data EEPROM
    Eeprom,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plan a backup of all readable memories into a folder
    Backup {
        /// Device id (e.g. atmega16)
        #[arg(short, long)]
        mcu: String,

        /// Destination folder
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Plan writing a flash or EEPROM image
    Write {
        /// Memory to write
        #[arg(short, long, value_enum)]
        region: ImageArg,

        /// Image file
        #[arg(short, long, conflicts_with = "build", required_unless_present = "build")]
        file: Option<PathBuf>,

        /// Build configuration (TOML) declaring the image file
        #[arg(short, long)]
        build: Option<PathBuf>,

        /// Expand ${...} placeholders using the build configuration
        #[arg(long, requires = "build")]
        resolve: bool,

        /// Device id, needed for avrdude output
        #[arg(short, long)]
        mcu: Option<String>,
    },

    /// Plan writing fuse bytes
    Fuses {
        /// Device id (e.g. atmega16)
        #[arg(short, long)]
        mcu: String,

        /// Fuse values in low, high, extended order; -1 or - leaves a byte unchanged
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, value_parser = parse_fuse_value, required = true)]
        values: Vec<i32>,
    },

    /// Show device information
    Info {
        /// Device id (e.g. atmega16)
        #[arg(short, long)]
        mcu: String,
    },

    /// List known devices
    ListDevices {
        /// Filter by name
        #[arg(long)]
        name: Option<String>,
    },
}
