//! User configuration (`avrplan.toml`)
//!
//! ```toml
//! [avrdude]
//! program = "/usr/bin/avrdude"
//! programmer = "usbasp"
//! port = "usb"
//! use_custom_config = true
//! config_file = "/home/me/avrdude.conf"
//! ```
//!
//! Every key is optional. A missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use avrplan_core::action::{AvrdudeCommand, ProgrammerAction};
use thiserror::Error;

/// Configuration file name searched in the default locations
pub const CONFIG_FILE_NAME: &str = "avrplan.toml";

/// Error loading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML or has wrong value types
    #[error("invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub avrdude: AvrdudeSettings,
}

/// How avrdude is invoked
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AvrdudeSettings {
    /// avrdude executable
    pub program: PathBuf,
    /// Programmer id (`-c`)
    pub programmer: Option<String>,
    /// Port (`-P`)
    pub port: Option<String>,
    /// Pass `config_file` to avrdude instead of its built-in configuration
    pub use_custom_config: bool,
    /// Custom avrdude.conf
    pub config_file: String,
}

impl Default for AvrdudeSettings {
    fn default() -> Self {
        Self {
            program: PathBuf::from("avrdude"),
            programmer: None,
            port: None,
            use_custom_config: false,
            config_file: String::new(),
        }
    }
}

impl AvrdudeSettings {
    /// Custom configuration file, if enabled and set
    pub fn custom_config_file(&self) -> Option<&Path> {
        if self.use_custom_config && !self.config_file.trim().is_empty() {
            Some(Path::new(self.config_file.trim()))
        } else {
            None
        }
    }

    /// Build the avrdude invocation for the given part and actions
    pub fn command(&self, part: &str, actions: Vec<ProgrammerAction>) -> AvrdudeCommand {
        let mut cmd = AvrdudeCommand::new(part, actions);
        cmd.program = self.program.clone();
        cmd.programmer = self.programmer.clone();
        cmd.port = self.port.clone();
        cmd.config_file = self.custom_config_file().map(Path::to_path_buf);
        cmd
    }
}

impl Config {
    /// Parse a configuration from a TOML string
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load a configuration file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Load from an explicit path, or the first default location that exists
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        for candidate in default_locations() {
            if candidate.is_file() {
                log::debug!("Using configuration {}", candidate.display());
                return Self::from_file(&candidate);
            }
        }

        log::debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }
}

/// Default configuration search path
fn default_locations() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        paths.push(PathBuf::from(xdg).join("avrplan").join(CONFIG_FILE_NAME));
    }
    if let Some(home) = std::env::var_os("HOME") {
        paths.push(
            PathBuf::from(home)
                .join(".config")
                .join("avrplan")
                .join(CONFIG_FILE_NAME),
        );
    }
    paths
}
