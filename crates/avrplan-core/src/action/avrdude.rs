//! avrdude command line rendering
//!
//! Each action maps to one `-U memtype:op:filename[:format]` argument. The
//! surrounding invocation (part, programmer, port, config file) is described
//! by [`AvrdudeCommand`].

use std::fmt;
use std::path::PathBuf;

use super::types::{Direction, Encoding, Payload, ProgrammerAction};

impl Direction {
    /// avrdude operation character
    pub const fn avrdude_op(self) -> char {
        match self {
            Self::Read => 'r',
            Self::Write => 'w',
        }
    }
}

impl Encoding {
    /// avrdude file format character
    pub const fn avrdude_format(self) -> char {
        match self {
            Self::IntelHex => 'i',
            Self::RawHex => 'h',
            Self::Auto => 'a',
            Self::Numeric => 'm',
        }
    }
}

impl ProgrammerAction {
    /// Render the value of the `-U` option for this action
    pub fn to_avrdude_arg(&self) -> String {
        let target = match self.payload() {
            Payload::File(path) => path.display().to_string(),
            Payload::Value(v) => format!("0x{:02x}", v),
        };
        format!(
            "{}:{}:{}:{}",
            self.region().name(),
            self.direction().avrdude_op(),
            target,
            self.encoding().avrdude_format()
        )
    }
}

/// A complete avrdude invocation for a list of actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvrdudeCommand {
    /// Program to run
    pub program: PathBuf,
    /// avrdude part id (`-p`), e.g. `m16`
    pub part: String,
    /// Programmer id (`-c`)
    pub programmer: Option<String>,
    /// Port (`-P`)
    pub port: Option<String>,
    /// Custom avrdude configuration file (`-C`)
    pub config_file: Option<PathBuf>,
    /// Actions, executed in order
    pub actions: Vec<ProgrammerAction>,
}

impl AvrdudeCommand {
    /// Create a command for the given part with default settings
    pub fn new(part: impl Into<String>, actions: Vec<ProgrammerAction>) -> Self {
        Self {
            program: PathBuf::from("avrdude"),
            part: part.into(),
            programmer: None,
            port: None,
            config_file: None,
            actions,
        }
    }

    /// Argument vector, excluding the program name
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(6 + 2 * self.actions.len());

        if let Some(config) = &self.config_file {
            args.push("-C".to_string());
            args.push(config.display().to_string());
        }
        args.push("-p".to_string());
        args.push(self.part.clone());
        if let Some(programmer) = &self.programmer {
            args.push("-c".to_string());
            args.push(programmer.clone());
        }
        if let Some(port) = &self.port {
            args.push("-P".to_string());
            args.push(port.clone());
        }
        for action in &self.actions {
            args.push("-U".to_string());
            args.push(action.to_avrdude_arg());
        }

        args
    }
}

impl fmt::Display for AvrdudeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(&self.program.display().to_string()))?;
        for arg in self.args() {
            write!(f, " {}", shell_quote(&arg))?;
        }
        Ok(())
    }
}

/// Quote an argument for display in a POSIX shell
fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=,+@%".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
