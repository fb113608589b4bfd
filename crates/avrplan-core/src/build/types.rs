//! Build configuration types

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::BuildArtifactResolver;

/// Kind of image produced by a toolchain step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Flash image (usually `.hex`)
    FlashImage,
    /// EEPROM image (usually `.eep`)
    EepromImage,
}

impl ArtifactKind {
    /// Tool kind string used in build configuration files
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FlashImage => "flash-image",
            Self::EepromImage => "eeprom-image",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flash-image" => Ok(Self::FlashImage),
            "eeprom-image" => Ok(Self::EepromImage),
            other => Err(format!("unknown artifact kind: {}", other)),
        }
    }
}

/// A step of the build toolchain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    /// Tool kind, e.g. `flash-image`. Unknown kinds are kept but ignored.
    pub kind: String,
    /// Declared output file name, unresolved
    pub output: Option<String>,
}

impl Tool {
    /// Create a new tool
    pub fn new(kind: impl Into<String>, output: Option<&str>) -> Self {
        Self {
            kind: kind.into(),
            output: output.map(str::to_string),
        }
    }

    /// The artifact kind this tool produces, if it is an image tool
    pub fn artifact_kind(&self) -> Option<ArtifactKind> {
        self.kind.parse().ok()
    }
}

/// A build configuration: a named set of toolchain steps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildConfig {
    /// Configuration name (e.g. `Release`)
    pub name: Option<String>,
    /// Base file name of the build artifact
    pub artifact_name: Option<String>,
    /// Toolchain steps, in declaration order
    pub tools: Vec<Tool>,
}

impl BuildConfig {
    /// Create an empty build configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a toolchain step
    pub fn add_tool(&mut self, tool: Tool) {
        self.tools.push(tool);
    }

    /// First tool producing the given artifact kind
    pub fn find_tool(&self, kind: ArtifactKind) -> Option<&Tool> {
        self.tools
            .iter()
            .find(|t| t.artifact_kind() == Some(kind))
    }

    /// Variables available for placeholder expansion
    pub fn variables(&self) -> HashMap<String, String> {
        let mut vars = HashMap::new();
        if let Some(artifact) = &self.artifact_name {
            vars.insert("BuildArtifactBaseFileName".to_string(), artifact.clone());
        }
        if let Some(name) = &self.name {
            vars.insert("ConfigName".to_string(), name.clone());
        }
        vars
    }
}

impl BuildArtifactResolver for BuildConfig {
    fn declared_output(&self, kind: ArtifactKind) -> Option<PathBuf> {
        self.find_tool(kind)?
            .output
            .as_deref()
            .filter(|o| !o.is_empty())
            .map(PathBuf::from)
    }
}
