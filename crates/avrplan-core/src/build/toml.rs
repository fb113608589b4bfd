//! TOML build configuration parsing
//!
//! Parses build configuration files in TOML format:
//!
//! ```toml
//! [build]
//! name = "Release"
//! artifact = "blinky"
//!
//! [[tool]]
//! kind = "flash-image"
//! output = "${BuildArtifactBaseFileName}.hex"
//!
//! [[tool]]
//! kind = "eeprom-image"
//! output = "${BuildArtifactBaseFileName}.eep"
//! ```

use std::fs;
use std::path::Path;

use super::{BuildConfig, Tool};
use crate::error::BuildConfigError;

/// TOML build file structure
#[derive(Debug, serde::Deserialize)]
struct TomlBuildFile {
    build: Option<TomlBuildMeta>,
    #[serde(default)]
    tool: Vec<TomlTool>,
}

/// Build metadata
#[derive(Debug, serde::Deserialize)]
struct TomlBuildMeta {
    name: Option<String>,
    artifact: Option<String>,
}

/// Toolchain step in TOML
#[derive(Debug, serde::Deserialize)]
struct TomlTool {
    kind: String,
    output: Option<String>,
}

impl BuildConfig {
    /// Load a build configuration from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, BuildConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| BuildConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse a build configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, BuildConfigError> {
        let file: TomlBuildFile = toml::from_str(content)?;

        let mut config = BuildConfig::new();
        if let Some(meta) = file.build {
            config.name = meta.name;
            config.artifact_name = meta.artifact;
        }

        for tool in file.tool {
            if tool.kind.parse::<super::ArtifactKind>().is_err() {
                log::debug!("Ignoring toolchain step of kind '{}'", tool.kind);
            }
            config.add_tool(Tool {
                kind: tool.kind,
                output: tool.output,
            });
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{ArtifactKind, BuildArtifactResolver};
    use std::path::PathBuf;

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[build]
name = "Release"
artifact = "blinky"

[[tool]]
kind = "compiler"

[[tool]]
kind = "flash-image"
output = "${BuildArtifactBaseFileName}.hex"

[[tool]]
kind = "flash-image"
output = "second.hex"
"#;
        let config = BuildConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.name.as_deref(), Some("Release"));
        assert_eq!(config.artifact_name.as_deref(), Some("blinky"));
        assert_eq!(config.tools.len(), 3);
        assert_eq!(config.tools[0].artifact_kind(), None);

        // First matching tool wins
        assert_eq!(
            config.declared_output(ArtifactKind::FlashImage),
            Some(PathBuf::from("${BuildArtifactBaseFileName}.hex"))
        );
        assert_eq!(config.declared_output(ArtifactKind::EepromImage), None);

        let vars = config.variables();
        assert_eq!(vars["BuildArtifactBaseFileName"], "blinky");
        assert_eq!(vars["ConfigName"], "Release");
    }

    #[test]
    fn test_tool_without_output() {
        let config = BuildConfig::from_toml_str(
            r#"
[[tool]]
kind = "eeprom-image"
"#,
        )
        .unwrap();
        assert!(config.find_tool(ArtifactKind::EepromImage).is_some());
        assert_eq!(config.declared_output(ArtifactKind::EepromImage), None);
        assert!(config.variables().is_empty());
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            BuildConfig::from_toml_str("[[tool]]\noutput = 1\n"),
            Err(BuildConfigError::Parse(_))
        ));

        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            BuildConfig::from_toml_file(dir.path().join("nope.toml")),
            Err(BuildConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("build.toml");
        fs::write(&path, "[[tool]]\nkind = \"eeprom-image\"\noutput = \"app.eep\"\n").unwrap();

        let config = BuildConfig::from_toml_file(&path).unwrap();
        assert_eq!(
            config.declared_output(ArtifactKind::EepromImage),
            Some(PathBuf::from("app.eep"))
        );
    }
}
