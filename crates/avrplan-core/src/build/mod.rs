//! Build configuration support
//!
//! A build configuration lists the toolchain steps of a firmware build. The
//! planner only cares about the steps that produce flash and EEPROM images,
//! and only through the [`BuildArtifactResolver`] trait:
//!
//! ```ignore
//! let config = BuildConfig::from_toml_file("build.toml")?;
//! let action = planner::plan_write_from_build(&config, ImageRegion::Flash)?;
//! ```

mod placeholders;
mod toml;
mod types;

pub use placeholders::expand_placeholders;
pub use types::*;

use std::path::PathBuf;

/// Source of declared build outputs
pub trait BuildArtifactResolver {
    /// Declared output path of the toolchain step producing `kind`.
    ///
    /// Returns `None` when the configuration has no such step. The path may
    /// contain unresolved placeholders.
    fn declared_output(&self, kind: ArtifactKind) -> Option<PathBuf>;
}
