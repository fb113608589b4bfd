//! Write command implementation

use avrplan_core::build::{expand_placeholders, BuildConfig};
use avrplan_core::planner::{self, ImageRegion};
use std::path::{Path, PathBuf};

use super::{print_plan, Context};

/// Where the image file name comes from
pub enum Source {
    /// Explicit file
    File(PathBuf),
    /// Output declared by a build configuration
    Build {
        path: PathBuf,
        /// Expand `${...}` placeholders with the build's variables
        resolve: bool,
    },
}

/// Plan writing an image to flash or EEPROM
pub fn run(
    ctx: &Context<'_>,
    region: ImageRegion,
    source: Source,
    mcu: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let action = match source {
        Source::File(file) => planner::plan_write(region, &file)?,
        Source::Build { path, resolve } => {
            let config = BuildConfig::from_toml_file(&path)?;
            let Some(action) = planner::plan_write_from_build(&config, region)? else {
                println!(
                    "Build configuration {} has no {} step, nothing to write.",
                    path.display(),
                    region.artifact_kind()
                );
                return Ok(());
            };
            if resolve {
                let vars = config.variables();
                action.map_path(|p| {
                    PathBuf::from(expand_placeholders(&p.to_string_lossy(), &vars))
                })?
            } else {
                action
            }
        }
    };

    if let Some(file) = action.path() {
        warn_if_missing(file);
    }

    print_plan(ctx, mcu, vec![action])
}

fn warn_if_missing(file: &Path) {
    let unresolved = file.to_string_lossy().contains("${");
    if !unresolved && !file.exists() {
        log::warn!("Image file {} does not exist", file.display());
    }
}
