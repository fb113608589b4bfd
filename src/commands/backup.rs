//! Backup command implementation

use avrplan_core::planner;
use std::path::Path;

use super::{print_plan, Context};

/// Plan a full backup of `mcu` into `output`
pub fn run(ctx: &Context<'_>, mcu: &str, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !output.is_dir() {
        log::warn!(
            "Backup folder {} does not exist yet, create it before running the plan",
            output.display()
        );
    }

    // A backup with a guessed fuse count is worse than none
    let actions = planner::plan_backup(ctx.db, mcu, output)?;
    log::info!("Backup of {} needs {} reads", mcu, actions.len());
    log::info!("Lock and calibration bytes are not included in backups");

    print_plan(ctx, Some(mcu), actions)
}
