//! Fuse write command implementation

use avrplan_core::planner;

use super::{print_plan, Context};

/// Plan writing fuse `values` to `mcu`
pub fn run(ctx: &Context<'_>, mcu: &str, values: &[i32]) -> Result<(), Box<dyn std::error::Error>> {
    let actions = planner::plan_fuse_write(ctx.db, mcu, values);

    let skipped = values.len().saturating_sub(actions.len());
    if skipped > 0 {
        log::debug!("{} fuse value(s) not written", skipped);
    }

    print_plan(ctx, Some(mcu), actions)
}
