//! `exercise-manager insert` command.

use crate::config::ManagerConfig;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::reflow;

/// Execute the `insert` command.
///
/// # Errors
///
/// Returns an error if the insert or the roadmap update fails.
pub fn run(ctx: &ServiceContext, config: &ManagerConfig, position: u32, slug: &str) -> Result<()> {
    let report = reflow::insert(ctx, &config.exercises_dir, position, slug)?;
    super::finish_reflow(ctx, config, &report)
}
