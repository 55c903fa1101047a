//! `exercise-manager cleanup` command.

use crate::config::ManagerConfig;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::reflow;

/// Execute the `cleanup` command.
///
/// # Errors
///
/// Returns an error if conflict resolution, renaming or the roadmap update fails.
pub fn run(ctx: &ServiceContext, config: &ManagerConfig) -> Result<()> {
    let report = reflow::cleanup(ctx, &config.exercises_dir)?;
    super::finish_reflow(ctx, config, &report)
}
