//! `exercise-manager swap` command.

use crate::config::ManagerConfig;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::reflow;

/// Execute the `swap` command.
///
/// # Errors
///
/// Returns an error if the swap or the roadmap update fails.
pub fn run(ctx: &ServiceContext, config: &ManagerConfig, first: u32, second: u32) -> Result<()> {
    let report = reflow::swap(ctx, &config.exercises_dir, first, second)?;
    super::finish_reflow(ctx, config, &report)
}
