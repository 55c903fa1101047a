//! `exercise-manager remove` command.

use crate::config::ManagerConfig;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::reflow::{self, RemoveOutcome};

/// Execute the `remove` command.
///
/// Declining the confirmation is not an error.
///
/// # Errors
///
/// Returns an error if the removal or the roadmap update fails.
pub fn run(ctx: &ServiceContext, config: &ManagerConfig, number: u32) -> Result<()> {
    match reflow::remove(ctx, &config.exercises_dir, number)? {
        RemoveOutcome::Removed(report) => super::finish_reflow(ctx, config, &report),
        RemoveOutcome::Cancelled => {
            println!("Cancelled.");
            Ok(())
        }
    }
}
