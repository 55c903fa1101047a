//! Engine error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::ports::PortError;

/// Errors raised by the catalog reader, conflict resolver and reflow executor.
///
/// Filesystem failures are never retried or rolled back; they abort the
/// current command with whatever steps already applied left in place.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// A filesystem port call failed.
    #[error("failed to {action} {}: {source}", path.display())]
    Fs {
        /// What was being attempted (e.g. "rename", "list").
        action: &'static str,
        /// The path the call operated on.
        path: PathBuf,
        /// Underlying port error.
        #[source]
        source: PortError,
    },

    /// A rename target is held by a folder that has not been moved out of the way.
    #[error("cannot rename {from} to {to}: target is already occupied")]
    Occupied {
        /// Current folder name.
        from: String,
        /// Requested folder name.
        to: String,
    },

    /// No exercise has the requested number.
    #[error("no exercise numbered {0}")]
    NotFound(u32),

    /// The catalog holds duplicate numbers, so positional edits are unsafe.
    #[error("duplicate exercise numbers present ({0}); run `cleanup` first")]
    DuplicatesPresent(String),

    /// A number falls outside the range usable by real exercises.
    #[error("number {0} is outside the valid range 1..{max}", max = crate::reflow::TEMP_BASE)]
    OutOfRange(u32),

    /// A slug cannot be used as a folder name suffix.
    #[error("invalid slug {0:?}: {1}")]
    InvalidSlug(String, &'static str),

    /// Reading operator input failed.
    #[error("failed to read answer: {0}")]
    Prompt(#[source] PortError),

    /// The progress store could not be loaded.
    #[error("failed to load progress from {}: {message}", path.display())]
    Progress {
        /// Progress file location.
        path: PathBuf,
        /// Parse or read failure.
        message: String,
    },
}

impl ManagerError {
    /// Wraps a port error with the action and path it occurred on.
    pub(crate) fn fs(action: &'static str, path: impl Into<PathBuf>, source: PortError) -> Self {
        Self::Fs { action, path: path.into(), source }
    }
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, ManagerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_error_names_action_and_path() {
        let err = ManagerError::fs("rename", "/ex/001-a", "permission denied".into());
        assert_eq!(err.to_string(), "failed to rename /ex/001-a: permission denied");
    }

    #[test]
    fn out_of_range_mentions_reserved_band() {
        let err = ManagerError::OutOfRange(9000);
        assert_eq!(err.to_string(), "number 9000 is outside the valid range 1..9000");
    }
}
