//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the renumbering engine and an
//! external system (time, the directory tree, the operator, progress data).
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod progress;
pub mod prompt;

pub use clock::Clock;
pub use filesystem::{DirEntry, EntryTimes, FileSystem};
pub use progress::ProgressTracker;
pub use prompt::Prompt;

/// Error type returned by every fallible port method.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;
