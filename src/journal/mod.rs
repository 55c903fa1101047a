//! Journal of filesystem mutations made during one command.

pub mod format;
pub mod recorder;

pub use format::{Journal, JournalEntry};
pub use recorder::JournalRecorder;
