//! Prompt port for blocking operator questions.

use super::PortError;

/// Asks the operator a question and blocks until a line of input arrives.
///
/// Conflict resolution and delete confirmation go through this port so a
/// scripted sequence of answers can stand in for the console in tests.
pub trait Prompt: Send + Sync {
    /// Shows `question` and returns the answer with the line ending trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if input is closed or cannot be read.
    fn ask(&self, question: &str) -> Result<String, PortError>;
}
