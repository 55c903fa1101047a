//! Recording adapters that journal mutating calls.

pub mod filesystem;

use std::sync::{Arc, Mutex};

use crate::journal::JournalRecorder;

pub use filesystem::RecordingFileSystem;

/// Record a `Result` interaction, keeping the error message on failure.
pub(crate) fn record_result<T, E>(
    recorder: &Arc<Mutex<JournalRecorder>>,
    op: &str,
    path: String,
    to: Option<String>,
    result: &Result<T, E>,
) where
    E: std::fmt::Display,
{
    let error = result.as_ref().err().map(ToString::to_string);
    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record(op, path, to, error);
}
