//! Journal data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single mutating filesystem call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JournalEntry {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Operation name (`rename`, `create_dir`, `write`, `remove_dir`).
    pub op: String,
    /// Path the operation acted on.
    pub path: String,
    /// Destination, for renames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Failure message if the call failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Everything one command did to the exercise tree, in order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Journal {
    /// The command that ran (e.g. `insert 3 new-topic`).
    pub command: String,
    /// When the journal was written.
    pub recorded_at: DateTime<Utc>,
    /// Whether the calls hit an in-memory sandbox rather than the disk.
    pub dry_run: bool,
    /// Ordered list of mutations.
    pub entries: Vec<JournalEntry>,
}
