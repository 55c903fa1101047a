//! In-memory adapters for tests and dry-run sandboxes.

pub mod clock;
pub mod filesystem;
pub mod progress;
pub mod prompt;

pub use clock::SteppingClock;
pub use filesystem::MemFileSystem;
pub use progress::StaticProgress;
pub use prompt::ScriptedPrompt;
