//! Live adapters for real external interactions.

pub mod clock;
pub mod filesystem;
pub mod progress;
pub mod prompt;

pub use clock::LiveClock;
pub use filesystem::LiveFileSystem;
pub use progress::JsonProgressStore;
pub use prompt::StdinPrompt;
