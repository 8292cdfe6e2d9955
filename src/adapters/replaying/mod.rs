//! Replaying adapters that replay recorded interactions.

pub mod clock;
pub mod files;

pub use clock::ReplayingClock;
pub use files::ReplayingProjectFiles;
