//! Live adapters for real external interactions.

pub mod clock;
pub mod files;

pub use clock::LiveClock;
pub use files::LiveProjectFiles;
