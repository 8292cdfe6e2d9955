//! Port traits defining external boundaries.
//!
//! The extraction core never touches the outside world directly: the
//! current time and the checkout's files come in through these traits.
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod files;

pub use clock::Clock;
pub use files::{PortResult, ProjectFiles};
