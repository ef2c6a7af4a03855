//! Infrastructure Layer
//!
//! Cross-cutting process concerns.

pub mod shutdown;

pub use shutdown::{shutdown_signal, ShutdownController};
