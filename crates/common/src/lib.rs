//! ShakeCursor Common Utilities
//!
//! Shared infrastructure for all ShakeCursor crates:
//! - Error types and result aliases
//! - Single-shot deadline timers
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
