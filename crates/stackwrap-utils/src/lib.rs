//! # Stackwrap Utilities
//!
//! Shared utilities for Stackwrap binaries, mainly the `tracing` subscriber setup.
//!
//! Library crates in the workspace only emit events through `tracing` macros;
//! installing a subscriber is left to whatever binary embeds them.

pub mod logging;

// Re-export commonly used logging functions for convenience
pub use logging::{init_logging, init_logging_with_level, LogFormat, LogLevel, LoggingError, LoggingGuard};
pub use tracing::{debug, error, info, trace, warn};
