//! # stackwrap-core
//!
//! Stack-annotated errors and panic trace parsing for Stackwrap.
//!
//! This crate provides two halves that share one data model:
//! - Annotating ordinary errors with the call stack of the place they were created
//! - Rebuilding the same structured stack from a Go-style `panic:` crash dump
//!
//! Both produce an [`AnnotatedError`] whose [`Frame`]s can be rendered with
//! [`AnnotatedError::stack`] or inspected one by one.
//!
//! ## Annotating errors
//!
//! ```rust
//! use stackwrap_core::{annotate, has_trace, prefix};
//!
//! let err = annotate(std::fmt::Error);
//! assert!(has_trace(&err));
//!
//! let err = prefix("loading config", err);
//! assert_eq!(err.to_string(), "loading config: an error occurred when formatting an argument");
//! ```
//!
//! ## Parsing crash dumps
//!
//! ```rust
//! use stackwrap_core::parse_panic;
//!
//! let text = "panic: boom\n\ngoroutine 1 [running]:\nmain.f(...)\n\t/a/b.go:10 +0x1\n";
//! let err = parse_panic(text).unwrap();
//! assert_eq!(err.to_string(), "boom");
//! assert_eq!(err.stack_frames()[0].name(), "f");
//! ```
//!
//! ## Stack capture
//!
//! Captured stacks are stored as raw instruction pointers and only symbolicated the
//! first time frames are requested. The number of captured frames is bounded by
//! [`config::StackConfig::max_stack_depth`].
//!
//! Symbolication reads the binary's own line tables. A profile without them (the
//! default `release` profile) resolves every address to nothing and captured errors
//! render no frames, so release builds need at least:
//!
//! ```toml
//! [profile.release]
//! debug = "line-tables-only"
//! ```

pub mod annotated;
pub mod api;
pub mod config;
pub mod error;
pub mod parser;
pub mod prelude;
pub mod symbols;
pub mod types;

pub use annotated::{AnnotatedError, BoxError};
pub use api::{annotate, annotate_skip, base, full_trace, has_trace, is, prefix, trace, unwrap, ResultExt};
pub use error::{Flattened, Message, TraceError, TraceResult, UncaughtPanic};
pub use parser::parse_panic;
pub use types::{Frame, RawStack};

/// Format a message without attaching a stack.
///
/// ```rust
/// let message = stackwrap_core::base!("retry {} of {}", 2, 3);
/// assert_eq!(message.to_string(), "retry 2 of 3");
/// ```
#[macro_export]
macro_rules! base {
    ($($arg:tt)*) => {
        $crate::base(::std::format_args!($($arg)*))
    };
}

/// Format a message and annotate it with the stack of the call site.
///
/// ```rust
/// let err = stackwrap_core::annotate!("user {} not found", 42);
/// assert_eq!(err.to_string(), "user 42 not found");
/// ```
#[macro_export]
macro_rules! annotate {
    ($($arg:tt)*) => {
        $crate::annotate($crate::base!($($arg)*))
    };
}
