//! # Error Types
//!
//! Errors returned by stackwrap itself, plus the small concrete cause types the
//! construction API and the panic parser wrap.
//!
//! We use `thiserror` to automatically generate `Error` trait implementations
//! and nice error messages.

use std::error::Error as StdError;

use thiserror::Error;

use crate::annotated::BoxError;

/// Main error type for parsing and configuration
///
/// Parser variants carry the 1-based line number and the text of the line that
/// violated the panic grammar. Parsing is all-or-nothing: any of these means no
/// frames were returned.
///
/// ## Error Categories
///
/// 1. **Grammar errors**: MissingPanicPrefix, UnpairedLine, MissingCall, MissingTab,
///    MissingLineNumber, BadLineNumber
/// 2. **Structural errors**: Unparseable
/// 3. **Configuration errors**: InvalidStackDepth, AlreadyConfigured
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraceError
{
    /// The first line does not start with `panic: `
    #[error("invalid panic line {line_number} (no prefix): {line}")]
    MissingPanicPrefix
    {
        /// 1-based position of the line in the input
        line_number: usize,
        /// The offending line
        line: String,
    },

    /// A call-site line was the last line of the input
    ///
    /// Every call-site line must be followed by its `\tfile:line` descriptor.
    #[error("invalid panic line {line_number} (unpaired): {line}")]
    UnpairedLine
    {
        /// 1-based position of the line in the input
        line_number: usize,
        /// The offending line
        line: String,
    },

    /// A call-site line has no argument list
    #[error("invalid panic line {line_number} (no call): {line}")]
    MissingCall
    {
        /// 1-based position of the line in the input
        line_number: usize,
        /// The offending line
        line: String,
    },

    /// A file descriptor line does not start with a tab
    #[error("invalid panic line {line_number} (no tab): {line}")]
    MissingTab
    {
        /// 1-based position of the line in the input
        line_number: usize,
        /// The offending line
        line: String,
    },

    /// A file descriptor line has no `:` separating file and line number
    #[error("invalid panic line {line_number} (no line number): {line}")]
    MissingLineNumber
    {
        /// 1-based position of the line in the input
        line_number: usize,
        /// The offending line
        line: String,
    },

    /// The line number is not a positive base-10 integer
    #[error("invalid panic line {line_number} (bad line number): {line}")]
    BadLineNumber
    {
        /// 1-based position of the line in the input
        line_number: usize,
        /// The offending line
        line: String,
    },

    /// The input ended before a complete stack was read
    ///
    /// This happens when no `goroutine N [running]:` header follows the panic
    /// message, or the frame list is not terminated by a blank line or a
    /// `created by` frame.
    #[error("could not parse panic text: {text}")]
    Unparseable
    {
        /// The whole input
        text: String,
    },

    /// A maximum stack depth that cannot be used
    #[error("Invalid max stack depth: {0}")]
    InvalidStackDepth(String),

    /// The process-wide configuration was already set or already read
    #[error("Stack capture already configured (max depth {current})")]
    AlreadyConfigured
    {
        /// The depth currently in effect
        current: usize,
    },
}

impl TraceError
{
    /// The offending input line for grammar errors.
    pub fn line(&self) -> Option<&str>
    {
        match self {
            TraceError::MissingPanicPrefix { line, .. }
            | TraceError::UnpairedLine { line, .. }
            | TraceError::MissingCall { line, .. }
            | TraceError::MissingTab { line, .. }
            | TraceError::MissingLineNumber { line, .. }
            | TraceError::BadLineNumber { line, .. } => Some(line),
            _ => None,
        }
    }

    /// The 1-based position of the offending line for grammar errors.
    pub fn line_number(&self) -> Option<usize>
    {
        match self {
            TraceError::MissingPanicPrefix { line_number, .. }
            | TraceError::UnpairedLine { line_number, .. }
            | TraceError::MissingCall { line_number, .. }
            | TraceError::MissingTab { line_number, .. }
            | TraceError::MissingLineNumber { line_number, .. }
            | TraceError::BadLineNumber { line_number, .. } => Some(*line_number),
            _ => None,
        }
    }
}

/// Convenience type alias for `Result<T, TraceError>`
///
/// ```rust
/// use stackwrap_core::error::TraceResult;
/// fn foo() -> TraceResult<()>
/// {
///     Ok(())
/// }
/// ```
pub type TraceResult<T> = std::result::Result<T, TraceError>;

/// A formatted message with no stack attached.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct Message(String);

impl Message
{
    /// Wrap an already formatted message.
    pub fn new(message: impl Into<String>) -> Self
    {
        Self(message.into())
    }

    /// The message text.
    pub fn as_str(&self) -> &str
    {
        &self.0
    }
}

/// The message of a panic recovered from crash-dump text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct UncaughtPanic
{
    message: String,
}

impl UncaughtPanic
{
    pub fn new(message: impl Into<String>) -> Self
    {
        Self { message: message.into() }
    }

    pub fn message(&self) -> &str
    {
        &self.message
    }
}

/// An error with a source chain, rendered into a single message.
///
/// The original error stays reachable through [`StdError::source`], so identity checks
/// such as [`crate::is`] still see the whole chain.
#[derive(Debug)]
pub struct Flattened
{
    rendered: String,
    original: BoxError,
}

impl Flattened
{
    /// Render `original` and every error in its source chain as `outer: inner: ...`.
    ///
    /// Sources whose message is already the tail of the rendered text (the common
    /// `#[error("...: {0}")]` pattern) are not repeated.
    pub fn new(original: BoxError) -> Self
    {
        let mut rendered = original.to_string();
        let mut source = original.source();
        while let Some(err) = source {
            let message = err.to_string();
            if !message.is_empty() && !rendered.ends_with(&message) {
                rendered.push_str(": ");
                rendered.push_str(&message);
            }
            source = err.source();
        }
        Self { rendered, original }
    }

    /// The rendered chain.
    pub fn rendered(&self) -> &str
    {
        &self.rendered
    }

    /// The error that was flattened.
    pub fn original(&self) -> &(dyn StdError + Send + Sync + 'static)
    {
        &*self.original
    }
}

impl std::fmt::Display for Flattened
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        f.write_str(&self.rendered)
    }
}

impl StdError for Flattened
{
    fn source(&self) -> Option<&(dyn StdError + 'static)>
    {
        Some(&*self.original)
    }
}
