//! # Annotated Errors
//!
//! [`AnnotatedError`] wraps a cause together with the stack of the place it was
//! annotated (or the stack recovered from a panic dump).
//!
//! ## Frames
//!
//! Captured errors only hold raw instruction pointers. The first call to
//! [`AnnotatedError::stack_frames`] symbolicates them and caches the result; later
//! calls, from any thread, return the same slice. Errors built by the panic parser
//! start with their frames already populated and no raw stack.
//!
//! ## Messages
//!
//! `Display` renders `prefix: cause`, or just `cause` without a prefix. Prefixes
//! compose outward: adding `b` to an error prefixed with `a` renders `b: a: cause`.

use std::error::Error as StdError;
use std::fmt;

use once_cell::sync::OnceCell;

use crate::types::frame::{self, Frame};
use crate::types::RawStack;

/// Boxed error accepted as a cause.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Kind name reported for errors recovered from a panic dump.
pub const PANIC_KIND: &str = "panic";

/// An error with an attached call stack.
///
/// Built by the construction API ([`crate::annotate`], [`crate::prefix`], ...) or by
/// [`crate::parse_panic`]. The cause is never itself an `AnnotatedError`: annotating an
/// annotated error returns it unchanged.
pub struct AnnotatedError
{
    cause: BoxError,
    kind: &'static str,
    stack: RawStack,
    frames: OnceCell<Vec<Frame>>,
    prefix: String,
}

impl AnnotatedError
{
    pub(crate) fn captured(cause: BoxError, kind: &'static str, stack: RawStack) -> Self
    {
        Self {
            cause,
            kind,
            stack,
            frames: OnceCell::new(),
            prefix: String::new(),
        }
    }

    pub(crate) fn with_frames(cause: BoxError, kind: &'static str, frames: Vec<Frame>) -> Self
    {
        Self {
            cause,
            kind,
            stack: RawStack::default(),
            frames: OnceCell::with_value(frames),
            prefix: String::new(),
        }
    }

    /// Compose `prefix` in front of any existing prefix. An empty prefix is a no-op.
    #[must_use]
    pub(crate) fn with_prefix(mut self, prefix: &str) -> Self
    {
        if prefix.is_empty() {
            return self;
        }
        self.prefix = if self.prefix.is_empty() {
            prefix.to_string()
        } else {
            format!("{prefix}: {}", self.prefix)
        };
        self
    }

    /// The wrapped error.
    pub fn cause(&self) -> &(dyn StdError + Send + Sync + 'static)
    {
        &*self.cause
    }

    /// Discard the stack and return the wrapped error.
    pub fn into_cause(self) -> BoxError
    {
        self.cause
    }

    /// The message prefix, if any.
    pub fn prefix(&self) -> Option<&str>
    {
        (!self.prefix.is_empty()).then_some(self.prefix.as_str())
    }

    /// Raw instruction pointers captured at annotation time.
    ///
    /// Empty for errors recovered from a panic dump.
    pub fn callers(&self) -> &[usize]
    {
        self.stack.ips()
    }

    /// Structured frames, innermost first.
    ///
    /// Symbolication runs once, on the first call.
    pub fn stack_frames(&self) -> &[Frame]
    {
        self.frames.get_or_init(|| self.stack.frames())
    }

    /// The frames rendered one after another as `package.name\n\tfile:line\n`.
    pub fn stack(&self) -> String
    {
        frame::render(self.stack_frames())
    }

    /// Kind name of the original cause: its type name, or `panic` for parsed dumps.
    ///
    /// The name is the static type handed to the construction API. A value that was
    /// already boxed as a trait object reports the box type (for example
    /// `alloc::boxed::Box<dyn core::error::Error + ...>`), since the concrete type behind
    /// a `dyn Error` cannot be named at runtime.
    pub fn type_name(&self) -> &'static str
    {
        self.kind
    }

    /// `kind message`, a newline, then [`AnnotatedError::stack`].
    pub fn error_stack(&self) -> String
    {
        format!("{} {}\n{}", self.kind, self, self.stack())
    }
}

impl fmt::Display for AnnotatedError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        if self.prefix.is_empty() {
            write!(f, "{}", self.cause)
        } else {
            write!(f, "{}: {}", self.prefix, self.cause)
        }
    }
}

impl fmt::Debug for AnnotatedError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("AnnotatedError")
            .field("kind", &self.kind)
            .field("prefix", &self.prefix)
            .field("cause", &self.cause)
            .field("callers", &self.stack.len())
            .finish_non_exhaustive()
    }
}

impl StdError for AnnotatedError
{
    fn source(&self) -> Option<&(dyn StdError + 'static)>
    {
        Some(&*self.cause)
    }
}
