//! # Construction API
//!
//! Entry points that decide whether to wrap, how deep to skip when capturing, and
//! how to treat errors that carry their own source chain.
//!
//! ## Skip depth
//!
//! The recorded origin is the caller of the public function, not the plumbing
//! underneath it. Helpers that wrap these functions use [`annotate_skip`] with one
//! extra level per helper so the origin stays at their own caller.
//!
//! ```rust
//! use stackwrap_core::{annotate_skip, AnnotatedError};
//!
//! #[inline(never)]
//! fn not_found(what: &str) -> AnnotatedError
//! {
//!     // 0 would point at annotate_skip, 1 at this helper, 2 at its caller
//!     annotate_skip(format!("{what} not found"), 2)
//! }
//! ```
//!
//! ## Errors with a source
//!
//! An error whose [`Error::source`] is set is flattened before wrapping: its message
//! becomes the rendered chain, and the original stays reachable as the flattened
//! value's source.
//!
//! ## Absent errors
//!
//! Nothing here manufactures an error from "no error". [`trace`] and [`full_trace`]
//! take an `Option` and return an empty string for `None`; [`ResultExt`] only
//! touches the `Err` side.

use std::any::type_name;
use std::error::Error;
use std::fmt;

use crate::annotated::{AnnotatedError, BoxError};
use crate::error::{Flattened, Message};
use crate::types::RawStack;

/// Annotate `value` with the stack of the caller.
///
/// An [`AnnotatedError`] (or a box holding one) is returned unchanged, keeping its
/// original stack.
#[inline(never)]
pub fn annotate<V>(value: V) -> AnnotatedError
where
    V: Into<BoxError>,
{
    wrap(value, 1)
}

/// Annotate `value`, starting the stack `skip` frames above this function.
///
/// `skip = 0` records `annotate_skip` itself, `1` its caller (the same as
/// [`annotate`]), and so on.
#[inline(never)]
pub fn annotate_skip<V>(value: V, skip: usize) -> AnnotatedError
where
    V: Into<BoxError>,
{
    wrap(value, skip)
}

/// Annotate `value` and put `prefix` in front of its message.
///
/// An already annotated error keeps its stack; its existing prefix moves behind the
/// new one.
#[inline(never)]
pub fn prefix<V>(prefix: &str, value: V) -> AnnotatedError
where
    V: Into<BoxError>,
{
    wrap(value, 1).with_prefix(prefix)
}

/// The rendered frames of `err`, or an empty string for `None`.
///
/// A value that is not yet annotated is annotated first, at the caller of `trace`.
#[inline(never)]
pub fn trace<V>(err: Option<V>) -> String
where
    V: Into<BoxError>,
{
    match err {
        Some(err) => wrap(err, 1).stack(),
        None => String::new(),
    }
}

/// `kind message`, a newline and the rendered frames, or an empty string for `None`.
///
/// `kind` is [`AnnotatedError::type_name`]: for a value passed as a boxed trait object it
/// names the box type, not the error inside it.
#[inline(never)]
pub fn full_trace<V>(err: Option<V>) -> String
where
    V: Into<BoxError>,
{
    match err {
        Some(err) => wrap(err, 1).error_stack(),
        None => String::new(),
    }
}

/// Whether `err` already carries a stack. No conversion is attempted.
pub fn has_trace(err: &(dyn Error + 'static)) -> bool
{
    err.is::<AnnotatedError>()
}

/// The innermost error behind every annotation and source layer.
///
/// Each step moves one layer down, so a finite chain always terminates. An error
/// that reports itself as its own source breaks the [`Error::source`] contract and
/// will loop.
pub fn unwrap<'a>(err: &'a (dyn Error + 'static)) -> &'a (dyn Error + 'static)
{
    let mut current = err;
    loop {
        if let Some(annotated) = current.downcast_ref::<AnnotatedError>() {
            current = annotated.cause() as &(dyn Error + 'static);
            continue;
        }
        match current.source() {
            Some(deeper) => current = deeper,
            None => return current,
        }
    }
}

/// Whether `err`, or any error behind it, equals `target`.
///
/// Annotation layers and source layers (including flattened chains) are looked
/// through, so a sentinel stays recognisable however many times it was re-wrapped.
pub fn is<T>(err: &(dyn Error + 'static), target: &T) -> bool
where
    T: Error + PartialEq + 'static,
{
    let mut current = Some(err);
    while let Some(link) = current {
        if link.downcast_ref::<T>().is_some_and(|candidate| candidate == target) {
            return true;
        }
        current = match link.downcast_ref::<AnnotatedError>() {
            Some(annotated) => Some(annotated.cause() as &(dyn Error + 'static)),
            None => link.source(),
        };
    }
    false
}

/// Format a message without capturing a stack.
///
/// Usually reached through the [`base!`](crate::base) macro.
pub fn base(args: fmt::Arguments<'_>) -> Message
{
    match args.as_str() {
        Some(text) => Message::new(text),
        None => Message::new(args.to_string()),
    }
}

/// Annotation on the error side of a `Result`.
///
/// `Ok` values pass through untouched.
///
/// ```rust
/// use stackwrap_core::ResultExt;
///
/// fn read() -> Result<String, stackwrap_core::AnnotatedError>
/// {
///     std::fs::read_to_string("/definitely/missing").prefix("reading settings")
/// }
///
/// let err = read().unwrap_err();
/// assert!(err.to_string().starts_with("reading settings: "));
/// ```
pub trait ResultExt<T>
{
    /// Annotate the error with the stack of the caller.
    fn annotate(self) -> Result<T, AnnotatedError>;

    /// Annotate the error and prefix its message.
    fn prefix(self, prefix: &str) -> Result<T, AnnotatedError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    #[inline(never)]
    fn annotate(self) -> Result<T, AnnotatedError>
    {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(wrap(err, 1)),
        }
    }

    #[inline(never)]
    fn prefix(self, prefix: &str) -> Result<T, AnnotatedError>
    {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(wrap(err, 1).with_prefix(prefix)),
        }
    }
}

/// Shared wrapping path. `skip = 0` records the function calling `wrap`.
#[inline(never)]
fn wrap<V>(value: V, skip: usize) -> AnnotatedError
where
    V: Into<BoxError>,
{
    let kind = type_name::<V>();
    let cause: BoxError = value.into();
    let cause = match cause.downcast::<AnnotatedError>() {
        Ok(annotated) => return *annotated,
        Err(cause) => cause,
    };
    let cause: BoxError = if cause.source().is_some() {
        Box::new(Flattened::new(cause))
    } else {
        cause
    };

    // 0 would be `wrap` itself
    AnnotatedError::captured(cause, kind, RawStack::capture(skip + 1))
}
