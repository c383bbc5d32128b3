//! # Symbols
//!
//! Resolution of captured instruction pointers into [`Frame`]s.
//!
//! Lookups go through `backtrace::resolve`, which reads the running binary's debug
//! information and serializes access internally, so resolution is safe from any
//! thread. Names are demangled and split into package and function by [`demangle`].

mod demangle;

use std::ffi::c_void;

use tracing::trace;

use crate::types::Frame;

/// Resolve one instruction pointer and append the resulting frames.
///
/// An address inside inlined code yields several symbols, innermost first; each
/// becomes a frame. Symbols missing a name, a file or a non-zero line are skipped.
pub fn resolve_into(ip: usize, frames: &mut Vec<Frame>)
{
    let before = frames.len();
    backtrace::resolve(ip as *mut c_void, |symbol| {
        let Some(raw) = symbol.name() else {
            return;
        };
        let (Some(file), Some(line_number)) = (symbol.filename(), symbol.lineno()) else {
            return;
        };
        if line_number == 0 {
            return;
        }

        let qualified = match raw.as_str() {
            Some(raw) => demangle::demangle(raw),
            None => raw.to_string(),
        };
        let (package, name) = demangle::split_path(&qualified);
        frames.push(Frame::new(file.display().to_string(), line_number, package, name));
    });

    if frames.len() == before {
        trace!("address {ip:#x} did not resolve to a complete frame");
    }
}

/// Resolve every address in order.
pub fn resolve_all(ips: &[usize]) -> Vec<Frame>
{
    let mut frames = Vec::with_capacity(ips.len());
    for &ip in ips {
        resolve_into(ip, &mut frames);
    }
    frames
}
