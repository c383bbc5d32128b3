//! Symbol demangling utilities.
//!
//! This module turns raw linkage names into the `package` / `name` pair a
//! [`Frame`](crate::types::Frame) carries.
//!
//! ## Symbol Mangling
//!
//! - **Rust**: legacy (`_ZN...E`) and v0 (`_R...`) manglings are demangled with
//!   `rustc_demangle`, dropping the trailing hash
//! - **C / C++ / anything else**: kept as-is
//!
//! ## Splitting
//!
//! A demangled Rust path is split at its last top-level `::`. Separators nested in
//! `<...>` (trait impls, generic arguments) do not count, so
//! `<alloc::boxed::Box<F> as core::ops::FnOnce<A>>::call_once` yields the package
//! `<alloc::boxed::Box<F> as core::ops::FnOnce<A>>` and the name `call_once`.

use rustc_demangle::try_demangle;

/// Demangle a raw symbol name without its hash suffix.
///
/// Names that are not Rust-mangled are returned unchanged.
pub(crate) fn demangle(raw: &str) -> String
{
    match try_demangle(raw) {
        Ok(demangled) => format!("{demangled:#}"),
        Err(_) => raw.to_string(),
    }
}

/// Split a demangled path into `(package, name)`.
///
/// A path without a top-level separator has an empty package.
pub(crate) fn split_path(path: &str) -> (String, String)
{
    let mut depth = 0usize;
    let mut split_at = None;
    let mut previous = '\0';
    for (index, ch) in path.char_indices() {
        match ch {
            '<' => depth += 1,
            // `->` in fn pointer types is not a closing bracket
            '>' if previous != '-' => depth = depth.saturating_sub(1),
            ':' if previous == ':' && depth == 0 => split_at = Some(index - 1),
            _ => {}
        }
        previous = ch;
    }

    match split_at {
        Some(index) => (path[..index].to_string(), path[index + 2..].to_string()),
        None => (String::new(), path.to_string()),
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_demangle_legacy_drops_hash()
    {
        let raw = "_ZN4core3fmt5write17h0123456789abcdefE";
        assert_eq!(demangle(raw), "core::fmt::write");
    }

    #[test]
    fn test_demangle_passes_through_c_symbols()
    {
        assert_eq!(demangle("main"), "main");
        assert_eq!(demangle("__libc_start_main"), "__libc_start_main");
    }

    #[test]
    fn test_split_simple_path()
    {
        assert_eq!(
            split_path("my_crate::io::read"),
            ("my_crate::io".to_string(), "read".to_string())
        );
    }

    #[test]
    fn test_split_without_separator()
    {
        assert_eq!(split_path("main"), (String::new(), "main".to_string()));
    }

    #[test]
    fn test_split_ignores_nested_separators()
    {
        let (package, name) = split_path("<alloc::boxed::Box<F> as core::ops::FnOnce<A>>::call_once");
        assert_eq!(package, "<alloc::boxed::Box<F> as core::ops::FnOnce<A>>");
        assert_eq!(name, "call_once");
    }

    #[test]
    fn test_split_closure()
    {
        let (package, name) = split_path("std::rt::lang_start::{{closure}}");
        assert_eq!(package, "std::rt::lang_start");
        assert_eq!(name, "{{closure}}");
    }

    #[test]
    fn test_split_fn_pointer_generics()
    {
        let (package, name) = split_path("<fn() -> u8 as core::ops::Fn<()>>::call");
        assert_eq!(package, "<fn() -> u8 as core::ops::Fn<()>>");
        assert_eq!(name, "call");
    }
}
