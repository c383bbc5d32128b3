//! Tests for the construction API

use std::fmt;
use std::io;

use stackwrap_core::{
    annotate, annotate_skip, base, full_trace, has_trace, is, prefix, trace, unwrap, AnnotatedError, BoxError,
    Message, ResultExt,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("disk full")]
struct DiskFull;

#[derive(Debug, Error)]
#[error("write failed")]
struct WriteFailed
{
    source: DiskFull,
}

#[derive(Debug, Error)]
#[error("flush failed: {source}")]
struct FlushFailed
{
    source: DiskFull,
}

#[inline(never)]
fn fail_here() -> AnnotatedError
{
    annotate(fmt::Error)
}

#[inline(never)]
fn not_found(what: &str) -> AnnotatedError
{
    annotate_skip(format!("{what} not found"), 2)
}

#[inline(never)]
#[allow(clippy::let_and_return)]
fn lookup_user() -> AnnotatedError
{
    let err = not_found("user");
    err
}

#[inline(never)]
fn formatted_here() -> AnnotatedError
{
    stackwrap_core::annotate!("user {} missing", 7)
}

#[inline(never)]
fn result_here() -> Result<(), AnnotatedError>
{
    Err::<(), _>(fmt::Error).annotate()
}

#[test]
fn test_annotate_records_caller()
{
    let err = fail_here();
    let frames = err.stack_frames();
    assert!(!frames.is_empty());
    assert_eq!(frames[0].name(), "fail_here");
    assert!(frames[0].file().ends_with("api.rs"));
    assert!(frames[0].line_number() > 0);
}

#[test]
fn test_annotate_skip_records_helper_caller()
{
    let err = lookup_user();
    assert_eq!(err.to_string(), "user not found");
    assert_eq!(err.stack_frames()[0].name(), "lookup_user");
}

#[test]
fn test_annotate_macro_records_call_site()
{
    let err = formatted_here();
    assert_eq!(err.to_string(), "user 7 missing");
    assert_eq!(err.stack_frames()[0].name(), "formatted_here");
}

#[test]
fn test_result_ext_records_caller()
{
    let err = result_here().unwrap_err();
    assert_eq!(err.stack_frames()[0].name(), "result_here");
}

#[test]
fn test_annotate_is_idempotent()
{
    let err = fail_here();
    let callers = err.callers().to_vec();
    assert!(!callers.is_empty());

    let again = annotate(err);
    assert_eq!(again.callers(), callers.as_slice());
    assert!(has_trace(&again));
    assert_eq!(again.stack_frames()[0].name(), "fail_here");
}

#[test]
fn test_annotate_is_idempotent_through_a_box()
{
    let err = fail_here();
    let callers = err.callers().to_vec();
    let boxed: BoxError = Box::new(err);

    let again = annotate(boxed);
    assert_eq!(again.callers(), callers.as_slice());
}

#[test]
fn test_annotate_strings()
{
    let err = annotate("plain message");
    assert_eq!(err.to_string(), "plain message");

    let err = annotate(String::from("owned message"));
    assert_eq!(err.to_string(), "owned message");
}

#[test]
fn test_prefix_composes()
{
    let err = prefix("b", prefix("a", Message::new("base")));
    assert_eq!(err.to_string(), "b: a: base");
    assert_eq!(err.prefix(), Some("b: a"));
}

#[test]
fn test_prefix_keeps_original_stack()
{
    let err = fail_here();
    let callers = err.callers().to_vec();

    let err = prefix("saving", err);
    assert_eq!(err.callers(), callers.as_slice());
    assert_eq!(err.to_string(), "saving: an error occurred when formatting an argument");
}

#[test]
fn test_result_ext_passes_ok_through()
{
    let ok: Result<u8, io::Error> = Ok(5);
    assert_eq!(ok.prefix("reading").unwrap(), 5);

    let ok: Result<u8, fmt::Error> = Ok(6);
    assert_eq!(ok.annotate().unwrap(), 6);
}

#[test]
fn test_result_ext_prefix_on_error()
{
    let failed: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "settings.toml"));
    let err = failed.prefix("loading").unwrap_err();
    assert_eq!(err.to_string(), "loading: settings.toml");
}

#[test]
fn test_trace_of_none_is_empty()
{
    assert_eq!(trace(None::<AnnotatedError>), "");
    assert_eq!(full_trace(None::<io::Error>), "");
}

#[test]
fn test_trace_of_annotated_error()
{
    let err = fail_here();
    let expected = err.stack();
    assert!(expected.contains("fail_here\n\t"));
    assert_eq!(trace(Some(err)), expected);
}

#[test]
fn test_trace_annotates_plain_errors()
{
    let text = trace(Some(fmt::Error));
    assert!(text.contains("test_trace_annotates_plain_errors\n\t"));
}

#[test]
fn test_full_trace_layout()
{
    let err = fail_here();
    let stack = err.stack();

    let text = full_trace(Some(err));
    let (first, rest) = text.split_once('\n').unwrap();
    assert!(first.ends_with("Error an error occurred when formatting an argument"));
    assert_eq!(rest, stack);
}

#[test]
fn test_has_trace_does_not_coerce()
{
    assert!(!has_trace(&fmt::Error));
    assert!(!has_trace(&io::Error::other("plain")));
    assert!(has_trace(&fail_here()));
}

#[test]
fn test_base_has_no_stack()
{
    let message = stackwrap_core::base!("retry {} of {}", 2, 3);
    assert_eq!(message.to_string(), "retry 2 of 3");
    assert!(!has_trace(&message));

    let message = base(format_args!("constant"));
    assert_eq!(message.as_str(), "constant");
}

#[test]
fn test_errors_with_source_are_flattened()
{
    let err = annotate(WriteFailed { source: DiskFull });
    assert_eq!(err.to_string(), "write failed: disk full");
}

#[test]
fn test_flattening_does_not_repeat_embedded_sources()
{
    let err = annotate(FlushFailed { source: DiskFull });
    assert_eq!(err.to_string(), "flush failed: disk full");
}

#[test]
fn test_unwrap_reaches_innermost_error()
{
    let err = prefix("saving", annotate(WriteFailed { source: DiskFull }));
    let innermost = unwrap(&err);
    assert!(innermost.downcast_ref::<DiskFull>().is_some());
}

#[test]
fn test_unwrap_of_plain_error_is_itself()
{
    let err = fmt::Error;
    let innermost = unwrap(&err);
    assert!(innermost.downcast_ref::<fmt::Error>().is_some());
}

#[test]
fn test_unwrap_strips_annotation()
{
    let err = annotate(Message::new("root"));
    let innermost = unwrap(&err);
    assert_eq!(innermost.downcast_ref::<Message>(), Some(&Message::new("root")));
}

#[test]
fn test_is_survives_rewrapping()
{
    let err = annotate(fmt::Error);
    let err = prefix("outer", err);
    let err = annotate(err);
    assert!(is(&err, &fmt::Error));
}

#[test]
fn test_is_sees_through_flattened_chains()
{
    let err = annotate(WriteFailed { source: DiskFull });
    assert!(is(&err, &DiskFull));
    assert!(is(&DiskFull, &DiskFull));
}

#[test]
fn test_is_compares_values()
{
    let err = annotate(Message::new("a"));
    assert!(is(&err, &Message::new("a")));
    assert!(!is(&err, &Message::new("b")));
    assert!(!is(&err, &fmt::Error));
}

#[test]
fn test_frames_are_cached()
{
    let err = fail_here();
    let first = err.stack_frames().as_ptr();
    let second = err.stack_frames().as_ptr();
    assert_eq!(first, second);
}

#[test]
fn test_captured_stack_resolves_to_frames()
{
    let err = fail_here();
    assert!(!err.callers().is_empty());
    assert!(!err.stack_frames().is_empty());

    let text = trace(Some(err));
    assert!(text.starts_with("api.fail_here\n\t"));
}

#[test]
fn test_full_trace_of_plain_error_has_frames()
{
    let text = full_trace(Some(fmt::Error));
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("core::fmt::Error an error occurred when formatting an argument"));
    assert_eq!(lines.next(), Some("api.test_full_trace_of_plain_error_has_frames"));
}

#[test]
fn test_kind_of_boxed_error_names_the_box()
{
    let boxed: BoxError = Box::new(DiskFull);
    let err = annotate(boxed);
    assert!(err.type_name().starts_with("alloc::boxed::Box<dyn "));
    assert!(is(&err, &DiskFull));

    let failed: Result<(), BoxError> = Err(Box::new(DiskFull));
    let err = failed.annotate().unwrap_err();
    assert_eq!(err.type_name(), annotate(Box::new(DiskFull) as BoxError).type_name());
}
