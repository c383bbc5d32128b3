//! Tests for error handling

use std::error::Error;

use stackwrap_core::error::{Flattened, Message, TraceError, TraceResult, UncaughtPanic};

#[test]
fn test_missing_prefix_display()
{
    let error = TraceError::MissingPanicPrefix {
        line_number: 1,
        line: "fatal error: boom".to_string(),
    };
    let message = format!("{}", error);
    assert!(message.contains("no prefix"));
    assert!(message.contains("fatal error: boom"));
    assert!(message.contains('1'));
}

#[test]
fn test_unparseable_display()
{
    let error = TraceError::Unparseable {
        text: "panic: x".to_string(),
    };
    let message = format!("{}", error);
    assert!(message.contains("could not parse panic"));
    assert!(message.contains("panic: x"));
    assert_eq!(error.line(), None);
    assert_eq!(error.line_number(), None);
}

#[test]
fn test_config_errors_display()
{
    let error = TraceError::AlreadyConfigured { current: 50 };
    assert!(format!("{}", error).contains("50"));

    let error = TraceError::InvalidStackDepth("zero".to_string());
    assert!(format!("{}", error).contains("zero"));
}

#[test]
fn test_message_and_panic_display()
{
    assert_eq!(Message::new("plain").to_string(), "plain");
    assert_eq!(UncaughtPanic::new("boom").to_string(), "boom");
    assert_eq!(UncaughtPanic::new("boom").message(), "boom");
}

#[test]
fn test_flattened_keeps_original_as_source()
{
    let inner = std::io::Error::other(Message::new("socket closed"));
    let flattened = Flattened::new(Box::new(inner));

    assert_eq!(flattened.rendered(), "socket closed");
    let source = flattened.source().unwrap();
    assert!(source.downcast_ref::<std::io::Error>().is_some());
    assert!(flattened.original().downcast_ref::<std::io::Error>().is_some());
}

#[test]
fn test_result_type()
{
    // Test that Result type is properly aliased
    let _result: TraceResult<()> = Ok(());
    let _error_result: TraceResult<()> = Err(TraceError::AlreadyConfigured { current: 1 });
}
