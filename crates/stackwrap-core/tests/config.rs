//! Tests for process-wide configuration
//!
//! Kept in its own test binary: the configuration can only be set once per process.

use stackwrap_core::config::{self, StackConfig};
use stackwrap_core::{annotate, TraceError};

#[test]
fn test_init_once_then_capture_is_bounded()
{
    let rejected = config::init(StackConfig::default().with_max_stack_depth(0));
    assert!(matches!(rejected, Err(TraceError::InvalidStackDepth(_))));

    config::init(StackConfig::default().with_max_stack_depth(3)).unwrap();
    assert_eq!(config::current().max_stack_depth, 3);

    let again = config::init(StackConfig::default());
    assert_eq!(again, Err(TraceError::AlreadyConfigured { current: 3 }));

    let err = annotate(std::fmt::Error);
    assert!(!err.callers().is_empty());
    assert!(err.callers().len() <= 3);
}
