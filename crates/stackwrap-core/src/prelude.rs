//! Common module for library exports

pub use crate::annotated::{AnnotatedError, BoxError};
pub use crate::api::{annotate, annotate_skip, base, full_trace, has_trace, is, prefix, trace, unwrap, ResultExt};
pub use crate::error::{TraceError, TraceResult};
pub use crate::parser::parse_panic;
pub use crate::types::{Frame, RawStack};
