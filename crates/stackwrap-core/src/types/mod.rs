//! # Types
//!
//! The stack representation shared by captured and parsed errors.
//!
//! A [`RawStack`] is what gets recorded at the point an error is annotated: bare
//! instruction pointers, cheap to take. [`Frame`]s are the resolved, human-readable
//! form, produced either from a `RawStack` or directly by the panic parser.

pub mod frame;
pub mod stack;

// Re-export all public types
pub use frame::Frame;
pub use stack::RawStack;
