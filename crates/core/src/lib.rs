//! Shared validation primitives.
//!
//! Everything the rule crates consume but do not own: the compile-time
//! error type, the error-reporter sink and its collecting implementation,
//! custom-message resolution, and the per-call validation context.

pub mod context;
pub mod error;
pub mod messages;
pub mod report;
pub mod types;
