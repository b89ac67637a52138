//! Schema validation rules.
//!
//! Each rule is a pair of functions: a pure `compile` that turns raw schema
//! arguments into an immutable descriptor once per schema, and a `validate`
//! that checks one runtime value against that descriptor, reporting
//! failures through the sink in [`trellis_core::context::ValidationContext`].

pub mod date;
pub mod helpers;
