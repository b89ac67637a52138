//! Ensure the value falls strictly after an offset from now, or after a
//! referenced date.

use serde_json::Value;

use trellis_core::context::ValidationContext;
use trellis_core::error::CompileError;
use trellis_core::types::Timestamp;

use crate::helpers::ensure_subtype;

use super::offset::{self, CompiledOffset, Operator};

pub const RULE_NAME: &str = "after";
const DEFAULT_MESSAGE: &str = "after date validation failed";

/// Compile raw schema arguments into the rule's offset descriptor.
pub fn compile(subtype: &str, args: &[Value]) -> Result<CompiledOffset, CompileError> {
    ensure_subtype(RULE_NAME, "date", subtype)?;
    offset::compile(RULE_NAME, Operator::Gt, args)
}

/// Check one value; reports at most one error through the context.
pub fn validate(value: Timestamp, compiled: &CompiledOffset, ctx: &mut ValidationContext<'_>) {
    offset::validate(RULE_NAME, DEFAULT_MESSAGE, value, compiled, ctx)
}
