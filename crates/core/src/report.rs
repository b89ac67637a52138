//! Validation failure records and the reporter sink they flow into.

use serde::{Deserialize, Serialize};

use crate::messages::MessagesBag;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub rule: String,
    pub field: String,
    pub message: String,
    /// The rule's declared arguments, kept for message templating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<serde_json::Value>,
}

/// Terminal snapshot of every failure collected during one validation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub errors: Vec<ValidationError>,
}

/// Sink accepting structured validation failures.
///
/// Rules only ever write to this; they never read reporter state back. A
/// test double is a `Vec` push.
pub trait ErrorReporter {
    fn report(
        &mut self,
        pointer: &str,
        rule: &str,
        default_message: &str,
        args: Option<serde_json::Value>,
    );
}

/// Collecting reporter used by the request-validation pipeline.
///
/// Resolves custom messages through a [`MessagesBag`] and accumulates the
/// resulting records until [`ApiErrorReporter::to_report`] is taken.
#[derive(Debug, Default)]
pub struct ApiErrorReporter {
    messages: MessagesBag,
    errors: Vec<ValidationError>,
}

impl ApiErrorReporter {
    pub fn new(messages: MessagesBag) -> Self {
        Self {
            messages,
            errors: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Snapshot the collected failures as `{ "errors": [...] }`.
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            errors: self.errors.clone(),
        }
    }
}

impl ErrorReporter for ApiErrorReporter {
    fn report(
        &mut self,
        pointer: &str,
        rule: &str,
        default_message: &str,
        args: Option<serde_json::Value>,
    ) {
        let message = self
            .messages
            .resolve(pointer, rule, default_message, args.as_ref());
        self.errors.push(ValidationError {
            rule: rule.to_string(),
            field: pointer.to_string(),
            message,
            args,
        });
    }
}
