//! Custom validation message resolution.

use std::collections::HashMap;

use regex::Regex;

/// User-supplied message overrides for validation failures.
///
/// Lookup order: `"<pointer>.<rule>"` first, then the bare rule name, then
/// the rule's built-in default. Resolved templates may reference
/// `{{ field }}`, `{{ rule }}` and `{{ options.<path> }}` placeholders,
/// where `options` is the arguments object attached to the failure.
#[derive(Debug, Clone, Default)]
pub struct MessagesBag {
    messages: HashMap<String, String>,
}

impl MessagesBag {
    pub fn new(messages: HashMap<String, String>) -> Self {
        Self { messages }
    }

    /// Pick the message for a failure and interpolate its placeholders.
    pub fn resolve(
        &self,
        pointer: &str,
        rule: &str,
        default_message: &str,
        args: Option<&serde_json::Value>,
    ) -> String {
        let template = self
            .messages
            .get(&format!("{pointer}.{rule}"))
            .or_else(|| self.messages.get(rule))
            .map(String::as_str)
            .unwrap_or(default_message);

        interpolate(template, pointer, rule, args)
    }
}

/// Replace `{{ ... }}` placeholders in a message template.
///
/// Unknown placeholders collapse to an empty string rather than erroring:
/// a bad template must never turn a validation failure into a panic.
fn interpolate(
    template: &str,
    field: &str,
    rule: &str,
    args: Option<&serde_json::Value>,
) -> String {
    let re = match Regex::new(r"\{\{\s*([A-Za-z0-9_.]+)\s*\}\}") {
        Ok(re) => re,
        Err(_) => return template.to_string(),
    };

    re.replace_all(template, |caps: &regex::Captures<'_>| match &caps[1] {
        "field" => field.to_string(),
        "rule" => rule.to_string(),
        path => path
            .strip_prefix("options.")
            .and_then(|rest| args.and_then(|args| lookup(args, rest)))
            .unwrap_or_default(),
    })
    .into_owned()
}

/// Walk a dotted path through the arguments object.
fn lookup(args: &serde_json::Value, path: &str) -> Option<String> {
    let mut current = args;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(match current {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}
