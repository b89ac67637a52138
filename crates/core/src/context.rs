//! Per-call validation state handed to every rule.

use std::collections::HashMap;

use crate::report::ErrorReporter;
use crate::types::Timestamp;

/// Schema refs resolved to concrete dates.
///
/// Populated once per top-level validation run, before any rule executes.
/// Rules look refs up by key; they never trigger resolution themselves.
#[derive(Debug, Clone, Default)]
pub struct ResolvedRefs {
    refs: HashMap<String, Timestamp>,
}

impl ResolvedRefs {
    pub fn insert(&mut self, key: impl Into<String>, value: Timestamp) {
        self.refs.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<Timestamp> {
        self.refs.get(key).copied()
    }
}

impl FromIterator<(String, Timestamp)> for ResolvedRefs {
    fn from_iter<I: IntoIterator<Item = (String, Timestamp)>>(iter: I) -> Self {
        Self {
            refs: iter.into_iter().collect(),
        }
    }
}

/// Everything a rule needs for one `validate` call.
///
/// Owned by the caller for the duration of the call; rules only write to
/// the reporter.
pub struct ValidationContext<'a> {
    /// Field name as declared in the schema.
    pub field: &'a str,
    /// Pointer path to the field within the validated payload.
    pub pointer: &'a str,
    pub refs: &'a ResolvedRefs,
    pub reporter: &'a mut dyn ErrorReporter,
}
