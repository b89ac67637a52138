//! Shared rule-compilation guards.

use trellis_core::error::CompileError;

/// Fail compilation when a rule is attached to a schema subtype it does
/// not support.
pub fn ensure_subtype(
    rule: &'static str,
    expected: &'static str,
    subtype: &str,
) -> Result<(), CompileError> {
    if subtype != expected {
        return Err(CompileError::SubtypeMismatch {
            rule,
            expected,
            subtype: subtype.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn accepts_expected_subtype() {
        assert!(ensure_subtype("after", "date", "date").is_ok());
    }

    #[test]
    fn rejects_other_subtypes() {
        assert_matches!(
            ensure_subtype("after", "date", "string"),
            Err(CompileError::SubtypeMismatch { rule: "after", .. })
        );
    }
}
