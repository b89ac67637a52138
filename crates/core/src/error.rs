/// Compile-time rule configuration errors.
///
/// These surface while a schema is being compiled, never while input is
/// being validated. Runtime failures are reported through
/// [`crate::report::ErrorReporter`] instead.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("\"{rule}\": expects an offset \"interval\" and \"duration\" or a \"ref\"")]
    ExpectsOffsetOrRef { rule: &'static str },

    #[error("\"{rule}\": expects an \"interval\" to be a number")]
    IntervalNotANumber { rule: &'static str },

    #[error("\"{rule}\": unsupported duration unit \"{unit}\"")]
    UnsupportedUnit { rule: &'static str, unit: String },

    #[error("\"{rule}\": cannot be used on a \"{subtype}\" field, only \"{expected}\" is supported")]
    SubtypeMismatch {
        rule: &'static str,
        expected: &'static str,
        subtype: String,
    },
}
