//! End-to-end tests for the `after` / `before` date rules.
//!
//! Exercises the full path a host framework uses: compile raw arguments,
//! then validate real values against the wall clock with an
//! [`ApiErrorReporter`] collecting the failures.

use chrono::{Days, NaiveTime, TimeDelta, Utc};

use trellis_core::context::{ResolvedRefs, ValidationContext};
use trellis_core::messages::MessagesBag;
use trellis_core::report::{ApiErrorReporter, ErrorReport};
use trellis_core::types::Timestamp;
use trellis_rules::date::offset::CompiledOffset;
use trellis_rules::date::{after, before};

type ValidateFn = fn(Timestamp, &CompiledOffset, &mut ValidationContext<'_>);

fn run(validate: ValidateFn, value: Timestamp, compiled: &CompiledOffset) -> ErrorReport {
    run_with(validate, value, compiled, &ResolvedRefs::default(), MessagesBag::default())
}

fn run_with(
    validate: ValidateFn,
    value: Timestamp,
    compiled: &CompiledOffset,
    refs: &ResolvedRefs,
    messages: MessagesBag,
) -> ErrorReport {
    let mut reporter = ApiErrorReporter::new(messages);
    let mut ctx = ValidationContext {
        field: "published_on",
        pointer: "published_on",
        refs,
        reporter: &mut reporter,
    };
    validate(value, compiled, &mut ctx);
    reporter.to_report()
}

/// Today with no time component, the shape a date-only input parses to.
fn date_only(value: Timestamp) -> Timestamp {
    value.date_naive().and_time(NaiveTime::MIN).and_utc()
}

// ---------------------------------------------------------------------------
// Compilation failures
// ---------------------------------------------------------------------------

#[test]
fn does_not_compile_without_arguments() {
    let err = before::compile("date", &[]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "\"before\": expects an offset \"interval\" and \"duration\" or a \"ref\""
    );
}

#[test]
fn does_not_compile_when_single_argument_is_not_a_ref() {
    let err = before::compile("date", &[serde_json::json!("foo")]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "\"before\": expects an offset \"interval\" and \"duration\" or a \"ref\""
    );
}

#[test]
fn does_not_compile_when_interval_is_not_a_number() {
    let err = before::compile("date", &[serde_json::json!("foo"), serde_json::json!("days")])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "\"before\": expects an \"interval\" to be a number"
    );
}

// ---------------------------------------------------------------------------
// Before, day offset
// ---------------------------------------------------------------------------

/// A date-only value for today is not before yesterday.
#[test]
fn before_day_reports_error_for_today() {
    let compiled = before::compile("date", &[serde_json::json!(1), serde_json::json!("day")])
        .unwrap();
    let report = run(before::validate, date_only(Utc::now()), &compiled);

    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].field, "published_on");
    assert_eq!(report.errors[0].rule, "before");
    assert_eq!(report.errors[0].message, "before date validation failed");
}

/// Time of day has no relevance for a day offset: yesterday truncates to
/// the boundary itself, and equality fails.
#[test]
fn before_day_reports_error_for_yesterday_datetime() {
    let compiled = before::compile("date", &[serde_json::json!(1), serde_json::json!("day")])
        .unwrap();
    let yesterday = Utc::now() - Days::new(1);
    let report = run(before::validate, yesterday, &compiled);

    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].rule, "before");
}

#[test]
fn before_day_passes_two_days_back() {
    let compiled = before::compile("date", &[serde_json::json!(1), serde_json::json!("day")])
        .unwrap();
    let report = run(before::validate, Utc::now() - Days::new(2), &compiled);

    assert!(report.errors.is_empty());
}

// ---------------------------------------------------------------------------
// Before, minute offset
// ---------------------------------------------------------------------------

/// Sub-day offsets compare at full precision: the current instant is past
/// a boundary thirty minutes ago.
#[test]
fn before_minutes_reports_error_for_now() {
    let compiled =
        before::compile("date", &[serde_json::json!(30), serde_json::json!("minutes")]).unwrap();
    let report = run(before::validate, Utc::now(), &compiled);

    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].field, "published_on");
    assert_eq!(report.errors[0].rule, "before");
    assert_eq!(report.errors[0].message, "before date validation failed");
}

#[test]
fn before_minutes_passes_forty_minutes_back() {
    let compiled =
        before::compile("date", &[serde_json::json!(30), serde_json::json!("minutes")]).unwrap();
    let value = Utc::now() - TimeDelta::try_minutes(40).unwrap();
    let report = run(before::validate, value, &compiled);

    assert!(report.errors.is_empty());
}

/// A date-only value for yesterday falls well before a minute boundary.
#[test]
fn before_minutes_passes_yesterday_date() {
    let compiled =
        before::compile("date", &[serde_json::json!(30), serde_json::json!("minutes")]).unwrap();
    let value = date_only(Utc::now() - Days::new(1));
    let report = run(before::validate, value, &compiled);

    assert!(report.errors.is_empty());
}

// ---------------------------------------------------------------------------
// After, against a ref
// ---------------------------------------------------------------------------

#[test]
fn after_ref_passes_when_value_is_later() {
    let compiled =
        after::compile("date", &[serde_json::json!({ "ref": "afterDate" })]).unwrap();
    let refs: ResolvedRefs = [("afterDate".to_string(), date_only(Utc::now() + Days::new(10)))]
        .into_iter()
        .collect();
    let value = date_only(Utc::now() + Days::new(11));
    let report = run_with(after::validate, value, &compiled, &refs, MessagesBag::default());

    assert!(report.errors.is_empty());
}

#[test]
fn after_ref_reports_error_when_value_is_earlier() {
    let compiled =
        after::compile("date", &[serde_json::json!({ "ref": "afterDate" })]).unwrap();
    let refs: ResolvedRefs = [("afterDate".to_string(), date_only(Utc::now() + Days::new(10)))]
        .into_iter()
        .collect();
    let report = run_with(
        after::validate,
        date_only(Utc::now()),
        &compiled,
        &refs,
        MessagesBag::default(),
    );

    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].field, "published_on");
    assert_eq!(report.errors[0].rule, "after");
    assert_eq!(report.errors[0].message, "after date validation failed");
}

/// Equality with the boundary never passes, in either direction.
#[test]
fn boundary_equality_fails_both_directions() {
    let instant = date_only(Utc::now() + Days::new(3));
    let refs: ResolvedRefs = [("boundary".to_string(), instant)].into_iter().collect();

    let compiled =
        after::compile("date", &[serde_json::json!({ "ref": "boundary" })]).unwrap();
    let report = run_with(after::validate, instant, &compiled, &refs, MessagesBag::default());
    assert_eq!(report.errors.len(), 1);

    let compiled =
        before::compile("date", &[serde_json::json!({ "ref": "boundary" })]).unwrap();
    let report = run_with(before::validate, instant, &compiled, &refs, MessagesBag::default());
    assert_eq!(report.errors.len(), 1);
}

// ---------------------------------------------------------------------------
// Custom messages
// ---------------------------------------------------------------------------

#[test]
fn custom_message_overrides_default() {
    let compiled = before::compile("date", &[serde_json::json!(1), serde_json::json!("day")])
        .unwrap();
    let messages = MessagesBag::new(
        [(
            "published_on.before".to_string(),
            "{{ field }} must be more than {{ options.interval }} {{ options.duration }} in the past".to_string(),
        )]
        .into_iter()
        .collect(),
    );
    let report = run_with(
        before::validate,
        date_only(Utc::now()),
        &compiled,
        &ResolvedRefs::default(),
        messages,
    );

    assert_eq!(report.errors.len(), 1);
    assert_eq!(
        report.errors[0].message,
        "published_on must be more than 1 days in the past"
    );
}
