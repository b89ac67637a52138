//! Offset compiler and comparator shared by the date comparison rules.
//!
//! A rule's raw arguments are either a literal displacement from "now"
//! (`[interval, unit]`) or a ref resolving to another field's date
//! (`[{"ref": key}]`). `compile` validates them once per schema;
//! `validate` resolves the boundary date and performs a single strict
//! comparison per field occurrence.

use chrono::{Days, Months, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use trellis_core::context::ValidationContext;
use trellis_core::error::CompileError;
use trellis_core::types::Timestamp;

// ---------------------------------------------------------------------------
// Compiled descriptor
// ---------------------------------------------------------------------------

/// Recognized duration units for literal offsets.
///
/// Day-granular units compare at day resolution; sub-day units compare at
/// full timestamp precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Years,
    Quarters,
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl DurationUnit {
    /// Parse a unit name, accepting singular and plural spellings.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "year" | "years" => Some(Self::Years),
            "quarter" | "quarters" => Some(Self::Quarters),
            "month" | "months" => Some(Self::Months),
            "week" | "weeks" => Some(Self::Weeks),
            "day" | "days" => Some(Self::Days),
            "hour" | "hours" => Some(Self::Hours),
            "minute" | "minutes" => Some(Self::Minutes),
            "second" | "seconds" => Some(Self::Seconds),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Years => "years",
            Self::Quarters => "quarters",
            Self::Months => "months",
            Self::Weeks => "weeks",
            Self::Days => "days",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
        }
    }

    /// Whether comparisons against this unit ignore time of day.
    pub fn is_day_granular(self) -> bool {
        matches!(
            self,
            Self::Days | Self::Weeks | Self::Months | Self::Quarters | Self::Years
        )
    }
}

/// Comparison direction. `Gt` carries after-semantics, `Lt` before-semantics;
/// the comparator never needs the rule's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
}

/// Where the boundary date comes from at validation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetSource {
    /// A displacement from "now", sampled per validate call.
    Literal { interval: i64, unit: DurationUnit },
    /// A key into the pre-resolved refs of the validation run.
    Reference { key: String },
}

/// The validated compile-time artifact owned by a compiled rule instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledOffset {
    pub operator: Operator,
    pub source: OffsetSource,
}

// ---------------------------------------------------------------------------
// Compiler
// ---------------------------------------------------------------------------

/// Validate raw rule arguments into a [`CompiledOffset`].
///
/// Accepts exactly one ref argument, or an `[interval, unit]` pair. Pure
/// and deterministic; all defects surface as [`CompileError`]s, never at
/// validation time.
pub fn compile(
    rule: &'static str,
    operator: Operator,
    args: &[Value],
) -> Result<CompiledOffset, CompileError> {
    match args {
        [] => Err(CompileError::ExpectsOffsetOrRef { rule }),
        [single] => match ref_key(single) {
            Some(key) => Ok(CompiledOffset {
                operator,
                source: OffsetSource::Reference { key },
            }),
            None => Err(CompileError::ExpectsOffsetOrRef { rule }),
        },
        [interval, unit, ..] => {
            let interval = interval
                .as_i64()
                .ok_or(CompileError::IntervalNotANumber { rule })?;
            let unit = unit
                .as_str()
                .and_then(DurationUnit::parse)
                .ok_or_else(|| CompileError::UnsupportedUnit {
                    rule,
                    unit: unit.as_str().unwrap_or_default().to_string(),
                })?;
            Ok(CompiledOffset {
                operator,
                source: OffsetSource::Literal { interval, unit },
            })
        }
    }
}

/// A ref handle is the serialized schema-ref shape `{"ref": "<key>"}`.
fn ref_key(value: &Value) -> Option<String> {
    value.get("ref")?.as_str().map(str::to_owned)
}

// ---------------------------------------------------------------------------
// Comparator
// ---------------------------------------------------------------------------

/// Check one value against a compiled offset; reports at most one error.
pub fn validate(
    rule: &'static str,
    default_message: &str,
    value: Timestamp,
    compiled: &CompiledOffset,
    ctx: &mut ValidationContext<'_>,
) {
    validate_at(Utc::now(), rule, default_message, value, compiled, ctx)
}

/// Comparator body with an explicit "now", so every branch is testable
/// without touching the wall clock.
fn validate_at(
    now: Timestamp,
    rule: &'static str,
    default_message: &str,
    value: Timestamp,
    compiled: &CompiledOffset,
    ctx: &mut ValidationContext<'_>,
) {
    let (boundary, day_granular, args) = match &compiled.source {
        OffsetSource::Literal { interval, unit } => {
            // After looks forward from now, before looks backward.
            let signed = match compiled.operator {
                Operator::Gt => Some(*interval),
                Operator::Lt => interval.checked_neg(),
            };
            let Some(boundary) = signed.and_then(|n| shift(now, n, *unit)) else {
                tracing::warn!(
                    rule,
                    interval,
                    unit = unit.as_str(),
                    "offset outside the representable date range, skipping check"
                );
                return;
            };
            (
                boundary,
                unit.is_day_granular(),
                json!({ "interval": interval, "duration": unit.as_str() }),
            )
        }
        OffsetSource::Reference { key } => {
            let Some(boundary) = ctx.refs.get(key) else {
                tracing::warn!(rule, key = %key, "unresolved date ref, skipping check");
                return;
            };
            // The day-granularity switch only applies to literal offsets;
            // ref boundaries always compare at full precision.
            (boundary, false, json!({ "ref": key }))
        }
    };

    let ok = if day_granular {
        compare(compiled.operator, start_of_day(value), start_of_day(boundary))
    } else {
        compare(compiled.operator, value, boundary)
    };

    if !ok {
        tracing::debug!(rule, pointer = ctx.pointer, "date comparison failed");
        ctx.reporter
            .report(ctx.pointer, rule, default_message, Some(args));
    }
}

/// Strict comparison in both directions; equality never passes.
fn compare(operator: Operator, value: Timestamp, boundary: Timestamp) -> bool {
    match operator {
        Operator::Gt => value > boundary,
        Operator::Lt => value < boundary,
    }
}

/// Displace a timestamp by a signed interval.
///
/// Years, quarters and months are calendar-aware (month-length clamping,
/// leap years); weeks and smaller are fixed-duration shifts. `None` when
/// the result falls outside chrono's representable range.
fn shift(base: Timestamp, interval: i64, unit: DurationUnit) -> Option<Timestamp> {
    match unit {
        DurationUnit::Years => shift_months(base, interval.checked_mul(12)?),
        DurationUnit::Quarters => shift_months(base, interval.checked_mul(3)?),
        DurationUnit::Months => shift_months(base, interval),
        DurationUnit::Weeks => shift_days(base, interval.checked_mul(7)?),
        DurationUnit::Days => shift_days(base, interval),
        DurationUnit::Hours => base.checked_add_signed(TimeDelta::try_hours(interval)?),
        DurationUnit::Minutes => base.checked_add_signed(TimeDelta::try_minutes(interval)?),
        DurationUnit::Seconds => base.checked_add_signed(TimeDelta::try_seconds(interval)?),
    }
}

fn shift_months(base: Timestamp, months: i64) -> Option<Timestamp> {
    let magnitude = u32::try_from(months.unsigned_abs()).ok()?;
    if months >= 0 {
        base.checked_add_months(Months::new(magnitude))
    } else {
        base.checked_sub_months(Months::new(magnitude))
    }
}

fn shift_days(base: Timestamp, days: i64) -> Option<Timestamp> {
    let magnitude = days.unsigned_abs();
    if days >= 0 {
        base.checked_add_days(Days::new(magnitude))
    } else {
        base.checked_sub_days(Days::new(magnitude))
    }
}

/// Truncate to midnight UTC for day-resolution comparisons.
fn start_of_day(value: Timestamp) -> Timestamp {
    value.date_naive().and_time(NaiveTime::MIN).and_utc()
}
