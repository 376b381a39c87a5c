//! Best-effort repair of raw provider rows before validation.
//!
//! Date fields arrive as RFC 3339, provider-native `YYYY-MM-DD HH:MM:SS+00`,
//! bare dates, epoch milliseconds, or not at all. Everything parseable is
//! rewritten to one canonical ISO-8601 form so that validation failures point
//! at real data problems instead of formatting noise.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use crate::content::schema::Schema;

/// A date-typed field and what happens when it is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateField {
    pub name: &'static str,
    /// Missing values become the request time under
    /// [`TimestampPolicy::DefaultToNow`].
    pub default_now: bool,
}

impl DateField {
    /// Record-keeping timestamp, defaulted when missing.
    pub const fn timestamp(name: &'static str) -> Self {
        Self {
            name,
            default_now: true,
        }
    }

    /// Date that is canonicalized when present but never invented.
    pub const fn date(name: &'static str) -> Self {
        Self {
            name,
            default_now: false,
        }
    }
}

/// How missing timestamps are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampPolicy {
    /// Substitute the request time and log a warning.
    #[default]
    DefaultToNow,
    /// Leave the field missing so validation rejects the record.
    Strict,
}

/// Canonical ISO-8601 form, e.g. `2024-01-15T18:30:00.000Z`.
pub fn to_iso8601(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses any date representation the provider is known to emit.
pub fn parse_provider_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_datetime_str(s.trim()),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    }
}

fn parse_datetime_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // Postgres text output: `2024-01-15 18:30:00+00` or with `+03:00`.
    for format in ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        _ => false,
    }
}

/// Timestamp fields of `T` that are missing from `raw` and would be
/// defaulted to the request time.
pub fn defaultable_missing_fields<T: Schema>(raw: &Value) -> Vec<&'static str> {
    T::DATE_FIELDS
        .iter()
        .filter(|field| field.default_now && is_missing(raw.get(field.name)))
        .map(|field| field.name)
        .collect()
}

/// Normalizes one raw record for entity `T`. Non-object input is returned
/// unchanged and left for validation to reject.
pub fn normalize_record<T: Schema>(
    mut raw: Value,
    now: DateTime<Utc>,
    policy: TimestampPolicy,
) -> Value {
    let Some(object) = raw.as_object_mut() else {
        return raw;
    };

    for field in T::DATE_FIELDS {
        let current = object.get(field.name);

        if is_missing(current) {
            if field.default_now && policy == TimestampPolicy::DefaultToNow {
                warn!(
                    entity = T::ENTITY,
                    field = field.name,
                    "Missing timestamp defaulted to request time"
                );
                object.insert(field.name.to_string(), Value::String(to_iso8601(&now)));
            } else if current.is_some() {
                // Empty strings and nulls both mean "absent" from here on.
                object.insert(field.name.to_string(), Value::Null);
            }
            continue;
        }

        if let Some(value) = current {
            match parse_provider_datetime(value) {
                Some(parsed) => {
                    object.insert(field.name.to_string(), Value::String(to_iso8601(&parsed)));
                }
                None => debug!(
                    entity = T::ENTITY,
                    field = field.name,
                    "Unparseable date left for validation"
                ),
            }
        }
    }

    raw
}

pub fn normalize_records<T: Schema>(
    raws: Vec<Value>,
    now: DateTime<Utc>,
    policy: TimestampPolicy,
) -> Vec<Value> {
    raws.into_iter()
        .map(|raw| normalize_record::<T>(raw, now, policy))
        .collect()
}
