//! Structural field reader.
//!
//! Reads typed values out of a raw JSON object one field at a time and keeps
//! going after a failure, so a single pass reports every structural problem.
//! Value constraints are left to the entity's `validator` rules, which run in
//! [`FieldReader::finish`].

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::HashSet;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use super::violations::{ValidationError, Violation, ViolationKind};

/// Closed set of string values accepted for an enumerated field.
pub trait SchemaEnum: Copy + 'static {
    /// Wire names paired with their values. The first entry is the
    /// placeholder used while a record is being rejected.
    const VARIANTS: &'static [(&'static str, Self)];

    fn as_str(&self) -> &'static str {
        Self::VARIANTS
            .iter()
            .find(|(_, v)| std::mem::discriminant(v) == std::mem::discriminant(self))
            .map(|(name, _)| *name)
            .unwrap_or("")
    }

    fn parse(raw: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .find(|(name, _)| *name == raw)
            .map(|(_, v)| *v)
    }
}

pub struct FieldReader<'a> {
    object: Option<&'a Map<String, Value>>,
    violations: Vec<Violation>,
}

impl<'a> FieldReader<'a> {
    pub fn new(raw: &'a Value) -> Self {
        match raw.as_object() {
            Some(object) => Self {
                object: Some(object),
                violations: Vec::new(),
            },
            None => Self {
                object: None,
                violations: vec![Violation::new(
                    "$",
                    ViolationKind::TypeMismatch,
                    format!("Expected object, received {}", type_name(raw)),
                )],
            },
        }
    }

    /// The field's value, treating `null` the same as absent.
    fn present(&self, field: &str) -> Option<&'a Value> {
        self.object
            .and_then(|object| object.get(field))
            .filter(|value| !value.is_null())
    }

    fn missing(&mut self, field: &str) {
        // A non-object root already failed; don't bury that under every field.
        if self.object.is_some() {
            self.violate(field, ViolationKind::Missing, "Required");
        }
    }

    fn mismatch(&mut self, field: &str, expected: &str, value: &Value) {
        self.violate(
            field,
            ViolationKind::TypeMismatch,
            format!("Expected {expected}, received {}", type_name(value)),
        );
    }

    pub fn violate(&mut self, field: &str, kind: ViolationKind, message: impl Into<String>) {
        self.violations.push(Violation::new(field, kind, message));
    }

    pub fn string(&mut self, field: &str) -> String {
        match self.present(field) {
            Some(value) => self.as_string(field, value).unwrap_or_default(),
            None => {
                self.missing(field);
                String::new()
            }
        }
    }

    pub fn opt_string(&mut self, field: &str) -> Option<String> {
        let value = self.present(field)?;
        self.as_string(field, value)
    }

    fn as_string(&mut self, field: &str, value: &Value) -> Option<String> {
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.mismatch(field, "string", value);
                None
            }
        }
    }

    pub fn uuid(&mut self, field: &str) -> Uuid {
        match self.present(field) {
            Some(value) => self.as_uuid(field, value).unwrap_or_else(Uuid::nil),
            None => {
                self.missing(field);
                Uuid::nil()
            }
        }
    }

    pub fn opt_uuid(&mut self, field: &str) -> Option<Uuid> {
        let value = self.present(field)?;
        self.as_uuid(field, value)
    }

    fn as_uuid(&mut self, field: &str, value: &Value) -> Option<Uuid> {
        let raw = self.as_string(field, value)?;
        match Uuid::parse_str(&raw) {
            Ok(id) => Some(id),
            Err(_) => {
                self.violate(field, ViolationKind::InvalidUuid, "Invalid uuid");
                None
            }
        }
    }

    /// Required RFC 3339 datetime. Other formats are the normalizer's job.
    pub fn datetime(&mut self, field: &str) -> DateTime<Utc> {
        self.required_datetime(field)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// Like [`FieldReader::datetime`], but `None` once the field has been
    /// reported, for cross-field checks that must skip failed reads.
    pub fn required_datetime(&mut self, field: &str) -> Option<DateTime<Utc>> {
        match self.present(field) {
            Some(value) => self.as_datetime(field, value),
            None => {
                self.missing(field);
                None
            }
        }
    }

    pub fn opt_datetime(&mut self, field: &str) -> Option<DateTime<Utc>> {
        let value = self.present(field)?;
        self.as_datetime(field, value)
    }

    fn as_datetime(&mut self, field: &str, value: &Value) -> Option<DateTime<Utc>> {
        let raw = self.as_string(field, value)?;
        match DateTime::parse_from_rfc3339(&raw) {
            Ok(parsed) => Some(parsed.with_timezone(&Utc)),
            Err(_) => {
                self.violate(field, ViolationKind::InvalidDatetime, "Invalid datetime");
                None
            }
        }
    }

    pub fn u32(&mut self, field: &str) -> u32 {
        match self.present(field) {
            Some(value) => self.as_u32(field, value).unwrap_or_default(),
            None => {
                self.missing(field);
                0
            }
        }
    }

    pub fn opt_u32(&mut self, field: &str) -> Option<u32> {
        let value = self.present(field)?;
        self.as_u32(field, value)
    }

    fn as_u32(&mut self, field: &str, value: &Value) -> Option<u32> {
        if let Some(n) = value.as_u64() {
            return match u32::try_from(n) {
                Ok(n) => Some(n),
                Err(_) => {
                    self.violate(field, ViolationKind::OutOfRange, "Number is too large");
                    None
                }
            };
        }
        match value.as_i64() {
            Some(_) => self.violate(
                field,
                ViolationKind::OutOfRange,
                "Number must be greater than or equal to 0",
            ),
            None => self.mismatch(field, "integer", value),
        }
        None
    }

    pub fn bool_or(&mut self, field: &str, default: bool) -> bool {
        match self.present(field) {
            Some(Value::Bool(b)) => *b,
            Some(value) => {
                self.mismatch(field, "boolean", value);
                default
            }
            None => default,
        }
    }

    pub fn variant<T: SchemaEnum>(&mut self, field: &str) -> T {
        match self.present(field) {
            Some(value) => self.as_variant(field, value),
            None => {
                self.missing(field);
                T::VARIANTS[0].1
            }
        }
    }

    pub fn variant_or<T: SchemaEnum>(&mut self, field: &str, default: T) -> T {
        match self.present(field) {
            Some(value) => self.as_variant(field, value),
            None => default,
        }
    }

    fn as_variant<T: SchemaEnum>(&mut self, field: &str, value: &Value) -> T {
        let placeholder = T::VARIANTS[0].1;
        let Some(raw) = self.as_string(field, value) else {
            return placeholder;
        };
        match T::parse(&raw) {
            Some(parsed) => parsed,
            None => {
                let allowed: Vec<&str> = T::VARIANTS.iter().map(|(name, _)| *name).collect();
                self.violate(
                    field,
                    ViolationKind::UnknownVariant,
                    format!(
                        "Invalid enum value. Expected {}, received '{raw}'",
                        allowed.join(" | ")
                    ),
                );
                placeholder
            }
        }
    }

    /// Runs the value's constraint rules and returns the record only if no
    /// violation of any kind was found.
    pub fn finish<T: Validate>(mut self, entity: &'static str, value: T) -> Result<T, ValidationError> {
        if self.object.is_some()
            && let Err(errors) = value.validate()
        {
            let reported: HashSet<String> =
                self.violations.iter().map(|v| v.field.clone()).collect();
            self.violations.extend(
                constraint_violations(&errors)
                    .into_iter()
                    .filter(|v| !reported.contains(&v.field)),
            );
        }

        if self.violations.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError::new(entity, self.violations))
        }
    }
}

/// Flattens `validator` output into violations, sorted by field for stable
/// reports.
fn constraint_violations(errors: &ValidationErrors) -> Vec<Violation> {
    let mut violations: Vec<Violation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let kind = ViolationKind::from_code(&err.code);
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| default_message(kind, err));
                Violation::new(field.to_string(), kind, message)
            })
        })
        .collect();
    violations.sort_by(|a, b| a.field.cmp(&b.field));
    violations
}

fn default_message(kind: ViolationKind, err: &validator::ValidationError) -> String {
    let param = |name: &str| err.params.get(name).map(|v| v.to_string());
    match kind {
        ViolationKind::Length => match (param("min"), param("max")) {
            (Some(min), Some(max)) => format!("Length must be between {min} and {max}"),
            (Some(min), None) => format!("Must be at least {min} characters"),
            (None, Some(max)) => format!("Must be at most {max} characters"),
            (None, None) => "Invalid length".to_string(),
        },
        ViolationKind::OutOfRange => match (param("min"), param("max")) {
            (Some(min), Some(max)) => format!("Number must be between {min} and {max}"),
            _ => "Number out of range".to_string(),
        },
        ViolationKind::InvalidUrl => "Invalid url".to_string(),
        ViolationKind::InvalidEmail => "Invalid email".to_string(),
        _ => format!("Invalid value ({})", err.code),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
