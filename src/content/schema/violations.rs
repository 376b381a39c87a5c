//! Violation types shared by every entity schema.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Which constraint a field broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    Missing,
    TypeMismatch,
    OutOfRange,
    Length,
    InvalidUrl,
    InvalidUuid,
    InvalidDatetime,
    InvalidEmail,
    InvalidSlug,
    UnknownVariant,
    InvalidFormat,
}

impl ViolationKind {
    /// Maps a `validator` error code to a violation kind.
    pub fn from_code(code: &str) -> Self {
        match code {
            "length" => ViolationKind::Length,
            "range" => ViolationKind::OutOfRange,
            "url" => ViolationKind::InvalidUrl,
            "email" => ViolationKind::InvalidEmail,
            "slug" => ViolationKind::InvalidSlug,
            _ => ViolationKind::InvalidFormat,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub field: String,
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }

    /// Same violation, reported under an element of a batch.
    pub fn at_index(mut self, index: usize) -> Self {
        self.field = if self.field == "$" {
            format!("[{index}]")
        } else {
            format!("[{index}].{}", self.field)
        };
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A record (or batch of records) that failed its schema.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("{entity} failed validation: {}", summary(.violations))]
pub struct ValidationError {
    pub entity: &'static str,
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new(entity: &'static str, violations: Vec<Violation>) -> Self {
        Self { entity, violations }
    }

    /// Field paths that failed, in report order.
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn summary(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_index_prefixes_field() {
        let violation = Violation::new("slug", ViolationKind::Missing, "Required").at_index(3);
        assert_eq!(violation.field, "[3].slug");

        let root = Violation::new("$", ViolationKind::TypeMismatch, "Expected object").at_index(0);
        assert_eq!(root.field, "[0]");
    }

    #[test]
    fn test_display_lists_every_violation() {
        let error = ValidationError::new(
            "team",
            vec![
                Violation::new("slug", ViolationKind::Missing, "Required"),
                Violation::new("name_en", ViolationKind::Length, "Must be at least 1 characters"),
            ],
        );
        assert_eq!(
            error.to_string(),
            "team failed validation: slug: Required; name_en: Must be at least 1 characters"
        );
        assert_eq!(error.fields(), vec!["slug", "name_en"]);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_value(Violation::new(
            "date",
            ViolationKind::InvalidDatetime,
            "Invalid datetime",
        ))
        .unwrap();
        assert_eq!(json["kind"], "invalid_datetime");
    }

    #[test]
    fn test_kind_from_validator_code() {
        assert_eq!(ViolationKind::from_code("length"), ViolationKind::Length);
        assert_eq!(ViolationKind::from_code("range"), ViolationKind::OutOfRange);
        assert_eq!(ViolationKind::from_code("url"), ViolationKind::InvalidUrl);
        assert_eq!(ViolationKind::from_code("slug"), ViolationKind::InvalidSlug);
        assert_eq!(ViolationKind::from_code("time_of_day"), ViolationKind::InvalidFormat);
    }
}
