//! Per-entity structural contracts.
//!
//! Every entity implements [`Schema`]: a raw JSON value goes in, and either a
//! typed record comes out or a [`ValidationError`] listing every field that
//! broke a rule. Unknown fields are dropped. Batches are all-or-nothing.

mod reader;
pub mod rules;
mod violations;

pub use reader::{FieldReader, SchemaEnum};
pub use violations::{ValidationError, Violation, ViolationKind};

use serde::Serialize;
use serde_json::Value;
use validator::Validate;

use crate::content::normalize::DateField;
use crate::content::resource::Resource;

pub trait Schema: Validate + Serialize + Sized {
    /// Singular entity name used in reports and logs.
    const ENTITY: &'static str;
    const RESOURCE: Resource;
    /// Date-typed fields the normalizer canonicalizes.
    const DATE_FIELDS: &'static [DateField];

    /// Reads every field. Cross-field rules report through the reader too.
    fn read(reader: &mut FieldReader<'_>) -> Self;

    fn validate_raw(raw: &Value) -> Result<Self, ValidationError> {
        let mut reader = FieldReader::new(raw);
        let record = Self::read(&mut reader);
        reader.finish(Self::ENTITY, record)
    }
}

/// Validates a whole batch. Any failing element fails the batch, and the
/// error carries every element's violations under `[index].field` paths.
pub fn validate_all<T: Schema>(raws: &[Value]) -> Result<Vec<T>, ValidationError> {
    let mut records = Vec::with_capacity(raws.len());
    let mut violations = Vec::new();

    for (index, raw) in raws.iter().enumerate() {
        match T::validate_raw(raw) {
            Ok(record) => records.push(record),
            Err(err) => violations.extend(err.violations.into_iter().map(|v| v.at_index(index))),
        }
    }

    if violations.is_empty() {
        Ok(records)
    } else {
        Err(ValidationError::new(T::ENTITY, violations))
    }
}
