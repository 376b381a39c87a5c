use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use super::common::iso8601;
use crate::content::normalize::DateField;
use crate::content::resource::Resource;
use crate::content::schema::rules::validate_slug;
use crate::content::schema::{FieldReader, Schema, ViolationKind};

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct Season {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[validate(custom(function = "validate_slug"))]
    pub slug: String,
    #[serde(serialize_with = "iso8601::serialize")]
    pub start_date: DateTime<Utc>,
    #[serde(serialize_with = "iso8601::serialize")]
    pub end_date: DateTime<Utc>,
    pub is_current: bool,
    pub is_archived: bool,
    #[serde(serialize_with = "iso8601::serialize")]
    pub created_at: DateTime<Utc>,
}

impl Schema for Season {
    const ENTITY: &'static str = "season";
    const RESOURCE: Resource = Resource::Seasons;
    const DATE_FIELDS: &'static [DateField] = &[
        DateField::date("start_date"),
        DateField::date("end_date"),
        DateField::timestamp("created_at"),
    ];

    fn read(reader: &mut FieldReader<'_>) -> Self {
        let start_date = reader.required_datetime("start_date");
        let end_date = reader.required_datetime("end_date");

        if let (Some(start), Some(end)) = (start_date, end_date)
            && end < start
        {
            reader.violate(
                "end_date",
                ViolationKind::OutOfRange,
                "End date must not be before start date",
            );
        }

        Self {
            id: reader.opt_uuid("id"),
            name: reader.string("name"),
            slug: reader.string("slug"),
            start_date: start_date.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
            end_date: end_date.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
            is_current: reader.bool_or("is_current", false),
            is_archived: reader.bool_or("is_archived", false),
            created_at: reader.datetime("created_at"),
        }
    }
}

impl Season {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start_date <= at && at <= self.end_date
    }
}
