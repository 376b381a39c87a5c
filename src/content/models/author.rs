use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use super::common::iso8601;
use crate::content::normalize::DateField;
use crate::content::resource::Resource;
use crate::content::schema::{FieldReader, Schema};

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct Author {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub bio_en: Option<String>,
    #[validate(length(max = 2000))]
    pub bio_am: Option<String>,
    #[validate(url)]
    pub avatar_url: Option<String>,
    #[serde(serialize_with = "iso8601::serialize")]
    pub created_at: DateTime<Utc>,
}

impl Schema for Author {
    const ENTITY: &'static str = "author";
    const RESOURCE: Resource = Resource::Authors;
    const DATE_FIELDS: &'static [DateField] = &[DateField::timestamp("created_at")];

    fn read(reader: &mut FieldReader<'_>) -> Self {
        Self {
            id: reader.opt_uuid("id"),
            name: reader.string("name"),
            bio_en: reader.opt_string("bio_en"),
            bio_am: reader.opt_string("bio_am"),
            avatar_url: reader.opt_string("avatar_url"),
            created_at: reader.datetime("created_at"),
        }
    }
}
