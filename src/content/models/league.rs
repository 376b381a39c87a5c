use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use super::common::{iso8601, serialize_variant};
use crate::content::normalize::DateField;
use crate::content::resource::Resource;
use crate::content::schema::rules::validate_slug;
use crate::content::schema::{FieldReader, Schema, SchemaEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeagueCategory {
    #[default]
    League,
    Cup,
}

impl SchemaEnum for LeagueCategory {
    const VARIANTS: &'static [(&'static str, Self)] =
        &[("league", LeagueCategory::League), ("cup", LeagueCategory::Cup)];
}

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct League {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 120))]
    pub name_en: String,
    #[validate(length(max = 120))]
    pub name_am: Option<String>,
    #[validate(custom(function = "validate_slug"))]
    pub slug: String,
    #[serde(serialize_with = "serialize_variant")]
    pub category: LeagueCategory,
    #[validate(url)]
    pub logo_url: Option<String>,
    #[serde(serialize_with = "iso8601::serialize")]
    pub created_at: DateTime<Utc>,
}

impl Schema for League {
    const ENTITY: &'static str = "league";
    const RESOURCE: Resource = Resource::Leagues;
    const DATE_FIELDS: &'static [DateField] = &[DateField::timestamp("created_at")];

    fn read(reader: &mut FieldReader<'_>) -> Self {
        Self {
            id: reader.opt_uuid("id"),
            name_en: reader.string("name_en"),
            name_am: reader.opt_string("name_am"),
            slug: reader.string("slug"),
            category: reader.variant_or("category", LeagueCategory::default()),
            logo_url: reader.opt_string("logo_url"),
            created_at: reader.datetime("created_at"),
        }
    }
}
