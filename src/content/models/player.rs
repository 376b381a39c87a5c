use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use super::common::{iso8601, serialize_variant};
use crate::content::normalize::DateField;
use crate::content::resource::Resource;
use crate::content::schema::{FieldReader, Schema, SchemaEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerPosition {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl SchemaEnum for PlayerPosition {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("goalkeeper", PlayerPosition::Goalkeeper),
        ("defender", PlayerPosition::Defender),
        ("midfielder", PlayerPosition::Midfielder),
        ("forward", PlayerPosition::Forward),
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct Player {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 120))]
    pub name_en: String,
    #[validate(length(max = 120))]
    pub name_am: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub team_slug: String,
    #[serde(serialize_with = "iso8601::option::serialize")]
    pub date_of_birth: Option<DateTime<Utc>>,
    #[serde(serialize_with = "serialize_variant")]
    pub position: PlayerPosition,
    #[validate(range(min = 1, max = 99))]
    pub jersey_number: Option<u32>,
    #[serde(serialize_with = "iso8601::serialize")]
    pub created_at: DateTime<Utc>,
}

impl Schema for Player {
    const ENTITY: &'static str = "player";
    const RESOURCE: Resource = Resource::Players;
    const DATE_FIELDS: &'static [DateField] = &[
        DateField::date("date_of_birth"),
        DateField::timestamp("created_at"),
    ];

    fn read(reader: &mut FieldReader<'_>) -> Self {
        Self {
            id: reader.opt_uuid("id"),
            name_en: reader.string("name_en"),
            name_am: reader.opt_string("name_am"),
            team_slug: reader.string("team_slug"),
            date_of_birth: reader.opt_datetime("date_of_birth"),
            position: reader.variant("position"),
            jersey_number: reader.opt_u32("jersey_number"),
            created_at: reader.datetime("created_at"),
        }
    }
}
