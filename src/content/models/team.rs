use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use super::common::{LeagueScoped, iso8601};
use crate::content::normalize::DateField;
use crate::content::resource::Resource;
use crate::content::schema::rules::validate_slug;
use crate::content::schema::{FieldReader, Schema};

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct Team {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 120))]
    pub name_en: String,
    #[validate(length(max = 120))]
    pub name_am: Option<String>,
    #[validate(custom(function = "validate_slug"))]
    pub slug: String,
    /// May hold a historical alias; resolved through the league slug table.
    #[validate(length(min = 1, max = 64))]
    pub league_slug: String,
    #[validate(url)]
    pub logo_url: Option<String>,
    #[serde(serialize_with = "iso8601::serialize")]
    pub created_at: DateTime<Utc>,
}

impl Schema for Team {
    const ENTITY: &'static str = "team";
    const RESOURCE: Resource = Resource::Teams;
    const DATE_FIELDS: &'static [DateField] = &[DateField::timestamp("created_at")];

    fn read(reader: &mut FieldReader<'_>) -> Self {
        Self {
            id: reader.opt_uuid("id"),
            name_en: reader.string("name_en"),
            name_am: reader.opt_string("name_am"),
            slug: reader.string("slug"),
            league_slug: reader.string("league_slug"),
            logo_url: reader.opt_string("logo_url"),
            created_at: reader.datetime("created_at"),
        }
    }
}

impl LeagueScoped for Team {
    fn league_slug(&self) -> &str {
        &self.league_slug
    }
}
