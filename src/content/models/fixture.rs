use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use super::common::{LeagueScoped, iso8601, serialize_variant};
use crate::content::normalize::DateField;
use crate::content::resource::Resource;
use crate::content::schema::rules::validate_time_of_day;
use crate::content::schema::{FieldReader, Schema, SchemaEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Live,
    Finished,
    Postponed,
}

impl SchemaEnum for MatchStatus {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("scheduled", MatchStatus::Scheduled),
        ("live", MatchStatus::Live),
        ("finished", MatchStatus::Finished),
        ("postponed", MatchStatus::Postponed),
    ];
}

/// A fixture between two teams. Team references are whatever identifier the
/// provider row carries; the league is referenced by slug.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct Match {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 64))]
    pub home_team_id: String,
    #[validate(length(min = 1, max = 64))]
    pub away_team_id: String,
    #[validate(length(min = 1, max = 64))]
    pub league_slug: String,
    #[validate(length(min = 1, max = 64))]
    pub venue_id: Option<String>,
    #[serde(serialize_with = "iso8601::serialize")]
    pub date: DateTime<Utc>,
    #[validate(custom(function = "validate_time_of_day"))]
    pub time: Option<String>,
    #[serde(serialize_with = "serialize_variant")]
    pub status: MatchStatus,
    #[validate(range(max = 99))]
    pub home_score: Option<u32>,
    #[validate(range(max = 99))]
    pub away_score: Option<u32>,
}

impl Schema for Match {
    const ENTITY: &'static str = "match";
    const RESOURCE: Resource = Resource::Matches;
    const DATE_FIELDS: &'static [DateField] = &[DateField::timestamp("date")];

    fn read(reader: &mut FieldReader<'_>) -> Self {
        Self {
            id: reader.opt_uuid("id"),
            home_team_id: reader.string("home_team_id"),
            away_team_id: reader.string("away_team_id"),
            league_slug: reader.string("league_slug"),
            venue_id: reader.opt_string("venue_id"),
            date: reader.datetime("date"),
            time: reader.opt_string("time"),
            status: reader.variant_or("status", MatchStatus::default()),
            home_score: reader.opt_u32("home_score"),
            away_score: reader.opt_u32("away_score"),
        }
    }
}

impl LeagueScoped for Match {
    fn league_slug(&self) -> &str {
        &self.league_slug
    }
}
