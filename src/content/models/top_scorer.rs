use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use super::common::LeagueScoped;
use crate::content::normalize::DateField;
use crate::content::resource::Resource;
use crate::content::schema::{FieldReader, Schema};

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct TopScorer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 64))]
    pub player_id: String,
    #[validate(length(min = 1, max = 64))]
    pub league_slug: String,
    #[validate(range(max = 500))]
    pub goals: u32,
    /// Season label such as `2024/25`.
    #[validate(length(min = 1, max = 32))]
    pub season: String,
}

impl Schema for TopScorer {
    const ENTITY: &'static str = "top scorer";
    const RESOURCE: Resource = Resource::TopScorers;
    const DATE_FIELDS: &'static [DateField] = &[];

    fn read(reader: &mut FieldReader<'_>) -> Self {
        Self {
            id: reader.opt_uuid("id"),
            player_id: reader.string("player_id"),
            league_slug: reader.string("league_slug"),
            goals: reader.u32("goals"),
            season: reader.string("season"),
        }
    }
}

impl LeagueScoped for TopScorer {
    fn league_slug(&self) -> &str {
        &self.league_slug
    }
}
