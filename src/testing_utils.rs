//! Test utilities: raw provider-shaped records and an in-memory record source.
//!
//! The builders emit rows the way the provider returns them, including
//! provider-native timestamps, so tests exercise normalization as well as
//! validation.

use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::content::api::RecordSource;
use crate::content::resource::Resource;
use crate::error::AppError;

const CREATED_AT: &str = "2024-01-15 18:30:00+00";

pub fn raw_league(slug: &str) -> Value {
    json!({
        "id": "5b0c7d5e-3f7e-4a53-9a4b-0f3c2b1d9e10",
        "name_en": format!("League {slug}"),
        "slug": slug,
        "category": if slug.contains("cup") { "cup" } else { "league" },
        "created_at": CREATED_AT
    })
}

pub fn raw_team(slug: &str, league_slug: &str) -> Value {
    json!({
        "name_en": format!("Team {slug}"),
        "slug": slug,
        "league_slug": league_slug,
        "logo_url": format!("https://cdn.example.com/teams/{slug}.png"),
        "created_at": CREATED_AT
    })
}

pub fn raw_match(home_team_id: &str, away_team_id: &str, league_slug: &str) -> Value {
    json!({
        "home_team_id": home_team_id,
        "away_team_id": away_team_id,
        "league_slug": league_slug,
        "venue_id": "addis-ababa-stadium",
        "date": "2024-03-10 12:00:00+00",
        "time": "15:00",
        "status": "scheduled"
    })
}

pub fn raw_player(name_en: &str, team_slug: &str) -> Value {
    json!({
        "name_en": name_en,
        "team_slug": team_slug,
        "position": "midfielder",
        "jersey_number": 8,
        "date_of_birth": "1998-04-02",
        "created_at": CREATED_AT
    })
}

pub fn raw_top_scorer(player_id: &str, league_slug: &str, goals: u32) -> Value {
    json!({
        "player_id": player_id,
        "league_slug": league_slug,
        "goals": goals,
        "season": "2024/25"
    })
}

pub fn raw_season(slug: &str, is_current: bool) -> Value {
    json!({
        "name": slug.replace('-', "/"),
        "slug": slug,
        "start_date": "2023-09-01",
        "end_date": "2024-06-30",
        "is_current": is_current,
        "created_at": CREATED_AT
    })
}

pub fn raw_user(id: &str, role: &str) -> Value {
    json!({
        "id": id,
        "email": "editor@example.et",
        "role": role,
        "created_at": CREATED_AT,
        "updated_at": CREATED_AT,
        "last_sign_in_at": null
    })
}

pub fn raw_author(name: &str) -> Value {
    json!({
        "name": name,
        "bio_en": "Football writer based in Addis Ababa.",
        "created_at": CREATED_AT
    })
}

/// A [`RecordSource`] backed by fixed collections.
///
/// Resources with no records configured return an empty collection.
#[derive(Debug, Default)]
pub struct InMemorySource {
    records: HashMap<Resource, Vec<Value>>,
    failures: HashMap<Resource, u16>,
    fetched: Mutex<Vec<Resource>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, resource: Resource, records: Vec<Value>) -> Self {
        self.records.insert(resource, records);
        self
    }

    /// Makes every fetch of `resource` fail with the given HTTP status.
    pub fn failing(mut self, resource: Resource, status: u16) -> Self {
        self.failures.insert(resource, status);
        self
    }

    /// Resources fetched so far, in call order.
    pub fn fetched(&self) -> Vec<Resource> {
        self.fetched
            .lock()
            .map(|fetched| fetched.clone())
            .unwrap_or_default()
    }
}

impl RecordSource for InMemorySource {
    async fn fetch_records(&self, resource: Resource) -> Result<Vec<Value>, AppError> {
        if let Ok(mut fetched) = self.fetched.lock() {
            fetched.push(resource);
        }
        let url = format!("memory:///api/{}", resource.path());
        if let Some(status) = self.failures.get(&resource) {
            return Err(AppError::from_status(*status, "Injected failure", url));
        }
        Ok(self.records.get(&resource).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::models::{Author, League, Match, Player, Season, Team, TopScorer, User};
    use crate::content::normalize::{TimestampPolicy, normalize_record};
    use crate::content::schema::Schema;
    use chrono::Utc;

    fn accepts<T: Schema>(raw: Value) {
        let normalized = normalize_record::<T>(raw, Utc::now(), TimestampPolicy::Strict);
        if let Err(e) = T::validate_raw(&normalized) {
            panic!("{} builder produced an invalid record: {e}", T::ENTITY);
        }
    }

    #[test]
    fn test_builders_produce_valid_records() {
        accepts::<League>(raw_league("premier-league"));
        accepts::<Team>(raw_team("st-george", "premier"));
        accepts::<Match>(raw_match("st-george", "fasil-kenema", "premier"));
        accepts::<Player>(raw_player("Abel Yalew", "st-george"));
        accepts::<TopScorer>(raw_top_scorer("abel-yalew", "premier", 12));
        accepts::<Season>(raw_season("2023-24", true));
        accepts::<User>(raw_user("6f1c2a0e-6d8f-4a51-9a0b-5f4a3c2b1d00", "admin"));
        accepts::<Author>(raw_author("Omna Tadele"));
    }

    #[tokio::test]
    async fn test_in_memory_source_records_and_failures() {
        let source = InMemorySource::new()
            .with(Resource::Teams, vec![raw_team("a", "premier")])
            .failing(Resource::Players, 500);

        assert_eq!(source.fetch_records(Resource::Teams).await.unwrap().len(), 1);
        assert!(source.fetch_records(Resource::Authors).await.unwrap().is_empty());
        let error = source.fetch_records(Resource::Players).await.unwrap_err();
        assert_eq!(error.status(), Some(500));
        assert_eq!(
            source.fetched(),
            vec![Resource::Teams, Resource::Authors, Resource::Players]
        );
    }
}
