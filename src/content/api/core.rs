use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

use super::source::RecordSource;
use crate::content::league_slugs::{accepted_slugs, canonical_slug};
use crate::content::models::{League, LeagueScoped, Player, Season, Team};
use crate::content::normalize::{TimestampPolicy, normalize_records};
use crate::content::schema::{Schema, validate_all};
use crate::error::AppError;

/// Typed, validated access to the content collections.
///
/// Every call fetches from the injected [`RecordSource`], normalizes the raw
/// records, and validates the whole batch. A batch with any invalid record
/// fails with [`AppError::Validation`]; transport failures surface unchanged.
#[derive(Debug)]
pub struct ContentApi<S> {
    source: S,
    policy: TimestampPolicy,
}

impl<S: RecordSource> ContentApi<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            policy: TimestampPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: TimestampPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn policy(&self) -> TimestampPolicy {
        self.policy
    }

    /// The full collection, in provider order.
    pub async fn list<T: Schema>(&self) -> Result<Vec<T>, AppError> {
        self.list_at(Utc::now()).await
    }

    #[instrument(skip(self), fields(entity = T::ENTITY))]
    async fn list_at<T: Schema>(&self, now: DateTime<Utc>) -> Result<Vec<T>, AppError> {
        let raws = self.source.fetch_records(T::RESOURCE).await?;
        let normalized = normalize_records::<T>(raws, now, self.policy);
        let records = validate_all::<T>(&normalized).inspect_err(|e| {
            warn!("Rejected {} batch: {e}", T::ENTITY);
        })?;
        debug!("Validated {} {} records", records.len(), T::ENTITY);
        Ok(records)
    }

    /// Records whose league slug is accepted for `slug`, aliases included.
    #[instrument(skip(self), fields(entity = T::ENTITY, canonical = canonical_slug(slug)))]
    pub async fn by_league_slug<T: Schema + LeagueScoped>(
        &self,
        slug: &str,
    ) -> Result<Vec<T>, AppError> {
        let accepted = accepted_slugs(slug);
        let records = self.list::<T>().await?;
        Ok(records
            .into_iter()
            .filter(|record| accepted.contains(record.league_slug()))
            .collect())
    }

    /// Players whose team belongs to the league.
    ///
    /// Players and teams are fetched concurrently and joined locally on the
    /// team slug. Either fetch failing fails the call.
    #[instrument(skip(self), fields(canonical = canonical_slug(slug)))]
    pub async fn players_by_league(&self, slug: &str) -> Result<Vec<Player>, AppError> {
        let now = Utc::now();
        let (players, teams) =
            tokio::try_join!(self.list_at::<Player>(now), self.list_at::<Team>(now))?;

        let accepted = accepted_slugs(slug);
        let team_slugs: HashSet<&str> = teams
            .iter()
            .filter(|team| accepted.contains(&team.league_slug))
            .map(|team| team.slug.as_str())
            .collect();
        debug!("{} teams in league", team_slugs.len());

        Ok(players
            .into_iter()
            .filter(|player| team_slugs.contains(player.team_slug.as_str()))
            .collect())
    }

    /// The league stored under `slug` or one of its aliases.
    pub async fn find_league(&self, slug: &str) -> Result<Option<League>, AppError> {
        let accepted = accepted_slugs(slug);
        let leagues = self.list::<League>().await?;
        Ok(leagues
            .into_iter()
            .find(|league| accepted.contains(&league.slug)))
    }

    /// The first season flagged current, in provider order.
    pub async fn current_season(&self) -> Result<Option<Season>, AppError> {
        let mut current = self
            .list::<Season>()
            .await?
            .into_iter()
            .filter(|season| season.is_current);
        let first = current.next();
        let others = current.count();
        if others > 0 {
            warn!("{} seasons are flagged current; using the first", others + 1);
        }
        Ok(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::models::{Match, TopScorer};
    use crate::content::resource::Resource;
    use crate::testing_utils::{
        InMemorySource, raw_league, raw_match, raw_player, raw_season, raw_team, raw_top_scorer,
    };
    use serde_json::json;

    #[tokio::test]
    async fn test_list_keeps_provider_order() {
        let source = InMemorySource::new()
            .with(Resource::Teams, vec![raw_team("b", "premier"), raw_team("a", "premier")]);
        let api = ContentApi::new(source);
        let teams = api.list::<Team>().await.unwrap();
        let slugs: Vec<&str> = teams.iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_by_league_slug_includes_aliases() {
        let source = InMemorySource::new().with(
            Resource::Matches,
            vec![
                raw_match("a", "b", "premier-league"),
                raw_match("c", "d", "premier"),
                raw_match("e", "f", "league1"),
            ],
        );
        let api = ContentApi::new(source);
        let matches = api.by_league_slug::<Match>("premier-league").await.unwrap();
        let homes: Vec<&str> = matches.iter().map(|m| m.home_team_id.as_str()).collect();
        assert_eq!(homes, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_by_league_slug_unknown_is_identity() {
        let source = InMemorySource::new().with(
            Resource::TopScorers,
            vec![
                raw_top_scorer("p1", "unknown-slug", 10),
                raw_top_scorer("p2", "unknown", 8),
            ],
        );
        let api = ContentApi::new(source);
        let scorers = api.by_league_slug::<TopScorer>("unknown-slug").await.unwrap();
        assert_eq!(scorers.len(), 1);
        assert_eq!(scorers[0].player_id, "p1");
    }

    #[tokio::test]
    async fn test_players_by_league_crosses_alias() {
        let source = InMemorySource::new()
            .with(
                Resource::Teams,
                vec![raw_team("wolkite-city", "league1"), raw_team("st-george", "premier")],
            )
            .with(
                Resource::Players,
                vec![
                    raw_player("Abel Yalew", "wolkite-city"),
                    raw_player("Getaneh Kebede", "st-george"),
                ],
            );
        let api = ContentApi::new(source);
        let players = api.players_by_league("league-one").await.unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name_en, "Abel Yalew");
    }

    #[tokio::test]
    async fn test_players_by_league_fails_when_teams_fail() {
        let source = InMemorySource::new()
            .with(Resource::Players, vec![raw_player("Abel Yalew", "wolkite-city")])
            .failing(Resource::Teams, 503);
        let api = ContentApi::new(source);
        let error = api.players_by_league("league-one").await.unwrap_err();
        assert!(error.is_transport());
        assert_eq!(error.status(), Some(503));
    }

    #[tokio::test]
    async fn test_invalid_record_fails_whole_batch() {
        let mut bad = raw_team("bad", "premier");
        bad["slug"] = json!("Not A Slug");
        let source =
            InMemorySource::new().with(Resource::Teams, vec![raw_team("good", "premier"), bad]);
        let api = ContentApi::new(source);
        let error = api.list::<Team>().await.unwrap_err();
        assert!(error.is_validation());
        let violations = error.validation().unwrap();
        assert_eq!(violations.fields(), vec!["[1].slug"]);
    }

    #[tokio::test]
    async fn test_strict_policy_rejects_missing_timestamp() {
        let mut fixture = raw_match("a", "b", "premier");
        fixture["date"] = json!(null);
        let source = InMemorySource::new().with(Resource::Matches, vec![fixture.clone()]);

        let lenient = ContentApi::new(source);
        assert_eq!(lenient.list::<Match>().await.unwrap().len(), 1);

        let source = InMemorySource::new().with(Resource::Matches, vec![fixture]);
        let strict = ContentApi::new(source).with_policy(TimestampPolicy::Strict);
        let error = strict.list::<Match>().await.unwrap_err();
        assert_eq!(error.validation().unwrap().fields(), vec!["[0].date"]);
    }

    #[tokio::test]
    async fn test_find_league_through_alias() {
        let source = InMemorySource::new().with(
            Resource::Leagues,
            vec![raw_league("premier"), raw_league("ethiopian-cup")],
        );
        let api = ContentApi::new(source);
        let league = api.find_league("premier-league").await.unwrap().unwrap();
        assert_eq!(league.slug, "premier");
        assert!(api.find_league("higher-league").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_current_season_picks_first_flagged() {
        let source = InMemorySource::new().with(
            Resource::Seasons,
            vec![
                raw_season("2022-23", false),
                raw_season("2023-24", true),
                raw_season("2024-25", true),
            ],
        );
        let api = ContentApi::new(source);
        let season = api.current_season().await.unwrap().unwrap();
        assert_eq!(season.slug, "2023-24");
    }

    #[tokio::test]
    async fn test_current_season_none() {
        let source =
            InMemorySource::new().with(Resource::Seasons, vec![raw_season("2022-23", false)]);
        let api = ContentApi::new(source);
        assert!(api.current_season().await.unwrap().is_none());
    }
}
