//! One endpoint per entity per verb.
//!
//! Every mutation is normalized and validated against the entity's schema
//! before anything reaches the provider; only the validated record (unknown
//! fields dropped) is forwarded.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{AdminUser, ApiError, AppState};
use crate::content::models::{Author, League, Match, Player, Season, Team, TopScorer, User};
use crate::content::normalize::{TimestampPolicy, defaultable_missing_fields, normalize_record};
use crate::content::resource::Resource;
use crate::content::schema::Schema;
use crate::provider::Query;

type Rows = (StatusCode, Json<Vec<Value>>);

fn resource_from_path(raw: &str) -> Result<Resource, ApiError> {
    raw.parse::<Resource>()
        .ok()
        .filter(|resource| resource.path() == raw)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown resource '{raw}'")))
}

fn parse_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// What a validated payload is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    /// Timestamps absent from the body are validated as defaulted but not
    /// forwarded, so the stored values survive.
    Update,
}

fn prepare<T: Schema>(
    raw: Value,
    mutation: Mutation,
    now: DateTime<Utc>,
    policy: TimestampPolicy,
) -> Result<Value, ApiError> {
    let untouched = match mutation {
        Mutation::Create => Vec::new(),
        Mutation::Update => defaultable_missing_fields::<T>(&raw),
    };
    let normalized = normalize_record::<T>(raw, now, policy);
    let record = T::validate_raw(&normalized)?;
    let mut payload = serde_json::to_value(&record)
        .map_err(|e| ApiError::BadRequest(format!("Unserializable {}: {e}", T::ENTITY)))?;
    if let Some(object) = payload.as_object_mut() {
        for field in untouched {
            object.remove(field);
        }
    }
    Ok(payload)
}

/// Normalizes and validates a request body against the resource's schema.
pub fn validated_payload(
    resource: Resource,
    raw: Value,
    mutation: Mutation,
    now: DateTime<Utc>,
    policy: TimestampPolicy,
) -> Result<Value, ApiError> {
    match resource {
        Resource::Leagues => prepare::<League>(raw, mutation, now, policy),
        Resource::Matches => prepare::<Match>(raw, mutation, now, policy),
        Resource::Teams => prepare::<Team>(raw, mutation, now, policy),
        Resource::Players => prepare::<Player>(raw, mutation, now, policy),
        Resource::TopScorers => prepare::<TopScorer>(raw, mutation, now, policy),
        Resource::Seasons => prepare::<Season>(raw, mutation, now, policy),
        Resource::Users => prepare::<User>(raw, mutation, now, policy),
        Resource::Authors => prepare::<Author>(raw, mutation, now, policy),
    }
}

/// Row ids are UUIDs; anything else never reaches the provider.
fn parse_row_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("Invalid id '{raw}'")))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[instrument(skip(state, headers))]
pub async fn list(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    headers: HeaderMap,
) -> Result<Rows, ApiError> {
    let resource = resource_from_path(&resource)?;
    if resource.admin_only_read() {
        AdminUser::authorize(&state, &headers).await?;
    }

    let rows = state
        .provider
        .select(resource.table(), &Query::for_resource(resource))
        .await
        .map_err(|e| ApiError::provider(format!("fetch {}", resource.path()), e))?;
    debug!("Returning {} {} rows", rows.len(), resource.entity());
    Ok((StatusCode::OK, Json(rows)))
}

#[instrument(skip(state, admin, body), fields(admin = %admin.0.id))]
pub async fn create(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    admin: AdminUser,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Rows, ApiError> {
    let resource = resource_from_path(&resource)?;
    if !resource.accepts_create() {
        return Err(ApiError::MethodNotAllowed(format!(
            "{} cannot be created through this API",
            resource.path()
        )));
    }

    let payload = validated_payload(
        resource,
        parse_body(body)?,
        Mutation::Create,
        Utc::now(),
        state.policy,
    )?;
    let rows = state
        .provider
        .insert(resource.table(), &payload)
        .await
        .map_err(|e| ApiError::provider(format!("create {}", resource.entity()), e))?;
    info!("Created {}", resource.entity());
    Ok((StatusCode::CREATED, Json(rows)))
}

#[instrument(skip(state, admin, body), fields(admin = %admin.0.id))]
pub async fn update(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
    admin: AdminUser,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Rows, ApiError> {
    let resource = resource_from_path(&resource)?;
    let id = parse_row_id(&id)?.to_string();
    let mut raw = parse_body(body)?;
    // The path names the row; a body id can't redirect the update.
    if let Some(object) = raw.as_object_mut() {
        object.insert("id".to_string(), Value::String(id.clone()));
    }

    let payload = validated_payload(resource, raw, Mutation::Update, Utc::now(), state.policy)?;
    let rows = state
        .provider
        .update(resource.table(), &id, &payload)
        .await
        .map_err(|e| ApiError::provider(format!("update {}", resource.entity()), e))?;
    if rows.is_empty() {
        return Err(ApiError::NotFound(format!("No {} with id {id}", resource.entity())));
    }
    info!("Updated {} {id}", resource.entity());
    Ok((StatusCode::OK, Json(rows)))
}

#[instrument(skip(state, admin), fields(admin = %admin.0.id))]
pub async fn delete(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
    admin: AdminUser,
) -> Result<Rows, ApiError> {
    let resource = resource_from_path(&resource)?;
    let id = parse_row_id(&id)?.to_string();
    let rows = state
        .provider
        .delete(resource.table(), &id)
        .await
        .map_err(|e| ApiError::provider(format!("delete {}", resource.entity()), e))?;
    if rows.is_empty() {
        return Err(ApiError::NotFound(format!("No {} with id {id}", resource.entity())));
    }
    info!("Deleted {} {id}", resource.entity());
    Ok((StatusCode::OK, Json(rows)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::{raw_match, raw_team, raw_user};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_resource_from_path_is_exact() {
        assert_eq!(resource_from_path("top-scorers").unwrap(), Resource::TopScorers);
        assert!(matches!(resource_from_path("top_scorers"), Err(ApiError::NotFound(_))));
        assert!(matches!(resource_from_path("Teams"), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_payload_drops_unknown_fields() {
        let mut raw = raw_team("st-george", "premier");
        raw["sponsor"] = json!("ACME");
        let payload =
            validated_payload(Resource::Teams, raw, Mutation::Create, now(), TimestampPolicy::DefaultToNow)
                .unwrap();
        assert!(payload.get("sponsor").is_none());
        assert_eq!(payload["created_at"], "2024-01-15T18:30:00.000Z");
    }

    #[test]
    fn test_payload_defaults_missing_match_date() {
        let mut raw = raw_match("a", "b", "premier");
        raw["date"] = Value::Null;
        let payload =
            validated_payload(Resource::Matches, raw, Mutation::Create, now(), TimestampPolicy::DefaultToNow)
                .unwrap();
        assert_eq!(payload["date"], "2024-03-10T12:00:00.000Z");
    }

    #[test]
    fn test_payload_reports_violations() {
        let raw = json!({ "home_team_id": "a" });
        let error =
            validated_payload(Resource::Matches, raw, Mutation::Create, now(), TimestampPolicy::DefaultToNow)
                .unwrap_err();
        let ApiError::Validation(e) = error else {
            panic!("expected validation error");
        };
        assert_eq!(e.fields(), vec!["away_team_id", "league_slug"]);
    }

    #[test]
    fn test_user_payload_keeps_id() {
        let raw = raw_user("6f1c2a0e-6d8f-4a51-9a0b-5f4a3c2b1d00", "admin");
        let payload =
            validated_payload(Resource::Users, raw, Mutation::Create, now(), TimestampPolicy::DefaultToNow)
                .unwrap();
        assert_eq!(payload["id"], "6f1c2a0e-6d8f-4a51-9a0b-5f4a3c2b1d00");
        assert_eq!(payload["role"], "admin");
    }

    #[test]
    fn test_update_payload_omits_absent_timestamps() {
        let mut raw = raw_team("st-george", "premier");
        raw.as_object_mut().unwrap().remove("created_at");
        let payload =
            validated_payload(Resource::Teams, raw, Mutation::Update, now(), TimestampPolicy::DefaultToNow)
                .unwrap();
        assert!(payload.get("created_at").is_none());
        assert_eq!(payload["slug"], "st-george");
    }

    #[test]
    fn test_update_payload_keeps_supplied_timestamps() {
        let raw = raw_team("st-george", "premier");
        let payload =
            validated_payload(Resource::Teams, raw, Mutation::Update, now(), TimestampPolicy::DefaultToNow)
                .unwrap();
        assert_eq!(payload["created_at"], "2024-01-15T18:30:00.000Z");
    }

    #[test]
    fn test_row_id_must_be_uuid() {
        assert!(parse_row_id("00000000-0000-4000-8000-000000000001").is_ok());
        assert!(matches!(parse_row_id("12"), Err(ApiError::BadRequest(_))));
    }

}
