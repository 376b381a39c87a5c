use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::query::Query;
use crate::config::Config;
use crate::constants::provider::{AUTH_USER_PATH, REST_PATH, STORAGE_PUBLIC_PATH, USERS_TABLE};
use crate::content::api::{
    create_http_client_with_timeout, parse_json_array, read_success_body, request_error,
};
use crate::content::models::UserRole;
use crate::content::schema::SchemaEnum;
use crate::error::AppError;

/// The principal behind a bearer token, as reported by the auth API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// Client for the hosted data/auth/storage provider.
///
/// Built once from configuration and shared; every request carries the
/// service key as both `apikey` and bearer token.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl ProviderClient {
    pub fn new(http: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let base_url = config
            .provider_url
            .clone()
            .ok_or_else(|| AppError::config_error("Provider URL is not set"))?;
        let api_key = config
            .provider_key
            .clone()
            .ok_or_else(|| AppError::config_error("Provider key is not set"))?;
        let http = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Self::new(http, base_url, api_key))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/{REST_PATH}/{table}", self.base_url)
    }

    fn authorized(&self, request: RequestBuilder, bearer: &str) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(bearer)
    }

    fn rest(&self, request: RequestBuilder) -> RequestBuilder {
        self.authorized(request, &self.api_key)
            .header("Prefer", "return=representation")
    }

    async fn rows(&self, request: RequestBuilder, url: &str) -> Result<Vec<Value>, AppError> {
        let response = request.send().await.map_err(|e| request_error(e, url))?;
        let body = read_success_body(response, url).await?;
        parse_json_array(&body, url)
    }

    #[instrument(skip(self, query))]
    pub async fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>, AppError> {
        let url = self.rest_url(table);
        debug!("Selecting from {table} with {:?}", query.to_pairs());
        let request = self.rest(self.http.get(&url)).query(&query.to_pairs());
        self.rows(request, &url).await
    }

    #[instrument(skip(self, record))]
    pub async fn insert(&self, table: &str, record: &Value) -> Result<Vec<Value>, AppError> {
        let url = self.rest_url(table);
        let request = self.rest(self.http.post(&url)).json(record);
        let rows = self.rows(request, &url).await?;
        info!("Inserted {} row(s) into {table}", rows.len());
        Ok(rows)
    }

    /// Updates the row with `id`. An empty result means no row matched.
    #[instrument(skip(self, record))]
    pub async fn update(&self, table: &str, id: &str, record: &Value) -> Result<Vec<Value>, AppError> {
        let url = self.rest_url(table);
        let request = self
            .rest(self.http.patch(&url))
            .query(&Query::new().eq("id", id).to_pairs())
            .json(record);
        let rows = self.rows(request, &url).await?;
        info!("Updated {} row(s) in {table}", rows.len());
        Ok(rows)
    }

    /// Deletes the row with `id`, returning the deleted rows.
    #[instrument(skip(self))]
    pub async fn delete(&self, table: &str, id: &str) -> Result<Vec<Value>, AppError> {
        let url = self.rest_url(table);
        let request = self
            .rest(self.http.delete(&url))
            .query(&Query::new().eq("id", id).to_pairs());
        let rows = self.rows(request, &url).await?;
        info!("Deleted {} row(s) from {table}", rows.len());
        Ok(rows)
    }

    /// Resolves a user access token to its principal.
    #[instrument(skip(self, token))]
    pub async fn user_for_token(&self, token: &str) -> Result<AuthUser, AppError> {
        let url = format!("{}/{AUTH_USER_PATH}", self.base_url);
        let response = self
            .authorized(self.http.get(&url), token)
            .send()
            .await
            .map_err(|e| request_error(e, &url))?;
        let body = read_success_body(response, &url).await?;
        serde_json::from_str::<AuthUser>(&body)
            .map_err(|e| AppError::api_unexpected_structure(e.to_string(), &url))
    }

    /// The role stored on the user's profile row. Users without a profile
    /// row are plain users.
    #[instrument(skip(self))]
    pub async fn admin_role(&self, user_id: Uuid) -> Result<UserRole, AppError> {
        let query = Query::new()
            .select("role")
            .eq("id", user_id.to_string())
            .limit(1);
        let rows = self.select(USERS_TABLE, &query).await?;
        let role = rows
            .first()
            .and_then(|row| row.get("role"))
            .and_then(Value::as_str)
            .and_then(UserRole::parse)
            .unwrap_or_default();
        debug!("User {user_id} has role {}", role.as_str());
        Ok(role)
    }

    /// Public URL of an object in a storage bucket.
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/{STORAGE_PUBLIC_PATH}/{bucket}/{}",
            self.base_url,
            path.trim_start_matches('/')
        )
    }
}
