use reqwest::Client;
use serde_json::Value;
use std::future::Future;
use tracing::{debug, info, instrument, warn};

use super::fetch_utils::{parse_json_array, send_for_body};
use super::http_client::create_http_client_with_timeout;
use super::urls::build_collection_url;
use crate::config::Config;
use crate::constants::RESPONSE_CACHE_CAPACITY;
use crate::content::cache::ResponseCache;
use crate::content::resource::Resource;
use crate::error::AppError;

/// Where raw collection records come from.
///
/// Sources are passed into [`ContentApi`](super::ContentApi) explicitly so the
/// pipeline can run against an in-memory source in tests.
pub trait RecordSource: Send + Sync {
    /// Every raw record of a collection, in provider order.
    fn fetch_records(
        &self,
        resource: Resource,
    ) -> impl Future<Output = Result<Vec<Value>, AppError>> + Send;
}

/// Reads collections from the service's own `/api/{resource}` endpoints.
#[derive(Debug)]
pub struct HttpSource {
    client: Client,
    api_base_url: String,
    bearer_token: Option<String>,
    cache: Option<ResponseCache>,
}

impl HttpSource {
    pub fn new(client: Client, api_base_url: impl Into<String>) -> Self {
        Self {
            client,
            api_base_url: api_base_url.into(),
            bearer_token: None,
            cache: None,
        }
    }

    /// Sends `token` as a bearer token on every request. Admin-only
    /// collections such as users need it.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Reuses successful responses for each resource's revalidate window.
    pub fn with_response_cache(mut self, capacity: usize) -> Self {
        self.cache = Some(ResponseCache::new(capacity));
        self
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        let mut source = Self::new(client, config.api_base_url.clone());
        if let Some(token) = &config.api_token {
            source = source.with_bearer_token(token.clone());
        }
        Ok(if config.response_cache {
            source.with_response_cache(RESPONSE_CACHE_CAPACITY)
        } else {
            source
        })
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn response_cache(&self) -> Option<&ResponseCache> {
        self.cache.as_ref()
    }
}

impl RecordSource for HttpSource {
    #[instrument(skip(self), fields(resource = %resource))]
    async fn fetch_records(&self, resource: Resource) -> Result<Vec<Value>, AppError> {
        let url = build_collection_url(&self.api_base_url, resource);

        if let Some(cache) = &self.cache
            && let Some(body) = cache.get(&url).await
        {
            match parse_json_array(&body, &url) {
                Ok(records) => {
                    debug!("Using cached response for URL: {url}");
                    return Ok(records);
                }
                Err(e) => warn!("Discarding unreadable cached response for {url}: {e}"),
            }
        }

        info!("Fetching data from URL: {url}");
        let mut request = self.client.get(&url);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }
        let body = send_for_body(request, &url).await?;
        let records = parse_json_array(&body, &url)?;

        if let Some(cache) = &self.cache {
            cache.put(url, body, resource.revalidate()).await;
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::api::http_client::create_test_http_client;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_bearer_token_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .and(header("authorization", "Bearer admin-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let source =
            HttpSource::new(create_test_http_client(), server.uri()).with_bearer_token("admin-token");
        assert!(source.fetch_records(Resource::Users).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_from_config_uses_api_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/authors"))
            .and(header("authorization", "Bearer configured"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let config = Config {
            api_base_url: server.uri(),
            api_token: Some("configured".to_string()),
            response_cache: false,
            ..Config::default()
        };
        let source = HttpSource::from_config(&config).unwrap();
        assert!(source.response_cache().is_none());
        source.fetch_records(Resource::Authors).await.unwrap();
    }

    #[tokio::test]
    async fn test_no_authorization_header_without_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/teams"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let source = HttpSource::new(create_test_http_client(), server.uri());
        source.fetch_records(Resource::Teams).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(!requests[0].headers.contains_key("authorization"));
    }
}
