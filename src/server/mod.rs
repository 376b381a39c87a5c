//! JSON API: thin CRUD handlers in front of the provider.

use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::get,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

mod auth;
mod error;
mod handlers;

pub use auth::AdminUser;
pub use error::ApiError;
pub use handlers::{Mutation, validated_payload};

use crate::config::Config;
use crate::content::normalize::TimestampPolicy;
use crate::error::AppError;
use crate::provider::ProviderClient;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<ProviderClient>,
    pub policy: TimestampPolicy,
}

impl AppState {
    pub fn new(provider: ProviderClient, policy: TimestampPolicy) -> Self {
        Self {
            provider: Arc::new(provider),
            policy,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/{resource}",
            get(handlers::list).post(handlers::create),
        )
        .route(
            "/api/{resource}/{id}",
            axum::routing::put(handlers::update).delete(handlers::delete),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serves the API on an already bound listener until `shutdown` resolves.
pub async fn serve_on(
    listener: TcpListener,
    state: AppState,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<(), AppError> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AppError::server_error(format!("Server stopped unexpectedly: {e}")))
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(config: &Config, bind_override: Option<&str>) -> Result<(), AppError> {
    let mut config = config.clone();
    if let Some(bind) = bind_override {
        config.bind_address = bind.to_string();
    }
    let addr = config.validate_for_server()?;
    let provider = ProviderClient::from_config(&config)?;
    let state = AppState::new(provider, config.timestamp_policy());

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::server_error(format!("Failed to bind {addr}: {e}")))?;
    info!("API server listening on {addr}");

    serve_on(listener, state, shutdown_signal()).await?;
    info!("API server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
