//! Application-wide constants and configuration values
//!
//! This module centralizes the magic numbers shared by the data-access layer,
//! the provider client and the server.

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of idle connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 100;

/// Number of URLs the per-source response cache keeps
pub const RESPONSE_CACHE_CAPACITY: usize = 100;

/// Address the JSON API binds to when nothing else is configured
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

/// Same-origin API base used by the data-access layer
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080";

/// Maximum number of characters of a response body kept in debug logs
pub const RESPONSE_PREVIEW_CHARS: usize = 1024;

/// How long a successful collection response may be served again, in seconds
pub mod revalidate {
    /// Match lists change on match days
    pub const VOLATILE_SECONDS: u64 = 60;

    /// Leagues, teams, players, top scorers, seasons and authors
    pub const STATIC_SECONDS: u64 = 300;
}

/// Hosted provider endpoints, relative to the provider base URL
pub mod provider {
    pub const REST_PATH: &str = "rest/v1";
    pub const AUTH_USER_PATH: &str = "auth/v1/user";
    pub const STORAGE_PUBLIC_PATH: &str = "storage/v1/object/public";

    /// Table holding user profiles and their role
    pub const USERS_TABLE: &str = "users";
}

/// Environment variable names
pub mod env_vars {
    /// Override for the same-origin API base URL
    pub const API_BASE_URL: &str = "ETHIO_API_BASE_URL";

    /// Override for the hosted provider URL
    pub const PROVIDER_URL: &str = "ETHIO_PROVIDER_URL";

    /// Override for the provider service key
    pub const PROVIDER_KEY: &str = "ETHIO_PROVIDER_KEY";

    /// Admin access token the data-access layer sends to the content API
    pub const API_TOKEN: &str = "ETHIO_API_TOKEN";

    /// Override for the server bind address
    pub const BIND_ADDRESS: &str = "ETHIO_BIND_ADDRESS";

    /// Override for the log file path
    pub const LOG_FILE: &str = "ETHIO_LOG_FILE";

    /// Override for the HTTP timeout in seconds
    pub const HTTP_TIMEOUT: &str = "ETHIO_HTTP_TIMEOUT";
}
