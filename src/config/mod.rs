use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_BIND_ADDRESS, env_vars};
use crate::content::normalize::TimestampPolicy;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::{validate_base_url, validate_bind_address, validate_log_file_path};

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the content API the data-access layer reads from.
    pub api_base_url: String,
    /// Base URL of the hosted data/auth/storage provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_url: Option<String>,
    /// Service key sent to the provider on every request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_key: Option<String>,
    /// Admin access token sent by the data-access layer; needed to list users.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    /// Socket address the JSON API listens on.
    pub bind_address: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for outbound requests.
    pub http_timeout_seconds: u64,
    /// Reject records with missing timestamps instead of defaulting them to
    /// the request time.
    pub strict_timestamps: bool,
    /// Reuse collection responses for each resource's revalidate window.
    pub response_cache: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            provider_url: None,
            provider_key: None,
            api_token: None,
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            log_file_path: None,
            http_timeout_seconds: crate::constants::DEFAULT_HTTP_TIMEOUT_SECONDS,
            strict_timestamps: false,
            response_cache: true,
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location, falling
    /// back to defaults when no file exists. Environment variables override
    /// file values.
    ///
    /// # Environment Variables
    /// - `ETHIO_API_BASE_URL` - Override the content API base URL
    /// - `ETHIO_PROVIDER_URL` - Override the provider URL
    /// - `ETHIO_PROVIDER_KEY` - Override the provider service key
    /// - `ETHIO_API_TOKEN` - Override the admin token sent to the content API
    /// - `ETHIO_BIND_ADDRESS` - Override the server bind address
    /// - `ETHIO_LOG_FILE` - Override log file path
    /// - `ETHIO_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    pub async fn load() -> Result<Self, AppError> {
        Self::load_with_env(&get_config_path()).await
    }

    /// Like [`Config::load`], but reads the file at `path`.
    pub async fn load_with_env(path: &str) -> Result<Self, AppError> {
        let mut config = if Path::new(path).exists() {
            Self::load_from_path(path).await?
        } else {
            Config::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Reads the file at `path` without applying environment overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        if let Some(api_base_url) = var(env_vars::API_BASE_URL) {
            self.api_base_url = api_base_url;
        }
        if let Some(provider_url) = var(env_vars::PROVIDER_URL) {
            self.provider_url = Some(provider_url);
        }
        if let Some(provider_key) = var(env_vars::PROVIDER_KEY) {
            self.provider_key = Some(provider_key);
        }
        if let Some(api_token) = var(env_vars::API_TOKEN) {
            self.api_token = Some(api_token);
        }
        if let Some(bind_address) = var(env_vars::BIND_ADDRESS) {
            self.bind_address = bind_address;
        }
        if let Some(log_file_path) = var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }
        if let Some(timeout) = var(env_vars::HTTP_TIMEOUT).and_then(|s| s.parse::<u64>().ok()) {
            self.http_timeout_seconds = timeout;
        }
    }

    /// Validates the settings every command needs.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_base_url("API base URL", &self.api_base_url)?;
        if let Some(provider_url) = &self.provider_url {
            validate_base_url("Provider URL", provider_url)?;
        }
        if self.http_timeout_seconds == 0 {
            return Err(AppError::config_error("HTTP timeout must be at least 1 second"));
        }
        validate_log_file_path(&self.log_file_path)
    }

    /// Validates what `serve` needs on top of [`Config::validate`]: a bind
    /// address and full provider credentials.
    pub fn validate_for_server(&self) -> Result<SocketAddr, AppError> {
        self.validate()?;
        if self.provider_url.is_none() {
            return Err(AppError::config_error(format!(
                "Provider URL is not set (config file or {})",
                env_vars::PROVIDER_URL
            )));
        }
        if self.provider_key.as_deref().is_none_or(str::is_empty) {
            return Err(AppError::config_error(format!(
                "Provider key is not set (config file or {})",
                env_vars::PROVIDER_KEY
            )));
        }
        validate_bind_address(&self.bind_address)
    }

    pub fn timestamp_policy(&self) -> TimestampPolicy {
        if self.strict_timestamps {
            TimestampPolicy::Strict
        } else {
            TimestampPolicy::DefaultToNow
        }
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Writes the configuration as TOML, creating the parent directory when
    /// needed. Trailing slashes on URLs are dropped.
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }

        let mut stored = self.clone();
        stored.api_base_url = stored.api_base_url.trim_end_matches('/').to_string();
        stored.provider_url = stored
            .provider_url
            .map(|url| url.trim_end_matches('/').to_string());

        let content = toml::to_string_pretty(&stored)?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout. The provider key
    /// is never printed.
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();

        if !Path::new(&config_path).exists() {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
            println!("(Using defaults and environment overrides)");
        }

        let config = Config::load().await?;
        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        println!("{config_path}");
        println!("────────────────────────────────────");
        println!("API Base URL:");
        println!("{}", config.api_base_url);
        println!("────────────────────────────────────");
        println!("Provider URL:");
        println!("{}", config.provider_url.as_deref().unwrap_or("(not set)"));
        println!("Provider Key:");
        println!(
            "{}",
            if config.provider_key.is_some() { "(set)" } else { "(not set)" }
        );
        println!("API Token:");
        println!(
            "{}",
            if config.api_token.is_some() { "(set)" } else { "(not set)" }
        );
        println!("────────────────────────────────────");
        println!("Bind Address:");
        println!("{}", config.bind_address);
        println!("HTTP Timeout:");
        println!("{} seconds", config.http_timeout_seconds);
        println!("Strict Timestamps:");
        println!("{}", config.strict_timestamps);
        println!("Response Cache:");
        println!("{}", config.response_cache);
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &config.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{log_dir}/ethio_football.log");
            println!("(Default location)");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    const ALL_ENV_VARS: [&str; 7] = [
        env_vars::API_BASE_URL,
        env_vars::PROVIDER_URL,
        env_vars::PROVIDER_KEY,
        env_vars::API_TOKEN,
        env_vars::BIND_ADDRESS,
        env_vars::LOG_FILE,
        env_vars::HTTP_TIMEOUT,
    ];

    fn clear_env() {
        for name in ALL_ENV_VARS {
            unsafe { std::env::remove_var(name) };
        }
    }

    fn server_config() -> Config {
        Config {
            provider_url: Some("https://abc.provider.example".to_string()),
            provider_key: Some("service-key".to_string()),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_config_load_existing_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let config_content = r#"
api_base_url = "https://ethiofootball.example"
provider_url = "https://abc.provider.example"
log_file_path = "/custom/log/path"
strict_timestamps = true
"#;
        tokio::fs::write(&config_path, config_content)
            .await
            .unwrap();

        let config = Config::load_from_path(&config_path_str).await.unwrap();

        assert_eq!(config.api_base_url, "https://ethiofootball.example");
        assert_eq!(
            config.provider_url.as_deref(),
            Some("https://abc.provider.example")
        );
        assert_eq!(config.log_file_path, Some("/custom/log/path".to_string()));
        assert!(config.strict_timestamps);
        assert_eq!(config.timestamp_policy(), TimestampPolicy::Strict);
        // Unset fields fall back to defaults
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert!(config.response_cache);
    }

    #[tokio::test]
    async fn test_config_save_and_load_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let original_config = Config {
            api_base_url: "https://ethiofootball.example/".to_string(),
            log_file_path: Some("/custom/log/path".to_string()),
            ..server_config()
        };
        original_config
            .save_to_path(&config_path_str)
            .await
            .unwrap();
        assert!(config_path.exists());

        let loaded_config = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(loaded_config.api_base_url, "https://ethiofootball.example");
        assert_eq!(loaded_config.provider_key.as_deref(), Some("service-key"));
        assert_eq!(original_config.log_file_path, loaded_config.log_file_path);
    }

    #[test]
    fn test_unset_options_are_not_serialized() {
        let toml_string = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(toml_string.contains("api_base_url = \"http://127.0.0.1:8080\""));
        assert!(!toml_string.contains("provider_key"));
        assert!(!toml_string.contains("api_token"));
        assert!(!toml_string.contains("log_file_path"));
    }

    #[tokio::test]
    async fn test_config_malformed_toml_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("malformed_config.toml");
        let config_path_str = config_path.to_string_lossy();

        let malformed_content = r#"
api_base_url = "https://ethiofootball.example"
[invalid_section
"#;
        tokio::fs::write(&config_path, malformed_content)
            .await
            .unwrap();

        let result = Config::load_from_path(&config_path_str).await;
        assert!(matches!(result.unwrap_err(), AppError::TomlDeserialize(_)));
    }

    #[tokio::test]
    async fn test_config_load_from_nonexistent_path() {
        let result = Config::load_from_path("/nonexistent/path/config.toml").await;
        assert!(matches!(result.unwrap_err(), AppError::Io(_)));
    }

    #[tokio::test]
    #[serial]
    async fn test_missing_file_uses_defaults() {
        clear_env();
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("absent.toml");
        let config = Config::load_with_env(&config_path.to_string_lossy())
            .await
            .unwrap();
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    #[serial]
    async fn test_env_overrides_file() {
        clear_env();
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "api_base_url = \"https://file.example\"\n")
            .await
            .unwrap();

        unsafe {
            std::env::set_var(env_vars::API_BASE_URL, "https://env.example");
            std::env::set_var(env_vars::PROVIDER_KEY, "env-key");
            std::env::set_var(env_vars::API_TOKEN, "admin-token");
            std::env::set_var(env_vars::HTTP_TIMEOUT, "5");
        }
        let config = Config::load_with_env(&config_path.to_string_lossy())
            .await
            .unwrap();
        clear_env();

        assert_eq!(config.api_base_url, "https://env.example");
        assert_eq!(config.provider_key.as_deref(), Some("env-key"));
        assert_eq!(config.api_token.as_deref(), Some("admin-token"));
        assert_eq!(config.http_timeout_seconds, 5);
    }

    #[tokio::test]
    #[serial]
    async fn test_invalid_env_timeout_is_ignored() {
        clear_env();
        unsafe { std::env::set_var(env_vars::HTTP_TIMEOUT, "soon") };
        let mut config = Config::default();
        config.apply_env_overrides();
        clear_env();
        assert_eq!(
            config.http_timeout_seconds,
            crate::constants::DEFAULT_HTTP_TIMEOUT_SECONDS
        );
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let config = Config {
            api_base_url: "ethiofootball.example".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        let config = Config {
            provider_url: Some("ftp://provider".to_string()),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_for_server_requires_provider() {
        assert!(Config::default().validate_for_server().is_err());

        let missing_key = Config {
            provider_key: None,
            ..server_config()
        };
        let error = missing_key.validate_for_server().unwrap_err();
        assert!(error.to_string().contains("Provider key"));

        let addr = server_config().validate_for_server().unwrap();
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_get_config_path() {
        let config_path = Config::get_config_path();
        assert!(config_path.contains("ethio_football"));
        assert!(config_path.ends_with("config.toml"));
    }

    #[test]
    fn test_get_log_dir_path() {
        let log_dir_path = Config::get_log_dir_path();
        assert!(log_dir_path.contains("ethio_football"));
        assert!(log_dir_path.ends_with("logs"));
    }
}
