use crate::error::AppError;
use std::net::SocketAddr;
use std::path::Path;

/// Checks that a configured base URL is an absolute http(s) URL.
pub fn validate_base_url(name: &str, url: &str) -> Result<(), AppError> {
    if url.trim().is_empty() {
        return Err(AppError::config_error(format!("{name} cannot be empty")));
    }
    let Some(rest) = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
    else {
        return Err(AppError::config_error(format!(
            "{name} must start with http:// or https:// (got '{url}')"
        )));
    };
    if rest.trim_matches('/').is_empty() {
        return Err(AppError::config_error(format!("{name} has no host (got '{url}')")));
    }
    Ok(())
}

/// Validates a custom log file path, creating its parent directory if needed.
pub fn validate_log_file_path(log_file_path: &Option<String>) -> Result<(), AppError> {
    let Some(log_path) = log_file_path else {
        return Ok(());
    };
    if log_path.is_empty() {
        return Err(AppError::config_error("Log file path cannot be empty"));
    }

    if let Some(parent) = Path::new(log_path).parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::config_error(format!(
                "Cannot create log directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }
    Ok(())
}

pub fn validate_bind_address(bind_address: &str) -> Result<SocketAddr, AppError> {
    bind_address.parse::<SocketAddr>().map_err(|e| {
        AppError::config_error(format!("Invalid bind address '{bind_address}': {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_base_url_rules() {
        assert!(validate_base_url("API base URL", "https://ethiofootball.example").is_ok());
        assert!(validate_base_url("API base URL", "http://127.0.0.1:8080").is_ok());
        assert!(validate_base_url("API base URL", "").is_err());
        assert!(validate_base_url("API base URL", "ethiofootball.example").is_err());
        assert!(validate_base_url("API base URL", "https://").is_err());
    }

    #[test]
    fn test_log_path_parent_is_created() {
        let temp_dir = tempdir().unwrap();
        let log_path = temp_dir.path().join("nested").join("app.log");
        validate_log_file_path(&Some(log_path.to_string_lossy().to_string())).unwrap();
        assert!(temp_dir.path().join("nested").exists());
    }

    #[test]
    fn test_empty_log_path_rejected() {
        assert!(validate_log_file_path(&Some(String::new())).is_err());
        assert!(validate_log_file_path(&None).is_ok());
    }

    #[test]
    fn test_bind_address() {
        assert!(validate_bind_address("0.0.0.0:3000").is_ok());
        assert!(validate_bind_address("localhost").is_err());
    }
}
