//! Validation of values written through `config set`.

use crate::error::ConfigError;

/// Validate that a base URL is absolute http(s)
pub fn validate_url(url: &str) -> Result<(), ConfigError> {
    if url.is_empty() {
        return Err(invalid("base_url", url, "URL cannot be empty"));
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(invalid(
            "base_url",
            url,
            "URL must start with http:// or https://",
        ));
    }

    if let Err(e) = reqwest::Url::parse(url) {
        return Err(invalid("base_url", url, &e.to_string()));
    }

    Ok(())
}

/// Parse a timeout in milliseconds; zero would time out every call
pub fn validate_timeout(value: &str) -> Result<u64, ConfigError> {
    match value.parse::<u64>() {
        Ok(0) => Err(invalid("timeout_ms", value, "timeout must be positive")),
        Ok(ms) => Ok(ms),
        Err(e) => Err(invalid("timeout_ms", value, &e.to_string())),
    }
}

fn invalid(field: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
