//! Client configuration loaded from environment variables.
//!
//! Everything has a default, so a bare environment talks to the production
//! backend with a session file in the working directory.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Production API endpoint used when `AKHMADS_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "https://api.akhmads.net/api/v1";

const DEFAULT_SESSION_FILE: &str = ".akhmads/session.json";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REFRESH_TIMEOUT_SECS: u64 = 15;

/// Client configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL every resource path is joined onto (no trailing slash)
    pub api_url: String,
    /// Where the credential pair is persisted between runs
    pub session_file: PathBuf,
    /// Per-request timeout for ordinary API calls
    pub http_timeout: Duration,
    /// Upper bound on a single session refresh attempt
    pub refresh_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            refresh_timeout: Duration::from_secs(DEFAULT_REFRESH_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_url = match env::var("AKHMADS_API_URL") {
            Ok(v) if !v.trim().is_empty() => normalize_api_url(&v)?,
            _ => DEFAULT_API_URL.to_string(),
        };

        Ok(Self {
            api_url,
            session_file: env::var("AKHMADS_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE)),
            http_timeout: secs_var("AKHMADS_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?,
            refresh_timeout: secs_var(
                "AKHMADS_REFRESH_TIMEOUT_SECS",
                DEFAULT_REFRESH_TIMEOUT_SECS,
            )?,
        })
    }

    /// Replace the API base URL, validated like `AKHMADS_API_URL`.
    pub fn with_api_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.api_url = normalize_api_url(raw)?;
        Ok(self)
    }

    /// Config pointing at a local test backend.
    pub fn for_base_url(api_url: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}

fn normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let url = reqwest::Url::parse(trimmed)
        .map_err(|e| ConfigError::Invalid("AKHMADS_API_URL", e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid(
            "AKHMADS_API_URL",
            format!("unsupported scheme {}", url.scheme()),
        ));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

fn secs_var(name: &'static str, default: u64) -> Result<Duration, ConfigError> {
    match env::var(name) {
        Ok(v) => {
            let secs: u64 = v
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(name, format!("not a number: {}", v)))?;
            if secs == 0 {
                return Err(ConfigError::Invalid(name, "must be positive".to_string()));
            }
            Ok(Duration::from_secs(secs))
        }
        Err(_) => Ok(Duration::from_secs(default)),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_api_url_strips_trailing_slash() {
        let url = normalize_api_url("http://localhost:3000/api/v1/").unwrap();
        assert_eq!(url, "http://localhost:3000/api/v1");
    }

    #[test]
    fn test_normalize_api_url_rejects_garbage() {
        assert!(normalize_api_url("not a url").is_err());
        assert!(normalize_api_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_with_api_url_validates_override() {
        let config = Config::default()
            .with_api_url(" https://staging.akhmads.net/api/v1/ ")
            .unwrap();
        assert_eq!(config.api_url, "https://staging.akhmads.net/api/v1");

        assert!(Config::default().with_api_url("ftp://akhmads.net").is_err());
        assert!(Config::default().with_api_url("api.akhmads.net").is_err());
    }

    #[test]
    fn test_config_from_env() {
        // Single test touches the process env to avoid races between tests
        env::set_var("AKHMADS_API_URL", "http://127.0.0.1:4000/api/v1/");
        env::set_var("AKHMADS_HTTP_TIMEOUT_SECS", "5");
        env::remove_var("AKHMADS_REFRESH_TIMEOUT_SECS");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.api_url, "http://127.0.0.1:4000/api/v1");
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(
            config.refresh_timeout,
            Duration::from_secs(DEFAULT_REFRESH_TIMEOUT_SECS)
        );

        env::set_var("AKHMADS_HTTP_TIMEOUT_SECS", "0");
        assert!(Config::from_env().is_err());

        env::remove_var("AKHMADS_API_URL");
        env::remove_var("AKHMADS_HTTP_TIMEOUT_SECS");
        assert_eq!(Config::from_env().unwrap().api_url, DEFAULT_API_URL);
    }
}
