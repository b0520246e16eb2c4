//! Configuration loading.
//!
//! Everything is read from environment variables once at startup. A `.env`
//! file in the working directory is honoured for variables not already set.

use std::time::Duration;

use chrono::{FixedOffset, Local};

use crate::errors::{AppError, AppResult};
use crate::utils::timestamp::{TimestampFormat, DEFAULT_PATTERN};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_RELOAD_DELAY_MS: u64 = 500;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Console configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Service name used in logs and health output.
    pub service_name: String,
    /// Listen address.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Base URL of the upstream messages API, without trailing slash.
    pub api_endpoint: String,
    /// Wait between a successful save and the follow-up list reload.
    pub reload_delay: Duration,
    /// Timeout applied to every upstream request.
    pub request_timeout: Duration,
    /// How message timestamps are displayed.
    pub timestamp_format: TimestampFormat,
}

impl AppConfig {
    /// Loads configuration for `service` from the process environment.
    ///
    /// # Errors
    /// Returns `AppError::Config` when `API_ENDPOINT` is missing or any
    /// variable holds an unparseable value.
    pub fn load_with_service(service: &str) -> AppResult<Self> {
        Self::from_source(service, |key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    pub fn from_source<F>(service: &str, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_endpoint = lookup("API_ENDPOINT")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::Config("API_ENDPOINT must be set".to_string()))?;
        if !(api_endpoint.starts_with("http://") || api_endpoint.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "API_ENDPOINT must be an http(s) URL, got {}",
                api_endpoint
            )));
        }

        let offset = match lookup("DISPLAY_UTC_OFFSET_MINUTES") {
            Some(raw) => {
                let minutes: i32 = parse_var("DISPLAY_UTC_OFFSET_MINUTES", &raw)?;
                minutes
                    .checked_mul(60)
                    .and_then(FixedOffset::east_opt)
                    .ok_or_else(|| {
                        AppError::Config(format!("DISPLAY_UTC_OFFSET_MINUTES out of range: {}", raw))
                    })?
            }
            None => *Local::now().offset(),
        };
        let pattern = lookup("DISPLAY_TIME_FORMAT").unwrap_or_else(|| DEFAULT_PATTERN.to_string());
        let timestamp_format = TimestampFormat::new(pattern, offset).map_err(AppError::Config)?;

        Ok(Self {
            service_name: service.to_string(),
            host: lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: optional_var(&lookup, "SERVER_PORT")?.unwrap_or(DEFAULT_PORT),
            api_endpoint,
            reload_delay: Duration::from_millis(
                optional_var(&lookup, "RELOAD_DELAY_MS")?.unwrap_or(DEFAULT_RELOAD_DELAY_MS),
            ),
            request_timeout: Duration::from_secs(
                optional_var(&lookup, "REQUEST_TIMEOUT_SECS")?
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
            timestamp_format,
        })
    }

    /// Socket address string to bind.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn optional_var<F, T>(lookup: &F, key: &str) -> AppResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key).map(|raw| parse_var(key, &raw)).transpose()
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> AppResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Config(format!("{} has invalid value: {}", key, raw)))
}

/// Load .env file from the working directory (best-effort, no error if missing).
pub fn load_dotenv() {
    let env_path = std::path::Path::new(".env");
    let Ok(content) = std::fs::read_to_string(env_path) else {
        return;
    };
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_matches('"');
            // Only set if not already set by the environment
            if std::env::var(key).is_err() {
                std::env::set_var(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> AppResult<AppConfig> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_source("web-console", |key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[
            ("API_ENDPOINT", "http://10.0.0.5:3000/"),
            ("DISPLAY_UTC_OFFSET_MINUTES", "0"),
        ])
        .unwrap();

        assert_eq!(config.api_endpoint, "http://10.0.0.5:3000");
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.reload_delay, Duration::from_millis(500));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_endpoint_is_error() {
        assert!(matches!(load(&[]), Err(AppError::Config(_))));
        assert!(matches!(load(&[("API_ENDPOINT", "  ")]), Err(AppError::Config(_))));
    }

    #[test]
    fn test_non_http_endpoint_is_error() {
        assert!(matches!(
            load(&[("API_ENDPOINT", "API_PUBLIC_IP:3000")]),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("API_ENDPOINT", "https://api.example.com"),
            ("SERVER_PORT", "9000"),
            ("RELOAD_DELAY_MS", "0"),
            ("REQUEST_TIMEOUT_SECS", "5"),
            ("DISPLAY_UTC_OFFSET_MINUTES", "-300"),
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.reload_delay, Duration::ZERO);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.listen_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_bad_numbers_are_errors() {
        assert!(load(&[("API_ENDPOINT", "http://a"), ("SERVER_PORT", "eighty")]).is_err());
        assert!(load(&[("API_ENDPOINT", "http://a"), ("DISPLAY_UTC_OFFSET_MINUTES", "99999")]).is_err());
        assert!(load(&[("API_ENDPOINT", "http://a"), ("DISPLAY_TIME_FORMAT", "%Y-%")]).is_err());
    }
}
