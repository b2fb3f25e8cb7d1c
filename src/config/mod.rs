//! Configuration module for the TSAK backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::collections::HashMap;
use std::env;
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::Locale;

/// Invalid configuration value.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Path to Tantivy search index directory
    pub index_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub log_format: LogFormat,
    /// Locale used when a request does not name one
    pub default_locale: Locale,
    pub events_page_size: NonZeroUsize,
    pub announcements_page_size: NonZeroUsize,
    /// Prefix for relative image paths, e.g. `http://localhost:8000/media`
    pub media_base_url: Option<String>,
    /// JSON seed imported into an empty database at startup
    pub seed_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the process environment (and `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(&env::vars().collect())
    }

    /// Build configuration from an explicit variable map.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |name: &str| vars.get(name).filter(|v| !v.trim().is_empty()).cloned();

        let db_path = get("TSAK_DB_PATH")
            .unwrap_or_else(|| "./data/tsak.sqlite".to_string())
            .into();

        let index_path = get("TSAK_INDEX_PATH")
            .unwrap_or_else(|| "./data/index".to_string())
            .into();

        let bind_addr_raw = get("TSAK_BIND_ADDR").unwrap_or_else(|| "127.0.0.1:8000".to_string());
        let bind_addr = bind_addr_raw.parse().map_err(|_| ConfigError::Invalid {
            var: "TSAK_BIND_ADDR",
            value: bind_addr_raw.clone(),
            reason: "expected host:port",
        })?;

        let log_level = get("TSAK_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let log_format = match get("TSAK_LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "TSAK_LOG_FORMAT",
                    value: other.to_string(),
                    reason: "expected text or json",
                })
            }
        };

        let default_locale = match get("TSAK_DEFAULT_LOCALE") {
            None => Locale::Th,
            Some(raw) => Locale::parse(&raw).ok_or(ConfigError::Invalid {
                var: "TSAK_DEFAULT_LOCALE",
                value: raw,
                reason: "expected en or th",
            })?,
        };

        let events_page_size = page_size(&get, "TSAK_EVENTS_PAGE_SIZE", 6)?;
        let announcements_page_size = page_size(&get, "TSAK_ANNOUNCEMENTS_PAGE_SIZE", 10)?;

        Ok(Self {
            db_path,
            index_path,
            bind_addr,
            log_level,
            log_format,
            default_locale,
            events_page_size,
            announcements_page_size,
            media_base_url: get("TSAK_MEDIA_BASE_URL"),
            seed_path: get("TSAK_SEED_PATH").map(PathBuf::from),
        })
    }
}

fn page_size(
    get: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: usize,
) -> Result<NonZeroUsize, ConfigError> {
    let Some(raw) = get(var) else {
        return Ok(NonZeroUsize::new(default).unwrap_or(NonZeroUsize::MIN));
    };
    raw.trim()
        .parse::<NonZeroUsize>()
        .map_err(|_| ConfigError::Invalid {
            var,
            value: raw.clone(),
            reason: "expected a positive integer",
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = Config::from_vars(&HashMap::new()).unwrap();

        assert_eq!(config.db_path, PathBuf::from("./data/tsak.sqlite"));
        assert_eq!(config.index_path, PathBuf::from("./data/index"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8000");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.default_locale, Locale::Th);
        assert_eq!(config.events_page_size.get(), 6);
        assert_eq!(config.announcements_page_size.get(), 10);
        assert!(config.media_base_url.is_none());
        assert!(config.seed_path.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(&vars(&[
            ("TSAK_BIND_ADDR", "0.0.0.0:9000"),
            ("TSAK_LOG_FORMAT", "json"),
            ("TSAK_DEFAULT_LOCALE", "EN"),
            ("TSAK_EVENTS_PAGE_SIZE", "9"),
            ("TSAK_SEED_PATH", "./seed.json"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.default_locale, Locale::En);
        assert_eq!(config.events_page_size.get(), 9);
        assert_eq!(config.seed_path, Some(PathBuf::from("./seed.json")));
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let err = Config::from_vars(&vars(&[("TSAK_ANNOUNCEMENTS_PAGE_SIZE", "0")])).unwrap_err();
        assert!(err.to_string().contains("TSAK_ANNOUNCEMENTS_PAGE_SIZE"));
    }

    #[test]
    fn test_bad_values_are_rejected() {
        assert!(Config::from_vars(&vars(&[("TSAK_BIND_ADDR", "nowhere")])).is_err());
        assert!(Config::from_vars(&vars(&[("TSAK_DEFAULT_LOCALE", "ko")])).is_err());
        assert!(Config::from_vars(&vars(&[("TSAK_LOG_FORMAT", "xml")])).is_err());
    }
}
