// config.rs
use crate::domain::GeoBounds;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not valid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: String,
    pub schema_path: String,
    pub addr: SocketAddr,
    pub max_workers: usize,
    pub directory_url: Option<Url>,
    pub directory_timeout: Duration,
    pub bounds: GeoBounds,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: "job_map.sqlite3".to_string(),
            schema_path: "sql/schema.sql".to_string(),
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_workers: 8,
            directory_url: None,
            directory_timeout: Duration::from_secs(30),
            bounds: GeoBounds::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(path) = lookup("JOB_MAP_DB_PATH") {
            config.db_path = path;
        }
        if let Some(path) = lookup("JOB_MAP_SCHEMA") {
            config.schema_path = path;
        }
        if let Some(addr) = lookup("JOB_MAP_ADDR") {
            config.addr = addr.parse().map_err(|e: std::net::AddrParseError| {
                invalid("JOB_MAP_ADDR", e.to_string())
            })?;
        }
        if let Some(workers) = lookup("JOB_MAP_WORKERS") {
            config.max_workers = match workers.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(invalid("JOB_MAP_WORKERS", "expected a positive integer")),
            };
        }
        if let Some(url) = lookup("PROPERTY_DIRECTORY_URL").filter(|s| !s.is_empty()) {
            let parsed =
                Url::parse(&url).map_err(|e| invalid("PROPERTY_DIRECTORY_URL", e.to_string()))?;
            config.directory_url = Some(parsed);
        }
        if let Some(secs) = lookup("PROPERTY_DIRECTORY_TIMEOUT_SECS") {
            let secs = secs
                .parse::<u64>()
                .map_err(|e| invalid("PROPERTY_DIRECTORY_TIMEOUT_SECS", e.to_string()))?;
            config.directory_timeout = Duration::from_secs(secs);
        }
        if let Some(bounds) = lookup("JOB_MAP_BOUNDS") {
            config.bounds = parse_bounds(&bounds)?;
        }

        Ok(config)
    }
}

fn invalid(var: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        var,
        reason: reason.into(),
    }
}

/// `min_lat,min_lng,max_lat,max_lng`
fn parse_bounds(raw: &str) -> Result<GeoBounds, ConfigError> {
    let values = raw
        .split(',')
        .map(|s| s.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| invalid("JOB_MAP_BOUNDS", e.to_string()))?;

    let [min_latitude, min_longitude, max_latitude, max_longitude] = values[..] else {
        return Err(invalid("JOB_MAP_BOUNDS", "expected four comma-separated numbers"));
    };

    if min_latitude > max_latitude || min_longitude > max_longitude {
        return Err(invalid("JOB_MAP_BOUNDS", "minimum exceeds maximum"));
    }

    Ok(GeoBounds {
        min_latitude,
        min_longitude,
        max_latitude,
        max_longitude,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.db_path, "job_map.sqlite3");
        assert_eq!(config.addr.port(), 3000);
        assert!(config.directory_url.is_none());
        assert_eq!(config.bounds, GeoBounds::default());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("JOB_MAP_ADDR", "0.0.0.0:8080"),
            ("JOB_MAP_WORKERS", "2"),
            ("PROPERTY_DIRECTORY_URL", "https://directory.example.com/properties"),
            ("JOB_MAP_BOUNDS", "9.4, 99.9, 9.6, 100.1"),
        ])
        .unwrap();

        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.max_workers, 2);
        assert_eq!(
            config.directory_url.unwrap().host_str(),
            Some("directory.example.com")
        );
        assert_eq!(config.bounds.max_longitude, 100.1);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(config_from(&[("JOB_MAP_WORKERS", "0")]).is_err());
        assert!(config_from(&[("JOB_MAP_BOUNDS", "1,2,3")]).is_err());
        assert!(config_from(&[("JOB_MAP_BOUNDS", "10,0,9,1")]).is_err());
        assert!(config_from(&[("PROPERTY_DIRECTORY_URL", "not a url")]).is_err());
    }
}
