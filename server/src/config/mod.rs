use std::env;
use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

use crate::directory::pagination::{DEFAULT_PER_PAGE, MAX_PER_PAGE};

pub mod cors;
pub mod headers;

pub use cors::create_cors_layer;
pub use headers::create_site_headers_layer;

pub const DEFAULT_CORS_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";
const DEFAULT_CACHE_MAX_AGE_SECS: u64 = 300;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Alternative dataset file. The bundled dataset is used when unset.
    pub data_path: Option<String>,
    pub events_per_page: usize,
    pub cors_allowed_origins: String,
    pub production: bool,
    pub cache_max_age_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 3001,
            data_path: None,
            events_per_page: DEFAULT_PER_PAGE,
            cors_allowed_origins: DEFAULT_CORS_ALLOWED_ORIGINS.to_string(),
            production: false,
            cache_max_age_secs: DEFAULT_CACHE_MAX_AGE_SECS,
        }
    }
}

impl Config {
    /// Reads the configuration from the environment.
    ///
    /// | Variable               | Default                   |
    /// |------------------------|---------------------------|
    /// | `HOST`                 | `0.0.0.0`                 |
    /// | `PORT`                 | `3001`                    |
    /// | `SITE_DATA_PATH`       | bundled dataset           |
    /// | `EVENTS_PER_PAGE`      | `6`                       |
    /// | `CORS_ALLOWED_ORIGINS` | local dev origins         |
    /// | `CACHE_MAX_AGE_SECS`   | `300`                     |
    /// | `RUST_ENV`             | anything but `production` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let events_per_page: usize = parse_var("EVENTS_PER_PAGE", defaults.events_per_page)?;
        if !(1..=MAX_PER_PAGE).contains(&events_per_page) {
            return Err(ConfigError::Invalid {
                name: "EVENTS_PER_PAGE",
                value: events_per_page.to_string(),
            });
        }

        Ok(Self {
            host: parse_var("HOST", defaults.host)?,
            port: parse_var("PORT", defaults.port)?,
            data_path: env::var("SITE_DATA_PATH").ok().filter(|p| !p.trim().is_empty()),
            events_per_page,
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or(defaults.cors_allowed_origins),
            production: env::var("RUST_ENV")
                .map(|v| v.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
            cache_max_age_secs: parse_var("CACHE_MAX_AGE_SECS", defaults.cache_max_age_secs)?,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { name, value: raw })
        }
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.addr().to_string(), "0.0.0.0:3001");
        assert_eq!(config.events_per_page, 6);
        assert!(config.data_path.is_none());
        assert!(!config.production);
    }

    #[test]
    fn test_parse_var_falls_back_and_rejects_garbage() {
        std::env::remove_var("VIVA_TEST_UNSET_PORT");
        assert_eq!(parse_var::<u16>("VIVA_TEST_UNSET_PORT", 8080).unwrap(), 8080);

        std::env::set_var("VIVA_TEST_BAD_PORT", "eighty");
        assert!(matches!(
            parse_var::<u16>("VIVA_TEST_BAD_PORT", 8080),
            Err(ConfigError::Invalid { name: "VIVA_TEST_BAD_PORT", .. })
        ));
        std::env::remove_var("VIVA_TEST_BAD_PORT");
    }
}
