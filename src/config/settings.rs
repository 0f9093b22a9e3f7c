//! Process settings read from the environment.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::error::{EngineError, EngineResult};

/// Settings for the HTTP service and its data sources.
///
/// Values come from `APP_*` environment variables, optionally seeded from a
/// `.env` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    /// Address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Directory holding `matching.yaml` and `proficiency.yaml`.
    pub config_dir: PathBuf,
    /// YAML snapshot the in-memory store is loaded from.
    pub data_file: PathBuf,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            config_dir: PathBuf::from("./config/default"),
            data_file: PathBuf::from("./fixtures/staffing.yaml"),
        }
    }
}

impl AppSettings {
    /// Loads settings, falling back to [`AppSettings::default`] per field.
    pub fn from_env() -> EngineResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("APP_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| EngineError::ConfigParseError {
                    path: "APP_PORT".to_string(),
                    message: format!("'{}' is not a valid port", raw),
                })?,
            None => defaults.port,
        };

        Ok(Self {
            host: lookup("APP_HOST").unwrap_or(defaults.host),
            port,
            log_level: lookup("APP_LOG_LEVEL").unwrap_or(defaults.log_level),
            config_dir: lookup("APP_CONFIG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.config_dir),
            data_file: lookup("APP_DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
        })
    }

    /// Resolves the bind address.
    pub fn socket_addr(&self) -> EngineResult<SocketAddr> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| EngineError::ConfigParseError {
                path: "APP_HOST".to_string(),
                message: format!("'{}' is not an IPv4 or IPv6 address", self.host),
            })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}
