//! Runtime configuration.
//!
//! Settings are read from environment variables, falling back to
//! defaults suitable for local development.  A variable that is set
//! but cannot be parsed is reported rather than silently replaced by
//! its default.

use crate::error::{Result, ServiceError};
use axum::http::HeaderName;
use std::net::SocketAddr;
use std::str::FromStr;

pub const BIND_ADDR_VAR: &str = "SHIFT_BALANCE_BIND_ADDR";
pub const DRIVER_HEADER_VAR: &str = "SHIFT_BALANCE_DRIVER_HEADER";
pub const LOG_FORMAT_VAR: &str = "SHIFT_BALANCE_LOG_FORMAT";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_DRIVER_HEADER: &str = "x-driver-id";

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Single-line human readable output.
    #[default]
    Compact,
    /// One JSON object per event, for log shippers.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("expected `compact` or `json`, got `{other}`")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,
    /// Header carrying the driver identifier, set by the upstream
    /// gateway once it has authenticated the caller.
    pub driver_header: HeaderName,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            driver_header: HeaderName::from_static(DEFAULT_DRIVER_HEADER),
            log_format: LogFormat::Compact,
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value
    /// of a variable or `None` when it is unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = parse_var(&lookup, BIND_ADDR_VAR, DEFAULT_BIND_ADDR, |raw| {
            raw.parse::<SocketAddr>().map_err(|err| err.to_string())
        })?;
        let driver_header =
            parse_var(&lookup, DRIVER_HEADER_VAR, DEFAULT_DRIVER_HEADER, |raw| {
                HeaderName::from_bytes(raw.as_bytes()).map_err(|err| err.to_string())
            })?;
        let log_format = parse_var(&lookup, LOG_FORMAT_VAR, "compact", |raw| {
            raw.parse::<LogFormat>()
        })?;

        Ok(Self {
            bind_addr,
            driver_header,
            log_format,
        })
    }
}

fn parse_var<F, T, P>(lookup: &F, key: &'static str, default: &str, parse: P) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    P: Fn(&str) -> std::result::Result<T, String>,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    parse(raw.trim()).map_err(|message| ServiceError::InvalidConfig {
        key,
        value: raw,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.driver_header.as_str(), "x-driver-id");
        assert_eq!(config.log_format, LogFormat::Compact);

        let default = Config::default();
        assert_eq!(default.bind_addr, config.bind_addr);
        assert_eq!(default.driver_header, config.driver_header);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            (BIND_ADDR_VAR, "0.0.0.0:8080"),
            (DRIVER_HEADER_VAR, "X-Authenticated-Driver"),
            (LOG_FORMAT_VAR, "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.driver_header.as_str(), "x-authenticated-driver");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_bind_addr_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[(BIND_ADDR_VAR, "localhost")])).unwrap_err();
        match err {
            ServiceError::InvalidConfig { key, value, .. } => {
                assert_eq!(key, BIND_ADDR_VAR);
                assert_eq!(value, "localhost");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_header_and_format_are_rejected() {
        assert!(Config::from_lookup(lookup_from(&[(DRIVER_HEADER_VAR, "bad header")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[(LOG_FORMAT_VAR, "pretty")])).is_err());
    }
}
