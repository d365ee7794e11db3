//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono::{FixedOffset, Offset, Utc};

use crate::cache::CacheConfig;
use crate::service::ServiceConfig;

/// Error reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?}: {message}")]
    Invalid {
        name: &'static str,
        value: String,
        message: String,
    },
}

/// Configuration for the server binary.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,

    /// Directory holding the reference data JSON files.
    pub data_dir: PathBuf,

    /// Deadline for every storage call.
    pub storage_timeout: Duration,

    /// Offset used to turn search timestamps into service dates.
    pub utc_offset: FixedOffset,

    /// TTL for cached seat maps.
    pub seat_cache_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            data_dir: PathBuf::from("data"),
            storage_timeout: Duration::from_millis(2000),
            utc_offset: FixedOffset::east_opt(9 * 3600).unwrap_or_else(|| Utc.fix()),
            seat_cache_ttl: Duration::from_secs(3600),
        }
    }
}

impl ServerConfig {
    /// Read configuration from `RESERVATION_*` environment variables,
    /// falling back to defaults for unset ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which returns the value of a
    /// variable if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bind_addr = parse_var(&lookup, "RESERVATION_BIND_ADDR")?.unwrap_or(defaults.bind_addr);
        let data_dir = lookup("RESERVATION_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let storage_timeout = parse_var::<u64>(&lookup, "RESERVATION_STORAGE_TIMEOUT_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.storage_timeout);
        let seat_cache_ttl = parse_var::<u64>(&lookup, "RESERVATION_SEAT_CACHE_TTL_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.seat_cache_ttl);

        let utc_offset = match parse_var::<i32>(&lookup, "RESERVATION_UTC_OFFSET_HOURS")? {
            None => defaults.utc_offset,
            Some(hours) => hours
                .checked_mul(3600)
                .and_then(FixedOffset::east_opt)
                .ok_or_else(|| ConfigError::Invalid {
                    name: "RESERVATION_UTC_OFFSET_HOURS",
                    value: hours.to_string(),
                    message: "offset must be within +/-23 hours".to_string(),
                })?,
        };

        if storage_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                name: "RESERVATION_STORAGE_TIMEOUT_MS",
                value: "0".to_string(),
                message: "timeout must be positive".to_string(),
            });
        }

        Ok(Self {
            bind_addr,
            data_dir,
            storage_timeout,
            utc_offset,
            seat_cache_ttl,
        })
    }

    /// Service settings derived from this configuration.
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            storage_timeout: self.storage_timeout,
            cache: CacheConfig {
                ttl: self.seat_cache_ttl,
                ..CacheConfig::default()
            },
        }
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(name)
        .map(|value| {
            value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                name,
                message: e.to_string(),
                value,
            })
        })
        .transpose()
}
