//! Configuration loading and representation.
//!
//! Read once at startup from the process environment:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `10000` |
//! | `STORE_BACKEND` | `memory` (`memory` or `postgres`) |
//! | `DATABASE_URL` | required for `postgres` |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 10000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535 (got `{0}`)")]
    InvalidPort(String),
    #[error("HOST must be an IP address (got `{0}`)")]
    InvalidHost(String),
    #[error("STORE_BACKEND must be `memory` or `postgres` (got `{0}`)")]
    UnknownBackend(String),
    #[error("DATABASE_URL must be set when STORE_BACKEND=postgres")]
    MissingDatabaseUrl,
}

/// Which record store backs the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    InMemory,
    Postgres { database_url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            store: StoreConfig::InMemory,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (tests pass a map instead of the environment).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host: IpAddr = match get("HOST") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidHost(raw))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port: u16 = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let store = match get("STORE_BACKEND")
            .map(|v| v.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("memory") => StoreConfig::InMemory,
            Some("postgres") => StoreConfig::Postgres {
                database_url: get("DATABASE_URL").ok_or(ConfigError::MissingDatabaseUrl)?,
            },
            Some(other) => return Err(ConfigError::UnknownBackend(other.to_string())),
        };

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            store,
        })
    }
}
