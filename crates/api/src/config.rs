//! Environment-driven service configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use stockcheck_availability::render::DEFAULT_LINE_BREAK;
use stockcheck_availability::{KindPolicy, RenderOptions};
use stockcheck_core::DomainError;
use stockcheck_observability::{LogFormat, UnknownLogFormat};

pub const BIND_ADDR_VAR: &str = "STOCKCHECK_BIND_ADDR";
pub const CATALOG_PATH_VAR: &str = "STOCKCHECK_CATALOG_PATH";
pub const ALLOWED_KINDS_VAR: &str = "STOCKCHECK_ALLOWED_KINDS";
pub const LINE_BREAK_VAR: &str = "STOCKCHECK_LINE_BREAK";
pub const LOG_FORMAT_VAR: &str = "STOCKCHECK_LOG_FORMAT";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: invalid socket address {value:?}")]
    BindAddr { var: &'static str, value: String },

    #[error("{var}: {source}")]
    AllowedKinds {
        var: &'static str,
        #[source]
        source: DomainError,
    },

    #[error("{var}: {source}")]
    LogFormat {
        var: &'static str,
        #[source]
        source: UnknownLogFormat,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// JSON seed file for the in-memory catalog; empty catalog when unset.
    pub catalog_path: Option<PathBuf>,
    pub kind_policy: KindPolicy,
    pub render: RenderOptions,
    pub log_format: LogFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            catalog_path: None,
            kind_policy: KindPolicy::default(),
            render: RenderOptions::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map instead of the process env).
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let raw_addr = non_empty(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr.trim().parse().map_err(|_| ConfigError::BindAddr {
            var: BIND_ADDR_VAR,
            value: raw_addr.clone(),
        })?;

        let kind_policy = match non_empty(ALLOWED_KINDS_VAR) {
            Some(list) => KindPolicy::parse_list(&list).map_err(|source| ConfigError::AllowedKinds {
                var: ALLOWED_KINDS_VAR,
                source,
            })?,
            None => KindPolicy::default(),
        };

        let log_format = match non_empty(LOG_FORMAT_VAR) {
            Some(raw) => raw.parse().map_err(|source| ConfigError::LogFormat {
                var: LOG_FORMAT_VAR,
                source,
            })?,
            None => LogFormat::default(),
        };

        // An explicitly empty separator is allowed and kept as-is.
        let line_break = get(LINE_BREAK_VAR).unwrap_or_else(|| DEFAULT_LINE_BREAK.to_string());

        Ok(Self {
            bind_addr,
            catalog_path: non_empty(CATALOG_PATH_VAR).map(PathBuf::from),
            kind_policy,
            render: RenderOptions { line_break },
            log_format,
        })
    }
}
