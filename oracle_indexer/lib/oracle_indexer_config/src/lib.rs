//! Environment-driven configuration for the CLI harness, mirroring
//! `zksync_env_config`'s `envy_load`/`FromEnv` pattern: a plain struct,
//! loaded via `envy`, with a `for_tests()` constructor standing in for the
//! fixture configs used elsewhere in the teacher workspace.

use std::time::Duration;

use oracle_core::NetworkIdScheme;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config from environment: {0}")]
    Env(#[from] envy::Error),
    #[error("invalid value {value:?} for {field}")]
    InvalidValue { field: &'static str, value: String },
}

/// Implemented by every config struct in this crate, mirroring the
/// teacher's own `FromEnv` trait: one entry point, one env prefix.
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct RawOracleIndexerConfig {
    #[serde(default = "default_network_id_scheme")]
    network_id_scheme: String,
    #[serde(default = "default_poll_interval_ms")]
    poll_interval_ms: u64,
}

fn default_network_id_scheme() -> String {
    "chain_id".to_string()
}

fn default_poll_interval_ms() -> u64 {
    1_000
}

/// The harness's runtime configuration: which `NetworkIdScheme` the driver
/// resolves new networks with, and how often the CLI's polling
/// `CallSource` implementations should re-check their feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleIndexerConfig {
    pub network_id_scheme: NetworkIdScheme,
    pub poll_interval: Duration,
}

impl OracleIndexerConfig {
    pub fn for_tests() -> Self {
        Self {
            network_id_scheme: NetworkIdScheme::ChainId,
            poll_interval: Duration::from_millis(default_poll_interval_ms()),
        }
    }

    fn from_raw(raw: RawOracleIndexerConfig) -> Result<Self, ConfigError> {
        let network_id_scheme = match raw.network_id_scheme.as_str() {
            "chain_id" => NetworkIdScheme::ChainId,
            "legacy_counter" => NetworkIdScheme::LegacyCounter,
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "network_id_scheme",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            network_id_scheme,
            poll_interval: Duration::from_millis(raw.poll_interval_ms),
        })
    }
}

impl FromEnv for OracleIndexerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw: RawOracleIndexerConfig = envy::prefixed("ORACLE_INDEXER_").from_env()?;
        Self::from_raw(raw)
    }
}
