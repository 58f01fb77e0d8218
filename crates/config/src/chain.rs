use crate::ConfigError;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    /// Denomination credited when an action carries no explicit asset
    ///
    /// Env: INDEXER_CHAIN_NATIVE_DENOM
    /// Default: nria
    #[serde(default = "default_native_denom")]
    pub native_denom: String,

    /// Upper bound, in seconds, on a single asset-metadata lookup
    ///
    /// Env: INDEXER_CHAIN_METADATA_TIMEOUT_SECS
    /// Default: 10
    #[serde(default = "default_metadata_timeout_secs")]
    pub metadata_timeout_secs: u64,
}

fn default_native_denom() -> String {
    "nria".to_string()
}

fn default_metadata_timeout_secs() -> u64 {
    10
}

impl ChainConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.native_denom.is_empty() {
            return Err(ConfigError::ValidateError(
                "Native denomination cannot be empty".to_string(),
            ));
        }

        if self.metadata_timeout_secs == 0 {
            return Err(ConfigError::ValidateError(
                "Metadata lookup timeout cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            native_denom: default_native_denom(),
            metadata_timeout_secs: default_metadata_timeout_secs(),
        }
    }
}
