mod chain;
mod error;
mod log;

pub use chain::ChainConfig;
pub use error::ConfigError;
pub use log::LogConfig;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct IndexerConfig {
    #[serde(default)]
    pub chain: ChainConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl IndexerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = envy::prefixed("INDEXER_").from_env::<Self>()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.chain.validate()?;
        self.log.validate()?;
        Ok(())
    }
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            chain: ChainConfig::default(),
            log: LogConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IndexerConfig::default();
        assert_eq!(config.chain.native_denom, "nria");
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_default_config_validates() {
        let config = IndexerConfig::default();
        assert!(config.validate().is_ok());
    }
}
