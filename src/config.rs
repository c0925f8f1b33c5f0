//! Store configuration

use std::path::Path;

use rusty_money::iso::{self, Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::checkout::CheckoutRates;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading a config file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// When durable writes happen relative to mutations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistMode {
    /// Write through on every mutation.
    #[default]
    Immediate,

    /// Mark state dirty and write on flush or drop, decoupling storage
    /// latency from mutation latency.
    Deferred,
}

/// Store configuration: the persistence namespace, the pricing currency and
/// the checkout rate table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Namespace key the snapshot is stored under.
    pub namespace: String,

    /// ISO 4217 code of the currency all prices are quoted in.
    pub currency: String,

    /// Durable-write policy.
    pub persist: PersistMode,

    /// Checkout rate table.
    pub rates: CheckoutRates,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            namespace: "satchel-store".to_string(),
            currency: "USD".to_string(),
            persist: PersistMode::Immediate,
            rates: CheckoutRates::default(),
        }
    }
}

impl StoreConfig {
    /// Parses a config from a YAML document.
    ///
    /// Omitted fields take their defaults.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Yaml`]: the document did not parse.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_norway::from_str(contents)?)
    }

    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Io`]: the file could not be read.
    /// - [`ConfigError::Yaml`]: the contents did not parse.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Resolves the configured currency code.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::UnknownCurrency`]: the code is not a known ISO 4217
    ///   currency.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        iso::find(&self.currency)
            .ok_or_else(|| ConfigError::UnknownCurrency(self.currency.clone()))
    }
}
