//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Identifier resolver configuration.
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// Transfer fee rate configuration.
    #[serde(default)]
    pub fees: FeesConfig,
}

/// Identifier resolver configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolverConfig {
    /// Quiet window after the last edit before a lookup is issued.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Minimum identifier length before any lookup is attempted.
    #[serde(default = "default_min_input_len")]
    pub min_input_len: usize,
}

fn default_debounce_ms() -> u64 {
    400
}

fn default_min_input_len() -> usize {
    3
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_input_len: default_min_input_len(),
        }
    }
}

/// Transfer fee rate configuration.
///
/// Rates are fractions of the transfer amount (0.015 = 1.5%).
#[derive(Debug, Clone, Deserialize)]
pub struct FeesConfig {
    /// Rate applied when no specific rule matches.
    #[serde(default = "default_default_rate")]
    pub default_rate: Decimal,
    /// Rate for bank transfers over the SWIFT rail.
    #[serde(default = "default_swift_rate")]
    pub swift_rate: Decimal,
    /// Rate for cryptocurrency transfers.
    #[serde(default = "default_crypto_rate")]
    pub crypto_rate: Decimal,
}

fn default_default_rate() -> Decimal {
    Decimal::new(15, 3) // 0.015
}

fn default_swift_rate() -> Decimal {
    Decimal::new(25, 3) // 0.025
}

fn default_crypto_rate() -> Decimal {
    Decimal::new(10, 3) // 0.010
}

impl Default for FeesConfig {
    fn default() -> Self {
        Self {
            default_rate: default_default_rate(),
            swift_rate: default_swift_rate(),
            crypto_rate: default_crypto_rate(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PAYWISE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
