use ::config::{Config, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{DocumentKind, PricingPolicy, DEFAULT_MAX_DISCOUNT_PERCENT};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    Source(#[from] ::config::ConfigError),
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Runtime settings.
///
/// Read from an optional `pricing.toml` next to the binary, then from `PRICING__*`
/// environment variables (a `.env` file is honoured), e.g.
/// `PRICING__MAX_DISCOUNT_PERCENT=15`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(default = "default_max_discount_percent")]
    pub max_discount_percent: u32,
    #[serde(default = "default_actor_buffer_size")]
    pub actor_buffer_size: usize,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_max_discount_percent() -> u32 {
    DEFAULT_MAX_DISCOUNT_PERCENT
}

fn default_actor_buffer_size() -> usize {
    32
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_discount_percent: default_max_discount_percent(),
            actor_buffer_size: default_actor_buffer_size(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("pricing").required(false))
            .add_source(
                Environment::with_prefix("PRICING")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        Self::from_config(config)
    }

    fn from_config(config: Config) -> Result<Self, SettingsError> {
        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.max_discount_percent > 100 {
            return Err(SettingsError::Invalid(format!(
                "max_discount_percent must be at most 100, got {}",
                self.max_discount_percent
            )));
        }
        if self.actor_buffer_size == 0 {
            return Err(SettingsError::Invalid("actor_buffer_size must be positive".to_string()));
        }
        Ok(())
    }

    /// Pricing rules a new document of `kind` is created with.
    pub fn policy_for(&self, kind: DocumentKind) -> PricingPolicy {
        PricingPolicy::for_kind(kind, Decimal::from(self.max_discount_percent))
    }
}
