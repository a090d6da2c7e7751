//! TOML configuration for the estimator CLI.
//!
//! Every key is optional. Decimal values may be written as strings
//! (`"8.25"`) or bare numbers.
//!
//! ```toml
//! [estimate]
//! tax_rate = "0.0825"
//! fallback_bundle = "B0"
//!
//! [costs]
//! profit_margin_percent = "20"
//! fee_basis = "total_with_profit"
//!
//! [painting]
//! hourly_rate = "55.00"
//! ```

use std::path::Path;

use paint_core::calculations::{CostConfig, CostConfigError, PaintingRates};
use paint_core::catalog::{FALLBACK_BUNDLE_ID, REFERENCE_TAX_RATE};
use paint_core::{CatalogError, PricingCatalog};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid [costs] section: {0}")]
    Costs(#[from] CostConfigError),

    #[error("invalid [estimate] section: {0}")]
    Estimate(#[from] CatalogError),
}

/// Catalog-level estimate settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EstimateSettings {
    /// Estimate tax rate as a fraction.
    pub tax_rate: Decimal,
    pub fallback_bundle: String,
}

impl Default for EstimateSettings {
    fn default() -> Self {
        Self {
            tax_rate: REFERENCE_TAX_RATE,
            fallback_bundle: FALLBACK_BUNDLE_ID.to_string(),
        }
    }
}

impl EstimateSettings {
    /// Applies these settings on top of a catalog.
    pub fn apply(
        &self,
        catalog: PricingCatalog,
    ) -> Result<PricingCatalog, ConfigError> {
        Ok(catalog
            .with_tax_rate(self.tax_rate)?
            .with_fallback_bundle(self.fallback_bundle.clone())?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub estimate: EstimateSettings,
    pub costs: CostConfig,
    pub painting: PaintingRates,
}

impl AppConfig {
    /// Parses and validates configuration text.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(input)?;
        config.costs.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
