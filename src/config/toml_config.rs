use crate::core::price::{TierTable, DEFAULT_TIER_AMOUNTS};
use crate::utils::error::{AppinionError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Currency code -> five amounts, tier 0 to tier 4.
    #[serde(default)]
    pub price_tiers: HashMap<String, Vec<f64>>,
    #[serde(default)]
    pub google: GoogleConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub currency: Option<String>,
    pub top: Option<usize>,
    pub language: Option<String>,
    pub max_results: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoogleConfig {
    pub endpoint: Option<String>,
    pub page_delay_ms: Option<u64>,
    pub api_key: Option<String>,
}

impl TomlConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AppinionError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value. Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| {
            AppinionError::ConfigValidationError {
                field: "environment".to_string(),
                message: e.to_string(),
            }
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Tier table for `currency`, falling back to the built-in amounts.
    pub fn tier_amounts(&self, currency: &str) -> Vec<f64> {
        self.price_tiers
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(currency))
            .map(|(_, amounts)| amounts.clone())
            .unwrap_or_else(|| DEFAULT_TIER_AMOUNTS.to_vec())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(currency) = &self.defaults.currency {
            validation::validate_currency_code("defaults.currency", currency)?;
        }
        if let Some(top) = self.defaults.top {
            validation::validate_positive_number("defaults.top", top, 1)?;
        }
        if let Some(max_results) = self.defaults.max_results {
            validation::validate_positive_number("defaults.max_results", max_results, 1)?;
        }
        if let Some(endpoint) = &self.google.endpoint {
            validation::validate_url("google.endpoint", endpoint)?;
        }
        for (currency, amounts) in &self.price_tiers {
            validation::validate_currency_code("price_tiers", currency)?;
            TierTable::new(amounts).map_err(|e| AppinionError::ConfigValidationError {
                field: format!("price_tiers.{}", currency),
                message: e.to_string(),
            })?;
        }
        Ok(())
    }
}
