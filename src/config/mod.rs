#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::EngineSettings;
use crate::report::OutputFormat;
use crate::utils::error::{AppinionError, Result};
use crate::utils::validation::{self, Validate};
use std::path::PathBuf;
use std::time::Duration;
use toml_config::TomlConfig;

pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";
pub const DEFAULT_CURRENCY: &str = "EUR";
pub const DEFAULT_TOP: usize = 5;
pub const DEFAULT_LANGUAGE: &str = "es";
pub const DEFAULT_MAX_RESULTS: usize = 20;
pub const DEFAULT_PAGE_DELAY_MS: u64 = 2000;

/// Where listings come from for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    DataFile(PathBuf),
    Sample,
    GooglePlaces,
}

/// Fully resolved run settings. Built once; the engine only sees the `EngineSettings` view.
#[derive(Debug, Clone)]
pub struct Settings {
    pub service: String,
    pub source: SourceKind,
    pub currency: String,
    pub top: usize,
    pub price_tiers: Vec<f64>,
    pub language: String,
    pub max_results: usize,
    pub location: Option<String>,
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub page_delay: Duration,
    pub format: OutputFormat,
}

impl Settings {
    /// Settings from a config file alone, before command-line overrides.
    pub fn from_file_config(service: &str, file: &TomlConfig) -> Self {
        let currency = file
            .defaults
            .currency
            .clone()
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
            .to_uppercase();

        Self {
            service: service.to_string(),
            source: SourceKind::GooglePlaces,
            price_tiers: file.tier_amounts(&currency),
            currency,
            top: file.defaults.top.unwrap_or(DEFAULT_TOP),
            language: file
                .defaults
                .language
                .clone()
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            max_results: file.defaults.max_results.unwrap_or(DEFAULT_MAX_RESULTS),
            location: None,
            api_key: file.google.api_key.clone().filter(|k| !k.starts_with("${")),
            endpoint: file.google.endpoint.clone(),
            page_delay: Duration::from_millis(
                file.google.page_delay_ms.unwrap_or(DEFAULT_PAGE_DELAY_MS),
            ),
            format: OutputFormat::default(),
        }
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AppinionError::MissingConfigError {
                field: "api_key".to_string(),
            })
    }
}

/// Explicit key first, then the environment.
pub fn resolve_api_key(explicit: Option<&str>) -> Option<String> {
    explicit
        .map(str::to_string)
        .or_else(|| std::env::var(API_KEY_ENV).ok())
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

impl EngineSettings for Settings {
    fn target_currency(&self) -> &str {
        &self.currency
    }

    fn top_n(&self) -> usize {
        self.top
    }

    fn price_tiers(&self) -> &[f64] {
        &self.price_tiers
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("service", &self.service)?;
        validation::validate_currency_code("currency", &self.currency)?;
        validation::validate_positive_number("top", self.top, 1)?;
        validation::validate_range("max_results", self.max_results, 1, 60)?;
        if let Some(endpoint) = &self.endpoint {
            validation::validate_url("google.endpoint", endpoint)?;
        }
        if self.source == SourceKind::GooglePlaces {
            self.require_api_key()?;
        }
        Ok(())
    }
}
