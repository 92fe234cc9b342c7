use crate::config::toml_config::TomlConfig;
use crate::config::{resolve_api_key, Settings, SourceKind};
use crate::report::OutputFormat;
use crate::utils::error::{AppinionError, Result};
use crate::utils::validation::Validate;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "appinion")]
#[command(about = "Compare service providers by reviews and price to find the best option")]
pub struct CliConfig {
    /// Service to evaluate (for example "cleaning", "moving", "plumber")
    pub service: String,

    /// Alternative JSON file with provider listings
    #[arg(long)]
    pub data: Option<String>,

    /// Use the bundled sample data instead of the Google Places API
    #[arg(long)]
    pub use_sample: bool,

    /// Google Places key; defaults to the GOOGLE_MAPS_API_KEY variable
    #[arg(long)]
    pub api_key: Option<String>,

    /// City or area to search in (for example "Madrid, España")
    #[arg(long)]
    pub location: Option<String>,

    /// Language for Google Places responses [default: es]
    #[arg(long)]
    pub language: Option<String>,

    /// Maximum number of results to request from Google Places [default: 20]
    #[arg(long)]
    pub max_results: Option<usize>,

    /// Currency used for price estimates [default: EUR]
    #[arg(long)]
    pub currency: Option<String>,

    /// Number of providers in the detailed ranking [default: 5]
    #[arg(long, allow_negative_numbers = true)]
    pub top: Option<i64>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn load_file_config(&self) -> Result<TomlConfig> {
        let Some(path) = &self.config else {
            return Ok(TomlConfig::default());
        };
        tracing::info!("Loading configuration from {}", path);
        let config = TomlConfig::from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Command-line values override the config file, which overrides the built-in defaults.
    pub fn resolve(&self, file: &TomlConfig) -> Result<Settings> {
        let mut settings = Settings::from_file_config(&self.service, file);

        settings.source = match (&self.data, self.use_sample) {
            (Some(path), _) => SourceKind::DataFile(path.into()),
            (None, true) => SourceKind::Sample,
            (None, false) => SourceKind::GooglePlaces,
        };

        if let Some(currency) = &self.currency {
            settings.currency = currency.trim().to_uppercase();
            settings.price_tiers = file.tier_amounts(&settings.currency);
        }
        if let Some(top) = self.top {
            settings.top = usize::try_from(top)
                .ok()
                .filter(|t| *t > 0)
                .ok_or_else(|| {
                    AppinionError::invalid_configuration(
                        "top",
                        format!("must be a positive integer, got {}", top),
                    )
                })?;
        }
        if let Some(language) = &self.language {
            settings.language = language.clone();
        }
        if let Some(max_results) = self.max_results {
            settings.max_results = max_results;
        }
        settings.location = self.location.clone();
        settings.format = self.format;
        settings.api_key = resolve_api_key(self.api_key.as_deref()).or(settings.api_key);

        settings.validate()?;
        Ok(settings)
    }
}
