use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppinionError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Listings source returned an error: {message}")]
    UpstreamError { status: String, message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid engine configuration '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },

    #[error("No options found for service '{service}'")]
    ServiceNotFound {
        service: String,
        available: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AppinionError {
    pub fn invalid_configuration(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::UpstreamError { .. } => ErrorCategory::Network,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfiguration { .. } => ErrorCategory::Configuration,
            Self::CsvError(_) | Self::SerializationError(_) | Self::ServiceNotFound { .. } => {
                ErrorCategory::Data
            }
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ServiceNotFound { .. } => ErrorSeverity::Low,
            Self::ApiError(_) | Self::UpstreamError { .. } => ErrorSeverity::Medium,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfiguration { .. }
            | Self::CsvError(_)
            | Self::SerializationError(_) => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::ApiError(_) => {
                "Check your network connection and that the Places API is reachable".to_string()
            }
            Self::UpstreamError { status, .. } if status == "REQUEST_DENIED" => {
                "Verify the API key passed with --api-key or GOOGLE_MAPS_API_KEY".to_string()
            }
            Self::UpstreamError { .. } => {
                "Try a different search term or location".to_string()
            }
            Self::CsvError(_) => "Check that the output destination is writable".to_string(),
            Self::IoError(_) => "Check that the file exists and is readable".to_string(),
            Self::SerializationError(_) => {
                "Make sure the data file is a JSON array of provider listings".to_string()
            }
            Self::ConfigValidationError { field, .. }
            | Self::InvalidConfigValueError { field, .. }
            | Self::InvalidConfiguration { field, .. } => {
                format!("Fix the value of '{}' and run again", field)
            }
            Self::MissingConfigError { field } => format!("Provide a value for '{}'", field),
            Self::ServiceNotFound { available, .. } if !available.is_empty() => {
                format!("Available services: {}", available.join(", "))
            }
            Self::ServiceNotFound { .. } => "The data set contains no services".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(_) => "Could not reach the listings service.".to_string(),
            Self::UpstreamError { message, .. } => {
                format!("Google Places API error: {}", message)
            }
            Self::ServiceNotFound { service, .. } => {
                format!("No options found for '{}'.", service)
            }
            Self::MissingConfigError { field } if field == "api_key" => {
                "A Google Places key is required: pass --api-key or set GOOGLE_MAPS_API_KEY."
                    .to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppinionError>;
