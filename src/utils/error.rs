use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected status {status} for {location}")]
    StatusError { location: String, status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid location '{location}': {reason}")]
    LocationError { location: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("State store error: {message}")]
    StoreError { message: String },
}

impl SiteError {
    /// Short message suitable for the terminal, without the source chain.
    pub fn user_friendly_message(&self) -> String {
        match self {
            SiteError::HttpError(_) | SiteError::StatusError { .. } => {
                "Could not fetch content".to_string()
            }
            SiteError::IoError(e) => format!("File access failed: {}", e),
            SiteError::SerializationError(_) => "Content is not valid JSON".to_string(),
            SiteError::LocationError { location, .. } => {
                format!("Cannot resolve content location '{}'", location)
            }
            SiteError::ConfigError { message } => format!("Configuration problem: {}", message),
            SiteError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            SiteError::StoreError { message } => format!("Could not save state: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SiteError::HttpError(_) | SiteError::StatusError { .. } => {
                "Check that the content base URL is reachable"
            }
            SiteError::IoError(_) | SiteError::LocationError { .. } => {
                "Check that the content directory exists and is readable"
            }
            SiteError::SerializationError(_) => "Fix the JSON document or remove it to use defaults",
            SiteError::ConfigError { .. } | SiteError::InvalidConfigValueError { .. } => {
                "Review the site configuration file and command-line flags"
            }
            SiteError::StoreError { .. } => "Check that the state file path is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
