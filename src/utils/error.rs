use thiserror::Error;

#[derive(Error, Debug)]
pub enum GreensError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Effort lookup failed for segment {segment}: {message}")]
    LookupError { segment: String, message: String },

    #[error("Authorization rejected for segment {segment}: {message}")]
    AuthorizationError { segment: String, message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Authorization,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GreensError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GreensError::ApiError(_) | GreensError::LookupError { .. } => ErrorCategory::Network,
            GreensError::AuthorizationError { .. } => ErrorCategory::Authorization,
            GreensError::CsvError(_) | GreensError::InvalidInput { .. } => ErrorCategory::Data,
            GreensError::ConfigError { .. }
            | GreensError::ConfigValidationError { .. }
            | GreensError::InvalidConfigValueError { .. }
            | GreensError::MissingConfigError { .. } => ErrorCategory::Configuration,
            GreensError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Authorization | ErrorCategory::Data | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the network connection and the API base URL, then retry",
            ErrorCategory::Authorization => {
                "The access token is invalid or expired; obtain a fresh token with activity:read_all scope"
            }
            ErrorCategory::Data => "Check the effort data source for malformed or unsorted dates",
            ErrorCategory::Configuration => "Review the command line flags and the TOML configuration file",
            ErrorCategory::System => "Check file paths and permissions",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            GreensError::AuthorizationError { .. } => {
                "Strava rejected the access token. Please log in again.".to_string()
            }
            GreensError::LookupError { segment, .. } => {
                format!("Could not load efforts for segment {}", segment)
            }
            GreensError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            GreensError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GreensError>;
