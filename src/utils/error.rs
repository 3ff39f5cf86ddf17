use crate::core::validator::FieldErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration field '{field}' is invalid: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Form has {count} invalid field(s): {0}", count = .0.len())]
    Validation(FieldErrors),

    #[error("A submission is already in progress")]
    SubmissionInFlight,

    #[error("Request rejected by the booking service with status {status}")]
    Rejected { status: u16 },

    #[error("Request timed out after {after:?}")]
    Timeout { after: std::time::Duration },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Submission,
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

impl BookingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BookingError::Validation(_) | BookingError::SubmissionInFlight => {
                ErrorCategory::Validation
            }
            BookingError::HttpError(_)
            | BookingError::Rejected { .. }
            | BookingError::Timeout { .. } => ErrorCategory::Submission,
            BookingError::ConfigError { .. }
            | BookingError::ConfigValidationError { .. }
            | BookingError::InvalidValue { .. }
            | BookingError::MissingConfigError { .. } => ErrorCategory::Configuration,
            BookingError::IoError(_) | BookingError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Submission => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Whether the same request may succeed if the user simply tries again.
    pub fn is_retryable(&self) -> bool {
        matches!(self.category(), ErrorCategory::Submission)
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BookingError::Validation(errors) => {
                format!("Please correct the highlighted fields: {}", errors)
            }
            BookingError::SubmissionInFlight => {
                "Your request is still being sent. Please wait a moment.".to_string()
            }
            BookingError::HttpError(_)
            | BookingError::Rejected { .. }
            | BookingError::Timeout { .. } => {
                "We couldn't submit your request. Please check your information and try again."
                    .to_string()
            }
            BookingError::ConfigError { .. }
            | BookingError::ConfigValidationError { .. }
            | BookingError::InvalidValue { .. }
            | BookingError::MissingConfigError { .. } => {
                format!("Configuration problem: {}", self)
            }
            BookingError::IoError(_) | BookingError::SerializationError(_) => {
                format!("Unexpected system error: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BookingError::Validation(_) => "Fix the listed fields and submit again",
            BookingError::SubmissionInFlight => "Wait for the current submission to finish",
            BookingError::HttpError(_) | BookingError::Timeout { .. } => {
                "Check your network connection and the service URL, then retry"
            }
            BookingError::Rejected { .. } => {
                "Review the request details, or call us directly if the problem persists"
            }
            BookingError::ConfigError { .. }
            | BookingError::ConfigValidationError { .. }
            | BookingError::InvalidValue { .. }
            | BookingError::MissingConfigError { .. } => {
                "Check the configuration file and command line arguments"
            }
            BookingError::IoError(_) => "Check file paths and permissions",
            BookingError::SerializationError(_) => "Check that the data is valid JSON",
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
