use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlaError {
    #[error("Invalid working hours: start hour {start_hour} must be before end hour {end_hour} (both 0-23)")]
    ConfigurationError { start_hour: u32, end_hour: u32 },

    #[error("Invalid duration: {hours} business hours (must be a finite, non-negative number)")]
    InvalidDurationError { hours: f64 },

    #[error("No working day found within {days} days after {from}")]
    NoWorkingDay { from: NaiveDate, days: u32 },

    #[error("Local time {local} cannot be represented in timezone {timezone}")]
    LocalTimeError { local: String, timezone: String },

    #[error("Holiday source request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Date parsing error: {0}")]
    DateParseError(#[from] chrono::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Calendar,
    Network,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SlaError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SlaError::ConfigurationError { .. }
            | SlaError::ConfigError { .. }
            | SlaError::ConfigValidationError { .. }
            | SlaError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SlaError::InvalidDurationError { .. }
            | SlaError::DateParseError(_)
            | SlaError::ValidationError { .. } => ErrorCategory::Input,
            SlaError::NoWorkingDay { .. } | SlaError::LocalTimeError { .. } => {
                ErrorCategory::Calendar
            }
            SlaError::ApiError(_) => ErrorCategory::Network,
            SlaError::CsvError(_) | SlaError::IoError(_) | SlaError::SerializationError(_) => {
                ErrorCategory::Storage
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 節假日來源失敗時服務會退回預設值
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Calendar => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SlaError::ConfigurationError { .. } => {
                "Set start_hour lower than end_hour, e.g. start_hour = 8 and end_hour = 18"
            }
            SlaError::InvalidDurationError { .. } => {
                "Pass a non-negative number of business hours"
            }
            SlaError::NoWorkingDay { .. } => {
                "Check the holiday calendar, recurring holidays may cover every day"
            }
            SlaError::LocalTimeError { .. } => "Use a different timezone or working window",
            SlaError::ApiError(_) => "Check the holiday source URL and network connectivity",
            SlaError::DateParseError(_) => {
                "Use RFC 3339 timestamps (2025-03-10T08:00:00-05:00) and YYYY-MM-DD dates"
            }
            SlaError::CsvError(_) => "Make sure the CSV file has the columns id,start,hours",
            SlaError::IoError(_) => "Check that the file exists and is readable",
            SlaError::SerializationError(_) => "Check the JSON payload format",
            SlaError::ConfigError { .. }
            | SlaError::ConfigValidationError { .. }
            | SlaError::InvalidConfigValueError { .. } => "Review the configuration file and flags",
            SlaError::ValidationError { .. } => "Review the input values",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Invalid input: {}", self),
            ErrorCategory::Calendar => format!("Calendar problem: {}", self),
            ErrorCategory::Network => format!("Could not reach the holiday source: {}", self),
            ErrorCategory::Storage => format!("Could not read or write data: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SlaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_category() {
        let err = SlaError::ConfigurationError {
            start_hour: 18,
            end_hour: 8,
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("start hour 18"));
        assert!(err.user_friendly_message().starts_with("Configuration problem"));
    }

    #[test]
    fn test_duration_error_is_input() {
        let err = SlaError::InvalidDurationError { hours: -1.0 };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert!(err.recovery_suggestion().contains("non-negative"));
    }
}
