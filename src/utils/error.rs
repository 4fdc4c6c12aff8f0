use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MastError {
    #[error("Input file not found or unreadable: {}", path.display())]
    MissingFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("Invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("Invalid argument {argument} = '{value}': {reason}")]
    InvalidArgument {
        argument: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field} = '{value}': {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Argument,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl MastError {
    pub fn invalid_argument(
        argument: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn malformed_row(row: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            row,
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingFile { .. }
            | Self::MalformedRow { .. }
            | Self::InvalidHeader { .. }
            | Self::ProcessingError { .. }
            | Self::CsvError(_) => ErrorCategory::Input,
            Self::InvalidArgument { .. } => ErrorCategory::Argument,
            Self::ConfigError { .. } | Self::InvalidConfigValue { .. } => {
                ErrorCategory::Configuration
            }
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Argument | ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingFile { path, .. } => {
                format!("Cannot read input file '{}'", path.display())
            }
            Self::MalformedRow { row, reason } => {
                format!("Data row {} could not be parsed: {}", row, reason)
            }
            Self::InvalidHeader { reason } => format!("The CSV header is not usable: {}", reason),
            Self::ProcessingError { message } => {
                format!("The report could not be computed: {}", message)
            }
            Self::InvalidArgument {
                argument, reason, ..
            } => format!("Bad value for {}: {}", argument, reason),
            Self::ConfigError { message } => format!("Settings file problem: {}", message),
            Self::InvalidConfigValue { field, reason, .. } => {
                format!("Settings value {} is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MissingFile { .. } => "Check that the CSV path exists and is readable",
            Self::MalformedRow { .. } | Self::CsvError(_) => {
                "Fix the offending row; the whole file is rejected until every row parses"
            }
            Self::InvalidHeader { .. } => {
                "The header must name Property Name, Unit Name, Tenant Name, Lease Start Date, Lease Years and Current Rent"
            }
            Self::ProcessingError { .. } => "Check the Current Rent values in the input file",
            Self::InvalidArgument { .. } => {
                "Counts must be positive and dates use YYYY-MM-DD with start <= end"
            }
            Self::ConfigError { .. } | Self::InvalidConfigValue { .. } => {
                "Correct the settings file or run without --config to use defaults"
            }
            Self::IoError(_) | Self::SerializationError(_) => "Retry; if it persists, report a bug",
        }
    }
}

pub type Result<T> = std::result::Result<T, MastError>;
