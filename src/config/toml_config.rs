use crate::utils::error::{MastError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

pub const DEFAULT_INPUT_DATE_FORMATS: [&str; 2] = ["%d %b %Y", "%Y-%m-%d"];
pub const DEFAULT_REPORT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Optional settings file. Every key has a default, so an empty file is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub parser: ParserSettings,
    pub report: ReportSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserSettings {
    /// chrono formats tried in order for date columns.
    pub date_formats: Vec<String>,
    pub delimiter: char,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            date_formats: DEFAULT_INPUT_DATE_FORMATS
                .iter()
                .map(|f| f.to_string())
                .collect(),
            delimiter: ',',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportSettings {
    pub date_format: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_REPORT_DATE_FORMAT.to_string(),
        }
    }
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| MastError::ConfigError {
            message: format!("cannot read '{}': {}", path.display(), e),
        })?;
        let settings = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content).map_err(|e| MastError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Settings from `path` when given, defaults otherwise.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        if self.parser.date_formats.is_empty() {
            return Err(MastError::InvalidConfigValue {
                field: "parser.date_formats".to_string(),
                value: "[]".to_string(),
                reason: "At least one date format is required".to_string(),
            });
        }
        for format in &self.parser.date_formats {
            validate_date_format("parser.date_formats", format)?;
        }

        if !self.parser.delimiter.is_ascii() || self.parser.delimiter == '"' {
            return Err(MastError::InvalidConfigValue {
                field: "parser.delimiter".to_string(),
                value: self.parser.delimiter.to_string(),
                reason: "Delimiter must be a single ASCII character other than a quote"
                    .to_string(),
            });
        }

        validate_date_format("report.date_format", &self.report.date_format)?;
        Ok(())
    }
}

// chrono panics when a date is displayed with a format it cannot fill,
// including time-only fields such as %H.
pub(crate) fn validate_date_format(field: &str, format: &str) -> Result<()> {
    validate_non_empty_string(field, format)?;
    let invalid = |reason: &str| MastError::InvalidConfigValue {
        field: field.to_string(),
        value: format.to_string(),
        reason: reason.to_string(),
    };

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(invalid("Not a valid strftime format"));
    }

    let sample = NaiveDate::from_ymd_opt(2000, 1, 31).unwrap_or_default();
    let mut rendered = String::new();
    write!(rendered, "{}", sample.format(format))
        .map_err(|_| invalid("Format needs fields a calendar date does not have"))?;
    Ok(())
}
