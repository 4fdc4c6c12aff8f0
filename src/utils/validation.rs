use crate::utils::error::{MastError, Result};
use chrono::NaiveDate;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(MastError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(MastError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Checks a caller-supplied count and returns it as a `usize`.
pub fn validate_positive_count(argument: &str, value: i64) -> Result<usize> {
    if value <= 0 {
        return Err(MastError::invalid_argument(
            argument,
            value,
            "Value must be greater than zero",
        ));
    }
    usize::try_from(value)
        .map_err(|_| MastError::invalid_argument(argument, value, "Value is too large"))
}

pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if start > end {
        return Err(MastError::invalid_argument(
            "date range",
            format!("{} .. {}", start, end),
            "Start date must not be after end date",
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MastError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Parses a `YYYY-MM-DD` date given on the command line.
pub fn parse_iso_date(argument: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        MastError::invalid_argument(argument, value, format!("Expected YYYY-MM-DD ({})", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("csv_file", "masts.csv").is_ok());
        assert!(validate_path("csv_file", "").is_err());
        assert!(validate_path("csv_file", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_count() {
        assert_eq!(validate_positive_count("count", 5).unwrap(), 5);
        assert!(matches!(
            validate_positive_count("count", 0),
            Err(MastError::InvalidArgument { .. })
        ));
        assert!(validate_positive_count("count", -3).is_err());
    }

    #[test]
    fn test_validate_date_range() {
        let early = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let late = NaiveDate::from_ymd_opt(2010, 12, 31).unwrap();
        assert!(validate_date_range(early, late).is_ok());
        assert!(validate_date_range(early, early).is_ok());
        assert!(validate_date_range(late, early).is_err());
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(
            parse_iso_date("start", "1999-06-01").unwrap(),
            NaiveDate::from_ymd_opt(1999, 6, 1).unwrap()
        );
        assert!(parse_iso_date("start", "01/06/1999").is_err());
        assert!(parse_iso_date("start", "2019-02-30").is_err());
    }
}
