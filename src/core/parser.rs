use crate::config::ParserSettings;
use crate::domain::model::{MastRecord, SiteId};
use crate::domain::ports::RecordSource;
use crate::utils::error::{MastError, Result};
use chrono::NaiveDate;
use csv::StringRecord;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const PROPERTY_NAME: &str = "Property Name";
pub const PROPERTY_ADDRESS: &str = "Property Address";
pub const UNIT_NAME: &str = "Unit Name";
pub const TENANT_NAME: &str = "Tenant Name";
pub const LEASE_START_DATE: &str = "Lease Start Date";
pub const LEASE_END_DATE: &str = "Lease End Date";
pub const LEASE_YEARS: &str = "Lease Years";
pub const CURRENT_RENT: &str = "Current Rent";

const REQUIRED_COLUMNS: [&str; 6] = [
    PROPERTY_NAME,
    UNIT_NAME,
    TENANT_NAME,
    LEASE_START_DATE,
    LEASE_YEARS,
    CURRENT_RENT,
];

/// Column positions resolved from the header row.
#[derive(Debug)]
struct ColumnLayout {
    width: usize,
    property_name: usize,
    property_address: Vec<usize>,
    unit_name: usize,
    tenant_name: usize,
    lease_start_date: usize,
    lease_end_date: Option<usize>,
    lease_years: usize,
    current_rent: usize,
}

fn is_address_column(name: &str) -> bool {
    if name == PROPERTY_ADDRESS {
        return true;
    }
    // "Property Address [1]" .. "Property Address [4]"
    name.strip_prefix(PROPERTY_ADDRESS)
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix('['))
        .and_then(|rest| rest.strip_suffix(']'))
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

fn normalize_header_name(name: &str) -> &str {
    name.trim_start_matches('\u{feff}').trim()
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let mut named: Vec<(&str, usize)> = Vec::new();
        let mut property_address = Vec::new();

        for (idx, raw) in headers.iter().enumerate() {
            let name = normalize_header_name(raw);
            if name.is_empty() {
                continue;
            }
            if named.iter().any(|(seen, _)| *seen == name) {
                return Err(MastError::InvalidHeader {
                    reason: format!("column '{}' appears more than once", name),
                });
            }
            if is_address_column(name) {
                property_address.push(idx);
            } else if !REQUIRED_COLUMNS.contains(&name) && name != LEASE_END_DATE {
                return Err(MastError::InvalidHeader {
                    reason: format!("unexpected column '{}'", name),
                });
            }
            named.push((name, idx));
        }

        let find = |column: &str| named.iter().find(|(n, _)| *n == column).map(|(_, i)| *i);
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| find(*c).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(MastError::InvalidHeader {
                reason: format!("missing required column(s): {}", missing.join(", ")),
            });
        }

        // Required columns are known present past this point.
        let required = |column: &str| find(column).unwrap_or_default();
        Ok(Self {
            width: headers.len(),
            property_name: required(PROPERTY_NAME),
            property_address,
            unit_name: required(UNIT_NAME),
            tenant_name: required(TENANT_NAME),
            lease_start_date: required(LEASE_START_DATE),
            lease_end_date: find(LEASE_END_DATE),
            lease_years: required(LEASE_YEARS),
            current_rent: required(CURRENT_RENT),
        })
    }
}

/// Turns raw CSV rows into validated `MastRecord`s.
#[derive(Debug, Clone, Default)]
pub struct RecordParser {
    settings: ParserSettings,
}

impl RecordParser {
    pub fn new(settings: ParserSettings) -> Self {
        Self { settings }
    }

    /// Parses a whole CSV document. Any bad row rejects the document.
    pub fn parse<R: Read>(&self, reader: R) -> Result<Vec<MastRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.settings.delimiter as u8)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let layout = ColumnLayout::from_headers(&headers)?;
        tracing::debug!("Resolved CSV layout: {:?}", layout);

        let mut records = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let row = idx + 1;
            let raw = result.map_err(|e| MastError::malformed_row(row, e.to_string()))?;
            records.push(self.parse_row(row, &raw, &layout)?);
        }

        Ok(records)
    }

    fn parse_row(
        &self,
        row: usize,
        raw: &StringRecord,
        layout: &ColumnLayout,
    ) -> Result<MastRecord> {
        if raw.len() < layout.width {
            return Err(MastError::malformed_row(
                row,
                format!("expected {} columns, found {}", layout.width, raw.len()),
            ));
        }
        if raw.iter().skip(layout.width).any(|extra| !extra.is_empty()) {
            return Err(MastError::malformed_row(
                row,
                format!("expected {} columns, found {}", layout.width, raw.len()),
            ));
        }

        let text = |idx: usize, column: &str| -> Result<String> {
            let value = raw.get(idx).unwrap_or_default();
            if value.is_empty() {
                return Err(MastError::malformed_row(row, format!("{} is empty", column)));
            }
            Ok(value.to_string())
        };

        let current_rent = {
            let value = raw.get(layout.current_rent).unwrap_or_default();
            let rent = Decimal::from_str(value)
                .or_else(|_| Decimal::from_scientific(value))
                .map_err(|_| {
                    MastError::malformed_row(
                        row,
                        format!("{} '{}' is not a number", CURRENT_RENT, value),
                    )
                })?;
            if rent.is_sign_negative() && !rent.is_zero() {
                return Err(MastError::malformed_row(
                    row,
                    format!("{} '{}' is negative", CURRENT_RENT, value),
                ));
            }
            rent
        };

        let lease_years = {
            let value = raw.get(layout.lease_years).unwrap_or_default();
            match value.parse::<u32>() {
                Ok(years) if years > 0 => years,
                _ => {
                    return Err(MastError::malformed_row(
                        row,
                        format!("{} '{}' is not a positive integer", LEASE_YEARS, value),
                    ))
                }
            }
        };

        let lease_end_date = match layout.lease_end_date {
            Some(idx) => match raw.get(idx).unwrap_or_default() {
                "" => None,
                value => Some(self.parse_date(row, LEASE_END_DATE, value)?),
            },
            None => None,
        };

        Ok(MastRecord {
            site_id: SiteId {
                property_name: text(layout.property_name, PROPERTY_NAME)?,
                unit_name: text(layout.unit_name, UNIT_NAME)?,
            },
            property_address: layout
                .property_address
                .iter()
                .filter_map(|idx| raw.get(*idx))
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect(),
            tenant_name: text(layout.tenant_name, TENANT_NAME)?,
            lease_start_date: self.parse_date(
                row,
                LEASE_START_DATE,
                raw.get(layout.lease_start_date).unwrap_or_default(),
            )?,
            lease_end_date,
            lease_years,
            current_rent,
        })
    }

    fn parse_date(&self, row: usize, column: &str, value: &str) -> Result<NaiveDate> {
        self.settings
            .date_formats
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
            .ok_or_else(|| {
                MastError::malformed_row(
                    row,
                    format!(
                        "{} '{}' does not match any of: {}",
                        column,
                        value,
                        self.settings.date_formats.join(", ")
                    ),
                )
            })
    }
}

/// A mast lease CSV on disk.
#[derive(Debug, Clone)]
pub struct CsvFile {
    path: PathBuf,
    parser: RecordParser,
}

impl CsvFile {
    pub fn new(path: impl Into<PathBuf>, settings: ParserSettings) -> Self {
        Self {
            path: path.into(),
            parser: RecordParser::new(settings),
        }
    }
}

impl RecordSource for CsvFile {
    fn load(&self) -> Result<Vec<MastRecord>> {
        let missing = |source: std::io::Error| MastError::MissingFile {
            path: self.path.clone(),
            source,
        };

        if !self.path.is_file() {
            return Err(missing(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "not a regular file",
            )));
        }

        tracing::debug!("Reading data from {}", self.path.display());
        let file = File::open(&self.path).map_err(missing)?;
        self.parser.parse(file)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Convenience wrapper: parse the CSV at `path` with default settings.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<MastRecord>> {
    CsvFile::new(path.as_ref(), ParserSettings::default()).load()
}
