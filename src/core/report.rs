use crate::config::toml_config::validate_date_format;
use crate::config::ReportSettings;
use crate::domain::model::{MastRecord, QueryResult};
use crate::utils::error::Result;
use chrono::NaiveDate;
use std::fmt;

const NO_MATCHES: &str = "(no matching records)";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Plain-text table: header line, dashed rule, then rows. Columns are
/// separated by two spaces.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    align: Vec<Align>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: &[(&str, Align)]) -> Self {
        Self {
            headers: columns.iter().map(|(h, _)| h.to_string()).collect(),
            align: columns.iter().map(|(_, a)| *a).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn render_line(&self, cells: &[String], widths: &[usize]) -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .zip(&self.align)
            .map(|((cell, width), align)| match align {
                Align::Left => format!("{:<width$}", cell, width = *width),
                Align::Right => format!("{:>width$}", cell, width = *width),
            })
            .collect();
        padded.join("  ").trim_end().to_string()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut lines = vec![self.render_line(&self.headers, &widths)];
        lines.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("  "),
        );
        if self.is_empty() {
            lines.push(NO_MATCHES.to_string());
        }
        for row in &self.rows {
            lines.push(self.render_line(row, &widths));
        }
        lines.join("\n")
    }
}

/// Renders query results for the terminal.
#[derive(Debug, Clone, Default)]
pub struct ReportFormatter {
    settings: ReportSettings,
}

impl ReportFormatter {
    /// Rejects a date format that cannot render a calendar date.
    pub fn new(settings: ReportSettings) -> Result<Self> {
        validate_date_format("report.date_format", &settings.date_format)?;
        Ok(Self { settings })
    }

    pub fn render(&self, result: &QueryResult, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Table => Ok(self.render_text(result)),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        }
    }

    pub fn render_text(&self, result: &QueryResult) -> String {
        match result {
            QueryResult::TopRents { records } => {
                let title = format!(
                    "Top {} mobile phone mast sites in ascending order of current rent",
                    records.len()
                );
                section(&title, &self.top_rents_table(records))
            }
            QueryResult::LeaseYears {
                years,
                records,
                total_rent,
            } => {
                let mut total = Table::new(&[("Total Rent", Align::Right)]);
                total.push_row(vec![total_rent.to_string()]);
                [
                    section(
                        &format!("Mobile phone masts that have a lease of {} years", years),
                        &self.full_table(records),
                    ),
                    section(
                        &format!("Total rent for sites that have a lease of {} years", years),
                        &total,
                    ),
                ]
                .join("\n\n")
            }
            QueryResult::Tenants { tenants } => {
                let mut table = Table::new(&[
                    ("Tenant Name", Align::Left),
                    ("Number of Masts", Align::Right),
                ]);
                for tenant in tenants {
                    table.push_row(vec![tenant.tenant_name.clone(), tenant.masts.to_string()]);
                }
                section("Tenants and the number of masts associated to them", &table)
            }
            QueryResult::LeaseStartRange {
                start,
                end,
                records,
            } => {
                let title = format!(
                    "Rentals with a lease start date between {} and {}",
                    self.date(*start),
                    self.date(*end)
                );
                section(&title, &self.lease_range_table(records))
            }
        }
    }

    // `new` has already checked the format renders a calendar date.
    fn date(&self, date: NaiveDate) -> String {
        date.format(&self.settings.date_format).to_string()
    }

    fn optional_date(&self, date: Option<NaiveDate>) -> String {
        date.map(|d| self.date(d)).unwrap_or_default()
    }

    fn top_rents_table(&self, records: &[MastRecord]) -> Table {
        let mut table = Table::new(&[
            ("Property Name", Align::Left),
            ("Unit Name", Align::Left),
            ("Tenant Name", Align::Left),
            ("Current Rent", Align::Right),
        ]);
        for r in records {
            table.push_row(vec![
                r.site_id.property_name.clone(),
                r.site_id.unit_name.clone(),
                r.tenant_name.clone(),
                r.current_rent.to_string(),
            ]);
        }
        table
    }

    fn full_table(&self, records: &[MastRecord]) -> Table {
        let mut table = Table::new(&[
            ("Property Name", Align::Left),
            ("Property Address", Align::Left),
            ("Unit Name", Align::Left),
            ("Tenant Name", Align::Left),
            ("Lease Start Date", Align::Left),
            ("Lease End Date", Align::Left),
            ("Lease Years", Align::Right),
            ("Current Rent", Align::Right),
        ]);
        for r in records {
            table.push_row(vec![
                r.site_id.property_name.clone(),
                r.property_address.join(", "),
                r.site_id.unit_name.clone(),
                r.tenant_name.clone(),
                self.date(r.lease_start_date),
                self.optional_date(r.lease_end_date),
                r.lease_years.to_string(),
                r.current_rent.to_string(),
            ]);
        }
        table
    }

    fn lease_range_table(&self, records: &[MastRecord]) -> Table {
        let mut table = Table::new(&[
            ("Property Name", Align::Left),
            ("Unit Name", Align::Left),
            ("Tenant Name", Align::Left),
            ("Lease Start Date", Align::Left),
            ("Lease End Date", Align::Left),
            ("Lease Years", Align::Right),
            ("Current Rent", Align::Right),
        ]);
        for r in records {
            table.push_row(vec![
                r.site_id.property_name.clone(),
                r.site_id.unit_name.clone(),
                r.tenant_name.clone(),
                self.date(r.lease_start_date),
                self.optional_date(r.lease_end_date),
                r.lease_years.to_string(),
                r.current_rent.to_string(),
            ]);
        }
        table
    }
}

fn section(title: &str, table: &Table) -> String {
    format!("{} ...\n\n{}", title, table.render())
}
