pub mod toml_config;

pub use toml_config::{ParserSettings, ReportSettings, Settings};

#[cfg(feature = "cli")]
pub use cli::{CliConfig, QueryCommand};

#[cfg(feature = "cli")]
mod cli {
    use crate::core::report::ReportFormat;
    use crate::domain::model::Query;
    use crate::utils::error::Result;
    use crate::utils::validation::{parse_iso_date, validate_path, Validate};
    use clap::{Parser, Subcommand};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "mast-report")]
    #[command(about = "Analysis reports over mobile phone mast lease data provided as CSV")]
    pub struct CliConfig {
        /// Path of the mast lease CSV file
        pub csv_file: PathBuf,

        #[command(subcommand)]
        pub query: QueryCommand,

        #[arg(long, help = "Optional TOML settings file")]
        pub config: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
        pub format: ReportFormat,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON lines")]
        pub log_json: bool,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum QueryCommand {
        /// Top N sites in ascending order of current rent
        TopRents {
            #[arg(allow_negative_numbers = true)]
            count: i64,
        },
        /// Sites whose lease is exactly the given number of years, with their total rent
        LeaseYears { years: u32 },
        /// Tenants and the number of masts associated with each
        Tenants,
        /// Sites whose lease starts between two dates (inclusive, YYYY-MM-DD)
        LeaseStartRange { start: String, end: String },
    }

    impl CliConfig {
        /// Converts the chosen subcommand into a `Query`, rejecting malformed dates.
        pub fn query(&self) -> Result<Query> {
            Ok(match &self.query {
                QueryCommand::TopRents { count } => Query::TopRents { count: *count },
                QueryCommand::LeaseYears { years } => Query::LeaseYears { years: *years },
                QueryCommand::Tenants => Query::Tenants,
                QueryCommand::LeaseStartRange { start, end } => Query::LeaseStartRange {
                    start: parse_iso_date("start", start)?,
                    end: parse_iso_date("end", end)?,
                },
            })
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_path("csv_file", &self.csv_file.to_string_lossy())?;
            if let Some(config) = &self.config {
                validate_path("config", &config.to_string_lossy())?;
            }
            Ok(())
        }
    }

}
