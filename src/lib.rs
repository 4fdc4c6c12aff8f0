pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, QueryCommand};

pub use crate::config::Settings;
pub use crate::core::engine::{execute, ReportEngine};
pub use crate::core::parser::{read_records, CsvFile, RecordParser};
pub use crate::core::report::{ReportFormat, ReportFormatter};
pub use crate::domain::model::{MastRecord, Query, QueryResult, SiteId, TenantCount};
pub use crate::domain::ports::RecordSource;
pub use crate::utils::error::{MastError, Result};
