pub mod engine;
pub mod parser;
pub mod query;
pub mod report;

pub use crate::domain::model::{MastRecord, Query, QueryResult, SiteId, TenantCount};
pub use crate::domain::ports::RecordSource;
pub use crate::utils::error::Result;
