use crate::domain::model::MastRecord;
use crate::utils::error::Result;

/// Where the report engine gets its records from.
///
/// Implementations must be all-or-nothing: either every record in input order,
/// or an error and nothing.
pub trait RecordSource {
    fn load(&self) -> Result<Vec<MastRecord>>;

    /// Human-readable name used in log lines.
    fn describe(&self) -> String;
}
