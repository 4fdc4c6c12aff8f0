// The four report queries. Each is a pure read over the record slice and
// returns a new collection; input order is preserved wherever the query does
// not sort.

use crate::domain::model::{MastRecord, TenantCount};
use crate::utils::error::{MastError, Result};
use crate::utils::validation::{validate_date_range, validate_positive_count};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// The `count` records with the lowest current rent, cheapest first.
///
/// Equal rents keep their input order. Asking for more records than exist
/// returns all of them. `count <= 0` is an `InvalidArgument` error.
pub fn top_rents(records: &[MastRecord], count: i64) -> Result<Vec<&MastRecord>> {
    let count = validate_positive_count("count", count)?;

    let mut sorted: Vec<&MastRecord> = records.iter().collect();
    // sort_by is stable
    sorted.sort_by(|a, b| a.current_rent.cmp(&b.current_rent));
    sorted.truncate(count);
    Ok(sorted)
}

pub fn lease_years_match(records: &[MastRecord], years: u32) -> Vec<&MastRecord> {
    records.iter().filter(|r| r.lease_years == years).collect()
}

/// Sum of current rent; fails rather than overflowing `Decimal`.
pub fn total_rent<'a, I>(records: I) -> Result<Decimal>
where
    I: IntoIterator<Item = &'a MastRecord>,
{
    records
        .into_iter()
        .try_fold(Decimal::ZERO, |total, r| total.checked_add(r.current_rent))
        .ok_or_else(|| MastError::ProcessingError {
            message: "total rent exceeds the representable range".to_string(),
        })
}

/// Number of masts per tenant, in order of each tenant's first appearance.
/// Names are compared exactly, so "Acme" and "ACME" are different tenants.
pub fn tenant_counts(records: &[MastRecord]) -> Vec<TenantCount> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<TenantCount> = Vec::new();

    for record in records {
        match position.get(record.tenant_name.as_str()) {
            Some(&idx) => counts[idx].masts += 1,
            None => {
                position.insert(&record.tenant_name, counts.len());
                counts.push(TenantCount {
                    tenant_name: record.tenant_name.clone(),
                    masts: 1,
                });
            }
        }
    }

    counts
}

/// Records whose lease starts within `[start, end]`, both ends inclusive.
pub fn lease_start_between(
    records: &[MastRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<&MastRecord>> {
    validate_date_range(start, end)?;
    Ok(records
        .iter()
        .filter(|r| (start..=end).contains(&r.lease_start_date))
        .collect())
}
