use crate::core::query;
use crate::domain::model::{MastRecord, Query, QueryResult};
use crate::domain::ports::RecordSource;
use crate::utils::error::Result;

/// Loads the full record set from a source and runs one query against it.
pub struct ReportEngine<S: RecordSource> {
    source: S,
}

impl<S: RecordSource> ReportEngine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn run(&self, query: &Query) -> Result<QueryResult> {
        tracing::info!("Reading data from {} ...", self.source.describe());
        let records = self.source.load()?;
        tracing::info!("Loaded {} mast records", records.len());

        let result = execute(&records, query)?;
        if result.is_empty() {
            tracing::warn!("{:?} matched no rows", query);
        } else {
            tracing::info!("{:?} matched {} rows", query, result.len());
        }
        Ok(result)
    }
}

/// Runs `query` over an in-memory record set.
pub fn execute(records: &[MastRecord], query: &Query) -> Result<QueryResult> {
    let owned = |found: Vec<&MastRecord>| found.into_iter().cloned().collect::<Vec<_>>();

    Ok(match *query {
        Query::TopRents { count } => QueryResult::TopRents {
            records: owned(query::top_rents(records, count)?),
        },
        Query::LeaseYears { years } => {
            let matched = query::lease_years_match(records, years);
            QueryResult::LeaseYears {
                years,
                total_rent: query::total_rent(matched.iter().copied())?,
                records: owned(matched),
            }
        }
        Query::Tenants => QueryResult::Tenants {
            tenants: query::tenant_counts(records),
        },
        Query::LeaseStartRange { start, end } => QueryResult::LeaseStartRange {
            start,
            end,
            records: owned(query::lease_start_between(records, start, end)?),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SiteId;
    use crate::utils::error::MastError;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::cell::Cell;

    struct MockSource {
        records: Vec<MastRecord>,
        loads: Cell<usize>,
    }

    impl MockSource {
        fn new(rents: &[i64]) -> Self {
            let records = rents
                .iter()
                .enumerate()
                .map(|(i, rent)| MastRecord {
                    site_id: SiteId {
                        property_name: format!("Site {}", i),
                        unit_name: format!("Unit {}", i),
                    },
                    property_address: vec![],
                    tenant_name: if i % 2 == 0 { "Acme" } else { "Beta" }.to_string(),
                    lease_start_date: NaiveDate::from_ymd_opt(2000 + i as i32, 1, 1).unwrap(),
                    lease_end_date: None,
                    lease_years: 10,
                    current_rent: Decimal::from(*rent),
                })
                .collect();
            Self {
                records,
                loads: Cell::new(0),
            }
        }
    }

    impl RecordSource for MockSource {
        fn load(&self) -> Result<Vec<MastRecord>> {
            self.loads.set(self.loads.get() + 1);
            Ok(self.records.clone())
        }

        fn describe(&self) -> String {
            "mock".to_string()
        }
    }

    struct FailingSource;

    impl RecordSource for FailingSource {
        fn load(&self) -> Result<Vec<MastRecord>> {
            Err(MastError::malformed_row(4, "broken"))
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    #[test]
    fn test_top_rents_example() {
        let engine = ReportEngine::new(MockSource::new(&[500, 300, 300, 900]));
        let result = engine.run(&Query::TopRents { count: 2 }).unwrap();
        match result {
            QueryResult::TopRents { records } => {
                let units: Vec<&str> =
                    records.iter().map(|r| r.site_id.unit_name.as_str()).collect();
                assert_eq!(units, vec!["Unit 1", "Unit 2"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(engine.source.loads.get(), 1);
    }

    #[test]
    fn test_lease_years_carries_total() {
        let engine = ReportEngine::new(MockSource::new(&[100, 250]));
        let result = engine.run(&Query::LeaseYears { years: 10 }).unwrap();
        assert_eq!(
            result,
            QueryResult::LeaseYears {
                years: 10,
                records: engine.source.records.clone(),
                total_rent: Decimal::from(350),
            }
        );
    }

    #[test]
    fn test_tenants() {
        let engine = ReportEngine::new(MockSource::new(&[1, 2, 3]));
        let result = engine.run(&Query::Tenants).unwrap();
        match result {
            QueryResult::Tenants { tenants } => {
                assert_eq!(tenants.len(), 2);
                assert_eq!(tenants[0].tenant_name, "Acme");
                assert_eq!(tenants[0].masts, 2);
                assert_eq!(tenants[1].masts, 1);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_argument_error_propagates() {
        let engine = ReportEngine::new(MockSource::new(&[1]));
        let start = NaiveDate::from_ymd_opt(2005, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
        assert!(matches!(
            engine.run(&Query::LeaseStartRange { start, end }),
            Err(MastError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_rent_overflow_is_error_not_panic() {
        let mut source = MockSource::new(&[1, 2]);
        for record in &mut source.records {
            record.current_rent = Decimal::MAX;
        }
        let engine = ReportEngine::new(source);
        assert!(matches!(
            engine.run(&Query::LeaseYears { years: 10 }),
            Err(MastError::ProcessingError { .. })
        ));
    }

    #[test]
    fn test_source_error_propagates() {
        let engine = ReportEngine::new(FailingSource);
        assert!(matches!(
            engine.run(&Query::Tenants),
            Err(MastError::MalformedRow { row: 4, .. })
        ));
    }
}
