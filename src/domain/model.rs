use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a mast site: the property it stands on and the leased unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SiteId {
    pub property_name: String,
    pub unit_name: String,
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.property_name, self.unit_name)
    }
}

/// One validated row of the mast lease dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MastRecord {
    pub site_id: SiteId,
    pub property_address: Vec<String>,
    pub tenant_name: String,
    pub lease_start_date: NaiveDate,
    pub lease_end_date: Option<NaiveDate>,
    pub lease_years: u32,
    pub current_rent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantCount {
    pub tenant_name: String,
    pub masts: usize,
}

/// The four report modes, one variant per query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    TopRents { count: i64 },
    LeaseYears { years: u32 },
    Tenants,
    LeaseStartRange { start: NaiveDate, end: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "query", rename_all = "snake_case")]
pub enum QueryResult {
    TopRents {
        records: Vec<MastRecord>,
    },
    LeaseYears {
        years: u32,
        records: Vec<MastRecord>,
        total_rent: Decimal,
    },
    Tenants {
        tenants: Vec<TenantCount>,
    },
    LeaseStartRange {
        start: NaiveDate,
        end: NaiveDate,
        records: Vec<MastRecord>,
    },
}

impl QueryResult {
    /// Number of rows the report will show.
    pub fn len(&self) -> usize {
        match self {
            Self::TopRents { records }
            | Self::LeaseYears { records, .. }
            | Self::LeaseStartRange { records, .. } => records.len(),
            Self::Tenants { tenants } => tenants.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
