use chrono::NaiveDate;
use mast_report::config::ParserSettings;
use mast_report::{
    execute, read_records, CsvFile, MastError, Query, QueryResult, RecordSource, ReportEngine,
    ReportFormat, ReportFormatter, Settings,
};
use rust_decimal::Decimal;
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample_phone_masts.csv")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn properties(records: &[mast_report::MastRecord]) -> Vec<&str> {
    records
        .iter()
        .map(|r| r.site_id.property_name.as_str())
        .collect()
}

#[test]
fn test_fixture_parses_every_row_in_order() {
    let records = read_records(fixture()).unwrap();
    assert_eq!(records.len(), 6);
    assert_eq!(records[0].site_id.property_name, "Beecroft Hill");
    assert_eq!(
        records[2].site_id.unit_name,
        "Seacroft Gate (Chase) block 2, WYK 0414"
    );
    assert_eq!(records[5].lease_start_date, date(2001, 4, 12));
    assert_eq!(records[0].current_rent, Decimal::from(23950));
}

#[test]
fn test_top_rents_from_file() {
    let engine = ReportEngine::new(CsvFile::new(fixture(), ParserSettings::default()));
    let result = engine.run(&Query::TopRents { count: 3 }).unwrap();
    let QueryResult::TopRents { records } = result else {
        panic!("expected top rents result");
    };
    assert_eq!(
        properties(&records),
        vec![
            "Potternewton Crescent",
            "Seacroft Gate (Chase) - Block 1",
            "Queenswood Heights"
        ]
    );
}

#[test]
fn test_top_rents_is_subset_and_bounded() {
    let records = read_records(fixture()).unwrap();
    for count in 1..=10 {
        let QueryResult::TopRents { records: top } =
            execute(&records, &Query::TopRents { count }).unwrap()
        else {
            panic!("expected top rents result");
        };
        assert_eq!(top.len(), (count as usize).min(records.len()));
        assert!(top.iter().all(|r| records.contains(r)));
        assert!(top.windows(2).all(|w| w[0].current_rent <= w[1].current_rent));
    }
}

#[test]
fn test_lease_years_from_file() {
    let records = read_records(fixture()).unwrap();
    let result = execute(&records, &Query::LeaseYears { years: 25 }).unwrap();
    let QueryResult::LeaseYears {
        records: matched,
        total_rent,
        ..
    } = result
    else {
        panic!("expected lease years result");
    };
    assert_eq!(matched.len(), 4);
    assert!(matched.iter().all(|r| r.lease_years == 25));
    assert_eq!(
        records.iter().filter(|r| r.lease_years == 25).count(),
        matched.len()
    );
    assert_eq!(total_rent, Decimal::from(40350));
}

#[test]
fn test_tenant_counts_from_file() {
    let records = read_records(fixture()).unwrap();
    let QueryResult::Tenants { tenants } = execute(&records, &Query::Tenants).unwrap() else {
        panic!("expected tenants result");
    };
    let pairs: Vec<(&str, usize)> = tenants
        .iter()
        .map(|t| (t.tenant_name.as_str(), t.masts))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("Arqiva Services ltd", 1),
            ("Arqiva Ltd", 1),
            ("Vodafone Ltd.", 1),
            ("Vodafone Ltd", 2),
            ("O2 (UK) Ltd", 1),
        ]
    );
    assert_eq!(tenants.iter().map(|t| t.masts).sum::<usize>(), records.len());
}

#[test]
fn test_lease_start_range_from_file() {
    let records = read_records(fixture()).unwrap();
    let result = execute(
        &records,
        &Query::LeaseStartRange {
            start: date(1999, 6, 1),
            end: date(2007, 8, 31),
        },
    )
    .unwrap();
    let QueryResult::LeaseStartRange { records: found, .. } = result else {
        panic!("expected range result");
    };
    assert_eq!(found.len(), 5);
    assert!(!properties(&found).contains(&"Beecroft Hill"));

    let single = execute(
        &records,
        &Query::LeaseStartRange {
            start: date(2004, 11, 8),
            end: date(2004, 11, 8),
        },
    )
    .unwrap();
    let QueryResult::LeaseStartRange { records: found, .. } = single else {
        panic!("expected range result");
    };
    assert_eq!(properties(&found), vec!["Queenswood Heights"]);
}

#[test]
fn test_malformed_row_rejects_whole_file() {
    let file = write_csv(
        "Property Name,Unit Name,Tenant Name,Lease Start Date,Lease Years,Current Rent\n\
         A,U1,Acme,01 Jan 2001,10,100\n\
         B,U2,Acme,01 Jan 2001,ten,100\n\
         C,U3,Acme,01 Jan 2001,10,100\n",
    );
    let engine = ReportEngine::new(CsvFile::new(file.path(), ParserSettings::default()));
    match engine.run(&Query::Tenants) {
        Err(MastError::MalformedRow { row, reason }) => {
            assert_eq!(row, 2);
            assert!(reason.contains("Lease Years"));
        }
        other => panic!("expected malformed row error, got {other:?}"),
    }
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let source = CsvFile::new(dir.path().join("absent.csv"), ParserSettings::default());
    assert!(matches!(source.load(), Err(MastError::MissingFile { .. })));
}

#[test]
fn test_settings_drive_parser_and_report() {
    let dir = TempDir::new().unwrap();
    let settings_path = dir.path().join("settings.toml");
    std::fs::write(
        &settings_path,
        "[parser]\ndate_formats = [\"%Y/%m/%d\"]\ndelimiter = \";\"\n\n[report]\ndate_format = \"%Y-%m-%d\"\n",
    )
    .unwrap();
    let csv_path = dir.path().join("masts.csv");
    std::fs::write(
        &csv_path,
        "Property Name;Unit Name;Tenant Name;Lease Start Date;Lease End Date;Lease Years;Current Rent\n\
         P1;U1;Acme;2001/02/03;2011/02/02;10;1234.50\n",
    )
    .unwrap();

    let settings = Settings::from_file(&settings_path).unwrap();
    let engine = ReportEngine::new(CsvFile::new(&csv_path, settings.parser.clone()));
    let result = engine.run(&Query::LeaseYears { years: 10 }).unwrap();
    let text = ReportFormatter::new(settings.report)
        .unwrap()
        .render(&result, ReportFormat::Table)
        .unwrap();

    assert!(text.contains("2001-02-03"));
    assert!(text.contains("2011-02-02"));
    assert!(text.contains("1234.50"));
}

#[test]
fn test_json_report_round_trips_through_serde() {
    let records = read_records(fixture()).unwrap();
    let result = execute(&records, &Query::Tenants).unwrap();
    let json = ReportFormatter::default()
        .render(&result, ReportFormat::Json)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["query"], "tenants");
    assert_eq!(value["tenants"][3]["tenant_name"], "Vodafone Ltd");
    assert_eq!(value["tenants"][3]["masts"], 2);
}
