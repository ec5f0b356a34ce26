//! DistrictRollupBuilder: worst month per district-year, then mean across
//! districts per year.

mod common;

use cdq_analysis::rollup::{ArtifactKind, DistrictRollupBuilder};
use cdq_core::errors::{AnalysisError, UsageError};
use cdq_core::{AdminLevel, Dataset};

use common::*;

/// 2022: A and B steady. 2023: A flags [0, NA, NA], B has a spike,
/// C has a single observation.
fn three_districts() -> Dataset {
    let mut ds = empty_dataset();
    for district in ["A", "B"] {
        for month in 1..=12 {
            push(&mut ds, "N", district, 2022, month, [Some(10.0), Some(10.0), None]);
        }
    }
    push(&mut ds, "N", "A", 2023, 1, [Some(10.0), Some(10.0), None]);
    push(&mut ds, "N", "A", 2023, 2, [None, Some(10.0), None]);
    push(&mut ds, "N", "A", 2023, 3, [None, Some(10.0), None]);
    push(&mut ds, "N", "B", 2023, 1, [Some(10.0), Some(10.0), None]);
    push(&mut ds, "N", "B", 2023, 2, [Some(500.0), Some(10.0), None]);
    push(&mut ds, "S", "C", 2023, 1, [Some(7.0), None, None]);
    ds
}

#[test]
fn test_worst_month_then_mean_across_districts() {
    let core = core();
    let rollup = DistrictRollupBuilder::new(&core)
        .summarize(&three_districts())
        .unwrap();

    assert_eq!(rollup.len(), 2);
    let years: Vec<i32> = rollup.rows.iter().map(|r| r.year).collect();
    assert_eq!(years, vec![2022, 2023]);

    let y2022 = &rollup.rows[0];
    assert_eq!(rollup.rate(y2022, "anc1"), Some(100.0));
    assert_eq!(rollup.rate(y2022, "penta1"), Some(100.0));

    // A reduces to 0, B to 1, C is missing and drops out of the mean.
    let y2023 = &rollup.rows[1];
    assert_eq!(rollup.rate(y2023, "anc1"), Some(50.0));
    assert_eq!(rollup.rate(y2023, "penta1"), Some(100.0));
    assert_eq!(y2023.mean_out_all, Some(75.0));
    assert_eq!(y2023.mean_out_four, Some(75.0));
}

#[test]
fn test_indicator_without_data_is_missing() {
    let core = core();
    let rollup = DistrictRollupBuilder::new(&core)
        .summarize(&three_districts())
        .unwrap();
    for row in &rollup.rows {
        assert_eq!(rollup.rate(row, "ipd"), None);
    }
    // ipd being missing leaves mean_out_all over the remaining indicators.
    assert_eq!(rollup.rows[0].mean_out_all, Some(100.0));
}

#[test]
fn test_two_decimal_rounding() {
    let mut ds = empty_dataset();
    for district in ["A", "B", "D"] {
        steady_year(&mut ds, "N", district, 2023, 40.0);
    }
    push(&mut ds, "N", "D", 2023, 6, [Some(900.0), Some(40.0), Some(40.0)]);

    let core = core();
    let rollup = DistrictRollupBuilder::new(&core).summarize(&ds).unwrap();
    assert_eq!(rollup.len(), 1);
    let row = &rollup.rows[0];
    // June in D averages (40 + 900) / 2 = 470; one district in three flagged.
    assert_eq!(rollup.rate(row, "anc1"), Some(66.67));
    assert_eq!(rollup.rate(row, "penta1"), Some(100.0));
    assert_eq!(row.mean_out_four, Some(83.33));
}

#[test]
fn test_output_has_no_admin_columns() {
    let core = core();
    let rollup = DistrictRollupBuilder::new(&core)
        .summarize(&three_districts())
        .unwrap();

    assert_eq!(rollup.kind, ArtifactKind::DistrictOutlierSummary);
    assert_eq!(rollup.metadata.admin_level, AdminLevel::District);
    assert!(rollup.admin_columns.is_empty());
    assert!(rollup.rows.iter().all(|r| r.admin.is_empty()));
    assert_eq!(rollup.column_names()[0], "year");

    let json = rollup.to_json();
    assert_eq!(json[1]["year"], 2023);
    assert_eq!(json[1]["anc1_outlier5std"], 50.0);
    assert!(json[1]["ipd_outlier5std"].is_null());
    assert!(json[1].get("district").is_none());
}

#[test]
fn test_rejects_table_below_district_granularity() {
    let core = core();
    let table = core
        .compute_all(&three_districts(), AdminLevel::AdminLevel1)
        .unwrap();
    let err = DistrictRollupBuilder::summarize_table(&table).unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::Usage(UsageError::UnsupportedAdminLevel { ref level, .. })
            if level == "adminlevel_1"
    ));
}

#[test]
fn test_missing_admin_column_is_schema_error() {
    let mut ds = Dataset::new(["area"], ["anc1", "penta1", "ipd"]).unwrap();
    ds.push_row(&["N"], 2023, 1, &[Some(1.0), Some(1.0), Some(1.0)])
        .unwrap();
    let core = core();
    let err = DistrictRollupBuilder::new(&core).summarize(&ds).unwrap_err();
    assert!(matches!(err, AnalysisError::Schema(_)));
}
