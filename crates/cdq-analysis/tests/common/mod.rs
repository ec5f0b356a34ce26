//! Shared fixtures for cdq-analysis integration tests.
#![allow(dead_code)]

use std::collections::BTreeMap;

use cdq_analysis::OutlierCore;
use cdq_core::config::OutlierConfig;
use cdq_core::{AdminColumns, Dataset, IndicatorCatalog};

pub const INDICATORS: [&str; 3] = ["anc1", "penta1", "ipd"];

/// Three indicators; `ipd` is the in-patient group.
pub fn catalog() -> IndicatorCatalog {
    catalog_with_in_patient(&["ipd"])
}

pub fn catalog_with_in_patient(members: &[&str]) -> IndicatorCatalog {
    let mut groups = BTreeMap::new();
    groups.insert("anc".to_string(), vec!["anc1".to_string()]);
    groups.insert("vacc".to_string(), vec!["penta1".to_string()]);
    groups.insert(
        "ipd".to_string(),
        members.iter().map(|s| s.to_string()).collect(),
    );
    IndicatorCatalog::new(
        INDICATORS.iter().map(|s| s.to_string()).collect(),
        groups,
        "ipd",
    )
    .unwrap()
}

pub fn core() -> OutlierCore {
    OutlierCore::new(catalog(), AdminColumns::default(), &OutlierConfig::default())
}

pub fn core_with(config: OutlierConfig) -> OutlierCore {
    OutlierCore::new(catalog(), AdminColumns::default(), &config)
}

pub fn empty_dataset() -> Dataset {
    Dataset::new(["area", "district"], INDICATORS).unwrap()
}

/// Push one (area, district, year, month) row with values for anc1, penta1, ipd.
pub fn push(
    ds: &mut Dataset,
    area: &str,
    district: &str,
    year: i32,
    month: u32,
    values: [Option<f64>; 3],
) {
    ds.push_row(&[area, district], year, month, &values).unwrap();
}

/// A steady twelve-month series for one district with the same value for
/// every indicator.
pub fn steady_year(ds: &mut Dataset, area: &str, district: &str, year: i32, value: f64) {
    for month in 1..=12 {
        push(ds, area, district, year, month, [Some(value); 3]);
    }
}
