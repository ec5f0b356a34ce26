//! Tests for layered configuration resolution.

use std::sync::Mutex;

use cdq_core::config::{CdqConfig, ConfigOverrides, StatsWindow};
use cdq_core::constants::{DEFAULT_MAD_MULTIPLE, DEFAULT_MAD_SCALE};
use cdq_core::errors::ConfigError;
use cdq_core::AdminLevel;

/// Serializes tests that touch `CDQ_*` environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn clear_env() {
    for var in ["CDQ_MAD_SCALE", "CDQ_MAD_MULTIPLE", "CDQ_STATS_WINDOW", "CDQ_PARALLEL"] {
        std::env::remove_var(var);
    }
}

#[test]
fn test_defaults() {
    let config = CdqConfig::default();
    assert_eq!(config.outliers.effective_mad_scale(), DEFAULT_MAD_SCALE);
    assert_eq!(config.outliers.effective_mad_multiple(), DEFAULT_MAD_MULTIPLE);
    assert_eq!(config.outliers.effective_stats_window(), StatsWindow::UnitSeries);
    assert!(!config.outliers.effective_parallel());

    let catalog = config.catalog.catalog().unwrap();
    assert_eq!(catalog.in_patient_group(), "ipd");
    let cols = config.catalog.admin_columns();
    assert_eq!(cols.columns(AdminLevel::District), vec!["area", "district"]);
}

#[test]
fn test_from_toml() {
    let config = CdqConfig::from_toml(
        r#"
        [outliers]
        mad_scale = 1.0
        stats_window = "unit_year"

        [catalog]
        indicators = ["anc1", "penta1", "ipd"]
        in_patient_group = "inpatient"
        district_column = "adminlevel_2"

        [catalog.groups]
        inpatient = ["ipd"]
        vacc = ["penta1"]
        "#,
    )
    .unwrap();

    assert_eq!(config.outliers.effective_mad_scale(), 1.0);
    assert_eq!(config.outliers.effective_stats_window(), StatsWindow::UnitYear);
    let catalog = config.catalog.catalog().unwrap();
    assert_eq!(catalog.all().len(), 3);
    assert!(catalog.is_in_patient("ipd"));
    assert_eq!(catalog.tracers(), vec!["anc1", "penta1"]);
    assert_eq!(
        config.catalog.admin_columns().columns(AdminLevel::District),
        vec!["area", "adminlevel_2"]
    );
}

#[test]
fn test_validation_rejects_non_positive_scale() {
    let err = CdqConfig::from_toml("[outliers]\nmad_scale = 0.0\n").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::ValidationFailed { ref field, .. } if field == "outliers.mad_scale"
    ));
}

#[test]
fn test_validation_rejects_bad_group() {
    let err = CdqConfig::from_toml(
        "[catalog]\nindicators = [\"anc1\"]\n[catalog.groups]\nipd = [\"ipd\"]\n",
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let err = CdqConfig::from_toml("[outliers\nmad_scale = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_layer_precedence() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("cdq.toml"),
        "[outliers]\nmad_scale = 2.0\nmad_multiple = 4.0\nparallel = false\n",
    )
    .unwrap();

    // Project file only.
    let config = CdqConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.outliers.effective_mad_scale(), 2.0);
    assert_eq!(config.outliers.effective_mad_multiple(), 4.0);

    // Env beats project file.
    std::env::set_var("CDQ_MAD_MULTIPLE", "3.0");
    std::env::set_var("CDQ_PARALLEL", "true");
    let config = CdqConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.outliers.effective_mad_scale(), 2.0);
    assert_eq!(config.outliers.effective_mad_multiple(), 3.0);
    assert!(config.outliers.effective_parallel());

    // Overrides beat env.
    let overrides = ConfigOverrides {
        mad_multiple: Some(6.0),
        ..Default::default()
    };
    let config = CdqConfig::load(dir.path(), Some(&overrides)).unwrap();
    assert_eq!(config.outliers.effective_mad_multiple(), 6.0);

    clear_env();
}

#[test]
fn test_unparsable_env_is_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    std::env::set_var("CDQ_STATS_WINDOW", "weekly");
    let dir = tempfile::tempdir().unwrap();
    let err = CdqConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidValue { ref field, .. } if field == "CDQ_STATS_WINDOW"
    ));
    clear_env();
}
