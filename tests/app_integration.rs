use std::fs;
use tracing::info;

mod test_utils {
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Writes a config file with a 30/70 split and known volume/horizon.
    pub fn write_config() -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp config");
        write!(
            file,
            r#"
entities:
  - name: "A"
    percentage: 30.0
  - name: "B"
    percentage: 70.0
credits_per_month: 1000.0
years: 1
currency: "$"
"#
        )
        .expect("Failed to write config");
        file
    }

    /// Writes a three-row price CSV, one row with an empty price field.
    pub fn write_price_csv() -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp csv");
        write!(
            file,
            "Week Of,Weekly Average Credit Price ($)\n\
             2024-01-01,5.00\n\
             2024-01-08,\n\
             2024-01-15,6.00\n"
        )
        .expect("Failed to write csv");
        file
    }
}

#[test_log::test]
fn test_full_report_flow() {
    let config_file = test_utils::write_config();
    let csv_file = test_utils::write_price_csv();

    info!("Running report over worked-example fixtures");
    let result = credcast::run_command(
        credcast::AppCommand::Report {
            csv: Some(csv_file.path().to_path_buf()),
            credits_per_month: None,
            years: None,
        },
        Some(config_file.path().to_str().unwrap()),
    );
    assert!(result.is_ok(), "Report failed with: {:?}", result.err());
}

#[test_log::test]
fn test_report_with_overrides() {
    let config_file = test_utils::write_config();
    let csv_file = test_utils::write_price_csv();

    let result = credcast::run_command(
        credcast::AppCommand::Report {
            csv: Some(csv_file.path().to_path_buf()),
            credits_per_month: Some(2000.0),
            years: "10".parse().ok(),
        },
        Some(config_file.path().to_str().unwrap()),
    );
    assert!(result.is_ok(), "Report failed with: {:?}", result.err());
}

#[test_log::test]
fn test_report_without_csv_is_noop() {
    // "No file selected" leaves the (empty) dataset unchanged and renders
    // the no-data view instead of failing.
    let config_file = test_utils::write_config();

    let result = credcast::run_command(
        credcast::AppCommand::Report {
            csv: None,
            credits_per_month: None,
            years: None,
        },
        Some(config_file.path().to_str().unwrap()),
    );
    assert!(result.is_ok(), "Report failed with: {:?}", result.err());
}

#[test_log::test]
fn test_history_flow() {
    let config_file = test_utils::write_config();
    let csv_file = test_utils::write_price_csv();

    let result = credcast::run_command(
        credcast::AppCommand::History {
            csv: Some(csv_file.path().to_path_buf()),
        },
        Some(config_file.path().to_str().unwrap()),
    );
    assert!(result.is_ok(), "History failed with: {:?}", result.err());
}

#[test_log::test]
fn test_non_tabular_file_degrades_silently() {
    let config_file = test_utils::write_config();
    let garbage = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    fs::write(garbage.path(), b"\x00\x01\x02 not a csv at all").expect("Failed to write bytes");

    let result = credcast::run_command(
        credcast::AppCommand::Report {
            csv: Some(garbage.path().to_path_buf()),
            credits_per_month: None,
            years: None,
        },
        Some(config_file.path().to_str().unwrap()),
    );
    assert!(result.is_ok(), "Report failed with: {:?}", result.err());
}

#[test_log::test]
fn test_missing_config_file_is_an_error() {
    let result = credcast::run_command(
        credcast::AppCommand::History { csv: None },
        Some("/nonexistent/credcast-config.yaml"),
    );
    assert!(result.is_err());
}

// End-to-end pipeline semantics through the public state API: two surviving
// rows, latest price 6.00, and a 30/70 split of the projected total.
#[test_log::test]
fn test_pipeline_worked_example() {
    use credcast::core::config::AppConfig;
    use credcast::core::state::AppState;

    let csv_file = test_utils::write_price_csv();
    let config: AppConfig = load_config_fixture();

    let state = AppState::from_config(&config)
        .ingest_file(Some(csv_file.path()))
        .expect("ingest failed");

    assert_eq!(state.observations().len(), 2);
    assert_eq!(state.latest_price(), Some(6.00));

    // 6.00 * 1000 * 12 * 1 = 72000, split 30/70.
    let results = state.projection();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].entity_name, "A");
    assert_eq!(results[0].revenue, 0.30 * 72000.0);
    assert_eq!(results[1].revenue, 0.70 * 72000.0);
    assert!(state.percentage_warning().is_none());
}

fn load_config_fixture() -> credcast::core::config::AppConfig {
    let config_file = test_utils::write_config();
    credcast::core::config::AppConfig::load_from_path(config_file.path())
        .expect("Failed to load config fixture")
}
