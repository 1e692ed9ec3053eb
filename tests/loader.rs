use std::fs;

use case_pulse::{
    config::Settings,
    data::loader::{self, LoadError},
};
use chrono::NaiveDate;

const STATES_CSV: &str = "\
date,state,fips,cases,deaths
2020-03-02,Washington,53,18,6
2020-03-01,Washington,53,11,3
2020-03-02,Oregon,41,3,0
";

#[test]
fn reads_state_reports_and_ignores_extra_columns() {
    let dataset = loader::load_reader(STATES_CSV.as_bytes()).unwrap();
    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.regions(), vec!["Oregon", "Washington"]);
    assert_eq!(
        dataset.latest_date(),
        NaiveDate::from_ymd_opt(2020, 3, 2)
    );
    let first = &dataset.observations()[0];
    assert_eq!(first.region, "Washington");
    assert_eq!(first.cumulative_cases, 18);
    assert_eq!(first.cumulative_deaths, 6);
}

#[test]
fn accepts_country_column() {
    let csv = "date,country,cases,deaths\n2020-05-01,Italy,205463,27967\n";
    let dataset = loader::load_reader(csv.as_bytes()).unwrap();
    assert_eq!(dataset.regions(), vec!["Italy"]);
}

#[test]
fn malformed_rows_are_rejected() {
    let csv = "date,state,cases,deaths\nnot-a-date,Ohio,1,0\n";
    assert!(matches!(
        loader::load_reader(csv.as_bytes()),
        Err(LoadError::Row { .. })
    ));
    let header_only = "date,state,cases,deaths\n";
    assert!(matches!(
        loader::load_reader(header_only.as_bytes()),
        Err(LoadError::Empty)
    ));
}

#[test]
fn newest_report_is_picked_from_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("us-states-2020-03-01.csv"), STATES_CSV).unwrap();
    fs::write(dir.path().join("us-states-2020-03-02.csv"), STATES_CSV).unwrap();
    fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();

    let latest = loader::latest_report(dir.path()).unwrap();
    assert_eq!(
        latest.file_name().and_then(|n| n.to_str()),
        Some("us-states-2020-03-02.csv")
    );

    let settings = Settings {
        data_dir: dir.path().to_path_buf(),
        data_file: None,
        default_region: "Oregon".into(),
    };
    assert_eq!(loader::load(&settings).unwrap().len(), 3);
}

#[test]
fn explicit_file_overrides_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.csv");
    fs::write(&path, STATES_CSV).unwrap();
    let settings = Settings::for_file(&path);
    assert_eq!(loader::resolve_report(&settings).unwrap(), path);
}

#[test]
fn empty_data_dir_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        loader::latest_report(dir.path()),
        Err(LoadError::NoReport(_))
    ));
}
