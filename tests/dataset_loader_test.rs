// Tests for loading the dataset file from disk
// A missing or malformed file must yield an empty dataset, never a crash

mod common;

use crop_stats_service::dataset::{load_dataset, Dataset};
use std::io::Write;
use std::path::Path;

#[test]
fn test_load_valid_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(common::SCENARIO_JSON.as_bytes()).unwrap();

    let dataset = load_dataset(file.path());
    assert_eq!(dataset, common::scenario());
    assert_eq!(dataset.crop_names(), vec!["corn", "soy"]);
}

#[test]
fn test_missing_file_yields_empty_dataset() {
    let dataset = load_dataset(Path::new("/nonexistent/crop_data_static.json"));
    assert!(dataset.is_empty());
}

#[test]
fn test_malformed_json_yields_empty_dataset() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{\"soy\": {\"M1\": ").unwrap();

    let dataset = load_dataset(file.path());
    assert!(dataset.is_empty());
}

#[test]
fn test_wrong_shape_yields_empty_dataset() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{\"soy\": [1, 2, 3]}").unwrap();

    assert_eq!(load_dataset(file.path()), Dataset::default());
}

#[test]
fn test_round_trip_through_serialization() {
    let dataset = common::national();
    let json = serde_json::to_string(&dataset).unwrap();
    assert_eq!(Dataset::from_json_str(&json).unwrap(), dataset);
}

#[test]
fn test_bad_records_are_dropped_but_file_loads() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        br#"{
            "soy": {
                "M1": {"municipality_name": "Alpha", "state_code": "SP", "harvested_area": 100},
                "M2": {"municipality_name": "Beta", "state_code": "SP", "harvested_area": "lots"}
            }
        }"#,
    )
    .unwrap();

    let dataset = load_dataset(file.path());
    let soy = dataset.crop("soy").unwrap();
    assert_eq!(soy.len(), 1);
    assert!(soy.contains_key("M1"));
}
