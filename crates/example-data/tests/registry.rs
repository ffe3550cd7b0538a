//! File-based registry loading tests.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::fs;

use example_data::{RegistryError, SeedRegistry};
use rstest::rstest;
use tempfile::TempDir;

const VALID_JSON: &str = r#"{
    "version": 1,
    "referenceDate": "2026-01-15",
    "departments": ["Engineering", "Finance"],
    "seeds": [
        {"name": "desert-falcon", "seed": 2026, "employeeCount": 12},
        {"name": "harbour-seal", "seed": 1234, "employeeCount": 5}
    ]
}"#;

#[rstest]
fn loads_registry_from_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("seeds.json");
    fs::write(&path, VALID_JSON).expect("write registry");

    let registry = SeedRegistry::from_file(&path).expect("registry loads");

    assert_eq!(registry.seeds().len(), 2);
    let seed = registry.find_seed("harbour-seal").expect("seed found");
    assert_eq!(seed.employee_count(), 5);
}

#[rstest]
fn missing_file_reports_io_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("absent.json");

    let result = SeedRegistry::from_file(&path);

    match result {
        Err(RegistryError::IoError { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected IoError, got {other:?}"),
    }
}

#[rstest]
fn repository_fixture_registry_is_valid() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../backend/fixtures/example-data/seeds.json");

    let registry = SeedRegistry::from_file(&path).expect("fixture registry loads");

    assert!(registry.find_seed("desert-falcon").is_ok());
}
