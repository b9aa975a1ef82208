use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use lru_cache::{ErrorCode, Script, ScriptError, parse_script, validate_script};

#[derive(Debug, Deserialize)]
struct ExpectedError {
    code: String,
    path: Option<String>,
}

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_script(case: &str) -> Script {
    let script_path = fixtures_dir().join(case).join("script.yaml");
    let yaml = fs::read_to_string(&script_path)
        .unwrap_or_else(|_| panic!("failed to read {}", script_path.display()));
    parse_script(&yaml).unwrap_or_else(|err| {
        panic!("failed to parse YAML {}: {}", script_path.display(), err)
    })
}

fn load_expected_errors(case: &str) -> Vec<ExpectedError> {
    let errors_path = fixtures_dir().join(case).join("expected_errors.json");
    let json = fs::read_to_string(&errors_path)
        .unwrap_or_else(|_| panic!("failed to read {}", errors_path.display()));
    serde_json::from_str(&json).unwrap_or_else(|err| {
        panic!(
            "failed to parse expected errors {}: {}",
            errors_path.display(),
            err
        )
    })
}

fn normalize_errors(errors: Vec<ScriptError>) -> Vec<(String, Option<String>)> {
    let mut normalized: Vec<(String, Option<String>)> = errors
        .into_iter()
        .map(|err| (err.code.as_str().to_string(), err.path))
        .collect();
    normalized.sort();
    normalized
}

fn normalize_expected(errors: Vec<ExpectedError>) -> Vec<(String, Option<String>)> {
    let mut normalized: Vec<(String, Option<String>)> = errors
        .into_iter()
        .map(|err| (err.code, err.path))
        .collect();
    normalized.sort();
    normalized
}

#[test]
fn valid_scripts_should_pass_validation() {
    let cases = [
        "s01_sample_usage",
        "s02_capacity_one",
        "s03_null_values",
        "s04_structured_values",
        "m01_mismatches",
    ];

    for case in cases {
        let script = load_script(case);
        if let Err(errors) = validate_script(&script) {
            let codes: Vec<&'static str> = errors.iter().map(|e| e.code.as_str()).collect();
            panic!("expected valid script for {}, got {:?}", case, codes);
        }
    }
}

#[test]
fn invalid_scripts_should_match_expected_errors() {
    let cases = [
        "v01_zero_capacity",
        "v02_empty_key",
        "v03_conflicting_expectation",
        "v04_invalid_version",
    ];

    for case in cases {
        let script = load_script(case);
        let expected = normalize_expected(load_expected_errors(case));
        let errors = validate_script(&script).unwrap_err();
        let actual = normalize_errors(errors);
        assert_eq!(actual, expected, "error mismatch for fixture {}", case);
    }
}

#[test]
fn invalid_scripts_report_error_codes() {
    let script = load_script("v01_zero_capacity");
    let errors = validate_script(&script).unwrap_err();
    let codes: Vec<ErrorCode> = errors.iter().map(|e| e.code.clone()).collect();
    assert!(codes.contains(&ErrorCode::InvalidCapacity));
    assert_eq!(errors[0].message, "capacity must be at least 1");
}

#[test]
fn out_of_range_version_is_a_validation_error() {
    let script = parse_script("version: 300\ncapacity: 2\nsteps: []\n")
        .expect("failed to parse script");
    let errors = validate_script(&script).unwrap_err();
    assert_eq!(
        normalize_errors(errors),
        vec![("InvalidVersion".to_string(), Some("version".to_string()))]
    );
}
