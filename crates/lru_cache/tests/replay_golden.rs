use std::fs;
use std::path::{Path, PathBuf};

use lru_cache::{
    Script, ReplayErrorKind, parse_script, replay, replay_with_mismatches, validate_script,
};

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

fn load_expected(case: &str) -> serde_json::Value {
    let expected_path = fixtures_dir().join(case).join("expected.json");
    let json = fs::read_to_string(&expected_path)
        .unwrap_or_else(|_| panic!("failed to read {}", expected_path.display()));
    serde_json::from_str(&json)
        .unwrap_or_else(|err| panic!("invalid json {}: {}", expected_path.display(), err))
}

#[test]
fn replay_matches_golden_output() {
    let cases = [
        "s01_sample_usage",
        "s02_capacity_one",
        "s03_null_values",
        "s04_structured_values",
    ];

    for case in cases {
        let script = load_script(case);
        if let Err(errors) = validate_script(&script) {
            let codes: Vec<&'static str> = errors.iter().map(|e| e.code.as_str()).collect();
            panic!("expected valid script for {}, got {:?}", case, codes);
        }

        let (output, mismatches) = replay_with_mismatches(&script)
            .unwrap_or_else(|err| panic!("replay failed for {}: {}", case, err));
        assert!(
            mismatches.is_empty(),
            "unexpected mismatches for {}: {:?}",
            case,
            mismatches
        );
        assert_eq!(output, load_expected(case), "output mismatch for fixture {}", case);
    }
}

#[test]
fn mismatches_are_collected_without_stopping() {
    let script = load_script("m01_mismatches");
    let (output, mismatches) = replay_with_mismatches(&script).expect("replay failed");

    let paths: Vec<&str> = mismatches.iter().map(|m| m.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "steps[1].expect",
            "steps[2].found",
            "steps[3].expect",
            "steps[4].expect",
        ]
    );
    assert_eq!(mismatches[0].step, 1);
    assert_eq!(mismatches[0].message, "expected value 2 for key `a`, got 1");
    assert_eq!(mismatches[3].message, "expected len 5, got 1");
    assert_eq!(output["steps"].as_array().map(|steps| steps.len()), Some(5));
}

#[test]
fn replay_rejects_zero_capacity() {
    let script = load_script("v01_zero_capacity");
    let err = replay(&script).unwrap_err();
    assert_eq!(err.kind, ReplayErrorKind::InvalidCapacity);
    assert_eq!(err.path.as_deref(), Some("capacity"));
    assert_eq!(err.to_string(), "capacity must be at least 1 (path: capacity)");
}

#[test]
fn replay_rejects_unknown_version() {
    let script = load_script("v04_invalid_version");
    let err = replay(&script).unwrap_err();
    assert_eq!(err.kind, ReplayErrorKind::UnsupportedVersion);
    assert_eq!(err.path.as_deref(), Some("version"));
}

#[test]
fn explicit_null_expectation_differs_from_missing_expectation() {
    let yaml = r#"
version: 1
capacity: 1
steps:
  - { op: insert, key: "k", value: 0 }
  - { op: get, key: "k", expect: null }
  - { op: get, key: "k" }
"#;
    let script = parse_script(yaml).expect("failed to parse script");
    let (_, mismatches) = replay_with_mismatches(&script).expect("replay failed");
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0].path, "steps[1].expect");
}

#[test]
fn unknown_fields_and_ops_fail_to_parse() {
    let unknown_field = "version: 1\ncapacity: 1\nttl: 5\nsteps: []\n";
    assert!(parse_script(unknown_field).is_err());

    let unknown_op = "version: 1\ncapacity: 1\nsteps:\n  - { op: flush }\n";
    assert!(parse_script(unknown_op).is_err());

    let missing_value = "version: 1\ncapacity: 1\nsteps:\n  - { op: insert, key: \"a\" }\n";
    assert!(parse_script(missing_value).is_err());
}

#[test]
fn misspelled_step_fields_fail_to_parse() {
    let cases = [
        "  - { op: get, key: \"a\", expct: 999 }\n",
        "  - { op: peek, key: \"a\", fonud: true }\n",
        "  - { op: peek_most_recent, expected: \"a\" }\n",
        "  - { op: len, expcet: 7 }\n",
        "  - { op: insert, key: \"a\", value: 1, ttl: 5 }\n",
    ];

    for step in cases {
        let yaml = format!("version: 1\ncapacity: 1\nsteps:\n{}", step);
        let err = parse_script(&yaml)
            .err()
            .unwrap_or_else(|| panic!("expected parse error for step {}", step.trim()));
        assert!(
            err.to_string().contains("unknown field"),
            "unexpected error for step {}: {}",
            step.trim(),
            err
        );
    }
}
