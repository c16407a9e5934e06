//! Tests for review configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        solve_mode = "SOLVE"
        report = "out/results.md"

        [[instances]]
        name = "Instance_1"
        output_dir = "runs/Instance_1"
    "#;

    let config = ReviewConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.solve_mode, RunMode::FullSolve);
    assert_eq!(config.report, PathBuf::from("out/results.md"));
    assert_eq!(config.instances[0].key.as_str(), "Instance_1");
    assert_eq!(
        config.instances[0].listing_path(),
        PathBuf::from("runs/Instance_1/out.lst")
    );
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        solve_mode: load_only
        profile_top: 5
        instances:
          - name: Instance_1
            output_dir: runs/Instance_1
          - name: Instance_2
            output_dir: runs/Instance_2
    "#;

    let config = ReviewConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.solve_mode, RunMode::LoadOnly);
    assert_eq!(config.profile_top, 5);
    assert_eq!(config.instances.len(), 2);
}

#[test]
fn test_defaults() {
    let config = ReviewConfig::from_toml_str("").unwrap();
    assert_eq!(config, ReviewConfig::default());
    assert_eq!(config.solve_mode, RunMode::LoadOnly);
    assert_eq!(config.profile_top, 15);
    assert_eq!(
        config.result_csv,
        PathBuf::from("code_review/result_overview.csv")
    );
    assert_eq!(
        config.profile_summary,
        PathBuf::from("code_review/profile_results.md")
    );
    assert_eq!(config.report, PathBuf::from("code_review/results.md"));
}

#[test]
fn test_baseline_selected_by_mode() {
    let config = ReviewConfig::new();
    assert_eq!(
        config.baseline_path(RunMode::FullSolve),
        Path::new("code_review/ground_truth_result_overview.csv")
    );
    assert_eq!(
        config.baseline_path(RunMode::LoadOnly),
        Path::new("code_review/ground_truth_savepoint_result_overview.csv")
    );

    let config = config.with_baseline(RunMode::FullSolve, "gt/solve.csv");
    assert_eq!(
        config.baseline_path(RunMode::FullSolve),
        Path::new("gt/solve.csv")
    );
}

#[test]
fn test_builder() {
    let config = ReviewConfig::new()
        .with_solve_mode(RunMode::FullSolve)
        .with_instance(Instance::new("Instance_1", "runs/Instance_1"))
        .with_result_csv("out/overview.csv")
        .with_profile_summary("out/profile.md")
        .with_report("out/results.md")
        .with_profile_top(3);

    assert_eq!(config.solve_mode, RunMode::FullSolve);
    assert_eq!(config.instances.len(), 1);
    assert_eq!(config.result_csv, PathBuf::from("out/overview.csv"));
    assert_eq!(config.profile_top, 3);
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_empty_batch() {
    let err = ReviewConfig::new().validate().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_validate_rejects_duplicate_names() {
    let config = ReviewConfig::new()
        .with_instance(Instance::new("Instance_1", "a"))
        .with_instance(Instance::new("Instance_1", "b"));

    match config.validate() {
        Err(ConfigError::Invalid(msg)) => assert!(msg.contains("Instance_1"), "{msg}"),
        other => panic!("expected Invalid, got {other:?}"),
    }
}

#[test]
fn test_validate_rejects_zero_profile_rows() {
    let config = ReviewConfig::new()
        .with_instance(Instance::new("Instance_1", "a"))
        .with_profile_top(0);
    assert!(config.validate().is_err());
}

#[test]
fn test_unknown_mode_rejected() {
    let result = ReviewConfig::from_toml_str(r#"solve_mode = "CONTINUE""#);
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("review.toml");
    std::fs::write(&path, "profile_top = 7\n").unwrap();

    let config = ReviewConfig::load(&path).unwrap();
    assert_eq!(config.profile_top, 7);

    let missing = ReviewConfig::load(dir.path().join("absent.toml"));
    assert!(matches!(missing, Err(ConfigError::Io(_))));
}
