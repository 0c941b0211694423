// Tests for `grammarlint init`.

use std::fs;

use grammarlint_core::config::LintConfig;

use super::common::{create_project, run_in};

#[test]
fn test_init_writes_default_config() {
    let dir = create_project(&[]);
    let out = run_in(dir.path(), &["init"]);
    assert_eq!(out.status.code(), Some(0));

    let config = LintConfig::load(dir.path()).unwrap();
    assert_eq!(config.checks.len(), 7);
    assert!(config.checks.iter().all(|c| c.name != "HeaderCheck"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let dir = create_project(&[("grammarlint.json", "{}")]);
    let out = run_in(dir.path(), &["init"]);
    assert_eq!(out.status.code(), Some(2));
    assert_eq!(
        fs::read_to_string(dir.path().join("grammarlint.json")).unwrap(),
        "{}"
    );

    let out = run_in(dir.path(), &["init", "--force"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(LintConfig::load(dir.path()).unwrap().checks.len() == 7);
}
