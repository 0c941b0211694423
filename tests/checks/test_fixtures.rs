// Whole-file linting of the grammars under tests/fixtures.

use grammarlint_core::config::{CheckConfig, LintConfig};
use grammarlint_enforce::engine::LintEngine;
use grammarlint_enforce::types::Violation;

use super::common::{fixture, header_check, read_fixture};

fn all_checks_engine() -> LintEngine {
    let mut config = LintConfig::default();
    config.checks.insert(0, header_check());
    LintEngine::with_config(&config, &fixture("")).unwrap()
}

fn summary(violations: &[Violation]) -> Vec<(u32, &str)> {
    violations
        .iter()
        .map(|v| (v.line, v.check.as_str()))
        .collect()
}

#[test]
fn test_conventional_grammar_is_clean() {
    let mut engine = all_checks_engine();
    let violations = engine.lint_source("Expr.g", &read_fixture("Expr.g"));
    assert!(violations.is_empty(), "unexpected: {violations:#?}");
}

#[test]
fn test_sloppy_grammar() {
    let mut engine = all_checks_engine();
    let violations = engine.lint_source("Sloppy.g", &read_fixture("Sloppy.g"));
    assert_eq!(
        summary(&violations),
        vec![
            (3, "OptionsIndentationCheck"),
            (3, "OptionsSpaceCheck"),
            (3, "OptionsSpaceCheck"),
            (6, "TokensNamingCheck"),
            (7, "TokensOrderCheck"),
            (9, "TokensOrderCheck"),
            (13, "HeaderCheck"),
            (16, "RuleColonSemicolonCheck"),
            (16, "RuleColonSemicolonCheck"),
            (18, "RuleColonSemicolonCheck"),
            (19, "RuleColonSemicolonCheck"),
        ]
    );
    assert!(violations[6].message.starts_with("License missing or wrong. Mismatch found!"));
}

#[test]
fn test_lint_files_across_fixtures() {
    let mut engine = all_checks_engine();
    let result = engine.lint_files(&[fixture("Expr.g"), fixture("Sloppy.g")]);
    assert_eq!(result.status, "warning");
    assert_eq!(result.files_analyzed.len(), 2);
    assert_eq!(result.warnings.len(), 11);
    assert!(result.warnings.iter().all(|v| v.file.ends_with("Sloppy.g")));
}

#[test]
fn test_unparseable_file_does_not_stop_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("Broken.g");
    std::fs::write(&broken, "grammar Broken;\nr : ( A ;\n").unwrap();

    let mut engine = all_checks_engine();
    let result = engine.lint_files(&[broken, fixture("Sloppy.g")]);
    assert_eq!(result.status, "error");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].line, 0);
    assert!(result.errors[0].message.starts_with("Got an exception - "));
    assert_eq!(result.warnings.len(), 11);
}

#[test]
fn test_severity_per_check() {
    let mut config = LintConfig {
        checks: vec![CheckConfig::named("TokensOrderCheck")],
        ..LintConfig::default()
    };
    config.checks[0].severity = grammarlint_core::types::Severity::Info;
    let mut engine = LintEngine::with_config(&config, &fixture("")).unwrap();
    let result = engine.lint_files(&[fixture("Sloppy.g")]);
    assert_eq!(result.status, "ok");
    assert_eq!(result.infos.len(), 2);
}
