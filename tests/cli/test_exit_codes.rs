// Tests for CLI exit code behavior.

use super::common::{create_project, read_fixture, run_in};

#[test]
/// Exit code 0 when there are no violations.
fn test_exit_code_0_clean() {
    let expr = read_fixture("Expr.g");
    let dir = create_project(&[("Expr.g", expr.as_str())]);
    assert_eq!(run_in(dir.path(), &["check"]).status.code(), Some(0));
}

#[test]
/// Warnings alone don't fail the run unless --strict is given.
fn test_exit_code_warnings_and_strict() {
    let dir = create_project(&[("T.g", "grammar T;\nr : A ;\n")]);
    assert_eq!(run_in(dir.path(), &["check"]).status.code(), Some(0));
    assert_eq!(
        run_in(dir.path(), &["check", "--strict"]).status.code(),
        Some(1)
    );
}

#[test]
/// A file that cannot be parsed is an error-level violation.
fn test_exit_code_1_on_parse_error() {
    let dir = create_project(&[("Broken.g", "grammar Broken;\nr : ( A ;\n")]);
    let out = run_in(dir.path(), &["check"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stdout).contains("error[walker]: Got an exception - "));
}

#[test]
/// Configured severity "error" makes violations fail the run.
fn test_exit_code_1_on_error_severity() {
    let dir = create_project(&[
        ("T.g", "grammar T;\nr : A ;\n"),
        (
            "grammarlint.json",
            r#"{ "checks": [{ "name": "RuleColonSemicolonCheck", "severity": "error" }] }"#,
        ),
    ]);
    assert_eq!(run_in(dir.path(), &["check"]).status.code(), Some(1));
}

#[test]
/// Configuration problems exit 2 before any file is linted.
fn test_exit_code_2_on_bad_config() {
    let cases = [
        r#"{ "checks": [{ "name": "NoSuchCheck" }] }"#,
        r#"{ "checks": [{ "name": "HeaderCheck" }] }"#,
        r#"{ "checks": [{ "name": "HeaderCheck", "headerFile": "missing.txt" }] }"#,
        r#"{ "checks": [{ "name": "TokensOrderCheck", "tokens": ["RULE"] }] }"#,
        r#"{ "checks": [{ "name": "TokensOrderCheck", "tokens": ["NOT_A_KIND"] }] }"#,
        r#"{ "checks": [{ "name": "TokensOrderCheck", "colour": "red" }] }"#,
        "{ not json",
    ];
    for config in cases {
        let dir = create_project(&[("T.g", "grammar T;\nr : A ;\n"), ("grammarlint.json", config)]);
        let out = run_in(dir.path(), &["check"]);
        assert_eq!(out.status.code(), Some(2), "config: {config}");
        assert!(out.stdout.is_empty());
        assert!(String::from_utf8_lossy(&out.stderr).contains("grammarlint check:"));
    }
}

#[test]
/// A path that doesn't exist is an I/O failure.
fn test_exit_code_2_on_missing_path() {
    let dir = create_project(&[]);
    assert_eq!(
        run_in(dir.path(), &["check", "nope"]).status.code(),
        Some(2)
    );
}

#[test]
fn test_exit_code_2_on_unsupported_shell() {
    let dir = create_project(&[]);
    assert_eq!(
        run_in(dir.path(), &["completion", "tcsh"]).status.code(),
        Some(2)
    );
}
