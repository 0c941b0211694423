// Behavior of the built-in checks through the lint engine.

use std::fs;

use grammarlint_core::config::CheckConfig;
use grammarlint_enforce::types::{Violation, WALKER};

use super::common::{header_check, lint_one, lint_with};

fn lines(violations: &[Violation]) -> Vec<u32> {
    violations.iter().map(|v| v.line).collect()
}

fn tokens_block(entries: &[&str]) -> String {
    let mut source = String::from("grammar T;\ntokens {\n");
    for entry in entries {
        source.push_str(&format!("    {entry};\n"));
    }
    source.push_str("}\nr\n    : A\n    ;\n");
    source
}

fn with_header(body: &str) -> String {
    format!("grammar T;\n@header {{\n{body}}}\nr\n    : A\n    ;\n")
}

const NOTICE: &str = "/*\n * Copyright (c) grammarlint contributors.\n * Licensed under the Apache License, Version 2.0.\n */\n";

const LINE_NOTICE: &str = "// Copyright (c) grammarlint contributors.\n\
// Licensed under the Apache License, Version 2.0.\n\
// SPDX-License-Identifier: Apache-2.0\n";

#[test]
/// [A,C,B] and [A,C,B,D,E,A1] each yield one order diagnostic, at B.
fn test_order_reports_first_inversion_once() {
    let violations = lint_one("TokensOrderCheck", &tokens_block(&["A='a'", "C='c'", "B='b'"]));
    assert_eq!(lines(&violations), vec![5]);

    let violations = lint_one(
        "TokensOrderCheck",
        &tokens_block(&["A='a'", "C='c'", "B='b'", "D='d'", "E='e'", "A1='x'"]),
    );
    assert_eq!(lines(&violations), vec![5]);
    assert!(violations[0].message.contains("C and B have to be switched"));
}

#[test]
/// [B='b', C, A='a'] yields one mixed diagnostic at A, however often mixing repeats.
fn test_order_mixed_groups() {
    let violations = lint_one("TokensOrderCheck", &tokens_block(&["B='b'", "C", "A='a'"]));
    assert_eq!(lines(&violations), vec![5]);
    assert!(violations[0].message.starts_with("imaginary tokens and non-imaginary tokens"));

    let violations = lint_one(
        "TokensOrderCheck",
        &tokens_block(&["B='b'", "C", "A='a'", "D", "E='e'"]),
    );
    assert_eq!(lines(&violations), vec![5]);
}

#[test]
fn test_order_state_does_not_leak_between_blocks() {
    let source = tokens_block(&["B='b'", "A='a'"]);
    let config = vec![CheckConfig::named("TokensOrderCheck")];
    assert_eq!(lint_with(config.clone(), &source).len(), 1);
    assert_eq!(lint_with(config, &source).len(), 1);
}

#[test]
fn test_header_exact_extra_and_truncated() {
    let checks = || vec![header_check()];
    assert!(lint_with(checks(), &with_header(NOTICE)).is_empty());

    let extended = format!("{NOTICE}package foo;\n\nimport java.util.*;\n");
    assert!(lint_with(checks(), &with_header(&extended)).is_empty());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("NOTICE");
    fs::write(&path, LINE_NOTICE).unwrap();
    let line_header = || {
        let mut header = CheckConfig::named("HeaderCheck");
        header.header_file = Some(path.display().to_string());
        vec![header]
    };
    assert!(lint_with(line_header(), &with_header(LINE_NOTICE)).is_empty());

    // drop the last notice line
    let truncated: String = LINE_NOTICE.lines().take(2).map(|l| format!("{l}\n")).collect();
    let violations = lint_with(line_header(), &with_header(&truncated));
    assert_eq!(lines(&violations), vec![5]);
    assert_eq!(violations[0].check, "HeaderCheck");
    assert!(violations[0]
        .message
        .ends_with("Line missing, expected: // SPDX-License-Identifier: Apache-2.0"));
}

#[test]
fn test_header_unterminated_comment_fails_parse() {
    // dropping the closing " */" leaves the action open until end of file
    let truncated: String = NOTICE.lines().take(3).map(|l| format!("{l}\n")).collect();
    let violations = lint_with(vec![header_check()], &with_header(&truncated));
    assert_eq!(lines(&violations), vec![0]);
    assert_eq!(violations[0].check, WALKER);
    assert!(violations[0].message.starts_with("Got an exception - "));
}

#[test]
fn test_header_missing_notice() {
    let violations = lint_with(vec![header_check()], &with_header(""));
    assert_eq!(lines(&violations), vec![2]);
    assert_eq!(violations[0].message, "License notice is missing.");
}

#[test]
fn test_header_absolute_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("NOTICE");
    fs::write(&path, NOTICE).unwrap();
    let mut header = CheckConfig::named("HeaderCheck");
    header.header_file = Some(path.display().to_string());
    assert!(lint_with(vec![header], &with_header(NOTICE)).is_empty());
}

#[test]
fn test_spacing_policy() {
    let source = "grammar T;\noptions {\n    language=Java;\n}\nr\n    : A\n    ;\n";
    let violations = lint_one("OptionsSpaceCheck", source);
    assert_eq!(lines(&violations), vec![3, 3]);

    let mut tight = CheckConfig::named("OptionsSpaceCheck");
    tight.with_spaces_around_equal = false;
    assert!(lint_with(vec![tight], source).is_empty());
}

#[test]
fn test_indentation_key_column() {
    let source = "grammar T;\noptions {\nlanguage = Java;\n}\nr\n    : A\n    ;\n";
    let violations = lint_one("OptionsIndentationCheck", source);
    assert_eq!(lines(&violations), vec![3]);
    assert_eq!(
        violations[0].message,
        "option pair should be indented by 4 spaces but was indented by 0"
    );

    let source = "grammar T;\noptions {\n    language = Java;\n}\nr\n    : A\n    ;\n";
    assert!(lint_one("OptionsIndentationCheck", source).is_empty());
}

#[test]
fn test_indentation_multi_line_pairs() {
    let source = "grammar T;\ntokens {\n    PLUS\n      = '+';\n    MINUS =\n            '-';\n}\nr\n    : A\n    ;\n";
    let violations = lint_one("TokensIndentationCheck", source);
    assert_eq!(lines(&violations), vec![4, 6]);
    assert_eq!(
        violations[0].message,
        "= sign of a token pair should be indented by 8 spaces but was indented by 6"
    );
    assert_eq!(
        violations[1].message,
        "right hand side of a token pair should be indented by 8 spaces but was indented by 12"
    );
}

#[test]
fn test_naming_only_imaginary_tokens() {
    let source = tokens_block(&["Plus='+'", "decl", "EXPR"]);
    let violations = lint_one("TokensNamingCheck", &source);
    assert_eq!(lines(&violations), vec![4]);
}

#[test]
fn test_delimiters() {
    let violations = lint_one("RuleColonSemicolonCheck", "grammar T;\nr : A\n    ;\n");
    assert_eq!(lines(&violations), vec![2]);
    assert_eq!(violations[0].message, ": of a rule needs to be on its own line.");

    let violations = lint_one("RuleColonSemicolonCheck", "grammar T;\nr\n : A\n    ;\n");
    assert_eq!(lines(&violations), vec![3]);
    assert_eq!(
        violations[0].message,
        ": of a rule should be indented by 4 spaces but was indented by 1"
    );
}

#[test]
fn test_every_check_reports_under_its_own_name() {
    let source = "grammar T;\noptions {\nk=2;\n}\ntokens {\nb;\nA='a';\n}\nr : A ;\n";
    let checks = [
        "OptionsIndentationCheck",
        "OptionsSpaceCheck",
        "TokensIndentationCheck",
        "TokensSpaceCheck",
        "TokensNamingCheck",
        "TokensOrderCheck",
        "RuleColonSemicolonCheck",
    ];
    for check in checks {
        let violations = lint_one(check, source);
        assert!(!violations.is_empty(), "{check} should fire");
        assert!(violations.iter().all(|v| v.check == check));
    }
}
