// Tests for `grammarlint kinds` and `grammarlint completion`.

use grammarlint_core::kinds::NodeKind;

use super::common::{create_project, run_in};

#[test]
fn test_kinds_lists_registry() {
    let dir = create_project(&[]);
    let out = run_in(dir.path(), &["kinds"]);
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.lines().count(), NodeKind::COUNT);
    assert!(stdout.lines().any(|l| l.trim_end().ends_with("TOKENS")));
}

#[test]
fn test_kinds_json() {
    let dir = create_project(&[]);
    let out = run_in(dir.path(), &["kinds", "--json"]);
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let kinds = json.as_array().unwrap();
    assert_eq!(kinds.len(), NodeKind::COUNT);
    for entry in kinds {
        let id = entry["id"].as_u64().unwrap() as u16;
        let name = entry["name"].as_str().unwrap();
        assert_eq!(NodeKind::from_id(id).map(|k| k.name()), Some(name));
    }
}

#[test]
fn test_completion_bash() {
    let dir = create_project(&[]);
    let out = run_in(dir.path(), &["completion", "bash"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("grammarlint"));
}
