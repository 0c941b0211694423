use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use grammarlint_core::config::{CheckConfig, LintConfig};
use grammarlint_enforce::engine::LintEngine;
use grammarlint_enforce::types::Violation;
use tempfile::TempDir;

/// Path of a file under `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[allow(dead_code)]
pub fn read_fixture(name: &str) -> String {
    fs::read_to_string(fixture(name)).unwrap()
}

/// Get path to compiled grammarlint binary.
///
/// Builds the binary if it doesn't exist yet.
#[allow(dead_code)]
pub fn grammarlint_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove 'deps'
    path.push("grammarlint");
    if path.exists() {
        return path;
    }
    let workspace = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let status = Command::new("cargo")
        .args(["build", "-p", "grammarlint-cli"])
        .current_dir(&workspace)
        .status()
        .expect("Failed to build grammarlint");
    assert!(status.success(), "Failed to build grammarlint binary");
    path
}

/// Create a project directory from a set of files.
///
/// Each entry in `files` is `(relative_path, content)`.
/// Hold the TempDir to keep the directory alive.
#[allow(dead_code)]
pub fn create_project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (path, content) in files {
        let full_path = dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
    }
    dir
}

/// Run `grammarlint` with `args` inside `dir`.
#[allow(dead_code)]
pub fn run_in(dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(grammarlint_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("GRAMMARLINT_CONFIG")
        .env_remove("GRAMMARLINT_LOG")
        .output()
        .expect("Failed to run grammarlint")
}

/// Lint `source` with exactly the given checks.
#[allow(dead_code)]
pub fn lint_with(checks: Vec<CheckConfig>, source: &str) -> Vec<Violation> {
    let config = LintConfig {
        checks,
        ..LintConfig::default()
    };
    let mut engine = LintEngine::with_config(&config, &fixture("")).unwrap();
    engine.lint_source("Test.g", source)
}

/// Lint `source` with a single check using its default settings.
#[allow(dead_code)]
pub fn lint_one(check: &str, source: &str) -> Vec<Violation> {
    lint_with(vec![CheckConfig::named(check)], source)
}

#[allow(dead_code)]
pub fn header_check() -> CheckConfig {
    let mut header = CheckConfig::named("HeaderCheck");
    header.header_file = Some("license.txt".to_string());
    header
}
