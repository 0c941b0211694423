use std::path::{Path, PathBuf};

use grammarlint_core::config::LintConfig;
use grammarlint_enforce::engine::LintEngine;
use grammarlint_enforce::types::LintResult;
use grammarlint_output::OutputFormatter;
use grammarlint_parsers::walker::FileWalker;
use tracing::debug;

/// Run `grammarlint check [paths]` -- lint grammar files.
///
/// Exit codes: 0 clean (or warnings only), 1 violations found, 2 setup failure.
pub fn run(
    formatter: &dyn OutputFormatter,
    paths: Vec<PathBuf>,
    config_path: Option<PathBuf>,
    strict: bool,
) -> i32 {
    let cwd = match std::env::current_dir() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("grammarlint check: failed to get current directory: {}", e);
            return 2;
        }
    };

    // Config-relative paths resolve against the config file's directory.
    let loaded = match &config_path {
        Some(path) => LintConfig::load_file(path).map(|c| (c, config_dir(path, &cwd))),
        None => LintConfig::load(&cwd).map(|c| (c, cwd.clone())),
    };
    let (config, base_dir) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("grammarlint check: {}", e);
            return 2;
        }
    };

    let exclude = match config.ignore_matcher() {
        Ok(m) => m,
        Err(e) => {
            eprintln!("grammarlint check: {}", e);
            return 2;
        }
    };

    let mut engine = match LintEngine::with_config(&config, &base_dir) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("grammarlint check: {}", e);
            return 2;
        }
    };

    let roots = if paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths
    };

    let mut files = Vec::new();
    for root in &roots {
        if !root.exists() {
            eprintln!("grammarlint check: no such file or directory: {}", root.display());
            return 2;
        }
        files.extend(
            FileWalker::new(root)
                .with_exclude(exclude.clone())
                .with_project_root(Path::new("."))
                .walk()
                .into_iter()
                .map(|p| display_path(&p)),
        );
    }
    files.sort();
    files.dedup();
    debug!(files = files.len(), "linting");

    let result = engine.lint_files(&files);
    engine.shutdown();

    let out = formatter.format_lint(&result);
    if !out.is_empty() {
        print!("{out}");
    }
    exit_code(&result, strict)
}

fn config_dir(config_path: &Path, cwd: &Path) -> PathBuf {
    match config_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => cwd.to_path_buf(),
    }
}

/// Drop a leading `./` so reported paths read like the user typed them.
fn display_path(path: &Path) -> PathBuf {
    path.strip_prefix(".").unwrap_or(path).to_path_buf()
}

fn exit_code(result: &LintResult, strict: bool) -> i32 {
    if !result.errors.is_empty() || (strict && !result.warnings.is_empty()) {
        1
    } else {
        0
    }
}
