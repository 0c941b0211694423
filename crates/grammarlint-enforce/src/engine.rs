use std::path::{Path, PathBuf};

use grammarlint_core::config::LintConfig;
use grammarlint_core::syntax::SyntaxTree;
use grammarlint_core::types::{ConfigError, Severity};
use grammarlint_parsers::parse_grammar;
use tracing::{debug, info, warn};

use crate::dispatcher::{CheckDispatcher, DiagnosticOrigin};
use crate::registry::create_check;
use crate::types::{status_of, LintResult, Violation, WALKER};

/// Lints grammar files with a fixed set of configured checks.
///
/// All checks are initialised when the engine is built, so a bad
/// configuration fails before any file is read. Files are processed one at a
/// time; a failure inside one file never affects the next.
pub struct LintEngine {
    dispatcher: CheckDispatcher,
}

impl LintEngine {
    pub fn new(dispatcher: CheckDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Create an engine from a `LintConfig`. Relative paths in the
    /// configuration resolve against `base_dir`.
    pub fn with_config(config: &LintConfig, base_dir: &Path) -> Result<Self, ConfigError> {
        let mut dispatcher = CheckDispatcher::new();
        for check_config in &config.checks {
            let check = create_check(check_config, base_dir)?;
            dispatcher.setup_check(check, check_config.tokens.as_deref(), check_config.severity)?;
        }
        info!(checks = dispatcher.check_count(), "lint engine ready");
        Ok(Self { dispatcher })
    }

    pub fn dispatcher(&self) -> &CheckDispatcher {
        &self.dispatcher
    }

    /// Parse and lint one file's contents.
    pub fn lint_source(&mut self, file: &str, source: &str) -> Vec<Violation> {
        match parse_grammar(source) {
            Ok(tree) => self.lint_tree(file, &tree),
            Err(err) => {
                warn!(file, error = %err, "failed to parse grammar");
                vec![walker_failure(file, &err.to_string())]
            }
        }
    }

    /// Lint an already parsed tree. Violations come back sorted by line,
    /// keeping emission order within a line.
    pub fn lint_tree(&mut self, file: &str, tree: &SyntaxTree) -> Vec<Violation> {
        let mut violations: Vec<Violation> = self
            .dispatcher
            .walk(tree)
            .into_iter()
            .map(|diagnostic| {
                let (check, severity) = match diagnostic.origin {
                    DiagnosticOrigin::Check(index) => {
                        let descriptor = &self.dispatcher.checks()[index];
                        (descriptor.name().to_string(), descriptor.severity())
                    }
                    DiagnosticOrigin::Walker => (WALKER.to_string(), Severity::Error),
                };
                Violation {
                    check,
                    severity,
                    file: file.to_string(),
                    line: diagnostic.line,
                    message: diagnostic.message,
                }
            })
            .collect();
        violations.sort_by_key(|v| v.line);
        debug!(file, violations = violations.len(), "linted file");
        violations
    }

    /// Lint files in order and collect the report.
    pub fn lint_files(&mut self, files: &[PathBuf]) -> LintResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut infos = Vec::new();
        let mut files_analyzed = Vec::with_capacity(files.len());

        for path in files {
            let file = path.display().to_string();
            let violations = match std::fs::read_to_string(path) {
                Ok(source) => self.lint_source(&file, &source),
                Err(err) => {
                    warn!(file = %file, error = %err, "failed to read file");
                    vec![walker_failure(&file, &format!("failed to read file: {err}"))]
                }
            };
            for v in violations {
                match v.severity {
                    Severity::Error => errors.push(v),
                    Severity::Warning => warnings.push(v),
                    Severity::Info => infos.push(v),
                }
            }
            files_analyzed.push(file);
        }

        info!(
            files = files_analyzed.len(),
            errors = errors.len(),
            warnings = warnings.len(),
            "lint finished"
        );

        LintResult {
            version: env!("CARGO_PKG_VERSION").to_string(),
            command: "check".to_string(),
            status: status_of(&errors, &warnings).to_string(),
            files_analyzed,
            errors,
            warnings,
            infos,
        }
    }

    /// Release every check. Safe to call more than once; dropping the engine
    /// does the same.
    pub fn shutdown(&mut self) {
        self.dispatcher.destroy();
    }
}

fn walker_failure(file: &str, reason: &str) -> Violation {
    Violation {
        check: WALKER.to_string(),
        severity: Severity::Error,
        file: file.to_string(),
        line: 0,
        message: format!("Got an exception - {reason}"),
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
