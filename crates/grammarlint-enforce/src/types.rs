use serde::{Deserialize, Serialize};

use grammarlint_core::types::Severity;

/// Check name used for file-level failures (parse errors, aborted walks).
pub const WALKER: &str = "walker";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintResult {
    pub version: String,
    pub command: String,
    pub status: String, // "ok" | "error" | "warning"
    pub files_analyzed: Vec<String>,
    pub errors: Vec<Violation>,
    pub warnings: Vec<Violation>,
    pub infos: Vec<Violation>,
}

impl LintResult {
    pub fn total(&self) -> usize {
        self.errors.len() + self.warnings.len() + self.infos.len()
    }

    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub check: String,
    pub severity: Severity,
    pub file: String,
    pub line: u32,
    pub message: String,
}

impl Violation {
    pub fn is_walker_failure(&self) -> bool {
        self.check == WALKER
    }
}

pub(crate) fn status_of(errors: &[Violation], warnings: &[Violation]) -> &'static str {
    if !errors.is_empty() {
        "error"
    } else if !warnings.is_empty() {
        "warning"
    } else {
        "ok"
    }
}
