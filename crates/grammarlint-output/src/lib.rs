//! Output formatters for grammarlint results.
//!
//! - **Human** (default): compiler-style diagnostics for the terminal
//! - **JSON** (`--json`): the full `LintResult`, machine-readable

pub mod human;
pub mod json;

use grammarlint_enforce::types::LintResult;

pub trait OutputFormatter {
    fn format_lint(&self, result: &LintResult) -> String;
}
