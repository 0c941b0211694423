use grammarlint_enforce::types::LintResult;

use crate::OutputFormatter;

pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_lint(&self, result: &LintResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_default()
    }
}
