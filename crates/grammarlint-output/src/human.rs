use grammarlint_enforce::types::{LintResult, Violation};

use crate::OutputFormatter;

pub struct HumanFormatter;

fn format_violation_human(v: &Violation) -> String {
    // continuation lines of multi-line messages line up under the arrow
    let message = v.message.replace('\n', "\n   | ");
    format!(
        "{}[{}]: {}\n  --> {}:{}\n",
        v.severity, v.check, message, v.file, v.line,
    )
}

impl OutputFormatter for HumanFormatter {
    fn format_lint(&self, result: &LintResult) -> String {
        if result.is_clean() {
            return String::new(); // Clean run = empty stdout
        }

        let mut out = String::new();
        for v in result
            .errors
            .iter()
            .chain(&result.warnings)
            .chain(&result.infos)
        {
            out.push_str(&format_violation_human(v));
        }

        out.push_str(&format!(
            "\n{} error(s), {} warning(s), {} info(s) in {} file(s)\n",
            result.errors.len(),
            result.warnings.len(),
            result.infos.len(),
            result.files_analyzed.len(),
        ));
        out
    }
}
