use grammarlint_core::kinds::{NodeKind, NodeKindSet};
use grammarlint_core::syntax::Node;

use super::INDENT;
use crate::check::{CheckError, CheckResult, ConventionCheck, DiagnosticSink};

/// The `:` and `;` of a rule each go on their own line, indented by INDENT:
///
/// ```text
/// rule
///     : alternatives
///     ;
/// ```
///
/// The `:` is where the rule's top-level `BLOCK` starts; the `;` is the
/// rule's trailing `EOR`.
pub struct RuleColonSemicolonCheck;

fn check_delimiter(
    symbol: char,
    delimiter: Node<'_>,
    sink: &mut dyn DiagnosticSink,
) -> CheckResult {
    let before = delimiter.token_before().ok_or_else(|| {
        CheckError::malformed(delimiter, format!("no token before the {symbol} of a rule"))
    })?;
    if before.line == delimiter.line() {
        sink.log(
            delimiter.line(),
            format!("{symbol} of a rule needs to be on its own line."),
        );
    } else if delimiter.column() != INDENT {
        sink.log(
            delimiter.line(),
            format!(
                "{symbol} of a rule should be indented by {INDENT} spaces but was indented by {}",
                delimiter.column()
            ),
        );
    }
    Ok(())
}

impl ConventionCheck for RuleColonSemicolonCheck {
    fn name(&self) -> &'static str {
        "RuleColonSemicolonCheck"
    }

    fn default_kinds(&self) -> NodeKindSet {
        NodeKindSet::of(&[NodeKind::Rule])
    }

    fn acceptable_kinds(&self) -> NodeKindSet {
        self.default_kinds()
    }

    fn enter_node(&mut self, rule: Node<'_>, sink: &mut dyn DiagnosticSink) -> CheckResult {
        let colon = rule
            .children()
            .rev()
            .find(|c| c.kind() == NodeKind::Block)
            .ok_or_else(|| CheckError::malformed(rule, "rule without alternatives"))?;
        let semicolon = rule
            .last_child()
            .filter(|c| c.kind() == NodeKind::Eor)
            .ok_or_else(|| CheckError::malformed(rule, "rule without end"))?;

        check_delimiter(':', colon, sink)?;
        check_delimiter(';', semicolon, sink)
    }
}
