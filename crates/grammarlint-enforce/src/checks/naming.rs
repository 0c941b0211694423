use grammarlint_core::kinds::{NodeKind, NodeKindSet};
use grammarlint_core::syntax::Node;

use crate::check::{CheckResult, ConventionCheck, DiagnosticSink};

/// Imaginary tokens (entries without a literal) must be upper case.
pub struct TokensNamingCheck;

fn is_imaginary_and_not_upper_case(entry: Node<'_>) -> bool {
    entry.child_count() == 0 && entry.text() != entry.text().to_uppercase()
}

impl ConventionCheck for TokensNamingCheck {
    fn name(&self) -> &'static str {
        "TokensNamingCheck"
    }

    fn default_kinds(&self) -> NodeKindSet {
        NodeKindSet::of(&[NodeKind::Tokens])
    }

    fn acceptable_kinds(&self) -> NodeKindSet {
        self.default_kinds()
    }

    fn enter_node(&mut self, node: Node<'_>, sink: &mut dyn DiagnosticSink) -> CheckResult {
        for entry in node.children().filter(|e| is_imaginary_and_not_upper_case(*e)) {
            sink.log(
                entry.line(),
                "imaginary tokens have to be in upper case.".to_string(),
            );
        }
        Ok(())
    }
}
