use grammarlint_core::kinds::{NodeKind, NodeKindSet};
use grammarlint_core::syntax::Node;

use super::{pair_operands, PairBlock, INDENT};
use crate::check::{CheckResult, ConventionCheck, DiagnosticSink};

/// Layout of `options { ... }` or `tokens { ... }` entries:
///
/// ```text
/// options {
///     key = value;        // key at INDENT
///     key
///         = value;        // `=` on its own line at 2 * INDENT
///     key =
///         value;          // value on its own line at 2 * INDENT
/// }
/// ```
///
/// Options blocks of sub-rules are not inspected.
pub struct IndentationCheck {
    block: PairBlock,
}

impl IndentationCheck {
    pub fn options() -> Self {
        Self {
            block: PairBlock::Options,
        }
    }

    pub fn tokens() -> Self {
        Self {
            block: PairBlock::Tokens,
        }
    }

    fn check_pair(&self, pair: Node<'_>, sink: &mut dyn DiagnosticSink) -> CheckResult {
        let (lhs, rhs) = pair_operands(pair)?;
        let noun = self.block.noun();
        let article = self.block.article();

        if lhs.column() != INDENT {
            sink.log(
                lhs.line(),
                format!(
                    "{noun} pair should be indented by {INDENT} spaces but was indented by {}",
                    lhs.column()
                ),
            );
        }
        if !lhs.is_on_same_line(&pair) && pair.column() != 2 * INDENT {
            sink.log(
                pair.line(),
                format!(
                    "= sign of {article} {noun} pair should be indented by {} spaces but was indented by {}",
                    2 * INDENT,
                    pair.column()
                ),
            );
        }
        if !pair.is_on_same_line(&rhs) && rhs.column() != 2 * INDENT {
            sink.log(
                rhs.line(),
                format!(
                    "right hand side of {article} {noun} pair should be indented by {} spaces but was indented by {}",
                    2 * INDENT,
                    rhs.column()
                ),
            );
        }
        Ok(())
    }
}

fn is_grammar_or_rule(node: Node<'_>) -> bool {
    node.kind().is_grammar_root() || node.kind() == NodeKind::Rule
}

impl ConventionCheck for IndentationCheck {
    fn name(&self) -> &'static str {
        match self.block {
            PairBlock::Options => "OptionsIndentationCheck",
            PairBlock::Tokens => "TokensIndentationCheck",
        }
    }

    fn default_kinds(&self) -> NodeKindSet {
        NodeKindSet::of(&[self.block.kind()])
    }

    fn acceptable_kinds(&self) -> NodeKindSet {
        self.default_kinds()
    }

    fn enter_node(&mut self, node: Node<'_>, sink: &mut dyn DiagnosticSink) -> CheckResult {
        if self.block == PairBlock::Options && !node.parent().is_some_and(is_grammar_or_rule) {
            return Ok(());
        }
        for entry in node.children() {
            if entry.kind() == NodeKind::Assign {
                self.check_pair(entry, sink)?;
            } else if entry.column() != INDENT {
                sink.log(
                    entry.line(),
                    format!(
                        "imaginary token should be indented by {INDENT} spaces but was indented by {}",
                        entry.column()
                    ),
                );
            }
        }
        Ok(())
    }
}
