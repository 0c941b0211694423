use grammarlint_core::kinds::{NodeKind, NodeKindSet};
use grammarlint_core::syntax::Node;

use super::{pair_operands, PairBlock};
use crate::check::{CheckResult, ConventionCheck, DiagnosticSink};

/// Spaces around the `=` of option and token pairs, either required
/// (`k = 2;`, the default) or forbidden (`k=2;`).
///
/// Only operands on the same line as the `=` are compared. Imaginary tokens
/// have no `=` and are skipped.
pub struct SpaceCheck {
    block: PairBlock,
    with_spaces_around_equal: bool,
}

impl SpaceCheck {
    pub fn options(with_spaces_around_equal: bool) -> Self {
        Self {
            block: PairBlock::Options,
            with_spaces_around_equal,
        }
    }

    pub fn tokens(with_spaces_around_equal: bool) -> Self {
        Self {
            block: PairBlock::Tokens,
            with_spaces_around_equal,
        }
    }

    pub fn needs_spaces_around_equal(&self) -> bool {
        self.with_spaces_around_equal
    }

    fn report(&self, spaced: bool, side: &str, pair: Node<'_>, sink: &mut dyn DiagnosticSink) {
        let noun = self.block.noun();
        match (self.with_spaces_around_equal, spaced) {
            (true, false) => sink.log(
                pair.line(),
                format!("{noun} pair needs spaces around = and there was no space {side} ="),
            ),
            (false, true) => sink.log(
                pair.line(),
                format!("{noun} pair should not have spaces around = and space found {side} ="),
            ),
            _ => {}
        }
    }
}

/// At least one column between the end of `left` and the start of `right`.
fn has_space_between(left: Node<'_>, right: Node<'_>) -> bool {
    left.end_column() + 1 <= right.column()
}

impl ConventionCheck for SpaceCheck {
    fn name(&self) -> &'static str {
        match self.block {
            PairBlock::Options => "OptionsSpaceCheck",
            PairBlock::Tokens => "TokensSpaceCheck",
        }
    }

    fn default_kinds(&self) -> NodeKindSet {
        NodeKindSet::of(&[self.block.kind()])
    }

    fn acceptable_kinds(&self) -> NodeKindSet {
        self.default_kinds()
    }

    fn enter_node(&mut self, node: Node<'_>, sink: &mut dyn DiagnosticSink) -> CheckResult {
        for pair in node.children().filter(|c| c.kind() == NodeKind::Assign) {
            let (lhs, rhs) = pair_operands(pair)?;
            if pair.is_on_same_line(&lhs) {
                self.report(has_space_between(lhs, pair), "before", pair, sink);
            }
            if pair.is_on_same_line(&rhs) {
                self.report(has_space_between(pair, rhs), "after", pair, sink);
            }
        }
        Ok(())
    }
}
