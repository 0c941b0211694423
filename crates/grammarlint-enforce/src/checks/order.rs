use grammarlint_core::kinds::{NodeKind, NodeKindSet};
use grammarlint_core::syntax::Node;

use super::child;
use crate::check::{CheckResult, ConventionCheck, DiagnosticSink};

const MIXED: &str = "imaginary tokens and non-imaginary tokens should not be mixed, \
whereas non-imaginary tokens should be first followed by the imaginary ones.";

/// Order inside a `tokens` block: pairs with a literal first, imaginary
/// tokens after them, each group sorted by name.
///
/// Each of the three violations (mixing, unsorted pairs, unsorted imaginary
/// tokens) is reported at most once per block, at its first occurrence.
pub struct TokensOrderCheck;

/// Scan state of one `tokens` block.
#[derive(Default)]
struct BlockScan {
    in_imaginary: bool,
    reported_mixed: bool,
    reported_pair_order: bool,
    reported_imaginary_order: bool,
}

impl BlockScan {
    fn step(
        &mut self,
        previous: &str,
        name: Node<'_>,
        imaginary: bool,
        sink: &mut dyn DiagnosticSink,
    ) {
        let current = name.text();
        if imaginary {
            if !self.in_imaginary {
                self.in_imaginary = true;
            } else if !self.reported_imaginary_order && current < previous {
                self.reported_imaginary_order = true;
                report_order(previous, name, sink);
            }
        } else if self.in_imaginary {
            self.in_imaginary = false;
            if !self.reported_mixed {
                self.reported_mixed = true;
                sink.log(name.line(), MIXED.to_string());
            }
        } else if !self.reported_pair_order && current < previous {
            self.reported_pair_order = true;
            report_order(previous, name, sink);
        }
    }
}

fn report_order(previous: &str, name: Node<'_>, sink: &mut dyn DiagnosticSink) {
    sink.log(
        name.line(),
        format!(
            "tokens are not in alphabetical order, spotted first occurrence. \
{previous} and {} have to be switched at least (maybe there are more errors).",
            name.text()
        ),
    );
}

impl ConventionCheck for TokensOrderCheck {
    fn name(&self) -> &'static str {
        "TokensOrderCheck"
    }

    fn default_kinds(&self) -> NodeKindSet {
        NodeKindSet::of(&[NodeKind::Tokens])
    }

    fn acceptable_kinds(&self) -> NodeKindSet {
        self.default_kinds()
    }

    fn enter_node(&mut self, node: Node<'_>, sink: &mut dyn DiagnosticSink) -> CheckResult {
        if node.child_count() < 2 {
            return Ok(());
        }
        let mut scan = BlockScan::default();
        let mut previous: Option<&str> = None;
        for entry in node.children() {
            let (name, imaginary) = if entry.kind() == NodeKind::Assign {
                (child(entry, 0)?, false)
            } else {
                (entry, true)
            };
            match previous {
                Some(previous) => scan.step(previous, name, imaginary, sink),
                None => scan.in_imaginary = imaginary,
            }
            previous = Some(name.text());
        }
        Ok(())
    }
}
