//! Built-in convention checks.

mod header;
mod indentation;
mod naming;
mod order;
mod rule_delimiter;
mod spacing;

pub use header::HeaderCheck;
pub use indentation::IndentationCheck;
pub use naming::TokensNamingCheck;
pub use order::TokensOrderCheck;
pub use rule_delimiter::RuleColonSemicolonCheck;
pub use spacing::SpaceCheck;

use grammarlint_core::kinds::NodeKind;
use grammarlint_core::syntax::Node;

use crate::check::CheckError;

/// Indentation unit, in columns.
pub const INDENT: u32 = 4;

/// The two `name = value` declaration blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairBlock {
    Options,
    Tokens,
}

impl PairBlock {
    pub fn kind(self) -> NodeKind {
        match self {
            PairBlock::Options => NodeKind::Options,
            PairBlock::Tokens => NodeKind::Tokens,
        }
    }

    /// What a pair of this block is called in messages.
    fn noun(self) -> &'static str {
        match self {
            PairBlock::Options => "option",
            PairBlock::Tokens => "token",
        }
    }

    fn article(self) -> &'static str {
        match self {
            PairBlock::Options => "an",
            PairBlock::Tokens => "a",
        }
    }
}

pub(crate) fn child<'a>(node: Node<'a>, index: usize) -> Result<Node<'a>, CheckError> {
    node.child(index).ok_or_else(|| {
        CheckError::malformed(
            node,
            format!("{} has no child #{index}", node.kind()),
        )
    })
}

/// `(lhs, rhs)` of an `ASSIGN` pair.
pub(crate) fn pair_operands<'a>(pair: Node<'a>) -> Result<(Node<'a>, Node<'a>), CheckError> {
    Ok((child(pair, 0)?, child(pair, 1)?))
}
