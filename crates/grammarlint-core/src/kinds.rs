//! Node kinds of the grammar syntax tree.
//!
//! Every node produced by the grammar front end carries one [`NodeKind`]. Checks
//! subscribe to kinds by their symbolic name (`"OPTIONS"`, `"RULE"`, ...), so the
//! enum doubles as the registry mapping names to stable integer ids.

use std::fmt;
use std::str::FromStr;

use crate::types::ConfigError;

macro_rules! node_kinds {
    ($($variant:ident = $id:literal => $name:literal,)*) => {
        /// Symbolic category of a syntax tree node.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum NodeKind {
            $($variant = $id,)*
        }

        impl NodeKind {
            /// Every kind, in id order.
            pub const ALL: &'static [NodeKind] = &[$(NodeKind::$variant,)*];

            /// The symbolic name used in configuration files.
            pub fn name(self) -> &'static str {
                match self {
                    $(NodeKind::$variant => $name,)*
                }
            }

            /// Look up a kind by its integer id.
            pub fn from_id(id: u16) -> Option<NodeKind> {
                match id {
                    $($id => Some(NodeKind::$variant),)*
                    _ => None,
                }
            }

            fn lookup(name: &str) -> Option<NodeKind> {
                match name {
                    $($name => Some(NodeKind::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

node_kinds! {
    CombinedGrammar = 1 => "COMBINED_GRAMMAR",
    LexerGrammar = 2 => "LEXER_GRAMMAR",
    ParserGrammar = 3 => "PARSER_GRAMMAR",
    TreeGrammar = 4 => "TREE_GRAMMAR",
    Id = 5 => "ID",
    DocComment = 6 => "DOC_COMMENT",
    Options = 7 => "OPTIONS",
    Assign = 8 => "ASSIGN",
    Tokens = 9 => "TOKENS",
    Import = 10 => "IMPORT",
    Scope = 11 => "SCOPE",
    Ampersand = 12 => "AMPERSAND",
    Action = 13 => "ACTION",
    Rule = 14 => "RULE",
    Fragment = 15 => "FRAGMENT",
    Protected = 16 => "PROTECTED",
    Public = 17 => "PUBLIC",
    Private = 18 => "PRIVATE",
    Arg = 19 => "ARG",
    Ret = 20 => "RET",
    Throws = 21 => "THROWS",
    Block = 22 => "BLOCK",
    Alt = 23 => "ALT",
    Epsilon = 24 => "EPSILON",
    Eor = 25 => "EOR",
    Catch = 26 => "CATCH",
    Finally = 27 => "FINALLY",
    TokenRef = 28 => "TOKEN_REF",
    RuleRef = 29 => "RULE_REF",
    StringLiteral = 30 => "STRING_LITERAL",
    CharLiteral = 31 => "CHAR_LITERAL",
    Int = 32 => "INT",
    ArgAction = 33 => "ARG_ACTION",
    CharRange = 34 => "CHAR_RANGE",
    Wildcard = 35 => "WILDCARD",
    Not = 36 => "NOT",
    Root = 37 => "ROOT",
    Bang = 38 => "BANG",
    LabelAssign = 39 => "LABEL_ASSIGN",
    ListLabelAssign = 40 => "LIST_LABEL_ASSIGN",
    SemPred = 41 => "SEMPRED",
    GatedSemPred = 42 => "GATED_SEMPRED",
    SynSemPred = 43 => "SYN_SEMPRED",
    Closure = 44 => "CLOSURE",
    PositiveClosure = 45 => "POSITIVE_CLOSURE",
    Optional = 46 => "OPTIONAL",
    Rewrite = 47 => "REWRITE",
    TreeBegin = 48 => "TREE_BEGIN",
    Label = 49 => "LABEL",
}

impl NodeKind {
    /// Number of distinct kinds.
    pub const COUNT: usize = NodeKind::ALL.len();

    /// The integer id of this kind.
    pub fn id(self) -> u16 {
        self as u16
    }

    /// Look up a kind by its symbolic name.
    ///
    /// Fails with [`ConfigError::UnknownKind`] for names the front end never produces.
    pub fn from_name(name: &str) -> Result<NodeKind, ConfigError> {
        NodeKind::lookup(name).ok_or_else(|| ConfigError::UnknownKind(name.to_string()))
    }

    /// One of the four grammar roots (`grammar`, `lexer grammar`, `parser grammar`, `tree grammar`).
    pub fn is_grammar_root(self) -> bool {
        matches!(
            self,
            NodeKind::CombinedGrammar
                | NodeKind::LexerGrammar
                | NodeKind::ParserGrammar
                | NodeKind::TreeGrammar
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NodeKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::from_name(s)
    }
}

/// Compact set of node kinds, backed by a bit mask indexed by kind id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NodeKindSet(u64);

impl NodeKindSet {
    pub const fn empty() -> Self {
        NodeKindSet(0)
    }

    /// The universal set, for checks that accept any subscription.
    pub fn all() -> Self {
        NodeKind::ALL.iter().copied().collect()
    }

    pub fn of(kinds: &[NodeKind]) -> Self {
        kinds.iter().copied().collect()
    }

    pub fn insert(&mut self, kind: NodeKind) {
        self.0 |= 1 << kind.id();
    }

    pub fn contains(&self, kind: NodeKind) -> bool {
        self.0 & (1 << kind.id()) != 0
    }

    pub fn union(self, other: NodeKindSet) -> NodeKindSet {
        NodeKindSet(self.0 | other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in id order.
    pub fn iter(&self) -> impl Iterator<Item = NodeKind> + '_ {
        NodeKind::ALL.iter().copied().filter(|k| self.contains(*k))
    }
}

impl FromIterator<NodeKind> for NodeKindSet {
    fn from_iter<I: IntoIterator<Item = NodeKind>>(iter: I) -> Self {
        let mut set = NodeKindSet::empty();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}
