//! Recursive-descent parser for ANTLR v3 grammar files.
//!
//! Builds the tree shape the convention checks are written against:
//!
//! ```text
//! ^(COMBINED_GRAMMAR ID DOC_COMMENT? OPTIONS? IMPORT? TOKENS? SCOPE* AMPERSAND* RULE*)
//! ^(OPTIONS ^(ASSIGN ID value)*)
//! ^(TOKENS (^(ASSIGN TOKEN_REF literal) | TOKEN_REF)*)
//! ^(AMPERSAND ID? ID ACTION)
//! ^(RULE ID modifier? ARG? RET? THROWS? OPTIONS? SCOPE? AMPERSAND* BLOCK CATCH* FINALLY? EOR)
//! ```
//!
//! A rule's `BLOCK` is positioned at its `:` and its `EOR` at its `;`, so both
//! delimiters can be located from the tree alone.

use std::ops::Range;

use grammarlint_core::kinds::NodeKind;
use grammarlint_core::syntax::{NodeId, SyntaxTree, Token, TreeBuilder};
use tracing::debug;

use crate::lexer::{self, LineIndex, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}:{column} unexpected {found:?}, expected {expected}")]
    UnexpectedToken {
        expected: String,
        found: String,
        line: u32,
        column: u32,
    },

    #[error("line {line}: unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String, line: u32 },

    #[error("line {line}:{column} unrecognised input {text:?}")]
    Garbage { text: String, line: u32, column: u32 },
}

impl ParseError {
    pub fn line(&self) -> u32 {
        match self {
            ParseError::UnexpectedToken { line, .. }
            | ParseError::UnexpectedEof { line, .. }
            | ParseError::Garbage { line, .. } => *line,
        }
    }
}

/// Parse one grammar file into a syntax tree.
pub fn parse_grammar(source: &str) -> Result<SyntaxTree, ParseError> {
    let tokens = lexer::lex(source);
    let parser = Parser::new(source, tokens)?;
    let tree = parser.grammar()?;
    debug!(tokens = tree.tokens().len(), nodes = tree.len(), "parsed grammar");
    Ok(tree)
}

struct Parser<'s> {
    source: &'s str,
    kinds: Vec<TokenKind>,
    spans: Vec<Range<usize>>,
    pos: usize,
    builder: TreeBuilder,
}

impl<'s> Parser<'s> {
    fn new(source: &'s str, tokens: Vec<lexer::Token>) -> Result<Self, ParseError> {
        let index = LineIndex::new(source);
        let mut builder = TreeBuilder::new();
        let mut kinds = Vec::with_capacity(tokens.len());
        let mut spans = Vec::with_capacity(tokens.len());
        for token in tokens {
            let (line, column) = index.position(source, token.span.start);
            if token.kind == TokenKind::Garbage {
                return Err(ParseError::Garbage {
                    text: token.text(source).to_string(),
                    line,
                    column,
                });
            }
            builder.push_token(Token {
                text: token.text(source).to_string(),
                line,
                column,
            });
            kinds.push(token.kind);
            spans.push(token.span);
        }
        Ok(Self {
            source,
            kinds,
            spans,
            pos: 0,
            builder,
        })
    }

    // -- Token cursor --

    fn peek(&self) -> Option<TokenKind> {
        self.kinds.get(self.pos).copied()
    }

    fn peek_nth(&self, n: usize) -> Option<TokenKind> {
        self.kinds.get(self.pos + n).copied()
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.kinds.len()
    }

    fn text(&self, index: usize) -> &str {
        self.builder.token(index).map(|t| t.text.as_str()).unwrap_or("")
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        self.at(TokenKind::Ident) && self.text(self.pos) == keyword
    }

    fn bump(&mut self) -> usize {
        let index = self.pos;
        self.pos += 1;
        index
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<usize, ParseError> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            Err(self.error(expected))
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<usize, ParseError> {
        if self.at_keyword(keyword) {
            Ok(self.bump())
        } else {
            Err(self.error(&format!("'{keyword}'")))
        }
    }

    fn error(&self, expected: &str) -> ParseError {
        match self.builder.token(self.pos) {
            Some(token) => ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: token.text.clone(),
                line: token.line,
                column: token.column,
            },
            None => ParseError::UnexpectedEof {
                expected: expected.to_string(),
                line: self
                    .pos
                    .checked_sub(1)
                    .and_then(|i| self.builder.token(i))
                    .map(|t| t.line)
                    .unwrap_or(1),
            },
        }
    }

    // -- Node helpers --

    fn leaf(&mut self, kind: NodeKind, index: usize) -> NodeId {
        let text = self.text(index).to_string();
        self.builder.node_at_token(kind, text, index)
    }

    fn labelled(&mut self, kind: NodeKind, text: &str, index: usize) -> NodeId {
        self.builder.node_at_token(kind, text, index)
    }

    fn append(&mut self, parent: NodeId, child: NodeId) {
        self.builder.append_child(parent, child);
    }

    fn wrap(&mut self, kind: NodeKind, index: usize, inner: NodeId) -> NodeId {
        let wrapper = self.leaf(kind, index);
        self.append(wrapper, inner);
        wrapper
    }

    /// `{...}` or `[...]` without the delimiters.
    fn delimited_node(&mut self, kind: NodeKind, index: usize) -> NodeId {
        let text = self.text(index);
        let inner = text
            .get(1..text.len().saturating_sub(1))
            .unwrap_or("")
            .to_string();
        self.builder.node_at_token(kind, inner, index)
    }

    /// Source text spanning tokens `first..=last`.
    fn span_text(&self, first: usize, last: usize) -> String {
        match (self.spans.get(first), self.spans.get(last)) {
            (Some(a), Some(b)) => self.source[a.start..b.end].to_string(),
            _ => self.text(first).to_string(),
        }
    }

    // -- Grammar structure --

    fn grammar(mut self) -> Result<SyntaxTree, ParseError> {
        let doc = if self.at(TokenKind::DocComment) {
            Some(self.bump())
        } else {
            None
        };

        let kind = if self.at_keyword("lexer") {
            NodeKind::LexerGrammar
        } else if self.at_keyword("parser") {
            NodeKind::ParserGrammar
        } else if self.at_keyword("tree") {
            NodeKind::TreeGrammar
        } else {
            NodeKind::CombinedGrammar
        };
        let start = if kind == NodeKind::CombinedGrammar {
            self.pos
        } else {
            self.bump()
        };
        self.expect_keyword("grammar")?;
        let root = self.leaf(kind, start);

        let name = self.expect(TokenKind::Ident, "grammar name")?;
        let name = self.leaf(NodeKind::Id, name);
        self.append(root, name);
        self.expect(TokenKind::Semi, "';'")?;
        if let Some(doc) = doc {
            let doc = self.leaf(NodeKind::DocComment, doc);
            self.append(root, doc);
        }

        loop {
            let child = if self.at(TokenKind::OptionsOpen) {
                self.options_spec()?
            } else if self.at(TokenKind::TokensOpen) {
                self.tokens_spec()?
            } else if self.at_keyword("import") {
                self.delegate_grammars()?
            } else if self.at_keyword("scope") {
                self.attr_scope()?
            } else if self.at(TokenKind::At) {
                self.named_action()?
            } else {
                break;
            };
            self.append(root, child);
        }

        while !self.at_eof() {
            let rule = self.rule()?;
            self.append(root, rule);
        }

        Ok(self.builder.finish(root))
    }

    fn options_spec(&mut self) -> Result<NodeId, ParseError> {
        let open = self.expect(TokenKind::OptionsOpen, "'options {'")?;
        let options = self.labelled(NodeKind::Options, "options", open);
        while !self.at(TokenKind::RBrace) {
            let name = self.expect(TokenKind::Ident, "option name")?;
            let assign = self.expect(TokenKind::Assign, "'='")?;
            let value = self.option_value()?;
            self.expect(TokenKind::Semi, "';'")?;

            let pair = self.leaf(NodeKind::Assign, assign);
            let name = self.leaf(NodeKind::Id, name);
            self.append(pair, name);
            self.append(pair, value);
            self.append(options, pair);
        }
        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(options)
    }

    fn option_value(&mut self) -> Result<NodeId, ParseError> {
        match self.peek() {
            Some(TokenKind::Ident) => {
                let first = self.bump();
                let mut last = first;
                while self.at(TokenKind::Dot) && self.peek_nth(1) == Some(TokenKind::Ident) {
                    self.bump();
                    last = self.bump();
                }
                if first == last {
                    Ok(self.leaf(NodeKind::Id, first))
                } else {
                    let text = self.span_text(first, last);
                    Ok(self.builder.node_at_token(NodeKind::Id, text, first))
                }
            }
            Some(TokenKind::QuotedLiteral) | Some(TokenKind::DoubleQuotedLiteral) => {
                let index = self.bump();
                let kind = literal_kind(self.text(index));
                Ok(self.leaf(kind, index))
            }
            Some(TokenKind::Int) => {
                let index = self.bump();
                Ok(self.leaf(NodeKind::Int, index))
            }
            Some(TokenKind::Star) => {
                let index = self.bump();
                Ok(self.leaf(NodeKind::StringLiteral, index))
            }
            _ => Err(self.error("option value")),
        }
    }

    fn tokens_spec(&mut self) -> Result<NodeId, ParseError> {
        let open = self.expect(TokenKind::TokensOpen, "'tokens {'")?;
        let tokens = self.labelled(NodeKind::Tokens, "tokens", open);
        while !self.at(TokenKind::RBrace) {
            let name = self.expect(TokenKind::Ident, "token name")?;
            let entry = if self.at(TokenKind::Assign) {
                let assign = self.bump();
                let literal = match self.peek() {
                    Some(TokenKind::QuotedLiteral) | Some(TokenKind::DoubleQuotedLiteral) => {
                        self.bump()
                    }
                    _ => return Err(self.error("token literal")),
                };
                let pair = self.leaf(NodeKind::Assign, assign);
                let name = self.leaf(NodeKind::TokenRef, name);
                let kind = literal_kind(self.text(literal));
                let literal = self.leaf(kind, literal);
                self.append(pair, name);
                self.append(pair, literal);
                pair
            } else {
                self.leaf(NodeKind::TokenRef, name)
            };
            self.expect(TokenKind::Semi, "';'")?;
            self.append(tokens, entry);
        }
        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(tokens)
    }

    fn delegate_grammars(&mut self) -> Result<NodeId, ParseError> {
        let import = self.expect_keyword("import")?;
        let node = self.leaf(NodeKind::Import, import);
        loop {
            let name = self.expect(TokenKind::Ident, "grammar name")?;
            let child = if self.at(TokenKind::Assign) {
                let assign = self.bump();
                let target = self.expect(TokenKind::Ident, "grammar name")?;
                let pair = self.leaf(NodeKind::Assign, assign);
                let name = self.leaf(NodeKind::Id, name);
                let target = self.leaf(NodeKind::Id, target);
                self.append(pair, name);
                self.append(pair, target);
                pair
            } else {
                self.leaf(NodeKind::Id, name)
            };
            self.append(node, child);
            if self.at(TokenKind::Comma) {
                self.bump();
            } else {
                break;
            }
        }
        self.expect(TokenKind::Semi, "';'")?;
        Ok(node)
    }

    fn attr_scope(&mut self) -> Result<NodeId, ParseError> {
        let scope = self.expect_keyword("scope")?;
        let node = self.leaf(NodeKind::Scope, scope);
        let name = self.expect(TokenKind::Ident, "scope name")?;
        let name = self.leaf(NodeKind::Id, name);
        let action = self.expect(TokenKind::Action, "scope action")?;
        let action = self.delimited_node(NodeKind::Action, action);
        self.append(node, name);
        self.append(node, action);
        Ok(node)
    }

    /// `@name {...}` or `@scope::name {...}`.
    fn named_action(&mut self) -> Result<NodeId, ParseError> {
        let at = self.expect(TokenKind::At, "'@'")?;
        let node = self.labelled(NodeKind::Ampersand, "@", at);
        let first = self.expect(TokenKind::Ident, "action name")?;
        let first = self.leaf(NodeKind::Id, first);
        self.append(node, first);
        if self.at(TokenKind::ColonColon) {
            self.bump();
            let name = self.expect(TokenKind::Ident, "action name")?;
            let name = self.leaf(NodeKind::Id, name);
            self.append(node, name);
        }
        let action = self.expect(TokenKind::Action, "action")?;
        let action = self.delimited_node(NodeKind::Action, action);
        self.append(node, action);
        Ok(node)
    }

    // -- Rules --

    fn rule(&mut self) -> Result<NodeId, ParseError> {
        let doc = if self.at(TokenKind::DocComment) {
            Some(self.bump())
        } else {
            None
        };
        let modifier_kind = match self.text(self.pos) {
            "fragment" => Some(NodeKind::Fragment),
            "protected" => Some(NodeKind::Protected),
            "public" => Some(NodeKind::Public),
            "private" => Some(NodeKind::Private),
            _ => None,
        };
        let modifier = match modifier_kind {
            Some(kind) if self.peek_nth(1) == Some(TokenKind::Ident) => Some((kind, self.bump())),
            _ => None,
        };

        let name = self.expect(TokenKind::Ident, "rule name")?;
        let rule = self.leaf(NodeKind::Rule, name);
        let id = self.leaf(NodeKind::Id, name);
        self.append(rule, id);
        if let Some((kind, index)) = modifier {
            let modifier = self.leaf(kind, index);
            self.append(rule, modifier);
        }
        if let Some(doc) = doc {
            let doc = self.leaf(NodeKind::DocComment, doc);
            self.append(rule, doc);
        }
        if self.at(TokenKind::Bang) {
            let bang = self.bump();
            let bang = self.leaf(NodeKind::Bang, bang);
            self.append(rule, bang);
        }
        if self.at(TokenKind::ArgAction) {
            let arg = self.bump();
            let arg = self.delimited_node(NodeKind::Arg, arg);
            self.append(rule, arg);
        }
        if self.at_keyword("returns") {
            self.bump();
            let ret = self.expect(TokenKind::ArgAction, "return values")?;
            let ret = self.delimited_node(NodeKind::Ret, ret);
            self.append(rule, ret);
        }
        if self.at_keyword("throws") {
            let throws = self.throws_spec()?;
            self.append(rule, throws);
        }
        if self.at(TokenKind::OptionsOpen) {
            let options = self.options_spec()?;
            self.append(rule, options);
        }
        if self.at_keyword("scope") {
            let scope = self.rule_scope_spec()?;
            self.append(rule, scope);
        }
        while self.at(TokenKind::At) {
            let action = self.named_action()?;
            self.append(rule, action);
        }

        let colon = self.expect(TokenKind::Colon, "':'")?;
        let block = self.labelled(NodeKind::Block, "BLOCK", colon);
        self.block_body(block)?;
        let semi = self.expect(TokenKind::Semi, "';'")?;
        self.append(rule, block);

        while self.at_keyword("catch") {
            let catch = self.bump();
            let catch = self.leaf(NodeKind::Catch, catch);
            let arg = self.expect(TokenKind::ArgAction, "exception declaration")?;
            let arg = self.delimited_node(NodeKind::ArgAction, arg);
            let action = self.expect(TokenKind::Action, "exception handler")?;
            let action = self.delimited_node(NodeKind::Action, action);
            self.append(catch, arg);
            self.append(catch, action);
            self.append(rule, catch);
        }
        if self.at_keyword("finally") {
            let finally = self.bump();
            let finally = self.leaf(NodeKind::Finally, finally);
            let action = self.expect(TokenKind::Action, "finally block")?;
            let action = self.delimited_node(NodeKind::Action, action);
            self.append(finally, action);
            self.append(rule, finally);
        }

        let eor = self.leaf(NodeKind::Eor, semi);
        self.append(rule, eor);
        Ok(rule)
    }

    fn throws_spec(&mut self) -> Result<NodeId, ParseError> {
        let throws = self.expect_keyword("throws")?;
        let node = self.leaf(NodeKind::Throws, throws);
        loop {
            let name = self.expect(TokenKind::Ident, "exception type")?;
            let name = self.leaf(NodeKind::Id, name);
            self.append(node, name);
            if self.at(TokenKind::Comma) {
                self.bump();
            } else {
                return Ok(node);
            }
        }
    }

    fn rule_scope_spec(&mut self) -> Result<NodeId, ParseError> {
        let node = self.leaf(NodeKind::Scope, self.pos);
        while self.at_keyword("scope") {
            self.bump();
            if self.at(TokenKind::Action) {
                let action = self.bump();
                let action = self.delimited_node(NodeKind::Action, action);
                self.append(node, action);
                continue;
            }
            loop {
                let name = self.expect(TokenKind::Ident, "scope name")?;
                let name = self.leaf(NodeKind::Id, name);
                self.append(node, name);
                if self.at(TokenKind::Comma) {
                    self.bump();
                } else {
                    break;
                }
            }
            self.expect(TokenKind::Semi, "';'")?;
        }
        Ok(node)
    }

    // -- Alternatives and elements --

    /// Alternatives separated by `|`, each optionally followed by rewrites.
    fn block_body(&mut self, block: NodeId) -> Result<(), ParseError> {
        loop {
            let alt = self.alternative()?;
            self.append(block, alt);
            while self.at(TokenKind::RewriteArrow) {
                let rewrite = self.rewrite()?;
                self.append(block, rewrite);
            }
            if self.at(TokenKind::Or) {
                self.bump();
            } else {
                return Ok(());
            }
        }
    }

    fn at_alt_end(&self) -> bool {
        matches!(
            self.peek(),
            None | Some(TokenKind::Or)
                | Some(TokenKind::RParen)
                | Some(TokenKind::Semi)
                | Some(TokenKind::RewriteArrow)
        )
    }

    fn alternative(&mut self) -> Result<NodeId, ParseError> {
        let anchor = self.pos.min(self.kinds.len().saturating_sub(1));
        let alt = self.labelled(NodeKind::Alt, "ALT", anchor);
        if self.at_alt_end() {
            let epsilon = self.labelled(NodeKind::Epsilon, "EPSILON", anchor);
            self.append(alt, epsilon);
            return Ok(alt);
        }
        while !self.at_alt_end() {
            let element = self.element()?;
            self.append(alt, element);
        }
        Ok(alt)
    }

    fn element(&mut self) -> Result<NodeId, ParseError> {
        match self.peek() {
            Some(TokenKind::Ident)
                if matches!(
                    self.peek_nth(1),
                    Some(TokenKind::Assign) | Some(TokenKind::PlusAssign)
                ) =>
            {
                let label = self.bump();
                let op = self.bump();
                let kind = if self.kinds[op] == TokenKind::Assign {
                    NodeKind::LabelAssign
                } else {
                    NodeKind::ListLabelAssign
                };
                let node = self.leaf(kind, op);
                let label = self.leaf(NodeKind::Id, label);
                let target = if self.at(TokenKind::LParen) {
                    self.ebnf()?
                } else {
                    let atom = self.atom()?;
                    self.ebnf_suffix(atom)
                };
                self.append(node, label);
                self.append(node, target);
                Ok(node)
            }
            Some(TokenKind::Action) => {
                let action = self.bump();
                if self.at(TokenKind::Question) {
                    self.bump();
                    let kind = if self.at(TokenKind::Implies) {
                        self.bump();
                        NodeKind::GatedSemPred
                    } else {
                        NodeKind::SemPred
                    };
                    Ok(self.delimited_node(kind, action))
                } else {
                    Ok(self.delimited_node(NodeKind::Action, action))
                }
            }
            Some(TokenKind::TreeBegin) => {
                let begin = self.bump();
                let tree = self.leaf(NodeKind::TreeBegin, begin);
                while !self.at(TokenKind::RParen) {
                    if self.at_eof() {
                        return Err(self.error("')'"));
                    }
                    let element = self.element()?;
                    self.append(tree, element);
                }
                self.bump();
                Ok(self.ebnf_suffix(tree))
            }
            Some(TokenKind::LParen) => self.ebnf(),
            _ => {
                let atom = self.atom()?;
                Ok(self.ebnf_suffix(atom))
            }
        }
    }

    /// Parenthesised sub-rule with an optional EBNF or predicate suffix.
    fn ebnf(&mut self) -> Result<NodeId, ParseError> {
        let block = self.subrule()?;
        let wrapper = match self.peek() {
            Some(TokenKind::Implies) => Some(NodeKind::SynSemPred),
            Some(TokenKind::Caret) => Some(NodeKind::Root),
            Some(TokenKind::Bang) => Some(NodeKind::Bang),
            _ => None,
        };
        match wrapper {
            Some(kind) => {
                let op = self.bump();
                Ok(self.wrap(kind, op, block))
            }
            None => Ok(self.ebnf_suffix(block)),
        }
    }

    fn subrule(&mut self) -> Result<NodeId, ParseError> {
        let open = self.expect(TokenKind::LParen, "'('")?;
        let block = self.labelled(NodeKind::Block, "BLOCK", open);
        if self.at(TokenKind::OptionsOpen) || self.at(TokenKind::At) {
            if self.at(TokenKind::OptionsOpen) {
                let options = self.options_spec()?;
                self.append(block, options);
            }
            while self.at(TokenKind::At) {
                let action = self.named_action()?;
                self.append(block, action);
            }
            self.expect(TokenKind::Colon, "':'")?;
        }
        self.block_body(block)?;
        self.expect(TokenKind::RParen, "')'")?;
        Ok(block)
    }

    fn ebnf_suffix(&mut self, inner: NodeId) -> NodeId {
        let kind = match self.peek() {
            Some(TokenKind::Question) => NodeKind::Optional,
            Some(TokenKind::Star) => NodeKind::Closure,
            Some(TokenKind::Plus) => NodeKind::PositiveClosure,
            _ => return inner,
        };
        let op = self.bump();
        self.wrap(kind, op, inner)
    }

    fn atom(&mut self) -> Result<NodeId, ParseError> {
        let atom = match self.peek() {
            Some(TokenKind::QuotedLiteral) if self.peek_nth(1) == Some(TokenKind::Range) => {
                let from = self.bump();
                let range = self.bump();
                let to = self.expect(TokenKind::QuotedLiteral, "range end")?;
                let node = self.leaf(NodeKind::CharRange, range);
                let from_kind = literal_kind(self.text(from));
                let from = self.leaf(from_kind, from);
                let to_kind = literal_kind(self.text(to));
                let to = self.leaf(to_kind, to);
                self.append(node, from);
                self.append(node, to);
                node
            }
            Some(TokenKind::QuotedLiteral) | Some(TokenKind::DoubleQuotedLiteral) => {
                let index = self.bump();
                let kind = literal_kind(self.text(index));
                self.leaf(kind, index)
            }
            Some(TokenKind::Ident) => {
                let index = self.bump();
                let kind = ref_kind(self.text(index));
                let node = self.leaf(kind, index);
                if self.at(TokenKind::ArgAction) {
                    let arg = self.bump();
                    let arg = self.delimited_node(NodeKind::ArgAction, arg);
                    self.append(node, arg);
                }
                node
            }
            Some(TokenKind::Dot) => {
                let index = self.bump();
                self.leaf(NodeKind::Wildcard, index)
            }
            Some(TokenKind::Tilde) => {
                let tilde = self.bump();
                let negated = if self.at(TokenKind::LParen) {
                    self.subrule()?
                } else {
                    self.atom()?
                };
                self.wrap(NodeKind::Not, tilde, negated)
            }
            _ => return Err(self.error("grammar element")),
        };
        self.skip_element_options()?;
        Ok(match self.peek() {
            Some(TokenKind::Caret) => {
                let op = self.bump();
                self.wrap(NodeKind::Root, op, atom)
            }
            Some(TokenKind::Bang) => {
                let op = self.bump();
                self.wrap(NodeKind::Bang, op, atom)
            }
            _ => atom,
        })
    }

    /// `<node=Type>` element options carry no layout information; skip them.
    fn skip_element_options(&mut self) -> Result<(), ParseError> {
        if !self.at(TokenKind::Lt) {
            return Ok(());
        }
        while !self.at(TokenKind::Gt) {
            if self.at_eof() {
                return Err(self.error("'>'"));
            }
            self.bump();
        }
        self.bump();
        Ok(())
    }

    // -- Rewrites --

    fn rewrite(&mut self) -> Result<NodeId, ParseError> {
        let arrow = self.expect(TokenKind::RewriteArrow, "'->'")?;
        let node = self.labelled(NodeKind::Rewrite, "->", arrow);
        while !self.at_alt_end() {
            let element = self.rewrite_element()?;
            self.append(node, element);
        }
        Ok(node)
    }

    fn rewrite_element(&mut self) -> Result<NodeId, ParseError> {
        let element = match self.peek() {
            Some(TokenKind::LParen) | Some(TokenKind::TreeBegin) => {
                let open = self.bump();
                let kind = if self.kinds[open] == TokenKind::TreeBegin {
                    NodeKind::TreeBegin
                } else {
                    NodeKind::Block
                };
                let node = self.leaf(kind, open);
                while !self.at(TokenKind::RParen) {
                    if self.at_eof() {
                        return Err(self.error("')'"));
                    }
                    let child = self.rewrite_element()?;
                    self.append(node, child);
                }
                self.bump();
                node
            }
            Some(TokenKind::Action) => {
                let action = self.bump();
                if self.at(TokenKind::Question) {
                    self.bump();
                    self.delimited_node(NodeKind::SemPred, action)
                } else {
                    self.delimited_node(NodeKind::Action, action)
                }
            }
            Some(TokenKind::Ident) => {
                let index = self.bump();
                let kind = ref_kind(self.text(index));
                let node = self.leaf(kind, index);
                if self.at(TokenKind::ArgAction) {
                    let arg = self.bump();
                    let arg = self.delimited_node(NodeKind::ArgAction, arg);
                    self.append(node, arg);
                }
                node
            }
            Some(TokenKind::QuotedLiteral) | Some(TokenKind::DoubleQuotedLiteral) => {
                let index = self.bump();
                let kind = literal_kind(self.text(index));
                self.leaf(kind, index)
            }
            Some(TokenKind::Dollar) => {
                let dollar = self.bump();
                let name = self.expect(TokenKind::Ident, "label")?;
                let text = format!("${}", self.text(name));
                self.builder.node_at_token(NodeKind::Label, text, dollar)
            }
            Some(TokenKind::Dot) => {
                let index = self.bump();
                self.leaf(NodeKind::Wildcard, index)
            }
            Some(_) => {
                // template arguments and other rewrite punctuation
                let index = self.bump();
                self.leaf(NodeKind::Id, index)
            }
            None => return Err(self.error("rewrite element")),
        };
        Ok(self.ebnf_suffix(element))
    }
}

/// Token references start with an upper-case letter, rule references don't.
fn ref_kind(name: &str) -> NodeKind {
    if name.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        NodeKind::TokenRef
    } else {
        NodeKind::RuleRef
    }
}

/// `'x'` and `'\n'` are character literals; everything else quoted is a string.
fn literal_kind(text: &str) -> NodeKind {
    if !text.starts_with('\'') || text.len() < 2 {
        return NodeKind::StringLiteral;
    }
    let inner = &text[1..text.len() - 1];
    let mut chars = inner.chars();
    let single = match chars.next() {
        Some('\\') => inner.len() == 2 || (inner.starts_with("\\u") && inner.len() == 6),
        Some(_) => chars.next().is_none(),
        None => false,
    };
    if single {
        NodeKind::CharLiteral
    } else {
        NodeKind::StringLiteral
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
