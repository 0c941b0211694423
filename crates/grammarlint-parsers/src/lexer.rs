//! Lexer for ANTLR v3 grammar files.
//!
//! Produces span-based tokens; text is sliced from the source only when needed.
//! Whitespace and comments are dropped, except `/** ... */` doc comments which
//! the parser attaches to grammars and rules.
//!
//! ## Actions
//!
//! `{...}` actions and `[...]` argument actions may nest and may contain string
//! literals or comments with unbalanced delimiters, so they are scanned by hand
//! from a logos callback instead of a regex.
//!
//! ## Error handling
//!
//! Consecutive error characters are coalesced into a single `Garbage` token.

use std::ops::Range;

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[regex(r"options[ \t\r\n]*\{")]
    OptionsOpen,
    #[regex(r"tokens[ \t\r\n]*\{")]
    TokensOpen,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
    #[regex(r"[0-9]+")]
    Int,
    #[regex(r"'(?:[^'\\]|\\.)*'")]
    QuotedLiteral,
    #[regex(r#""(?:[^"\\]|\\.)*""#)]
    DoubleQuotedLiteral,

    #[token("{", action_body)]
    Action,
    #[token("[", arg_action_body)]
    ArgAction,

    #[token("::")]
    ColonColon,
    #[token(":")]
    Colon,
    #[token(";")]
    Semi,
    #[token("|")]
    Or,
    #[token("=")]
    Assign,
    #[token("+=")]
    PlusAssign,
    #[token("=>")]
    Implies,
    #[token("->")]
    RewriteArrow,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("}")]
    RBrace,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token("?")]
    Question,
    #[token("~")]
    Tilde,
    #[token("..")]
    Range,
    #[token(".")]
    Dot,
    #[token("^(")]
    TreeBegin,
    #[token("^")]
    Caret,
    #[token("!")]
    Bang,
    #[token("@")]
    At,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token(",")]
    Comma,
    #[token("$")]
    Dollar,

    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,
    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,
    #[regex(r"/\*(?:[^*]|\*[^/])*\*/")]
    BlockComment,

    /// `/** ... */`, split off from `BlockComment` after lexing.
    DocComment,
    /// Coalesced unrecognised input.
    Garbage,
}

impl TokenKind {
    fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment
        )
    }
}

/// Zero-copy token: kind + byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.clone()]
    }
}

fn action_body(lex: &mut logos::Lexer<'_, TokenKind>) -> bool {
    bump_balanced(lex, '{', '}')
}

fn arg_action_body(lex: &mut logos::Lexer<'_, TokenKind>) -> bool {
    bump_balanced(lex, '[', ']')
}

fn bump_balanced(lex: &mut logos::Lexer<'_, TokenKind>, open: char, close: char) -> bool {
    match balanced_len(lex.remainder(), open, close) {
        Some(len) => {
            lex.bump(len);
            true
        }
        None => false,
    }
}

/// Length of `rest` up to and including the delimiter closing an already
/// opened `open`. Quoted literals and comments are skipped.
fn balanced_len(rest: &str, open: char, close: char) -> Option<usize> {
    let mut depth = 1usize;
    let mut chars = rest.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '\'' | '"' => {
                while let Some((_, q)) = chars.next() {
                    if q == '\\' {
                        chars.next();
                    } else if q == c || q == '\n' {
                        break;
                    }
                }
            }
            '/' if matches!(chars.peek(), Some((_, '/'))) => {
                for (_, n) in chars.by_ref() {
                    if n == '\n' {
                        break;
                    }
                }
            }
            '/' if matches!(chars.peek(), Some((_, '*'))) => {
                chars.next();
                let mut prev = ' ';
                for (_, n) in chars.by_ref() {
                    if prev == '*' && n == '/' {
                        break;
                    }
                    prev = n;
                }
            }
            c if c == open => depth += 1,
            c if c == close => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + c.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}

/// Tokenizes source into significant tokens.
///
/// Post-processes the logos output:
/// - Drops whitespace and comments, keeping doc comments as `DocComment`
/// - Coalesces consecutive lexer errors into single `Garbage` tokens
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                let span = lexer.span();
                if let Some(start) = error_start.take() {
                    tokens.push(Token {
                        kind: TokenKind::Garbage,
                        span: start..span.start,
                    });
                }
                if kind == TokenKind::BlockComment && is_doc_comment(&source[span.clone()]) {
                    tokens.push(Token {
                        kind: TokenKind::DocComment,
                        span,
                    });
                } else if !kind.is_trivia() {
                    tokens.push(Token { kind, span });
                }
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token {
                        kind: TokenKind::Garbage,
                        span: start..source.len(),
                    });
                }
                break;
            }
        }
    }

    tokens
}

fn is_doc_comment(text: &str) -> bool {
    text.starts_with("/**") && text.len() > 4
}

/// Maps byte offsets to 1-based lines and 0-based character columns.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { line_starts }
    }

    pub fn position(&self, source: &str, offset: usize) -> (u32, u32) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next - 1,
        };
        let start = self.line_starts[line];
        let column = source[start..offset].chars().count();
        (line as u32 + 1, column as u32)
    }
}
