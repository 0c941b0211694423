//! Front end for ANTLR v3 grammar files.
//!
//! - [`lexer`]: logos-based tokenizer with line/column tracking
//! - [`parser`]: recursive-descent parser building a [`SyntaxTree`](grammarlint_core::syntax::SyntaxTree)
//! - [`walker`]: discovery of grammar files under a project root

pub mod lexer;
pub mod parser;
pub mod walker;

pub use parser::{parse_grammar, ParseError};
