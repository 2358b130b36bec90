//! SQL lexer.
//!
//! Turns statement text into a stream of [`Token`]s. Bare identifiers keep
//! their original spelling; case folding is left to the parser.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
