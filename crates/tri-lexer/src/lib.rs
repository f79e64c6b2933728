//! Lexer for the Tri language.
//!
//! Tokenizes source code into a complete stream of tokens for the parser.
//! Malformed input becomes `Error` tokens; the stream always ends with
//! exactly one `EndOfText`.

mod lexer;

pub use lexer::{LexError, LexErrorKind, LexResult, Lexer};

/// Tokenize `source` in one call.
pub fn tokenize(source: &str) -> LexResult {
    Lexer::new(source).tokenize()
}
