// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The lexer implementation using logos.

use logos::Logos;
use thiserror::Error;
use tri_ast::token::{Token, TokenKind};
use tri_ast::Span;

/// Raw token type for logos - keywords and the case rule are applied in a
/// second pass.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    // === Names ===
    // Keyword lookup and the upper-case check happen in `convert_token`.
    #[regex(r"[a-zA-Z][a-z0-9]*")]
    Word,

    #[regex(r"_[a-z]*")]
    UnderscoreName,

    // === Literals ===
    #[regex(r"[0-9]+")]
    Int,

    /// `'c'`, exactly one interior character. Carries whether it closed.
    #[token("'", quoted_char)]
    QuotedChar(bool),

    /// `’...’`, graphic interior. Carries whether it closed.
    #[token("’", curly_literal)]
    CurlyLiteral(bool),

    // === Operators ===
    // One operator character, optionally followed by `=`.
    #[regex(r"[+\-*/<>=\\]=?")]
    Operator,

    // === Punctuation ===
    #[token(":=")]
    Becomes,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("~")]
    Tilde,
    #[token("(")]
    LeftBracket,
    #[token(")")]
    RightBracket,

    // === Comments (skip them) ===
    #[regex(r"![^\n]*", logos::skip)]
    LineComment,
}

/// Scan the rest of an ASCII-quoted literal: one character, then `'`.
fn quoted_char(lexer: &mut logos::Lexer<RawToken>) -> Option<bool> {
    let mut chars = lexer.remainder().chars();
    let Some(inner) = chars.next() else {
        return Some(false);
    };
    let closed = chars.next() == Some('\'');
    let consumed = inner.len_utf8() + if closed { 1 } else { 0 };
    lexer.bump(consumed);
    Some(closed)
}

/// Scan the rest of a `’`-quoted literal up to and including the closing `’`.
/// Stops before the first character that may not appear inside.
fn curly_literal(lexer: &mut logos::Lexer<RawToken>) -> Option<bool> {
    let mut consumed = 0;
    for c in lexer.remainder().chars() {
        if c == '’' {
            lexer.bump(consumed + c.len_utf8());
            return Some(true);
        }
        if !is_graphic(c) {
            break;
        }
        consumed += c.len_utf8();
    }
    lexer.bump(consumed);
    Some(false)
}

/// Characters allowed between `’` delimiters.
fn is_graphic(c: char) -> bool {
    c.is_ascii_lowercase()
        || c.is_ascii_digit()
        || matches!(c, '.' | ',' | '?')
        || matches!(c, ' ' | '\t' | '\n')
}

/// The lexer for Tri source code.
pub struct Lexer<'a> {
    source: &'a str,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self { source, errors: Vec::new() }
    }

    /// Tokenize the entire source.
    ///
    /// Never fails: malformed input becomes `Error` tokens (each also
    /// recorded as a [`LexError`]) and the last token is always `EndOfText`.
    pub fn tokenize(&mut self) -> LexResult {
        let mut tokens = Vec::new();
        let mut logos_lexer = RawToken::lexer(self.source);

        while let Some(result) = logos_lexer.next() {
            let span = logos_lexer.span();

            let token = match result {
                Ok(raw) => {
                    let spelling = logos_lexer.slice();
                    let kind = self.convert_token(raw, spelling, span.start, span.end);
                    Token::new(kind, spelling, Span::new(span.start, span.end))
                }
                Err(()) => {
                    // Consume exactly the offending character.
                    let ch = self.source[span.start..].chars().next().unwrap_or('\u{FFFD}');
                    let ch_end = (span.start + ch.len_utf8()).min(self.source.len());
                    if span.end < ch_end {
                        logos_lexer.bump(ch_end - span.end);
                    }
                    let end = span.end.max(ch_end);
                    let spelling = &self.source[span.start..end];
                    self.errors.push(LexError::unexpected_char(spelling, span.start, end));
                    Token::new(TokenKind::Error, spelling, Span::new(span.start, end))
                }
            };

            tracing::debug!(kind = ?token.kind, spelling = %token.spelling, "scanned token");
            tokens.push(token);
        }

        tokens.push(Token::new(
            TokenKind::EndOfText,
            "",
            Span::new(self.source.len(), self.source.len()),
        ));

        LexResult {
            tokens,
            errors: std::mem::take(&mut self.errors),
        }
    }

    /// Convert a raw logos token to our TokenKind, recording errors.
    fn convert_token(&mut self, raw: RawToken, slice: &str, start: usize, end: usize) -> TokenKind {
        match raw {
            RawToken::Word => {
                if let Some(keyword) = TokenKind::keyword(slice) {
                    keyword
                } else if slice.chars().any(|c| c.is_ascii_uppercase()) {
                    self.errors.push(LexError::upper_case_name(slice, start, end));
                    TokenKind::Error
                } else {
                    TokenKind::Identifier
                }
            }
            RawToken::UnderscoreName => TokenKind::Identifier,
            RawToken::Int => TokenKind::IntLiteral,
            RawToken::QuotedChar(true) | RawToken::CurlyLiteral(true) => TokenKind::CharLiteral,
            RawToken::QuotedChar(false) | RawToken::CurlyLiteral(false) => {
                self.errors.push(LexError::malformed_char(slice, start, end));
                TokenKind::Error
            }
            RawToken::Operator => TokenKind::Operator,
            RawToken::Becomes => TokenKind::Becomes,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::Tilde => TokenKind::Is,
            RawToken::LeftBracket => TokenKind::LeftBracket,
            RawToken::RightBracket => TokenKind::RightBracket,

            // Skipped by logos, listed for completeness
            RawToken::LineComment => unreachable!("comments are skipped"),
        }
    }
}

/// Result of lexing: tokens plus any errors found.
#[derive(Debug)]
pub struct LexResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl LexResult {
    /// Returns true if lexing completed without errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A lexer error: the span and spelling of one `Error` token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
    pub hint: Option<String>,
}

/// The kind of lexical error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(String),

    #[error("invalid name '{0}'")]
    UpperCaseName(String),

    #[error("malformed character literal {0}")]
    MalformedCharacter(String),
}

impl LexError {
    fn unexpected_char(spelling: &str, start: usize, end: usize) -> Self {
        Self {
            kind: LexErrorKind::UnexpectedCharacter(spelling.to_string()),
            span: Span::new(start, end),
            hint: None,
        }
    }

    fn upper_case_name(spelling: &str, start: usize, end: usize) -> Self {
        Self {
            kind: LexErrorKind::UpperCaseName(spelling.to_string()),
            span: Span::new(start, end),
            hint: Some(format!("names are lower-case: try '{}'", spelling.to_ascii_lowercase())),
        }
    }

    fn malformed_char(spelling: &str, start: usize, end: usize) -> Self {
        Self {
            kind: LexErrorKind::MalformedCharacter(spelling.to_string()),
            span: Span::new(start, end),
            hint: Some("close the literal with a matching quote".to_string()),
        }
    }

    /// The raw text of the offending token.
    pub fn spelling(&self) -> &str {
        match &self.kind {
            LexErrorKind::UnexpectedCharacter(s)
            | LexErrorKind::UpperCaseName(s)
            | LexErrorKind::MalformedCharacter(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src).tokenize().tokens.iter().map(|t| t.kind).collect()
    }

    fn spellings(src: &str) -> Vec<String> {
        Lexer::new(src).tokenize().tokens.into_iter().map(|t| t.spelling).collect()
    }

    #[test]
    fn begin_block_tokens() {
        use TokenKind::*;
        let result = Lexer::new("begin x := 1; y := x + 2 end").tokenize();
        assert!(result.is_ok());
        let got: Vec<_> = result.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            got,
            vec![
                Begin, Identifier, Becomes, IntLiteral, Semicolon, Identifier, Becomes,
                Identifier, Operator, IntLiteral, End, EndOfText
            ]
        );
        assert_eq!(result.tokens[1].spelling, "x");
        assert_eq!(result.tokens[8].spelling, "+");
        assert_eq!(result.tokens[9].spelling, "2");
    }

    #[test]
    fn keywords_versus_names() {
        use TokenKind::*;
        assert_eq!(
            kinds("let in ifx nothing noelse is"),
            vec![Let, In, Identifier, Nothing, NoElse, Is, EndOfText]
        );
    }

    #[test]
    fn underscore_names() {
        assert_eq!(spellings("_ _abc _x1"), vec!["_", "_abc", "_x", "1", ""]);
        assert_eq!(
            kinds("_abc"),
            vec![TokenKind::Identifier, TokenKind::EndOfText]
        );
    }

    #[test]
    fn upper_case_is_an_error() {
        let result = Lexer::new("Hello").tokenize();
        assert_eq!(result.tokens[0].kind, TokenKind::Error);
        assert_eq!(result.tokens[0].spelling, "Hello");
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(result.errors[0].kind, LexErrorKind::UpperCaseName(_)));
    }

    #[test]
    fn upper_case_mid_name_splits() {
        // Scanning stops at the capital, which then starts its own word.
        let result = Lexer::new("aBc").tokenize();
        let got: Vec<_> = result.tokens.iter().map(|t| (t.kind, t.spelling.as_str())).collect();
        assert_eq!(
            got,
            vec![
                (TokenKind::Identifier, "a"),
                (TokenKind::Error, "Bc"),
                (TokenKind::EndOfText, ""),
            ]
        );
    }

    #[test]
    fn operators_take_optional_equals() {
        assert_eq!(spellings("<= >= < \\= = +"), vec!["<=", ">=", "<", "\\=", "=", "+", ""]);
        assert!(kinds("<= >= \\=")[..3].iter().all(|k| *k == TokenKind::Operator));
        // Any operator character may take the trailing `=`.
        assert_eq!(spellings("=="), vec!["==", ""]);
        assert_eq!(spellings("+-"), vec!["+", "-", ""]);
    }

    #[test]
    fn colon_and_becomes() {
        use TokenKind::*;
        assert_eq!(kinds(": := :"), vec![Colon, Becomes, Colon, EndOfText]);
    }

    #[test]
    fn punctuation() {
        use TokenKind::*;
        assert_eq!(kinds("; ~ ( )"), vec![Semicolon, Is, LeftBracket, RightBracket, EndOfText]);
    }

    #[test]
    fn comments_and_whitespace_are_skipped() {
        use TokenKind::*;
        let src = "! leading comment\n  x\t! trailing := 1\n;";
        assert_eq!(kinds(src), vec![Identifier, Semicolon, EndOfText]);
    }

    #[test]
    fn ascii_char_literal() {
        let result = Lexer::new("'a' ' '").tokenize();
        assert!(result.is_ok());
        assert_eq!(result.tokens[0].kind, TokenKind::CharLiteral);
        assert_eq!(result.tokens[0].spelling, "'a'");
        assert_eq!(result.tokens[1].spelling, "' '");
    }

    #[test]
    fn unterminated_char_literal_at_end() {
        let result = Lexer::new("'a").tokenize();
        assert_eq!(result.tokens.len(), 2);
        assert_eq!(result.tokens[0].kind, TokenKind::Error);
        assert_eq!(result.tokens[0].spelling, "'a");
        assert_eq!(result.tokens[0].span, Span::new(0, 2));
        assert_eq!(result.tokens[1].kind, TokenKind::EndOfText);
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(result.errors[0].kind, LexErrorKind::MalformedCharacter(_)));
    }

    #[test]
    fn lone_quote_at_end() {
        let result = Lexer::new("'").tokenize();
        assert_eq!(result.tokens[0].kind, TokenKind::Error);
        assert_eq!(result.tokens[0].spelling, "'");
        assert_eq!(result.tokens.last().map(|t| t.kind), Some(TokenKind::EndOfText));
    }

    #[test]
    fn curly_literal() {
        let result = Lexer::new("’hello, world?’ x").tokenize();
        assert!(result.is_ok(), "{:?}", result.errors);
        assert_eq!(result.tokens[0].kind, TokenKind::CharLiteral);
        assert_eq!(result.tokens[0].spelling, "’hello, world?’");
        assert_eq!(result.tokens[1].kind, TokenKind::Identifier);
    }

    #[test]
    fn curly_literal_stops_at_invalid_char() {
        let result = Lexer::new("’abC’").tokenize();
        let got: Vec<_> = result.tokens.iter().map(|t| (t.kind, t.spelling.as_str())).collect();
        assert_eq!(got[0], (TokenKind::Error, "’ab"));
        assert_eq!(got[1], (TokenKind::Error, "C"));
        assert_eq!(got.last().map(|t| t.0), Some(TokenKind::EndOfText));
        assert_eq!(result.errors.len(), 3);
    }

    #[test]
    fn unexpected_characters_consume_one_char() {
        let result = Lexer::new("x # é y").tokenize();
        let got: Vec<_> = result.tokens.iter().map(|t| (t.kind, t.spelling.as_str())).collect();
        assert_eq!(
            got,
            vec![
                (TokenKind::Identifier, "x"),
                (TokenKind::Error, "#"),
                (TokenKind::Error, "é"),
                (TokenKind::Identifier, "y"),
                (TokenKind::EndOfText, ""),
            ]
        );
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[1].spelling(), "é");
    }

    #[test]
    fn empty_source_is_just_end_of_text() {
        let result = Lexer::new("").tokenize();
        assert_eq!(result.tokens.len(), 1);
        assert_eq!(result.tokens[0].kind, TokenKind::EndOfText);
        assert_eq!(result.tokens[0].span, Span::new(0, 0));
    }

    #[test]
    fn spans_are_byte_offsets() {
        let result = Lexer::new("if  ab").tokenize();
        assert_eq!(result.tokens[0].span, Span::new(0, 2));
        assert_eq!(result.tokens[1].span, Span::new(4, 6));
        assert_eq!(result.tokens[2].span, Span::new(6, 6));
    }
}
