//! Token definitions for the lexer.

use std::fmt;

use crate::Span;

/// A token produced by the lexer.
///
/// The raw lexeme is kept verbatim: literal values and identifier names are
/// read from `spelling` by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub spelling: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, spelling: impl Into<String>, span: Span) -> Self {
        Self { kind, spelling: spelling.into(), span }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} \"{}\"", self.kind, self.spelling)
    }
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals and names
    Identifier,
    IntLiteral,
    CharLiteral,
    Operator,

    // Keywords
    Begin,
    End,
    Let,
    In,
    If,
    Then,
    Else,
    NoElse,
    While,
    Do,
    Repeat,
    Until,
    Nothing,
    Const,
    Var,
    /// `is` or `~`
    Is,

    // Punctuation
    Semicolon,
    Colon,
    Becomes,
    LeftBracket,
    RightBracket,

    // Special
    EndOfText,
    Error,
}

impl TokenKind {
    /// Keyword table, exact spelling to token kind.
    pub fn keyword(spelling: &str) -> Option<TokenKind> {
        Some(match spelling {
            "begin" => TokenKind::Begin,
            "end" => TokenKind::End,
            "let" => TokenKind::Let,
            "in" => TokenKind::In,
            "if" => TokenKind::If,
            "then" => TokenKind::Then,
            "else" => TokenKind::Else,
            "noelse" => TokenKind::NoElse,
            "while" => TokenKind::While,
            "do" => TokenKind::Do,
            "repeat" => TokenKind::Repeat,
            "until" => TokenKind::Until,
            "nothing" => TokenKind::Nothing,
            "const" => TokenKind::Const,
            "var" => TokenKind::Var,
            "is" => TokenKind::Is,
            _ => return None,
        })
    }

    /// Returns a human-readable name for this token kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Identifier => "a name",
            TokenKind::IntLiteral => "an integer",
            TokenKind::CharLiteral => "a character",
            TokenKind::Operator => "an operator",

            TokenKind::Begin => "'begin'",
            TokenKind::End => "'end'",
            TokenKind::Let => "'let'",
            TokenKind::In => "'in'",
            TokenKind::If => "'if'",
            TokenKind::Then => "'then'",
            TokenKind::Else => "'else'",
            TokenKind::NoElse => "'noelse'",
            TokenKind::While => "'while'",
            TokenKind::Do => "'do'",
            TokenKind::Repeat => "'repeat'",
            TokenKind::Until => "'until'",
            TokenKind::Nothing => "'nothing'",
            TokenKind::Const => "'const'",
            TokenKind::Var => "'var'",
            TokenKind::Is => "'~'",

            TokenKind::Semicolon => "';'",
            TokenKind::Colon => "':'",
            TokenKind::Becomes => "':='",
            TokenKind::LeftBracket => "'('",
            TokenKind::RightBracket => "')'",

            TokenKind::EndOfText => "end of text",
            TokenKind::Error => "an invalid token",
        }
    }

    /// True for tokens that can start a single command.
    pub fn starts_command(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::Begin
                | TokenKind::Let
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Repeat
                | TokenKind::Nothing
        )
    }

    /// True for tokens that can start a single declaration.
    pub fn starts_declaration(&self) -> bool {
        matches!(self, TokenKind::Const | TokenKind::Identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_keyword_is_in_the_table() {
        let words = [
            "begin", "end", "let", "in", "if", "then", "else", "noelse", "while", "do",
            "repeat", "until", "nothing", "const", "var", "is",
        ];
        for word in words {
            assert!(TokenKind::keyword(word).is_some(), "{word} should be a keyword");
        }
        assert_eq!(TokenKind::keyword("Begin"), None);
        assert_eq!(TokenKind::keyword("beginning"), None);
    }

    #[test]
    fn command_starters() {
        assert!(TokenKind::Nothing.starts_command());
        assert!(!TokenKind::Semicolon.starts_command());
        assert!(TokenKind::Const.starts_declaration());
        assert!(!TokenKind::Var.starts_declaration());
    }
}
