// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error hints - suggestions for fixing common mistakes.
//!
//! Kept separate from the main parser to avoid clutter.

use tri_ast::token::{Token, TokenKind};

/// Get a hint for an "expected X" error based on what was found instead.
pub fn for_expected(expected: &str, found: &Token) -> Option<&'static str> {
    match (expected, found.kind) {
        // Assignment and constant binding
        ("':='", TokenKind::Operator) if found.spelling == "=" => {
            Some("assignment is written ':='")
        }
        ("'~'", TokenKind::Operator) if found.spelling == "=" => {
            Some("constants are bound with '~', as in 'const n ~ 10'")
        }
        ("'~'", TokenKind::Becomes) => Some("constants are bound with '~', as in 'const n ~ 10'"),
        ("':=' or '('", TokenKind::Operator) if found.spelling == "=" => {
            Some("assignment is written ':='")
        }
        ("':=' or '('", _) => Some("a command starting with a name is an assignment or a call"),

        // Block structure
        ("'end'", TokenKind::Semicolon) => Some("';' separates commands; remove the one before 'end'"),
        ("'end'", TokenKind::EndOfText) => Some("every 'begin' needs a matching 'end'"),
        ("'in'", TokenKind::Semicolon) => Some("';' separates declarations; remove the one before 'in'"),
        ("'in'", _) => Some("syntax: let declaration in command"),
        ("'then'", _) => Some("syntax: if expression then command else command"),
        ("'else' or 'noelse'", _) => Some("every 'if' needs an 'else' branch or 'noelse'"),
        ("'do'", _) => Some("syntax: while expression do command"),
        ("'until'", _) => Some("syntax: repeat command until expression"),

        // Parentheses
        ("')'", TokenKind::EndOfText) => Some("add ')' to close the parenthesis"),

        // Names
        ("a name", TokenKind::IntLiteral) => Some("names can't start with a number"),
        ("a name", TokenKind::Error) => Some("names use lower-case letters and digits only"),

        // Declarations
        ("a declaration", TokenKind::Var) => {
            Some("variables are declared as 'type name', as in 'integer n'")
        }
        ("a declaration", _) => Some("declarations start with 'const' or a type name"),

        // Expressions, parameters, commands
        ("an expression", _) => Some("try a number, a character, a name, or '(' expression ')'"),
        ("a parameter", _) => Some("pass an expression, 'var name', or nothing"),
        ("a command", _) => {
            Some("commands start with a name, 'begin', 'let', 'if', 'while', 'repeat' or 'nothing'")
        }

        // Top level
        ("end of text", _) => {
            Some("a program is a single command; group several with 'begin' ... 'end'")
        }

        _ => None,
    }
}
