// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Leaf nodes: names, operators, literals and type denoters.

use crate::{NodeId, Span};

/// A name occurrence. Its binding is recorded by the identification pass
/// in a side table keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub id: NodeId,
    pub spelling: String,
    pub span: Span,
}

/// An operator occurrence, resolved through the same scopes as identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    pub id: NodeId,
    pub spelling: String,
    pub span: Span,
}

/// Integer literal, kept as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerLiteral {
    pub spelling: String,
    pub span: Span,
}

impl IntegerLiteral {
    /// Numeric value, `None` if it does not fit in an `i64`.
    pub fn value(&self) -> Option<i64> {
        self.spelling.parse().ok()
    }
}

/// Character literal, kept as written including its quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterLiteral {
    pub spelling: String,
    pub span: Span,
}

impl CharacterLiteral {
    /// Text between the delimiters.
    pub fn interior(&self) -> &str {
        let mut chars = self.spelling.chars();
        chars.next();
        chars.next_back();
        chars.as_str()
    }

    /// The character, when the literal holds exactly one.
    pub fn value(&self) -> Option<char> {
        let mut chars = self.interior().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

/// A type denoter. Currently just a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDenoter {
    pub name: Identifier,
    pub span: Span,
}
