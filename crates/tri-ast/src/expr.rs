// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Expression and parameter AST nodes.

use crate::terminal::{CharacterLiteral, Identifier, IntegerLiteral, Operator};
use crate::Span;

/// An expression in the AST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

/// The kind of expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprKind {
    /// `left op right`, folded left to right with no precedence
    Binary {
        left: Box<Expr>,
        op: Operator,
        right: Box<Expr>,
    },
    /// Character literal
    Character(CharacterLiteral),
    /// A name, optionally applied to a parenthesised parameter
    Id {
        name: Identifier,
        arg: Option<Box<Param>>,
    },
    /// Integer literal
    Integer(IntegerLiteral),
    /// Prefix operator application
    Unary {
        op: Operator,
        operand: Box<Expr>,
    },
    /// Placeholder for an expression that failed to parse
    Error,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn error(span: Span) -> Self {
        Self { kind: ExprKind::Error, span }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, ExprKind::Error)
    }
}

/// An actual parameter of a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub kind: ParamKind,
    pub span: Span,
}

/// The kind of parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
    /// `()` with nothing inside
    Blank,
    /// Value parameter
    Expression(Expr),
    /// By-reference parameter: `var name`
    Var(Identifier),
    /// Placeholder for a parameter that failed to parse
    Error,
}

impl Param {
    pub fn new(kind: ParamKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn error(span: Span) -> Self {
        Self { kind: ParamKind::Error, span }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, ParamKind::Error)
    }
}
