//! Command AST nodes.

use crate::decl::Decl;
use crate::expr::{Expr, Param};
use crate::terminal::Identifier;
use crate::Span;

/// The root of a parsed source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub command: Command,
    pub span: Span,
}

/// A command in the AST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    pub span: Span,
}

/// The kind of command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    /// `name := expr`
    Assign {
        target: Identifier,
        value: Expr,
    },
    /// `nothing`
    Blank,
    /// `name ( param )`
    Call {
        callee: Identifier,
        arg: Param,
    },
    /// `if cond then cmd (else cmd | noelse)`; `else_branch` is `None` for `noelse`
    If {
        cond: Expr,
        then_branch: Box<Command>,
        else_branch: Option<Box<Command>>,
    },
    /// `let decl in cmd`
    Let {
        decl: Box<Decl>,
        body: Box<Command>,
    },
    /// Two or more commands separated by `;`
    Sequential(Vec<Command>),
    /// `while cond do cmd`
    While {
        cond: Expr,
        body: Box<Command>,
    },
    /// `repeat cmd until cond`
    Repeat {
        body: Box<Command>,
        cond: Expr,
    },
    /// Placeholder for a command that failed to parse
    Error,
}

impl Command {
    pub fn new(kind: CommandKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn error(span: Span) -> Self {
        Self { kind: CommandKind::Error, span }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, CommandKind::Error)
    }
}
