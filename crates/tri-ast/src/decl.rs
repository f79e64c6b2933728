//! Declaration AST nodes.

use crate::expr::Expr;
use crate::terminal::{Identifier, TypeDenoter};
use crate::{NodeId, Span};

/// A declaration in the AST.
///
/// `id` is what name bindings point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decl {
    pub id: NodeId,
    pub kind: DeclKind,
    pub span: Span,
}

/// The kind of declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclKind {
    /// `const name ~ expr`
    Const {
        name: Identifier,
        value: Expr,
    },
    /// `type name`
    Var {
        ty: TypeDenoter,
        name: Identifier,
    },
    /// Two or more declarations separated by `;`
    Sequential(Vec<Decl>),
    /// Placeholder for a declaration that failed to parse
    Error,
}

impl Decl {
    pub fn new(id: NodeId, kind: DeclKind, span: Span) -> Self {
        Self { id, kind, span }
    }

    pub fn error(id: NodeId, span: Span) -> Self {
        Self { id, kind: DeclKind::Error, span }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, DeclKind::Error)
    }

    /// The declared name, for const and var declarations.
    pub fn name(&self) -> Option<&Identifier> {
        match &self.kind {
            DeclKind::Const { name, .. } | DeclKind::Var { name, .. } => Some(name),
            DeclKind::Sequential(_) | DeclKind::Error => None,
        }
    }
}
