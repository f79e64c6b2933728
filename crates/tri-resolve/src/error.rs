// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Identification error types.

use thiserror::Error;
use tri_ast::Span;

/// A name identification error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct IdentifyError {
    pub kind: IdentifyErrorKind,
    pub span: Span,
}

impl IdentifyError {
    pub fn already_declared(name: String, span: Span, previous: Option<Span>) -> Self {
        Self {
            kind: IdentifyErrorKind::AlreadyDeclared { name, previous },
            span,
        }
    }

    pub fn undeclared(name: String, span: Span) -> Self {
        Self {
            kind: IdentifyErrorKind::Undeclared { name },
            span,
        }
    }

    pub fn malformed(what: &'static str, span: Span) -> Self {
        Self {
            kind: IdentifyErrorKind::MalformedNode { what },
            span,
        }
    }
}

/// The kind of identification error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifyErrorKind {
    /// `previous` is `None` when the earlier binding is predeclared.
    #[error("'{name}' is already declared in this scope")]
    AlreadyDeclared { name: String, previous: Option<Span> },

    #[error("'{name}' is not declared")]
    Undeclared { name: String },

    /// An `Error` node left behind by the parser.
    #[error("cannot identify names in a malformed {what}")]
    MalformedNode { what: &'static str },
}
