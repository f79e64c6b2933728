// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Abstract Syntax Tree types for the Tri teaching language.
//!
//! This crate defines the tokens and AST nodes shared between the lexer,
//! parser and the identification pass. The tree is immutable once parsed:
//! later passes attach their results through side tables keyed by [`NodeId`].

pub mod span;
pub mod token;
pub mod terminal;
pub mod expr;
pub mod command;
pub mod decl;
pub mod printer;

pub use span::{LineMap, Position, Span};

/// Unique identifier for AST nodes.
///
/// Identifiers, operators and declarations carry one so that semantic
/// passes can record what they learned without mutating the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const DUMMY: NodeId = NodeId(u32::MAX);
}

/// Hands out fresh [`NodeId`]s in creation order.
#[derive(Debug, Default)]
pub struct NodeIdGen {
    next: u32,
}

impl NodeIdGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_and_distinct() {
        let mut ids = NodeIdGen::new();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_eq!(a, NodeId(0));
        assert_eq!(b, NodeId(1));
        assert_ne!(a, NodeId::DUMMY);
    }
}
