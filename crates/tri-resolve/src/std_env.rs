// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The standard environment: names every program can use without
//! declaring them.
//!
//! Operators are ordinary entries keyed by their spelling, so they are
//! resolved through the same scopes as identifiers.

/// Types the standard environment talks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    Boolean,
    Char,
    Integer,
    /// Accepts a value of any type (equality tests).
    Any,
}

/// How a routine receives an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamMode {
    Value,
    Var,
}

/// What a predeclared name denotes, with the signature a type checker
/// needs to check its uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinKind {
    Type(BuiltinType),
    Constant { ty: BuiltinType },
    Function { params: &'static [(ParamMode, BuiltinType)], result: BuiltinType },
    Procedure { params: &'static [(ParamMode, BuiltinType)] },
    BinaryOperator { left: BuiltinType, right: BuiltinType, result: BuiltinType },
    UnaryOperator { operand: BuiltinType, result: BuiltinType },
}

/// A predeclared name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Builtin {
    pub name: &'static str,
    pub kind: BuiltinKind,
}

/// Index into the standard environment. Only handed out by this module,
/// so it always refers to an existing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuiltinId(u32);

impl BuiltinId {
    pub fn get(self) -> &'static Builtin {
        &STANDARD_ENVIRONMENT[self.0 as usize]
    }

    pub fn name(self) -> &'static str {
        self.get().name
    }
}

use BuiltinKind::*;
use BuiltinType::{Any, Boolean, Char, Integer};
use ParamMode::{Value, Var};

const fn arithmetic(name: &'static str) -> Builtin {
    Builtin { name, kind: BinaryOperator { left: Integer, right: Integer, result: Integer } }
}

const fn comparison(name: &'static str) -> Builtin {
    Builtin { name, kind: BinaryOperator { left: Integer, right: Integer, result: Boolean } }
}

const fn equality(name: &'static str) -> Builtin {
    Builtin { name, kind: BinaryOperator { left: Any, right: Any, result: Boolean } }
}

static STANDARD_ENVIRONMENT: &[Builtin] = &[
    // Types
    Builtin { name: "boolean", kind: Type(Boolean) },
    Builtin { name: "char", kind: Type(Char) },
    Builtin { name: "integer", kind: Type(Integer) },
    // Constants
    Builtin { name: "false", kind: Constant { ty: Boolean } },
    Builtin { name: "true", kind: Constant { ty: Boolean } },
    Builtin { name: "maxint", kind: Constant { ty: Integer } },
    // Functions
    Builtin { name: "chr", kind: Function { params: &[(Value, Integer)], result: Char } },
    Builtin { name: "ord", kind: Function { params: &[(Value, Char)], result: Integer } },
    Builtin { name: "eof", kind: Function { params: &[], result: Boolean } },
    Builtin { name: "eol", kind: Function { params: &[], result: Boolean } },
    // Procedures
    Builtin { name: "get", kind: Procedure { params: &[(Var, Char)] } },
    Builtin { name: "put", kind: Procedure { params: &[(Value, Char)] } },
    Builtin { name: "getint", kind: Procedure { params: &[(Var, Integer)] } },
    Builtin { name: "putint", kind: Procedure { params: &[(Value, Integer)] } },
    Builtin { name: "geteol", kind: Procedure { params: &[] } },
    Builtin { name: "puteol", kind: Procedure { params: &[] } },
    // Operators
    arithmetic("+"),
    arithmetic("-"),
    arithmetic("*"),
    arithmetic("/"),
    comparison("<"),
    comparison("<="),
    comparison(">"),
    comparison(">="),
    equality("="),
    equality("\\="),
    Builtin { name: "\\", kind: UnaryOperator { operand: Boolean, result: Boolean } },
];

/// Every predeclared name in table order.
pub fn builtins() -> impl Iterator<Item = (BuiltinId, &'static Builtin)> {
    STANDARD_ENVIRONMENT
        .iter()
        .enumerate()
        .map(|(i, builtin)| (BuiltinId(i as u32), builtin))
}

/// Find a predeclared name by spelling.
pub fn lookup(name: &str) -> Option<BuiltinId> {
    builtins().find(|(_, b)| b.name == name).map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let mut seen = HashSet::new();
        for (_, builtin) in builtins() {
            assert!(seen.insert(builtin.name), "duplicate builtin {}", builtin.name);
        }
    }

    #[test]
    fn lookup_by_spelling() {
        let id = lookup("putint").unwrap();
        assert_eq!(id.name(), "putint");
        assert!(matches!(id.get().kind, Procedure { params: [(Value, Integer)] }));

        let not = lookup("\\").unwrap();
        assert!(matches!(not.get().kind, UnaryOperator { operand: Boolean, .. }));
        assert!(matches!(lookup("<=").unwrap().get().kind, BinaryOperator { result: Boolean, .. }));
        assert_eq!(lookup("print"), None);
    }
}
