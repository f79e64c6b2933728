// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Scoped symbol table for identification.

use std::collections::HashMap;

use tri_ast::NodeId;

use crate::std_env::{self, BuiltinId};

/// What a name is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    /// A declaration in the program, by the declaration's node id.
    Declared(NodeId),
    /// An entry of the standard environment.
    Builtin(BuiltinId),
}

/// Stack of nested name scopes. The root scope is never popped.
#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<HashMap<String, Binding>>,
}

impl SymbolTable {
    /// A table holding only an empty root scope.
    pub fn new() -> Self {
        Self { scopes: vec![HashMap::new()] }
    }

    /// A table whose root scope holds the standard environment.
    pub fn with_standard_environment() -> Self {
        let mut table = Self::new();
        for (id, builtin) in std_env::builtins() {
            let _ = table.enter(builtin.name, Binding::Builtin(id));
        }
        table
    }

    pub fn open_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Pop the innermost scope. Closing the root scope does nothing.
    pub fn close_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Number of scopes opened above the root.
    pub fn depth(&self) -> usize {
        self.scopes.len() - 1
    }

    /// Bind `name` in the innermost scope. Fails with the existing binding
    /// if the name is already bound there; outer bindings are shadowed.
    pub fn enter(&mut self, name: &str, binding: Binding) -> Result<(), Binding> {
        let innermost = self.scopes.len() - 1;
        let scope = &mut self.scopes[innermost];
        match scope.get(name) {
            Some(&existing) => Err(existing),
            None => {
                scope.insert(name.to_string(), binding);
                Ok(())
            }
        }
    }

    /// Innermost binding of `name`.
    pub fn retrieve(&self, name: &str) -> Option<Binding> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name).copied())
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
