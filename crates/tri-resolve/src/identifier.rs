// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The declaration identifier: binds every name occurrence to the
//! declaration it refers to.

use std::collections::HashMap;

use tri_ast::command::{Command, CommandKind, Program};
use tri_ast::decl::{Decl, DeclKind};
use tri_ast::expr::{Expr, ExprKind, Param, ParamKind};
use tri_ast::terminal::{Identifier, Operator, TypeDenoter};
use tri_ast::{NodeId, Span};

use crate::error::IdentifyError;
use crate::scope::{Binding, SymbolTable};
use crate::{DeclInfo, DeclInfoKind, Identification};

pub struct DeclarationIdentifier {
    table: SymbolTable,
    resolutions: HashMap<NodeId, Binding>,
    declarations: HashMap<NodeId, DeclInfo>,
    errors: Vec<IdentifyError>,
}

impl DeclarationIdentifier {
    pub fn new() -> Self {
        Self {
            table: SymbolTable::with_standard_environment(),
            resolutions: HashMap::new(),
            declarations: HashMap::new(),
            errors: Vec::new(),
        }
    }

    /// Identify every name in `program`.
    pub fn identify(mut self, program: &Program) -> Identification {
        tracing::debug!("identifying program");
        self.identify_command(&program.command);
        tracing::debug!(
            resolved = self.resolutions.len(),
            errors = self.errors.len(),
            "identification finished"
        );
        Identification {
            resolutions: self.resolutions,
            declarations: self.declarations,
            errors: self.errors,
        }
    }

    // =========================================================================
    // Commands
    // =========================================================================

    fn identify_command(&mut self, command: &Command) {
        match &command.kind {
            CommandKind::Assign { target, value } => {
                self.identify_identifier(target);
                self.identify_expr(value);
            }
            CommandKind::Blank => {}
            CommandKind::Call { callee, arg } => {
                self.identify_identifier(callee);
                self.identify_param(arg);
            }
            CommandKind::If { cond, then_branch, else_branch } => {
                self.identify_expr(cond);
                self.identify_command(then_branch);
                if let Some(else_branch) = else_branch {
                    self.identify_command(else_branch);
                }
            }
            CommandKind::Let { decl, body } => {
                self.table.open_scope();
                tracing::debug!(depth = self.table.depth(), "opened scope");
                self.identify_decl(decl);
                self.identify_command(body);
                self.table.close_scope();
                tracing::debug!(depth = self.table.depth(), "closed scope");
            }
            CommandKind::Sequential(commands) => {
                for command in commands {
                    self.identify_command(command);
                }
            }
            CommandKind::While { cond, body } => {
                self.identify_expr(cond);
                self.identify_command(body);
            }
            CommandKind::Repeat { body, cond } => {
                self.identify_command(body);
                self.identify_expr(cond);
            }
            CommandKind::Error => self.malformed("command", command.span),
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn identify_decl(&mut self, decl: &Decl) {
        match &decl.kind {
            DeclKind::Const { name, value } => {
                if self.declare(decl, name, DeclInfoKind::Const) {
                    self.identify_expr(value);
                }
            }
            DeclKind::Var { ty, name } => {
                let kind = DeclInfoKind::Var { ty: ty.name.spelling.clone() };
                if self.declare(decl, name, kind) {
                    self.identify_type_denoter(ty);
                }
            }
            DeclKind::Sequential(decls) => {
                for decl in decls {
                    self.identify_decl(decl);
                }
            }
            DeclKind::Error => self.malformed("declaration", decl.span),
        }
    }

    /// Enter `name` in the innermost scope. Returns false, after recording
    /// the error, when the scope already binds it.
    fn declare(&mut self, decl: &Decl, name: &Identifier, kind: DeclInfoKind) -> bool {
        match self.table.enter(&name.spelling, Binding::Declared(decl.id)) {
            Ok(()) => {
                tracing::debug!(name = %name.spelling, depth = self.table.depth(), "declared");
                self.declarations.insert(
                    decl.id,
                    DeclInfo {
                        name: name.spelling.clone(),
                        kind,
                        span: decl.span,
                        depth: self.table.depth(),
                    },
                );
                true
            }
            Err(existing) => {
                let previous = match existing {
                    Binding::Declared(id) => self.declarations.get(&id).map(|info| info.span),
                    Binding::Builtin(_) => None,
                };
                self.errors.push(IdentifyError::already_declared(
                    name.spelling.clone(),
                    name.span,
                    previous,
                ));
                false
            }
        }
    }

    fn identify_type_denoter(&mut self, ty: &TypeDenoter) {
        self.identify_identifier(&ty.name);
    }

    // =========================================================================
    // Expressions and parameters
    // =========================================================================

    fn identify_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Binary { left, op, right } => {
                self.identify_expr(left);
                self.identify_operator(op);
                self.identify_expr(right);
            }
            ExprKind::Character(_) | ExprKind::Integer(_) => {}
            ExprKind::Id { name, arg } => {
                self.identify_identifier(name);
                if let Some(arg) = arg {
                    self.identify_param(arg);
                }
            }
            ExprKind::Unary { op, operand } => {
                self.identify_operator(op);
                self.identify_expr(operand);
            }
            ExprKind::Error => self.malformed("expression", expr.span),
        }
    }

    fn identify_param(&mut self, param: &Param) {
        match &param.kind {
            ParamKind::Blank => {}
            ParamKind::Expression(expr) => self.identify_expr(expr),
            ParamKind::Var(name) => self.identify_identifier(name),
            ParamKind::Error => self.malformed("parameter", param.span),
        }
    }

    // =========================================================================
    // Leaves
    // =========================================================================

    fn identify_identifier(&mut self, ident: &Identifier) {
        self.resolve(ident.id, &ident.spelling, ident.span);
    }

    fn identify_operator(&mut self, op: &Operator) {
        self.resolve(op.id, &op.spelling, op.span);
    }

    fn resolve(&mut self, id: NodeId, spelling: &str, span: Span) {
        match self.table.retrieve(spelling) {
            Some(binding) => {
                tracing::debug!(name = spelling, ?binding, "resolved");
                self.resolutions.insert(id, binding);
            }
            None => {
                tracing::debug!(name = spelling, "undeclared");
                self.errors.push(IdentifyError::undeclared(spelling.to_string(), span));
            }
        }
    }

    fn malformed(&mut self, what: &'static str, span: Span) {
        tracing::debug!(what, "skipping error node");
        self.errors.push(IdentifyError::malformed(what, span));
    }
}

impl Default for DeclarationIdentifier {
    fn default() -> Self {
        Self::new()
    }
}
