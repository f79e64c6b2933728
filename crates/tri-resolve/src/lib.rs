// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Name identification for the Tri language.
//!
//! This crate binds every identifier and operator occurrence in a parsed
//! program to its declaration, producing a mapping from AST NodeIds to
//! [`Binding`]s. The tree itself is left untouched.

mod error;
mod identifier;
mod scope;
pub mod std_env;

pub use error::{IdentifyError, IdentifyErrorKind};
pub use identifier::DeclarationIdentifier;
pub use scope::{Binding, SymbolTable};
pub use std_env::{Builtin, BuiltinId, BuiltinKind, BuiltinType, ParamMode};

use std::collections::HashMap;
use tri_ast::command::Program;
use tri_ast::{NodeId, Span};

/// The result of identification.
#[derive(Debug, Default)]
pub struct Identification {
    /// Mapping from identifier/operator occurrences to what they name.
    pub resolutions: HashMap<NodeId, Binding>,
    /// Every successfully entered declaration, by declaration node id.
    pub declarations: HashMap<NodeId, DeclInfo>,
    pub errors: Vec<IdentifyError>,
}

impl Identification {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Binding recorded for an identifier or operator occurrence.
    pub fn binding(&self, occurrence: NodeId) -> Option<Binding> {
        self.resolutions.get(&occurrence).copied()
    }

    /// The program declaration an occurrence refers to, if it refers to one.
    pub fn declaration_of(&self, occurrence: NodeId) -> Option<&DeclInfo> {
        match self.binding(occurrence)? {
            Binding::Declared(decl) => self.declarations.get(&decl),
            Binding::Builtin(_) => None,
        }
    }
}

/// A declaration entered into some scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclInfo {
    pub name: String,
    pub kind: DeclInfoKind,
    pub span: Span,
    /// Scope depth it was entered at; 1 is the outermost `let`.
    pub depth: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclInfoKind {
    Const,
    Var { ty: String },
}

/// Identify all names in a program.
pub fn identify(program: &Program) -> Identification {
    DeclarationIdentifier::new().identify(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tri_ast::command::{Command, CommandKind};
    use tri_ast::expr::{ExprKind, ParamKind};

    fn parse(src: &str) -> Program {
        let lex_result = tri_lexer::Lexer::new(src).tokenize();
        assert!(lex_result.is_ok(), "Lex errors: {:?}", lex_result.errors);
        let result = tri_parser::Parser::new(lex_result.tokens).parse();
        assert!(result.is_ok(), "Parse errors: {:?}", result.errors);
        result.program
    }

    fn let_parts(command: &Command) -> (&tri_ast::decl::Decl, &Command) {
        match &command.kind {
            CommandKind::Let { decl, body } => (decl, body),
            other => panic!("expected let, got {other:?}"),
        }
    }

    #[test]
    fn resolves_declared_variables() {
        let program = parse("let integer x; integer y in begin x := 1; y := x + 2 end");
        let result = identify(&program);
        assert!(result.is_ok(), "{:?}", result.errors);

        let (_, body) = let_parts(&program.command);
        let CommandKind::Sequential(ref commands) = body.kind else {
            panic!("expected sequential body");
        };
        let CommandKind::Assign { ref target, ref value } = commands[1].kind else {
            panic!("expected assign");
        };
        let info = result.declaration_of(target.id).unwrap();
        assert_eq!(info.name, "y");
        assert_eq!(info.kind, DeclInfoKind::Var { ty: "integer".into() });
        assert_eq!(info.depth, 1);

        let ExprKind::Binary { ref left, ref op, .. } = value.kind else {
            panic!("expected binary");
        };
        let ExprKind::Id { ref name, .. } = left.kind else { panic!() };
        assert_eq!(result.declaration_of(name.id).unwrap().name, "x");
        assert_eq!(
            result.binding(op.id),
            Some(Binding::Builtin(std_env::lookup("+").unwrap()))
        );
    }

    #[test]
    fn inner_declaration_shadows_outer() {
        let program = parse("let const a ~ 1 in let const a ~ 2 in putint(a)");
        let result = identify(&program);
        assert!(result.is_ok(), "{:?}", result.errors);

        let (_, outer_body) = let_parts(&program.command);
        let (inner_decl, inner_body) = let_parts(outer_body);
        let CommandKind::Call { ref callee, ref arg } = inner_body.kind else {
            panic!("expected call");
        };
        let ParamKind::Expression(ref expr) = arg.kind else { panic!() };
        let ExprKind::Id { ref name, .. } = expr.kind else { panic!() };

        assert_eq!(result.binding(name.id), Some(Binding::Declared(inner_decl.id)));
        assert_eq!(result.declarations[&inner_decl.id].depth, 2);
        assert_eq!(
            result.binding(callee.id),
            Some(Binding::Builtin(std_env::lookup("putint").unwrap()))
        );
    }

    #[test]
    fn duplicate_in_one_let_is_reported() {
        let program = parse("let const a ~ 1; const a ~ zz in nothing");
        let result = identify(&program);
        // The right-hand side of the rejected declaration is not visited,
        // so `zz` is not reported.
        assert_eq!(result.errors.len(), 1);
        let IdentifyErrorKind::AlreadyDeclared { ref name, previous } = result.errors[0].kind else {
            panic!("expected duplicate error, got {:?}", result.errors[0]);
        };
        assert_eq!(name, "a");
        assert_eq!(previous, Some(Span::new(4, 15)));
        assert_eq!(result.errors[0].span, Span::new(23, 24));
    }

    #[test]
    fn undeclared_names_are_reported() {
        let program = parse("x := y");
        let result = identify(&program);
        let names: Vec<_> = result
            .errors
            .iter()
            .map(|e| match &e.kind {
                IdentifyErrorKind::Undeclared { name } => name.as_str(),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(names, ["x", "y"]);
    }

    #[test]
    fn let_scope_ends_with_its_command() {
        let program = parse("begin let integer t in t := 1; t := 2 end");
        let result = identify(&program);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].span, Span::new(31, 32));
    }

    #[test]
    fn unknown_type_is_undeclared() {
        let program = parse("let colour c in nothing");
        let result = identify(&program);
        assert_eq!(
            result.errors,
            vec![IdentifyError::undeclared("colour".into(), Span::new(4, 10))]
        );
    }

    #[test]
    fn error_nodes_are_reported_and_skipped() {
        let tokens = tri_lexer::tokenize("let integer x in x := ;").tokens;
        let parsed = tri_parser::Parser::new(tokens).parse();
        assert!(!parsed.is_ok());

        let result = identify(&parsed.program);
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(
            result.errors[0].kind,
            IdentifyErrorKind::MalformedNode { what: "expression" }
        ));
    }

    #[test]
    fn missing_else_is_not_an_error() {
        let program = parse("if true then putint(1) noelse");
        assert!(identify(&program).is_ok());
    }

    #[test]
    fn repeat_is_identified() {
        let program = parse("let integer i in repeat i := i - 1 until i = 0");
        let result = identify(&program);
        assert!(result.is_ok(), "{:?}", result.errors);
        // `integer`, three uses of `i`, `-` and `=`
        assert_eq!(result.resolutions.len(), 6);
    }
}
