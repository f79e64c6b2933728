// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Indented tree rendering of a parsed program.
//!
//! One node per line, children indented two spaces under their parent.
//! Output is deterministic so it doubles as a snapshot format in tests.

use crate::command::{Command, CommandKind, Program};
use crate::decl::{Decl, DeclKind};
use crate::expr::{Expr, ExprKind, Param, ParamKind};

/// Render a program as an indented tree.
pub fn print_program(program: &Program) -> String {
    let mut printer = TreePrinter::default();
    printer.line(0, "Program");
    printer.command(&program.command, 1);
    printer.finish()
}

#[derive(Debug, Default)]
struct TreePrinter {
    buffer: String,
}

impl TreePrinter {
    fn finish(self) -> String {
        self.buffer
    }

    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.buffer.push_str("  ");
        }
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    fn command(&mut self, command: &Command, depth: usize) {
        match &command.kind {
            CommandKind::Assign { target, value } => {
                self.line(depth, &format!("Assign {}", target.spelling));
                self.expr(value, depth + 1);
            }
            CommandKind::Blank => self.line(depth, "Blank"),
            CommandKind::Call { callee, arg } => {
                self.line(depth, &format!("Call {}", callee.spelling));
                self.param(arg, depth + 1);
            }
            CommandKind::If { cond, then_branch, else_branch } => {
                self.line(depth, "If");
                self.expr(cond, depth + 1);
                self.command(then_branch, depth + 1);
                match else_branch {
                    Some(else_branch) => self.command(else_branch, depth + 1),
                    None => self.line(depth + 1, "NoElse"),
                }
            }
            CommandKind::Let { decl, body } => {
                self.line(depth, "Let");
                self.decl(decl, depth + 1);
                self.command(body, depth + 1);
            }
            CommandKind::Sequential(commands) => {
                self.line(depth, "Sequential");
                for command in commands {
                    self.command(command, depth + 1);
                }
            }
            CommandKind::While { cond, body } => {
                self.line(depth, "While");
                self.expr(cond, depth + 1);
                self.command(body, depth + 1);
            }
            CommandKind::Repeat { body, cond } => {
                self.line(depth, "Repeat");
                self.command(body, depth + 1);
                self.expr(cond, depth + 1);
            }
            CommandKind::Error => self.line(depth, "ErrorCommand"),
        }
    }

    fn decl(&mut self, decl: &Decl, depth: usize) {
        match &decl.kind {
            DeclKind::Const { name, value } => {
                self.line(depth, &format!("Const {}", name.spelling));
                self.expr(value, depth + 1);
            }
            DeclKind::Var { ty, name } => {
                self.line(depth, &format!("Var {} {}", ty.name.spelling, name.spelling));
            }
            DeclKind::Sequential(decls) => {
                self.line(depth, "SequentialDecl");
                for decl in decls {
                    self.decl(decl, depth + 1);
                }
            }
            DeclKind::Error => self.line(depth, "ErrorDecl"),
        }
    }

    fn expr(&mut self, expr: &Expr, depth: usize) {
        match &expr.kind {
            ExprKind::Binary { left, op, right } => {
                self.line(depth, &format!("Binary {}", op.spelling));
                self.expr(left, depth + 1);
                self.expr(right, depth + 1);
            }
            ExprKind::Character(lit) => self.line(depth, &format!("Char {}", lit.spelling)),
            ExprKind::Id { name, arg } => {
                self.line(depth, &format!("Id {}", name.spelling));
                if let Some(arg) = arg {
                    self.param(arg, depth + 1);
                }
            }
            ExprKind::Integer(lit) => self.line(depth, &format!("Int {}", lit.spelling)),
            ExprKind::Unary { op, operand } => {
                self.line(depth, &format!("Unary {}", op.spelling));
                self.expr(operand, depth + 1);
            }
            ExprKind::Error => self.line(depth, "ErrorExpr"),
        }
    }

    fn param(&mut self, param: &Param, depth: usize) {
        match &param.kind {
            ParamKind::Blank => self.line(depth, "BlankParam"),
            ParamKind::Expression(expr) => {
                self.line(depth, "ValueParam");
                self.expr(expr, depth + 1);
            }
            ParamKind::Var(name) => self.line(depth, &format!("VarParam {}", name.spelling)),
            ParamKind::Error => self.line(depth, "ErrorParam"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::{Identifier, IntegerLiteral, Operator};
    use crate::{NodeId, Span};

    fn ident(name: &str, id: u32) -> Identifier {
        Identifier { id: NodeId(id), spelling: name.to_string(), span: Span::default() }
    }

    fn int(text: &str) -> Expr {
        Expr::new(
            ExprKind::Integer(IntegerLiteral { spelling: text.to_string(), span: Span::default() }),
            Span::default(),
        )
    }

    #[test]
    fn prints_nested_tree() {
        let sum = Expr::new(
            ExprKind::Binary {
                left: Box::new(int("1")),
                op: Operator { id: NodeId(1), spelling: "+".into(), span: Span::default() },
                right: Box::new(int("2")),
            },
            Span::default(),
        );
        let program = Program {
            command: Command::new(
                CommandKind::If {
                    cond: sum,
                    then_branch: Box::new(Command::new(
                        CommandKind::Assign { target: ident("x", 0), value: int("3") },
                        Span::default(),
                    )),
                    else_branch: None,
                },
                Span::default(),
            ),
            span: Span::default(),
        };

        let expected = "\
Program
  If
    Binary +
      Int 1
      Int 2
    Assign x
      Int 3
    NoElse
";
        assert_eq!(print_program(&program), expected);
    }

    #[test]
    fn prints_error_placeholders() {
        let program = Program { command: Command::error(Span::new(0, 1)), span: Span::new(0, 1) };
        assert_eq!(print_program(&program), "Program\n  ErrorCommand\n");
    }
}
