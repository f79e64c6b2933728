// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The recursive-descent parser.
//!
//! Every production returns a node. When no production fits, the parser
//! records a [`ParseError`] and returns the family's `Error` placeholder
//! without consuming the offending token. `accept` likewise never advances
//! on a mismatch. Forward progress comes from the repetitions: each loop
//! iteration consumes a `;` or an operator before it recurses.

use thiserror::Error;
use tri_ast::command::{Command, CommandKind, Program};
use tri_ast::decl::{Decl, DeclKind};
use tri_ast::expr::{Expr, ExprKind, Param, ParamKind};
use tri_ast::terminal::{CharacterLiteral, Identifier, IntegerLiteral, Operator, TypeDenoter};
use tri_ast::token::{Token, TokenKind};
use tri_ast::{NodeIdGen, Span};

/// The parser for Tri source code.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// End offset of the last consumed token
    prev_end: usize,
    /// Collected errors during parsing
    errors: Vec<ParseError>,
    ids: NodeIdGen,
}

impl Parser {
    /// Create a parser over a token sequence. A missing `EndOfText`
    /// terminator is supplied.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::EndOfText) {
            let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
            tokens.push(Token::new(TokenKind::EndOfText, "", Span::new(end, end)));
        }
        Self { tokens, pos: 0, prev_end: 0, errors: Vec::new(), ids: NodeIdGen::new() }
    }

    /// Parse the whole token sequence as a program.
    pub fn parse(&mut self) -> ParseResult {
        let program = self.parse_program();
        ParseResult {
            program,
            errors: std::mem::take(&mut self.errors),
        }
    }

    // =========================================================================
    // Token Navigation
    // =========================================================================

    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    fn peek(&self, n: usize) -> TokenKind {
        self.tokens.get(self.pos + n).map(|t| t.kind).unwrap_or(TokenKind::EndOfText)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Move to the next token. The final `EndOfText` is never passed.
    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        self.prev_end = token.span.end;
        token
    }

    /// Consume the current token if it has the expected kind. Otherwise
    /// record "expected X, found Y" and stay put.
    fn accept(&mut self, expected: TokenKind) -> bool {
        if self.check(expected) {
            let token = self.advance();
            tracing::debug!(token = %token, "accepted");
            true
        } else {
            self.error_expected(expected.display_name());
            false
        }
    }

    fn error_expected(&mut self, expected: &str) {
        self.record(ParseErrorKind::MissingToken, expected);
    }

    /// None of the alternatives for `expected` starts with the current token.
    fn error_no_production(&mut self, expected: &str) {
        self.record(ParseErrorKind::NoViableProduction, expected);
    }

    fn record(&mut self, kind: ParseErrorKind, expected: &str) {
        let error = ParseError::expected(kind, expected, self.current());
        tracing::debug!(%error, ?kind, "syntax error");
        self.errors.push(error);
    }

    /// Span from `start` to the end of the last consumed token.
    fn span_from(&self, start: Span) -> Span {
        Span::new(start.start, self.prev_end.max(start.end))
    }

    // =========================================================================
    // Program and Commands
    // =========================================================================

    fn parse_program(&mut self) -> Program {
        tracing::debug!("parsing program");
        let start = self.current().span;
        let command = self.parse_single_command();
        let span = self.span_from(start);
        self.accept(TokenKind::EndOfText);
        Program { command, span }
    }

    /// single-command (';' single-command)*
    fn parse_command(&mut self) -> Command {
        tracing::debug!("parsing command");
        let mut commands = vec![self.parse_single_command()];
        while self.check(TokenKind::Semicolon) && self.peek(1).starts_command() {
            self.advance();
            commands.push(self.parse_single_command());
        }
        if commands.len() == 1 {
            commands.remove(0)
        } else {
            let span = commands[0].span.to(commands[commands.len() - 1].span);
            Command::new(CommandKind::Sequential(commands), span)
        }
    }

    fn parse_single_command(&mut self) -> Command {
        tracing::debug!("parsing single command");
        match self.current_kind() {
            TokenKind::Identifier => self.parse_assign_or_call(),
            TokenKind::Begin => self.parse_begin(),
            TokenKind::Let => self.parse_let(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::Repeat => self.parse_repeat(),
            TokenKind::Nothing => self.parse_blank(),
            _ => {
                self.error_no_production("a command");
                Command::error(self.current().span)
            }
        }
    }

    /// name := expression | name ( parameter )
    fn parse_assign_or_call(&mut self) -> Command {
        let start = self.current().span;
        let name = self.parse_identifier();
        match self.current_kind() {
            TokenKind::Becomes => {
                tracing::debug!("parsing assign command");
                self.advance();
                let value = self.parse_expression();
                Command::new(CommandKind::Assign { target: name, value }, self.span_from(start))
            }
            TokenKind::LeftBracket => {
                tracing::debug!("parsing call command");
                self.advance();
                let arg = self.parse_parameter();
                self.accept(TokenKind::RightBracket);
                Command::new(CommandKind::Call { callee: name, arg }, self.span_from(start))
            }
            _ => {
                self.error_no_production("':=' or '('");
                Command::error(start)
            }
        }
    }

    /// begin command end. No node of its own.
    fn parse_begin(&mut self) -> Command {
        tracing::debug!("parsing begin command");
        self.accept(TokenKind::Begin);
        let command = self.parse_command();
        self.accept(TokenKind::End);
        command
    }

    fn parse_let(&mut self) -> Command {
        tracing::debug!("parsing let command");
        let start = self.current().span;
        self.accept(TokenKind::Let);
        let decl = self.parse_declaration();
        self.accept(TokenKind::In);
        let body = self.parse_single_command();
        Command::new(
            CommandKind::Let { decl: Box::new(decl), body: Box::new(body) },
            self.span_from(start),
        )
    }

    fn parse_if(&mut self) -> Command {
        tracing::debug!("parsing if command");
        let start = self.current().span;
        self.accept(TokenKind::If);
        let cond = self.parse_expression();
        self.accept(TokenKind::Then);
        let then_branch = Box::new(self.parse_single_command());
        match self.current_kind() {
            TokenKind::Else => {
                self.advance();
                let else_branch = Some(Box::new(self.parse_single_command()));
                Command::new(CommandKind::If { cond, then_branch, else_branch }, self.span_from(start))
            }
            TokenKind::NoElse => {
                self.advance();
                Command::new(
                    CommandKind::If { cond, then_branch, else_branch: None },
                    self.span_from(start),
                )
            }
            _ => {
                self.error_no_production("'else' or 'noelse'");
                Command::error(start)
            }
        }
    }

    fn parse_while(&mut self) -> Command {
        tracing::debug!("parsing while command");
        let start = self.current().span;
        self.accept(TokenKind::While);
        let cond = self.parse_expression();
        self.accept(TokenKind::Do);
        let body = Box::new(self.parse_single_command());
        Command::new(CommandKind::While { cond, body }, self.span_from(start))
    }

    fn parse_repeat(&mut self) -> Command {
        tracing::debug!("parsing repeat command");
        let start = self.current().span;
        self.accept(TokenKind::Repeat);
        let body = Box::new(self.parse_single_command());
        self.accept(TokenKind::Until);
        let cond = self.parse_expression();
        Command::new(CommandKind::Repeat { body, cond }, self.span_from(start))
    }

    fn parse_blank(&mut self) -> Command {
        tracing::debug!("parsing blank command");
        let span = self.current().span;
        self.accept(TokenKind::Nothing);
        Command::new(CommandKind::Blank, span)
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// single-declaration (';' single-declaration)*
    fn parse_declaration(&mut self) -> Decl {
        tracing::debug!("parsing declaration");
        let mut decls = vec![self.parse_single_declaration()];
        while self.check(TokenKind::Semicolon) && self.peek(1).starts_declaration() {
            self.advance();
            decls.push(self.parse_single_declaration());
        }
        if decls.len() == 1 {
            decls.remove(0)
        } else {
            let span = decls[0].span.to(decls[decls.len() - 1].span);
            Decl::new(self.ids.next_id(), DeclKind::Sequential(decls), span)
        }
    }

    fn parse_single_declaration(&mut self) -> Decl {
        match self.current_kind() {
            TokenKind::Const => self.parse_const_declaration(),
            TokenKind::Identifier => self.parse_var_declaration(),
            _ => {
                self.error_no_production("a declaration");
                Decl::error(self.ids.next_id(), self.current().span)
            }
        }
    }

    /// const name ~ expression
    fn parse_const_declaration(&mut self) -> Decl {
        tracing::debug!("parsing const declaration");
        let start = self.current().span;
        self.accept(TokenKind::Const);
        if !self.check(TokenKind::Identifier) {
            self.error_expected("a name");
            return Decl::error(self.ids.next_id(), start);
        }
        let name = self.parse_identifier();
        self.accept(TokenKind::Is);
        let value = self.parse_expression();
        Decl::new(self.ids.next_id(), DeclKind::Const { name, value }, self.span_from(start))
    }

    /// type-denoter name
    fn parse_var_declaration(&mut self) -> Decl {
        tracing::debug!("parsing var declaration");
        let start = self.current().span;
        let ty = self.parse_type_denoter();
        if !self.check(TokenKind::Identifier) {
            self.error_expected("a name");
            return Decl::error(self.ids.next_id(), self.span_from(start));
        }
        let name = self.parse_identifier();
        Decl::new(self.ids.next_id(), DeclKind::Var { ty, name }, self.span_from(start))
    }

    fn parse_type_denoter(&mut self) -> TypeDenoter {
        tracing::debug!("parsing type denoter");
        let name = self.parse_identifier();
        let span = name.span;
        TypeDenoter { name, span }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// primary (operator primary)*, folded left with no precedence.
    fn parse_expression(&mut self) -> Expr {
        tracing::debug!("parsing expression");
        let mut left = self.parse_primary_expression();
        while self.check(TokenKind::Operator) {
            let op = self.parse_operator();
            let right = self.parse_primary_expression();
            let span = left.span.to(right.span);
            left = Expr::new(
                ExprKind::Binary { left: Box::new(left), op, right: Box::new(right) },
                span,
            );
        }
        left
    }

    fn parse_primary_expression(&mut self) -> Expr {
        tracing::debug!("parsing primary expression");
        match self.current_kind() {
            TokenKind::IntLiteral => {
                let lit = self.parse_integer_literal();
                let span = lit.span;
                Expr::new(ExprKind::Integer(lit), span)
            }
            TokenKind::CharLiteral => {
                let lit = self.parse_character_literal();
                let span = lit.span;
                Expr::new(ExprKind::Character(lit), span)
            }
            TokenKind::Identifier => self.parse_id_expression(),
            TokenKind::Operator => {
                tracing::debug!("parsing unary expression");
                let start = self.current().span;
                let op = self.parse_operator();
                let operand = Box::new(self.parse_primary_expression());
                Expr::new(ExprKind::Unary { op, operand }, self.span_from(start))
            }
            TokenKind::LeftBracket => {
                tracing::debug!("parsing bracketed expression");
                self.advance();
                let inner = self.parse_expression();
                self.accept(TokenKind::RightBracket);
                inner
            }
            _ => {
                self.error_no_production("an expression");
                Expr::error(self.current().span)
            }
        }
    }

    /// name, optionally applied: name ( parameter )
    fn parse_id_expression(&mut self) -> Expr {
        tracing::debug!("parsing identifier expression");
        let start = self.current().span;
        let name = self.parse_identifier();
        let arg = if self.check(TokenKind::LeftBracket) {
            self.advance();
            let param = self.parse_parameter();
            self.accept(TokenKind::RightBracket);
            Some(Box::new(param))
        } else {
            None
        };
        Expr::new(ExprKind::Id { name, arg }, self.span_from(start))
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    fn parse_parameter(&mut self) -> Param {
        tracing::debug!("parsing parameter");
        match self.current_kind() {
            TokenKind::Identifier
            | TokenKind::IntLiteral
            | TokenKind::CharLiteral
            | TokenKind::Operator
            | TokenKind::LeftBracket => {
                let expr = self.parse_expression();
                let span = expr.span;
                Param::new(ParamKind::Expression(expr), span)
            }
            TokenKind::Var => {
                let start = self.current().span;
                self.advance();
                if !self.check(TokenKind::Identifier) {
                    self.error_expected("a name");
                    return Param::error(self.span_from(start));
                }
                let name = self.parse_identifier();
                Param::new(ParamKind::Var(name), self.span_from(start))
            }
            TokenKind::RightBracket => {
                let at = self.current().span.start;
                Param::new(ParamKind::Blank, Span::new(at, at))
            }
            _ => {
                self.error_no_production("a parameter");
                Param::error(self.current().span)
            }
        }
    }

    // =========================================================================
    // Terminals
    // =========================================================================

    fn parse_identifier(&mut self) -> Identifier {
        let token = self.current().clone();
        self.accept(TokenKind::Identifier);
        Identifier { id: self.ids.next_id(), spelling: token.spelling, span: token.span }
    }

    fn parse_operator(&mut self) -> Operator {
        let token = self.current().clone();
        self.accept(TokenKind::Operator);
        Operator { id: self.ids.next_id(), spelling: token.spelling, span: token.span }
    }

    fn parse_integer_literal(&mut self) -> IntegerLiteral {
        let token = self.current().clone();
        self.accept(TokenKind::IntLiteral);
        IntegerLiteral { spelling: token.spelling, span: token.span }
    }

    fn parse_character_literal(&mut self) -> CharacterLiteral {
        let token = self.current().clone();
        self.accept(TokenKind::CharLiteral);
        CharacterLiteral { spelling: token.spelling, span: token.span }
    }
}

/// Result of parsing: the program plus any errors found.
#[derive(Debug)]
pub struct ParseResult {
    pub program: Program,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    /// Returns true if parsing completed without errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and friendly message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub message: String,
    pub hint: Option<String>,
}

/// How a syntax error arose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A specific token was required and something else was found.
    MissingToken,
    /// The current token starts none of the alternatives of a production.
    NoViableProduction,
}

impl ParseError {
    fn expected(kind: ParseErrorKind, expected: &str, found: &Token) -> Self {
        let message = format!("expected {}, found {}", expected, describe(found));
        let hint = crate::hints::for_expected(expected, found).map(String::from);
        Self { kind, span: found.span, message, hint }
    }
}

/// Describe a token for an error message, quoting its text where useful.
fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::Identifier
        | TokenKind::IntLiteral
        | TokenKind::CharLiteral
        | TokenKind::Operator
        | TokenKind::Error => format!("{} '{}'", token.kind.display_name(), token.spelling),
        _ => token.kind.display_name().to_string(),
    }
}
