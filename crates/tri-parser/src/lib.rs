// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Parser for the Tri language.
//!
//! Transforms a token stream into an abstract syntax tree. Parsing never
//! aborts: syntax errors are collected and the tree is completed with
//! `Error` placeholders.

mod hints;
mod parser;

pub use parser::{ParseError, ParseErrorKind, ParseResult, Parser};
