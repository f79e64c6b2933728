// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The Tri compiler front end.
//!
//! Runs source text through tokenizing, parsing and identification, and
//! collects every stage's diagnostics in one [`Reporter`]. The result is a
//! parsed program plus its name bindings, ready for a type checker.

mod config;

pub use config::{ConfigError, FrontendOptions};

use tri_ast::command::Program;
use tri_ast::token::Token;
use tri_ast::LineMap;
use tri_diagnostics::formatter::DiagnosticFormatter;
use tri_diagnostics::json::{self, DiagnosticReport};
use tri_diagnostics::{Reporter, Stage};
use tri_resolve::Identification;

/// Everything a front-end run produced.
#[derive(Debug)]
pub struct FrontendOutput {
    pub tokens: Vec<Token>,
    /// `None` when an earlier stage failed and the run was told to stop.
    pub program: Option<Program>,
    pub identification: Option<Identification>,
    pub reporter: Reporter,
    pub line_map: LineMap,
}

impl FrontendOutput {
    pub fn is_ok(&self) -> bool {
        !self.reporter.any_errors()
    }

    /// Plain-text summary of all errors, grouped by stage.
    pub fn summary(&self) -> String {
        self.reporter.summary(&self.line_map)
    }

    /// Rich rendering of every diagnostic.
    pub fn render(&self, source: &str, options: &FrontendOptions) -> String {
        colored::control::set_override(options.color);
        DiagnosticFormatter::new(source)
            .with_file_name(options.display_name())
            .format_all(&self.reporter)
    }

    pub fn json_report(&self, source: &str, options: &FrontendOptions) -> DiagnosticReport {
        json::to_json_report(&self.reporter, source, options.display_name())
    }

    /// Indented tree of the parsed program.
    pub fn tree(&self) -> Option<String> {
        self.program.as_ref().map(tri_ast::printer::print_program)
    }
}

/// Run the front end over `source`.
pub fn compile(source: &str, options: &FrontendOptions) -> FrontendOutput {
    let mut reporter = Reporter::new();
    let line_map = LineMap::new(source);

    tracing::info!(bytes = source.len(), "tokenizing");
    let lexed = tri_lexer::tokenize(source);
    reporter.report_all(Stage::Tokenizer, &lexed.errors);
    tracing::info!(tokens = lexed.tokens.len(), errors = lexed.errors.len(), "tokenized");

    let mut output = FrontendOutput {
        tokens: lexed.tokens,
        program: None,
        identification: None,
        reporter,
        line_map,
    };
    if should_stop(&output.reporter, Stage::Tokenizer, options) {
        return output;
    }

    tracing::info!("parsing");
    let parsed = tri_parser::Parser::new(output.tokens.clone()).parse();
    output.reporter.report_all(Stage::Parser, &parsed.errors);
    tracing::info!(errors = parsed.errors.len(), "parsed");
    let program = output.program.insert(parsed.program);
    if should_stop(&output.reporter, Stage::Parser, options) {
        return output;
    }

    tracing::info!("identifying");
    let identification = tri_resolve::identify(program);
    output.reporter.report_all(Stage::Identifier, &identification.errors);
    tracing::info!(
        resolved = identification.resolutions.len(),
        errors = identification.errors.len(),
        "identified"
    );
    output.identification = Some(identification);

    output
}

fn should_stop(reporter: &Reporter, stage: Stage, options: &FrontendOptions) -> bool {
    let stop = !options.continue_after_errors && reporter.has_errors(stage);
    if stop {
        tracing::info!(%stage, "stopping after errors");
    }
    stop
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_program() {
        let output = compile("let integer n in getint(var n)", &FrontendOptions::default());
        assert!(output.is_ok());
        assert!(output.identification.as_ref().unwrap().is_ok());
        assert_eq!(output.summary(), "No errors were found.\n");
    }

    #[test]
    fn every_stage_runs_by_default() {
        let output = compile("x := Y", &FrontendOptions::default());
        assert!(output.reporter.has_errors(Stage::Tokenizer));
        assert!(output.reporter.has_errors(Stage::Parser));
        assert!(output.reporter.has_errors(Stage::Identifier));
        assert!(output.identification.is_some());
    }

    #[test]
    fn stop_after_first_failing_stage() {
        let options = FrontendOptions { continue_after_errors: false, ..Default::default() };
        let output = compile("x := Y", &options);
        assert!(output.reporter.has_errors(Stage::Tokenizer));
        assert!(output.program.is_none());
        assert!(output.identification.is_none());
    }

    #[test]
    fn tree_of_parsed_program() {
        let output = compile("putint(1)", &FrontendOptions::default());
        assert_eq!(output.tree().unwrap(), "Program\n  Call putint\n    ValueParam\n      Int 1\n");
    }
}
