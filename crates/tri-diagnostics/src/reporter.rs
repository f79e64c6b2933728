// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Run-wide collection of diagnostics, tagged by the stage that found them.
//!
//! The reporter is append-only: once a stage has an error it keeps it for
//! the rest of the run.

use tri_ast::LineMap;

use crate::{Diagnostic, Stage, ToDiagnostic};

#[derive(Debug, Default)]
pub struct Reporter {
    entries: Vec<(Stage, Diagnostic)>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, stage: Stage, diagnostic: Diagnostic) {
        tracing::debug!(%stage, message = %diagnostic.message, "reported");
        self.entries.push((stage, diagnostic));
    }

    /// Convert and report each error in order.
    pub fn report_all<'a, E, I>(&mut self, stage: Stage, errors: I)
    where
        E: ToDiagnostic + 'a,
        I: IntoIterator<Item = &'a E>,
    {
        for error in errors {
            self.report(stage, error.to_diagnostic());
        }
    }

    pub fn has_errors(&self, stage: Stage) -> bool {
        self.in_stage(stage).any(Diagnostic::is_error)
    }

    pub fn any_errors(&self) -> bool {
        self.entries.iter().any(|(_, d)| d.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.entries.iter().filter(|(_, d)| d.is_error()).count()
    }

    /// Diagnostics from one stage, in discovery order.
    pub fn in_stage(&self, stage: Stage) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(move |(s, _)| *s == stage)
            .map(|(_, d)| d)
    }

    /// All diagnostics in discovery order.
    pub fn entries(&self) -> &[(Stage, Diagnostic)] {
        &self.entries
    }

    /// Plain-text end-of-run summary, grouped by stage in pipeline order.
    pub fn summary(&self, line_map: &LineMap) -> String {
        if !self.any_errors() {
            return "No errors were found.\n".to_string();
        }

        let mut out = String::new();
        for stage in Stage::ALL {
            if !self.has_errors(stage) {
                continue;
            }
            out.push_str(&format!("Errors found in the {} stage:\n", stage));
            for diagnostic in self.in_stage(stage).filter(|d| d.is_error()) {
                match diagnostic.primary_span() {
                    Some(span) => out.push_str(&format!(
                        "Error: {} at {}\n",
                        diagnostic.message,
                        line_map.position(span)
                    )),
                    None => out.push_str(&format!("Error: {}\n", diagnostic.message)),
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tri_ast::Span;

    #[test]
    fn empty_reporter_succeeds() {
        let reporter = Reporter::new();
        assert!(!reporter.any_errors());
        assert_eq!(reporter.summary(&LineMap::new("")), "No errors were found.\n");
    }

    #[test]
    fn flags_are_per_stage() {
        let mut reporter = Reporter::new();
        reporter.report(Stage::Parser, Diagnostic::error("expected 'end', found ';'"));
        assert!(reporter.has_errors(Stage::Parser));
        assert!(!reporter.has_errors(Stage::Tokenizer));
        assert!(!reporter.has_errors(Stage::Identifier));

        reporter.report(Stage::Identifier, Diagnostic::warning("unused"));
        assert!(!reporter.has_errors(Stage::Identifier));
        assert_eq!(reporter.in_stage(Stage::Identifier).count(), 1);
        assert_eq!(reporter.error_count(), 1);
    }

    #[test]
    fn summary_groups_by_stage_in_pipeline_order() {
        let source = "x := 1;\n  y";
        let mut reporter = Reporter::new();
        reporter.report(
            Stage::Identifier,
            Diagnostic::error("'x' is not declared").with_primary(Span::new(0, 1), "here"),
        );
        reporter.report(
            Stage::Parser,
            Diagnostic::error("expected end of text, found ';'").with_primary(Span::new(6, 7), "here"),
        );
        reporter.report(
            Stage::Identifier,
            Diagnostic::error("'y' is not declared").with_primary(Span::new(10, 11), "here"),
        );
        reporter.report(Stage::Checker, Diagnostic::error("no location"));

        let expected = "\
Errors found in the parser stage:
Error: expected end of text, found ';' at 1:7
Errors found in the identifier stage:
Error: 'x' is not declared at 1:1
Error: 'y' is not declared at 2:3
Errors found in the checker stage:
Error: no location
";
        assert_eq!(reporter.summary(&LineMap::new(source)), expected);
    }
}
