//! JSON diagnostic output for machine consumption.
//!
//! Produces one structured report per run: every diagnostic with its stage,
//! code, category and exact line/column locations.

use serde::Serialize;
use tri_ast::{LineMap, Span};

use crate::{codes::ErrorCodeRegistry, Diagnostic, LabelStyle, Reporter, Severity, Stage};

/// A complete JSON diagnostic report for a compilation run.
#[derive(Debug, Serialize)]
pub struct DiagnosticReport {
    /// Schema version for forward compatibility.
    pub version: u32,
    /// The file that was compiled.
    pub file: String,
    /// Whether compilation succeeded (no errors).
    pub success: bool,
    /// Stages that recorded at least one error, in pipeline order.
    pub failed_stages: Vec<Stage>,
    /// All diagnostics in discovery order.
    pub diagnostics: Vec<JsonDiagnostic>,
    pub error_count: usize,
    pub warning_count: usize,
}

/// A single diagnostic in JSON form, enriched with source context.
#[derive(Debug, Serialize)]
pub struct JsonDiagnostic {
    pub stage: Stage,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Error category (e.g., "Syntax", "Naming").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub message: String,
    /// Primary source location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    pub labels: Vec<JsonLabel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

/// A source location with line/column (1-based).
#[derive(Debug, Serialize)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
    pub byte_offset: usize,
    /// The source line text for context.
    pub source_line: String,
}

/// A labeled span in JSON form.
#[derive(Debug, Serialize)]
pub struct JsonLabel {
    pub role: LabelStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub span: Span,
    pub start: LineCol,
    pub end: LineCol,
}

/// Line/column pair (1-based).
#[derive(Debug, Serialize)]
pub struct LineCol {
    pub line: u32,
    pub column: u32,
}

/// Convert everything a reporter holds into a structured JSON report.
pub fn to_json_report(reporter: &Reporter, source: &str, file: &str) -> DiagnosticReport {
    let registry = ErrorCodeRegistry::default();
    let line_map = LineMap::new(source);
    let mut error_count = 0;
    let mut warning_count = 0;

    let diagnostics = reporter
        .entries()
        .iter()
        .map(|(stage, d)| {
            match d.severity {
                Severity::Error => error_count += 1,
                Severity::Warning => warning_count += 1,
                Severity::Note => {}
            }
            to_json_diagnostic(*stage, d, source, &line_map, &registry)
        })
        .collect();

    DiagnosticReport {
        version: 1,
        file: file.to_string(),
        success: error_count == 0,
        failed_stages: Stage::ALL.into_iter().filter(|s| reporter.has_errors(*s)).collect(),
        diagnostics,
        error_count,
        warning_count,
    }
}

fn to_json_diagnostic(
    stage: Stage,
    diag: &Diagnostic,
    source: &str,
    line_map: &LineMap,
    registry: &ErrorCodeRegistry,
) -> JsonDiagnostic {
    let code = diag.code.as_ref().map(|c| c.0.clone());
    let category = code
        .as_ref()
        .and_then(|c| registry.get(c))
        .map(|info| info.category.to_string());

    let location = diag.primary_span().map(|span| {
        let position = line_map.position(span);
        SourceLocation {
            line: position.line,
            column: position.column,
            byte_offset: span.start,
            source_line: line_map.line_text(source, position.line).unwrap_or("").to_string(),
        }
    });

    let labels = diag
        .labels
        .iter()
        .map(|l| {
            let (start_line, start_col) = line_map.offset_to_line_col(l.span.start);
            let (end_line, end_col) = line_map.offset_to_line_col(l.span.end);
            JsonLabel {
                role: l.style,
                message: l.message.clone(),
                span: l.span,
                start: LineCol { line: start_line, column: start_col },
                end: LineCol { line: end_line, column: end_col },
            }
        })
        .collect();

    JsonDiagnostic {
        stage,
        severity: diag.severity,
        code,
        category,
        message: diag.message.clone(),
        location,
        labels,
        notes: diag.notes.clone(),
        help: diag.help.as_ref().map(|h| h.message.clone()),
    }
}

/// Serialize a diagnostic report to pretty JSON.
pub fn to_json_string(report: &DiagnosticReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn report_carries_stage_and_location() {
        let source = "let integer x in\n  y := x";
        let mut reporter = Reporter::new();
        reporter.report(
            Stage::Identifier,
            Diagnostic::error("'y' is not declared")
                .with_code("E0200")
                .with_primary(Span::new(19, 20), "not found in any enclosing scope"),
        );

        let report = to_json_report(&reporter, source, "demo.tri");
        assert!(!report.success);
        assert_eq!(report.error_count, 1);
        assert_eq!(report.failed_stages, vec![Stage::Identifier]);

        let json: Value = serde_json::from_str(&to_json_string(&report)).unwrap();
        let diag = &json["diagnostics"][0];
        assert_eq!(diag["stage"], "identifier");
        assert_eq!(diag["severity"], "error");
        assert_eq!(diag["category"], "Naming");
        assert_eq!(diag["location"]["line"], 2);
        assert_eq!(diag["location"]["column"], 3);
        assert_eq!(diag["location"]["source_line"], "  y := x");
        assert_eq!(diag["labels"][0]["role"], "primary");
        assert_eq!(diag["labels"][0]["span"]["start"], 19);
        assert!(diag.get("help").is_none());
    }

    #[test]
    fn clean_run_is_successful() {
        let report = to_json_report(&Reporter::new(), "nothing", "ok.tri");
        assert!(report.success);
        assert!(report.failed_stages.is_empty());
        assert!(report.diagnostics.is_empty());
    }
}
