// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Rich terminal formatter for diagnostics.
//!
//! Produces multi-line, color-coded error output:
//!
//! ```text
//! error[E0201]: 'a' is already declared in this scope
//!   --> demo.tri:1:24
//!     |
//!   1 | let const a ~ 1; const a ~ 2 in nothing
//!     |     -----------        ^ declared again here
//!     |     |
//!     |     first declared here
//! ```

use colored::Colorize;

use tri_ast::LineMap;

use crate::{Diagnostic, LabelStyle, Reporter, Severity};

/// Formats diagnostics for terminal output.
pub struct DiagnosticFormatter<'a> {
    source: &'a str,
    file_name: Option<&'a str>,
    line_map: LineMap,
}

/// A source line with its labels.
struct AnnotatedLine {
    line_num: usize,
    text: String,
    annotations: Vec<Annotation>,
}

struct Annotation {
    col_start: usize,
    col_end: usize,
    style: LabelStyle,
    message: Option<String>,
}

impl<'a> DiagnosticFormatter<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            file_name: None,
            line_map: LineMap::new(source),
        }
    }

    pub fn with_file_name(mut self, name: &'a str) -> Self {
        self.file_name = Some(name);
        self
    }

    /// Render every diagnostic in the reporter, separated by blank lines.
    pub fn format_all(&self, reporter: &Reporter) -> String {
        reporter
            .entries()
            .iter()
            .map(|(_, diagnostic)| self.format(diagnostic))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn format(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();
        self.format_header(&mut out, diagnostic);

        let annotated = self.collect_annotated_lines(diagnostic);
        let Some(primary) = diagnostic.primary_span() else {
            self.format_footer(&mut out, diagnostic);
            return out;
        };

        // --> file:line:col
        let position = self.line_map.position(primary);
        out.push_str(&format!(
            "  {} {}:{}\n",
            "-->".blue(),
            self.file_name.unwrap_or("<source>"),
            position
        ));

        let max_line = annotated.last().map(|a| a.line_num).unwrap_or(1);
        let gutter_width = max_line.to_string().len().max(2);

        out.push_str(&format!("{} {}\n", " ".repeat(gutter_width + 1), "|".blue()));
        let mut prev_line_num: Option<usize> = None;
        for annotated_line in &annotated {
            if let Some(prev) = prev_line_num {
                if annotated_line.line_num > prev + 1 {
                    out.push_str(&format!("{} {}\n", " ".repeat(gutter_width), "...".blue()));
                }
            }

            out.push_str(&format!(
                "{:>width$} {} {}\n",
                annotated_line.line_num.to_string().blue().bold(),
                "|".blue(),
                annotated_line.text,
                width = gutter_width + 1,
            ));
            self.format_annotations(&mut out, annotated_line, gutter_width);
            prev_line_num = Some(annotated_line.line_num);
        }

        self.format_footer(&mut out, diagnostic);
        out
    }

    fn format_header(&self, out: &mut String, diagnostic: &Diagnostic) {
        let severity_str = match diagnostic.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Note => "note".blue().bold(),
        };

        match diagnostic.code {
            Some(ref code) => out.push_str(&format!(
                "{}[{}]: {}\n",
                severity_str,
                code.0.as_str().red().bold(),
                diagnostic.message.bold()
            )),
            None => out.push_str(&format!("{}: {}\n", severity_str, diagnostic.message.bold())),
        }
    }

    fn format_footer(&self, out: &mut String, diagnostic: &Diagnostic) {
        let indent = " ".repeat(3);
        for note in &diagnostic.notes {
            out.push_str(&format!("{} {} {}: {}\n", indent, "=".cyan(), "note".cyan().bold(), note));
        }
        if let Some(ref help) = diagnostic.help {
            out.push_str(&format!(
                "{} {} {}: {}\n",
                indent,
                "=".cyan(),
                "help".cyan().bold(),
                help.message
            ));
        }
    }

    fn collect_annotated_lines(&self, diagnostic: &Diagnostic) -> Vec<AnnotatedLine> {
        let mut lines_map: std::collections::BTreeMap<usize, AnnotatedLine> =
            std::collections::BTreeMap::new();

        for label in &diagnostic.labels {
            let (line_num, col_start) = self.offset_to_line_col(label.span.start);
            let (end_line, col_end) = self.offset_to_line_col(label.span.end);
            let text = self.get_line(line_num).unwrap_or("");

            // Multi-line spans are underlined to the end of their first line
            let effective_col_end = if end_line == line_num { col_end } else { text.len() + 1 };

            let entry = lines_map.entry(line_num).or_insert_with(|| AnnotatedLine {
                line_num,
                text: text.to_string(),
                annotations: Vec::new(),
            });
            entry.annotations.push(Annotation {
                col_start,
                col_end: effective_col_end.max(col_start + 1),
                style: label.style,
                message: label.message.clone(),
            });
        }

        lines_map.into_values().collect()
    }

    fn format_annotations(&self, out: &mut String, line: &AnnotatedLine, gutter_width: usize) {
        let mut sorted: Vec<&Annotation> = line.annotations.iter().collect();
        sorted.sort_by_key(|a| (a.style == LabelStyle::Secondary, a.col_start));

        let width = line.text.len() + 2;
        let mut underline = vec![' '; width];
        let mut messages: Vec<(usize, LabelStyle, &str)> = Vec::new();
        for ann in &sorted {
            let ch = match ann.style {
                LabelStyle::Primary => '^',
                LabelStyle::Secondary => '-',
            };
            for slot in underline
                .iter_mut()
                .take(ann.col_end.saturating_sub(1))
                .skip(ann.col_start.saturating_sub(1))
            {
                *slot = ch;
            }
            if let Some(ref msg) = ann.message {
                messages.push((ann.col_start, ann.style, msg.as_str()));
            }
        }

        let underline: String = underline.iter().collect::<String>().trim_end().to_string();
        if underline.is_empty() {
            return;
        }
        let gutter = format!("{} {}", " ".repeat(gutter_width + 1), "|".blue());
        let colored_underline = color_underline(&underline);

        // The primary message sits inline; the others hang below.
        let mut rest = messages.iter();
        match rest.next() {
            Some((_, style, msg)) => out.push_str(&format!(
                "{} {} {}\n",
                gutter,
                colored_underline,
                styled(msg, *style)
            )),
            None => out.push_str(&format!("{} {}\n", gutter, colored_underline)),
        }
        for (col, style, msg) in rest {
            let pad = " ".repeat(col.saturating_sub(1));
            out.push_str(&format!("{} {}{}\n", gutter, pad, styled("|", *style)));
            out.push_str(&format!("{} {}{}\n", gutter, pad, styled(msg, *style)));
        }
    }

    /// Convert byte offset to (line, col), both 1-based.
    fn offset_to_line_col(&self, offset: usize) -> (usize, usize) {
        let (line, col) = self.line_map.offset_to_line_col(offset);
        (line as usize, col as usize)
    }

    /// Get source line text by 1-based line number.
    fn get_line(&self, line_num: usize) -> Option<&str> {
        self.line_map.line_text(self.source, line_num as u32)
    }
}

fn styled(text: &str, style: LabelStyle) -> String {
    match style {
        LabelStyle::Primary => text.red().bold().to_string(),
        LabelStyle::Secondary => text.blue().to_string(),
    }
}

/// Color the underline characters (^ in red, - in blue).
fn color_underline(s: &str) -> String {
    let mut result = String::new();
    let mut current = None;
    let mut run = String::new();

    for ch in s.chars() {
        let kind = matches!(ch, '^' | '-').then_some(ch);
        if kind != current && !run.is_empty() {
            result.push_str(&flush_run(&run, current));
            run.clear();
        }
        run.push(ch);
        current = kind;
    }
    if !run.is_empty() {
        result.push_str(&flush_run(&run, current));
    }
    result
}

fn flush_run(run: &str, kind: Option<char>) -> String {
    match kind {
        Some('^') => run.red().bold().to_string(),
        Some('-') => run.blue().to_string(),
        _ => run.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Stage;
    use tri_ast::Span;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn single_label_with_help() {
        plain();
        let source = "begin x := 1; end";
        let diag = Diagnostic::error("expected 'end', found ';'")
            .with_code("E0100")
            .with_primary(Span::new(12, 13), "here")
            .with_help("remove the ';'");
        let out = DiagnosticFormatter::new(source).with_file_name("demo.tri").format(&diag);

        let expected = "\
error[E0100]: expected 'end', found ';'
  --> demo.tri:1:13
    |
  1 | begin x := 1; end
    |             ^ here
    = help: remove the ';'
";
        assert_eq!(out, expected);
    }

    #[test]
    fn secondary_label_hangs_below() {
        plain();
        let source = "let const a ~ 1; const a ~ 2 in nothing";
        let diag = Diagnostic::error("'a' is already declared in this scope")
            .with_code("E0201")
            .with_primary(Span::new(23, 24), "declared again here")
            .with_secondary(Span::new(4, 15), "first declared here");
        let out = DiagnosticFormatter::new(source).format(&diag);

        assert!(out.contains("--> <source>:1:24"));
        assert!(out.contains("    |     -----------        ^ declared again here\n"));
        assert!(out.ends_with("    |     |\n    |     first declared here\n"));
    }

    #[test]
    fn diagnostic_without_labels() {
        plain();
        let diag = Diagnostic::error("no location").with_note("nothing to point at");
        let out = DiagnosticFormatter::new("").format(&diag);
        assert_eq!(out, "error: no location\n    = note: nothing to point at\n");
    }

    #[test]
    fn format_all_follows_discovery_order() {
        plain();
        let mut reporter = Reporter::new();
        reporter.report(Stage::Parser, Diagnostic::error("first"));
        reporter.report(Stage::Tokenizer, Diagnostic::error("second"));
        let out = DiagnosticFormatter::new("").format_all(&reporter);
        assert_eq!(out, "error: first\n\nerror: second\n");
    }
}
