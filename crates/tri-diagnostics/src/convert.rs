// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Conversions from compiler error types to `Diagnostic`.

use crate::{Diagnostic, ToDiagnostic};

// ============================================================================
// Lex Errors
// ============================================================================

impl ToDiagnostic for tri_lexer::LexError {
    fn to_diagnostic(&self) -> Diagnostic {
        use tri_lexer::LexErrorKind::*;

        let (code, label) = match &self.kind {
            UnexpectedCharacter(_) => ("E0001", "not part of the language"),
            UpperCaseName(_) => ("E0002", "upper-case letters are not allowed in names"),
            MalformedCharacter(_) => ("E0003", "literal is not closed"),
        };
        let mut diag = Diagnostic::error(self.to_string())
            .with_code(code)
            .with_primary(self.span, label);

        if let Some(ref hint) = self.hint {
            diag = diag.with_help(hint.as_str());
        }

        diag
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

impl ToDiagnostic for tri_parser::ParseError {
    fn to_diagnostic(&self) -> Diagnostic {
        let code = match self.kind {
            tri_parser::ParseErrorKind::MissingToken => "E0100",
            tri_parser::ParseErrorKind::NoViableProduction => "E0101",
        };
        let mut diag = Diagnostic::error(&self.message)
            .with_code(code)
            .with_primary(self.span, "here");

        if let Some(ref hint) = self.hint {
            diag = diag.with_help(hint.as_str());
        }

        diag
    }
}

// ============================================================================
// Identify Errors
// ============================================================================

impl ToDiagnostic for tri_resolve::IdentifyError {
    fn to_diagnostic(&self) -> Diagnostic {
        use tri_resolve::IdentifyErrorKind::*;

        match &self.kind {
            Undeclared { .. } => Diagnostic::error(self.to_string())
                .with_code("E0200")
                .with_primary(self.span, "not found in any enclosing scope")
                .with_help("declare it in an enclosing 'let'"),

            AlreadyDeclared { previous, .. } => {
                let diag = Diagnostic::error(self.to_string())
                    .with_code("E0201")
                    .with_primary(self.span, "declared again here");
                match previous {
                    Some(previous) => diag.with_secondary(*previous, "first declared here"),
                    None => diag.with_note("the standard environment already declares it"),
                }
            }

            MalformedNode { .. } => Diagnostic::error(self.to_string())
                .with_code("E0202")
                .with_primary(self.span, "not checked")
                .with_note("fix the syntax error here first"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LabelStyle;
    use tri_ast::Span;
    use tri_resolve::IdentifyError;

    #[test]
    fn lex_error_codes() {
        let result = tri_lexer::tokenize("x := Big # 'a");
        let codes: Vec<_> = result
            .errors
            .iter()
            .map(|e| e.to_diagnostic().code.unwrap().0)
            .collect();
        assert_eq!(codes, ["E0002", "E0001", "E0003"]);
    }

    #[test]
    fn parse_error_codes() {
        let tokens = tri_lexer::tokenize("while x nothing").tokens;
        let missing = tri_parser::Parser::new(tokens).parse();
        let diag = missing.errors[0].to_diagnostic();
        assert_eq!(diag.code.unwrap().0, "E0100");
        assert!(diag.help.is_some());

        let tokens = tri_lexer::tokenize("then").tokens;
        let no_command = tri_parser::Parser::new(tokens).parse();
        assert_eq!(no_command.errors[0].to_diagnostic().code.unwrap().0, "E0101");
    }

    #[test]
    fn duplicate_points_at_both_declarations() {
        let err = IdentifyError::already_declared("a".into(), Span::new(23, 24), Some(Span::new(4, 15)));
        let diag = err.to_diagnostic();
        assert_eq!(diag.message, "'a' is already declared in this scope");
        assert_eq!(diag.labels.len(), 2);
        assert_eq!(diag.labels[1].style, LabelStyle::Secondary);
        assert_eq!(diag.labels[1].span, Span::new(4, 15));
        assert_eq!(diag.primary_span(), Some(Span::new(23, 24)));
    }
}
