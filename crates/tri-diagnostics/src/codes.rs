//! Error code registry.
//!
//! Maps error codes (E0001, E0201, etc.) to titles and categories.

use std::collections::HashMap;

/// Registry of all known error codes.
pub struct ErrorCodeRegistry {
    codes: HashMap<&'static str, ErrorCodeInfo>,
}

/// Information about a single error code.
pub struct ErrorCodeInfo {
    pub code: &'static str,
    pub title: &'static str,
    pub category: ErrorCategory,
}

/// Error category for grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lexical,
    Syntax,
    Naming,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Lexical => write!(f, "Lexical"),
            ErrorCategory::Syntax => write!(f, "Syntax"),
            ErrorCategory::Naming => write!(f, "Naming"),
        }
    }
}

macro_rules! register_codes {
    ($($code:literal => ($title:literal, $cat:expr)),* $(,)?) => {{
        let mut map = HashMap::new();
        $(
            map.insert($code, ErrorCodeInfo {
                code: $code,
                title: $title,
                category: $cat,
            });
        )*
        map
    }};
}

impl Default for ErrorCodeRegistry {
    fn default() -> Self {
        use ErrorCategory::*;

        Self {
            codes: register_codes! {
                // Tokenizer errors (E00xx)
                "E0001" => ("unexpected character", Lexical),
                "E0002" => ("name contains upper-case letters", Lexical),
                "E0003" => ("malformed character literal", Lexical),

                // Parser errors (E01xx)
                "E0100" => ("expected token not found", Syntax),
                "E0101" => ("no viable alternative", Syntax),

                // Identifier errors (E02xx)
                "E0200" => ("undeclared name", Naming),
                "E0201" => ("name already declared in this scope", Naming),
                "E0202" => ("malformed node", Naming),
            },
        }
    }
}

impl ErrorCodeRegistry {
    pub fn get(&self, code: &str) -> Option<&ErrorCodeInfo> {
        self.codes.get(code)
    }

    pub fn all(&self) -> impl Iterator<Item = &ErrorCodeInfo> {
        self.codes.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_code_ranges() {
        let registry = ErrorCodeRegistry::default();
        for info in registry.all() {
            let expected = match &info.code[..3] {
                "E00" => ErrorCategory::Lexical,
                "E01" => ErrorCategory::Syntax,
                "E02" => ErrorCategory::Naming,
                other => panic!("unexpected range {other}"),
            };
            assert_eq!(info.category, expected, "{}", info.code);
        }
        assert_eq!(registry.get("E0200").unwrap().title, "undeclared name");
        assert!(registry.get("E0308").is_none());
    }
}
