use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::data::DataMap;
use crate::error::{TemplateError, TemplateResult};

/// Characters allowed in a token or loop name.
const WORD: &str = "[A-Za-z0-9_]+";

/// `@for:<name>{<body>}` where the body holds no braces at all, so nested or
/// unterminated blocks never match.
static LOOP_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"@for:({})\{{([^{{}}]*)\}}", WORD)).expect("loop block pattern")
});

/// Finds `<prefix><word>` tokens and loop blocks in a document.
///
/// Every scan is a single left-to-right pass over the input: within one pass
/// replacement text is not rescanned. A later pass over the same document
/// (such as plain substitution after loop expansion) does see it.
#[derive(Debug, Clone)]
pub struct TokenScanner {
    prefix: String,
    token: Regex,
}

impl TokenScanner {
    /// Compile a scanner for the given prefix.
    ///
    /// The prefix is matched literally, so `$`, `.` or `{{` work as markers.
    ///
    /// # Errors
    /// - `ConfigError` if the prefix is empty
    pub fn new(prefix: &str) -> TemplateResult<Self> {
        if prefix.is_empty() {
            return Err(TemplateError::ConfigError(
                "Token prefix cannot be empty".to_string(),
            ));
        }

        let token = Regex::new(&format!("{}({})", regex::escape(prefix), WORD)).map_err(|e| {
            TemplateError::ConfigError(format!("Invalid token prefix '{}': {}", prefix, e))
        })?;

        Ok(TokenScanner {
            prefix: prefix.to_string(),
            token,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Replace every token for which `lookup` returns a value.
    ///
    /// Tokens without a value are copied through verbatim, prefix included.
    pub fn substitute<'a, F>(&self, text: &str, lookup: F) -> String
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        self.token
            .replace_all(text, |caps: &Captures| match lookup(&caps[1]) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Expand `@for:<name>{<body>}` blocks whose name is a sequence in `data`.
    ///
    /// The body is rendered once per record and only the record's own fields
    /// are substituted. Blocks naming a missing or text value are left intact.
    pub fn expand_loops(&self, text: &str, data: &DataMap) -> String {
        LOOP_BLOCK
            .replace_all(text, |caps: &Captures| {
                let name = &caps[1];
                match data.get_sequence(name) {
                    Some(records) => {
                        let body = &caps[2];
                        records
                            .iter()
                            .map(|record| self.substitute(body, |field| record.get_field(field)))
                            .collect::<String>()
                    }
                    None => {
                        debug!("Loop block '@for:{}' left unexpanded: no sequence data", name);
                        caps[0].to_string()
                    }
                }
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Record;

    fn rows() -> DataMap {
        let mut data = DataMap::new();
        data.with_sequence(
            "rows",
            vec![Record::from([("k", "a")]), Record::from([("k", "b")])],
        );
        data
    }

    #[test]
    fn test_empty_prefix_rejected() {
        match TokenScanner::new("") {
            Err(TemplateError::ConfigError(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected ConfigError"),
        }
    }

    #[test]
    fn test_prefix_is_literal() {
        let scanner = TokenScanner::new(".").unwrap();
        let out = scanner.substitute("a.b x_y", |k| if k == "b" { Some("B") } else { None });
        assert_eq!(out, "aB x_y");

        let scanner = TokenScanner::new("{{").unwrap();
        let out = scanner.substitute("Hi {{name!", |_| Some("Ann"));
        assert_eq!(out, "Hi Ann!");
    }

    #[test]
    fn test_token_is_maximal_word_run() {
        let scanner = TokenScanner::new("$").unwrap();
        let out = scanner.substitute("$name_2-x $name", |k| if k == "name" { Some("N") } else { None });
        assert_eq!(out, "$name_2-x N");
    }

    #[test]
    fn test_replacement_not_rescanned() {
        let scanner = TokenScanner::new("$").unwrap();
        let out = scanner.substitute("$a $b", |k| match k {
            "a" => Some("$b"),
            "b" => Some("B"),
            _ => None,
        });
        assert_eq!(out, "$b B");
    }

    #[test]
    fn test_non_ascii_word_chars_end_token() {
        let scanner = TokenScanner::new("$").unwrap();
        let out = scanner.substitute("$näme", |k| if k == "n" { Some("X") } else { None });
        assert_eq!(out, "Xäme");
    }

    #[test]
    fn test_expand_loop() {
        let scanner = TokenScanner::new("$").unwrap();
        let out = scanner.expand_loops("<ul>@for:rows{<li>$k</li>}</ul>", &rows());
        assert_eq!(out, "<ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn test_loop_body_missing_field_stays_literal() {
        let scanner = TokenScanner::new("$").unwrap();
        let out = scanner.expand_loops("@for:rows{$k$missing,}", &rows());
        assert_eq!(out, "a$missing,b$missing,");
    }

    #[test]
    fn test_loop_body_spans_lines() {
        let scanner = TokenScanner::new("$").unwrap();
        let out = scanner.expand_loops("@for:rows{\n- $k\n}", &rows());
        assert_eq!(out, "\n- a\n\n- b\n");
    }

    #[test]
    fn test_unknown_loop_left_intact() {
        let scanner = TokenScanner::new("$").unwrap();
        let text = "@for:other{$k}";
        assert_eq!(scanner.expand_loops(text, &rows()), text);
    }

    #[test]
    fn test_empty_sequence_removes_block() {
        let scanner = TokenScanner::new("$").unwrap();
        let mut data = DataMap::new();
        data.with_sequence("rows", vec![]);
        assert_eq!(scanner.expand_loops("[@for:rows{$k}]", &data), "[]");
    }

    #[test]
    fn test_malformed_loops_left_intact() {
        let scanner = TokenScanner::new("$").unwrap();
        let unterminated = "@for:rows{<li>$k</li>";
        assert_eq!(scanner.expand_loops(unterminated, &rows()), unterminated);

        let nested = "@for:rows{a{b}c}";
        assert_eq!(scanner.expand_loops(nested, &rows()), nested);
    }

    #[test]
    fn test_open_brace_in_body_is_not_a_loop() {
        let scanner = TokenScanner::new("$").unwrap();
        let text = "@for:rows{x{$k}";
        assert_eq!(scanner.expand_loops(text, &rows()), text);
    }

    #[test]
    fn test_multiple_loops_non_overlapping() {
        let scanner = TokenScanner::new("$").unwrap();
        let out = scanner.expand_loops("@for:rows{$k}|@for:rows{[$k]}", &rows());
        assert_eq!(out, "ab|[a][b]");
    }
}
