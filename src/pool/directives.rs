//! Parsing of user-supplied `key = value` directive lists.
//!
//! Lines without `=` are dropped without error. Only admin values have a
//! trailing `;` removed; flag values are kept as written (after trimming).

/// One sanitized directive line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub key: String,
    pub value: String,
}

/// Parse `php_admin_values`: value trimmed, trailing `;` removed, trimmed again.
pub fn parse_admin_values(text: &str) -> Vec<Directive> {
    parse_lines(text, |v| v.trim().trim_end_matches(';').trim_end().to_string())
}

/// Parse `php_flags`: value trimmed only.
pub fn parse_flags(text: &str) -> Vec<Directive> {
    parse_lines(text, |v| v.trim().to_string())
}

fn parse_lines(text: &str, sanitize: impl Fn(&str) -> String) -> Vec<Directive> {
    text.lines()
        .filter_map(|line| match line.split_once('=') {
            Some((key, value)) => Some(Directive {
                key: key.trim().to_string(),
                value: sanitize(value),
            }),
            None => {
                if !line.trim().is_empty() {
                    tracing::debug!(line, "Skipping directive line without '='");
                }
                None
            }
        })
        .collect()
}
