//! `${name}` and `${name:default}` expansion in attribute and element text.

use tracing::debug;

/// Knobs shared by every dialect parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Expand `${...}` expressions against the process environment.
    pub resolve_expressions: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            resolve_expressions: true,
        }
    }
}

/// Expand expressions in `input` using the process environment.
pub fn substitute(input: &str) -> String {
    substitute_with(input, |key| std::env::var(key).ok())
}

/// Re-scan cap for values that expand to further expressions.
const MAX_PASSES: usize = 16;

/// Expand expressions in `input` using `lookup` for variable values.
///
/// `${/}` expands to the path separator and `${:}` to the path-list
/// separator. Braces nest, so `${a:${b}}` falls back to `b`. Text produced
/// by an expansion is scanned again until nothing changes. An unterminated
/// `${` is kept verbatim.
pub fn substitute_with<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut current = input.to_string();
    for _ in 0..MAX_PASSES {
        if !current.contains("${") {
            break;
        }
        let next = expand_once(&current, &lookup);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn expand_once<F>(input: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let body = &rest[start + 2..];
        match closing_brace(body) {
            Some(end) => {
                out.push_str(&resolve_one(&body[..end], lookup));
                rest = &body[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Byte offset of the `}` that closes an expression body.
fn closing_brace(body: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, byte) in body.bytes().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' if depth == 0 => return Some(i),
            b'}' => depth -= 1,
            _ => {}
        }
    }
    None
}

fn resolve_one<F>(expr: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match expr {
        "/" => return std::path::MAIN_SEPARATOR_STR.to_string(),
        ":" => return path_list_separator().to_string(),
        _ => {}
    }
    let (key, default) = match expr.split_once(':') {
        Some((key, default)) => (key, Some(default)),
        None => (expr, None),
    };
    if let Some(value) = lookup(key) {
        return value;
    }
    match default {
        Some(default) => default.to_string(),
        None => {
            debug!(key, "expression variable is not set; expanding to empty");
            String::new()
        }
    }
}

fn path_list_separator() -> &'static str {
    if cfg!(windows) {
        ";"
    } else {
        ":"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(key: &str) -> Option<String> {
        match key {
            "db.host" => Some("db.internal".into()),
            "db.port" => Some("5432".into()),
            _ => None,
        }
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(substitute_with("jdbc:h2:mem:test", lookup), "jdbc:h2:mem:test");
    }

    #[test]
    fn expands_every_expression() {
        let out = substitute_with("jdbc:pg://${db.host}:${db.port}/app", lookup);
        assert_eq!(out, "jdbc:pg://db.internal:5432/app");
    }

    #[test]
    fn falls_back_to_default_then_empty() {
        assert_eq!(substitute_with("${missing:sa}", lookup), "sa");
        assert_eq!(substitute_with("[${missing}]", lookup), "[]");
        assert_eq!(substitute_with("${db.port:1}", lookup), "5432");
    }

    #[test]
    fn separators_and_unterminated() {
        assert_eq!(
            substitute_with("a${/}b", lookup),
            format!("a{}b", std::path::MAIN_SEPARATOR)
        );
        assert_eq!(substitute_with("x${:}y", lookup), format!("x{}y", path_list_separator()));
        assert_eq!(substitute_with("keep ${open", lookup), "keep ${open");
    }

    #[test]
    fn nested_defaults_expand_fully() {
        assert_eq!(substitute_with("${missing:${db.host}}", lookup), "db.internal");
        assert_eq!(substitute_with("${missing:${also.missing}}", lookup), "");
        assert_eq!(
            substitute_with("${a:${b:${c:deep}}}/x", lookup),
            "deep/x"
        );
        assert_eq!(substitute_with("${db.port:${missing}}!", lookup), "5432!");
    }

    #[test]
    fn expanded_values_are_scanned_again() {
        let chained = |key: &str| match key {
            "url" => Some("jdbc:pg://${host}/app".to_string()),
            "host" => Some("db".to_string()),
            "self" => Some("${self}".to_string()),
            _ => None,
        };
        assert_eq!(substitute_with("${url}", chained), "jdbc:pg://db/app");
        assert_eq!(substitute_with("${self}", chained), "${self}");
    }

    #[test]
    fn expansion_is_idempotent() {
        for input in ["${missing:${also.missing}}", "${a:${b:x}}y", "keep ${open", "${db.host}}"] {
            let once = substitute_with(input, lookup);
            assert_eq!(substitute_with(&once, lookup), once, "input {input:?}");
        }
    }
}
