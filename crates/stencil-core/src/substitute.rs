//! Strict single-pass token substitution
//!
//! A token is `{{name}}` (whitespace inside the braces is allowed) where
//! `name` is a bare identifier: letters, digits, and underscores, not
//! starting with a digit. Anything brace-delimited that does not match the
//! grammar is ordinary text and passes through untouched. Substituted
//! values are never re-scanned, so a value containing `{{...}}`-shaped
//! text cannot trigger a second expansion.

use crate::error::RenderError;
use crate::models::VariableMap;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Substitute every token in `text` from `vars`.
///
/// Fails with [`RenderError::UnresolvedToken`] if a well-formed token names
/// a variable that is not in the map; unknown tokens never leak into output.
/// `location` is used only for error context (a file path or path segment).
pub fn substitute(
    text: &str,
    vars: &VariableMap,
    location: &str,
) -> Result<String, RenderError> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(OPEN) {
        let (before, marked) = rest.split_at(start);
        out.push_str(before);

        match parse_token(marked) {
            Some((name, token_len)) => {
                let value = vars.get(name).ok_or_else(|| {
                    RenderError::UnresolvedToken {
                        token: name.to_string(),
                        location: location.to_string(),
                    }
                })?;
                // Single pass: the value goes out verbatim, never re-scanned.
                out.push_str(value);
                rest = &marked[token_len..];
            }
            None => {
                // Not a token; emit the open marker literally and move on.
                out.push_str(OPEN);
                rest = &marked[OPEN.len()..];
            }
        }
    }

    out.push_str(rest);
    Ok(out)
}

/// Collect the names of every well-formed token in `text`, in order of
/// appearance. Duplicates are preserved; callers dedupe as needed.
pub fn token_names(text: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find(OPEN) {
        let marked = &rest[start..];
        match parse_token(marked) {
            Some((name, token_len)) => {
                names.push(name.to_string());
                rest = &marked[token_len..];
            }
            None => rest = &marked[OPEN.len()..],
        }
    }

    names
}

/// Whether `text` contains at least one well-formed token
pub fn contains_token(text: &str) -> bool {
    !token_names(text).is_empty()
}

/// Try to parse a token at the start of `s` (which begins with `{{`).
///
/// Returns the identifier and the total byte length of the token,
/// including both markers, or `None` if the grammar does not match.
fn parse_token(s: &str) -> Option<(&str, usize)> {
    let inner_start = OPEN.len();
    let close = s.find(CLOSE)?;
    // Nested open markers before the close mean this is not a token.
    if s[inner_start..close].contains(OPEN) {
        return None;
    }

    let inner = s[inner_start..close].trim();
    if !is_identifier(inner) {
        return None;
    }

    // Map the trimmed identifier back into the original slice.
    let offset = s[inner_start..close].find(inner).unwrap_or(0);
    let name = &s[inner_start + offset..inner_start + offset + inner.len()];
    Some((name, close + CLOSE.len()))
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> VariableMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_substitute_basic() {
        let v = vars(&[("name", "demo")]);
        let result = substitute("Hello {{name}}", &v, "test").unwrap();
        assert_eq!(result, "Hello demo");
    }

    #[test]
    fn test_substitute_spaced() {
        let v = vars(&[("name", "demo")]);
        let result = substitute("Hello {{ name }}", &v, "test").unwrap();
        assert_eq!(result, "Hello demo");
    }

    #[test]
    fn test_substitute_multiple() {
        let v = vars(&[("name", "app"), ("author", "Jo")]);
        let result = substitute("{{name}} by {{author}}", &v, "test").unwrap();
        assert_eq!(result, "app by Jo");
    }

    #[test]
    fn test_substitute_unknown_token_fails() {
        let v = vars(&[]);
        let err = substitute("Hello {{name}}", &v, "README.md").unwrap_err();
        match err {
            RenderError::UnresolvedToken { token, location } => {
                assert_eq!(token, "name");
                assert_eq!(location, "README.md");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_substitute_is_single_pass() {
        // A value shaped like a token must not be re-expanded.
        let v = vars(&[("a", "{{b}}"), ("b", "nope")]);
        let result = substitute("x {{a}} y", &v, "test").unwrap();
        assert_eq!(result, "x {{b}} y");
    }

    #[test]
    fn test_non_identifier_braces_pass_through() {
        let v = vars(&[]);
        let text = "css: .box {{ color: red; }} end";
        let result = substitute(text, &v, "test").unwrap();
        assert_eq!(result, text);
    }

    #[test]
    fn test_digit_leading_name_is_not_a_token() {
        let v = vars(&[]);
        let text = "{{1abc}}";
        assert_eq!(substitute(text, &v, "test").unwrap(), text);
    }

    #[test]
    fn test_unterminated_marker_passes_through() {
        let v = vars(&[("name", "demo")]);
        let result = substitute("open {{name", &v, "test").unwrap();
        assert_eq!(result, "open {{name");
    }

    #[test]
    fn test_nested_open_is_not_a_token() {
        let v = vars(&[("b", "val")]);
        let result = substitute("{{ {{b}} }}", &v, "test").unwrap();
        assert_eq!(result, "{{ val }}");
    }

    #[test]
    fn test_empty_value_substitutes() {
        let v = vars(&[("description", "")]);
        let result = substitute("desc: {{description}}.", &v, "test").unwrap();
        assert_eq!(result, "desc: .");
    }

    #[test]
    fn test_token_names_in_order_with_duplicates() {
        let names = token_names("{{a}} {{b}} {{a}} {{ not valid }}");
        assert_eq!(names, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_contains_token() {
        assert!(contains_token("{{name}}.txt"));
        assert!(!contains_token("plain.txt"));
        assert!(!contains_token("{{ not an ident }}"));
    }
}
