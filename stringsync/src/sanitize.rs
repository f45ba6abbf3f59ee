//! Placeholder-syntax sanitization.
//!
//! Before a reference-platform value is written into the destination document
//! its placeholder tokens must be rewritten to the destination platform's
//! syntax (e.g. Android's `%s` becomes iOS-style `%@` when the Android file is
//! the one holding iOS-sourced copy). Rules are applied in list order so a
//! shorter literal token cannot match inside a longer, already-converted one.

use serde::{Deserialize, Serialize};

/// One ordered rewrite rule: every case-insensitive occurrence of `target`
/// is replaced with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextReplacement {
    pub target: String,
    pub replacement: String,
}

impl TextReplacement {
    pub fn new(target: impl Into<String>, replacement: impl Into<String>) -> Self {
        TextReplacement {
            target: target.into(),
            replacement: replacement.into(),
        }
    }
}

/// Applies each rule in order over the running result, accumulating the
/// effects of earlier rules. Matching is ASCII case-insensitive, which covers
/// every recognized placeholder token.
///
/// # Example
/// ```rust
/// use stringsync::sanitize::{TextReplacement, sanitize};
/// let rules = vec![TextReplacement::new("%s", "%@")];
/// assert_eq!(sanitize("%s and %S", &rules), "%@ and %@");
/// ```
pub fn sanitize(input: &str, rules: &[TextReplacement]) -> String {
    rules.iter().fold(input.to_string(), |acc, rule| {
        replace_all_ignore_case(&acc, &rule.target, &rule.replacement)
    })
}

fn replace_all_ignore_case(haystack: &str, needle: &str, replacement: &str) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }
    let mut out = String::with_capacity(haystack.len());
    let mut rest = haystack;
    while let Some(pos) = find_ignore_case(rest, needle) {
        out.push_str(&rest[..pos]);
        out.push_str(replacement);
        rest = &rest[pos + needle.len()..];
    }
    out.push_str(rest);
    out
}

// Byte-length match is safe here: candidates are compared slice-for-slice
// against the needle, and a slice that is not a valid char boundary yields
// None from `get` and is skipped.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let n = needle.len();
    if haystack.len() < n {
        return None;
    }
    haystack.char_indices().find_map(|(i, _)| {
        haystack
            .get(i..i + n)
            .filter(|candidate| candidate.eq_ignore_ascii_case(needle))
            .map(|_| i)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(pairs: &[(&str, &str)]) -> Vec<TextReplacement> {
        pairs
            .iter()
            .map(|(t, r)| TextReplacement::new(*t, *r))
            .collect()
    }

    #[test]
    fn test_case_insensitive_replacement() {
        let rules = rules(&[("%s", "%@")]);
        assert_eq!(sanitize("%s and %S", &rules), "%@ and %@");
    }

    #[test]
    fn test_no_rules_returns_input() {
        assert_eq!(sanitize("untouched %s", &[]), "untouched %s");
    }

    #[test]
    fn test_rules_accumulate_in_order() {
        let rules = rules(&[("%d", "%@"), ("%s", "%@"), ("%%", "%")]);
        assert_eq!(
            sanitize("%d items, %s each, 50%% off", &rules),
            "%@ items, %@ each, 50% off"
        );
    }

    #[test]
    fn test_positional_token_converted_before_short_token() {
        // The longer positional rule runs first; the plain %s rule afterwards
        // must not match inside the already-converted %1$@.
        let rules = rules(&[("%1$s", "%1$@"), ("%s", "%@")]);
        assert_eq!(sanitize("%1$s then %s", &rules), "%1$@ then %@");
    }

    #[test]
    fn test_replacement_not_rescanned_by_same_rule() {
        let rules = rules(&[("%%", "%")]);
        assert_eq!(sanitize("%%%%", &rules), "%%");
    }

    #[test]
    fn test_non_ascii_text_preserved() {
        let rules = rules(&[("%s", "%@")]);
        assert_eq!(sanitize("héllo %s wörld", &rules), "héllo %@ wörld");
    }
}
