//! Format-placeholder counting.
//!
//! Both platforms embed substitution tokens in localized values (`%@` on iOS,
//! `%s`/`%d`/`%f` on Android, plus positional variants like `%1$@`). A value
//! carried across platforms must keep the same number of placeholders or it
//! will corrupt runtime formatting; the analyzer compares the counts and the
//! synchronizer uses the mismatch flag as a safety gate.

/// Recognized placeholder tokens, matched case-insensitively.
///
/// Positional specifiers such as `%1$@` are counted through their `$@` tail,
/// so each specifier contributes exactly one occurrence and the shared `%`
/// is never double-counted.
const PLACEHOLDER_TOKENS: [&str; 8] = ["%@", "%d", "%s", "%f", "$@", "$d", "$s", "$f"];

/// Counts the placeholder occurrences in `value`.
///
/// The scan is case-insensitive and overlap-free: after a token matches,
/// scanning resumes past it rather than one character later.
///
/// # Example
/// ```rust
/// use stringsync::placeholder::count_placeholders;
/// assert_eq!(count_placeholders(""), 0);
/// assert_eq!(count_placeholders("%@ %@ %@"), 3);
/// assert_eq!(count_placeholders("%1$@ %2$s"), 2);
/// ```
pub fn count_placeholders(value: &str) -> usize {
    if value.is_empty() {
        return 0;
    }
    let haystack = value.to_ascii_lowercase();
    PLACEHOLDER_TOKENS
        .iter()
        .map(|token| count_token(&haystack, token))
        .sum()
}

fn count_token(haystack: &str, token: &str) -> usize {
    let mut count = 0;
    let mut rest = haystack;
    while let Some(pos) = rest.find(token) {
        count += 1;
        rest = &rest[pos + token.len()..];
    }
    count
}
