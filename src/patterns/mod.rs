//! Rule catalogs shared by the redactor, citation extractor, validator and
//! critique verifier. Everything here is data compiled once on first use.

pub mod citations;
pub mod jurisdictions;
pub mod pii;
pub mod placeholders;

use regex::Regex;

/// Compiles a built-in pattern. Only called for literals in this crate.
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern:?}: {e}"))
}

/// Whole-word containment over already-lowercased text.
///
/// A term matches when the characters on both sides of it are not
/// alphanumeric, so `file` does not match inside `profile`.
pub fn contains_term(haystack_lower: &str, term_lower: &str) -> bool {
    if term_lower.is_empty() {
        return false;
    }
    let mut search_from = 0;
    while let Some(rel) = haystack_lower[search_from..].find(term_lower) {
        let start = search_from + rel;
        let end = start + term_lower.len();
        let before_ok = haystack_lower[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let after_ok = haystack_lower[end..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
        search_from = start + term_lower.chars().next().map_or(1, char::len_utf8);
    }
    false
}
