//! Credential scrubbing for the API-key category.
//!
//! Prefix tokens (`sk-`, `ghp_`, ...) are replaced whole. Header, query and
//! JSON markers (`Authorization: Bearer `, `api_key=`, ...) keep the marker
//! and replace only the value after it.

use std::borrow::Cow;

use crate::patterns::pii::PiiCategory;

const API_KEY_MARKER: &str = PiiCategory::ApiKey.marker();
const MAX_ERROR_CHARS: usize = 200;

/// Minimum token length after a prefix before it is treated as a key.
const MIN_PREFIX_TOKEN_LEN: usize = 10;
const MIN_MARKER_VALUE_LEN: usize = 4;

const PREFIX_PATTERNS: [&str; 21] = [
    "sk-",
    "xoxb-",
    "xoxp-",
    "xoxs-",
    "xoxa-",
    "xapp-",
    "ghp_",
    "github_pat_",
    "hf_",
    "glpat-",
    "ya29.",
    "AIza",
    "AKIA",
    "ASIA",
    "eyJ",
    "GOCSPX-",
    "gho_",
    "ghu_",
    "ghs_",
    "sshpass-",
    "AGE-SECRET-KEY-",
];

const MARKER_PATTERNS: [&str; 25] = [
    "Authorization: Bearer ",
    "authorization: bearer ",
    "Authorization: Token ",
    "authorization: token ",
    "\"authorization\":\"Bearer ",
    "\"authorization\":\"bearer ",
    "api_key=",
    "apikey=",
    "access_token=",
    "refresh_token=",
    "id_token=",
    "\"api_key\":\"",
    "\"access_token\":\"",
    "\"refresh_token\":\"",
    "\"id_token\":\"",
    "\"token\":\"",
    "\"secret\":\"",
    "\"password\":\"",
    "\"private_key\":\"",
    "\"client_secret\":\"",
    "password=",
    "secret=",
    "DATABASE_URL=",
    "PRIVATE_KEY=",
    "SECRET_KEY=",
];

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '+' | '/' | '=')
}

fn token_end(input: &str, from: usize) -> usize {
    let mut end = from;
    for (i, c) in input[from..].char_indices() {
        if is_secret_char(c) {
            end = from + i + c.len_utf8();
        } else {
            break;
        }
    }
    end
}

/// Replaces every `marker` occurrence followed by a long enough token.
/// Returns the number of replacements.
fn scrub_after_marker(scrubbed: &mut String, marker: &str, keep_marker: bool) -> usize {
    let min_len = if keep_marker {
        MIN_MARKER_VALUE_LEN
    } else {
        MIN_PREFIX_TOKEN_LEN
    };
    let mut replaced = 0;
    let mut search_from = 0;
    while let Some(rel) = scrubbed[search_from..].find(marker) {
        let start = search_from + rel;
        let content_start = start + marker.len();
        let end = token_end(scrubbed, content_start);

        // Prefixes glued to a preceding word ("task-force") are ordinary text.
        let standalone = keep_marker
            || scrubbed[..start]
                .chars()
                .next_back()
                .is_none_or(|c| !c.is_ascii_alphanumeric());
        if end - content_start < min_len || !standalone {
            search_from = content_start;
            continue;
        }

        let replace_start = if keep_marker { content_start } else { start };
        scrubbed.replace_range(replace_start..end, API_KEY_MARKER);
        replaced += 1;
        search_from = replace_start + API_KEY_MARKER.len();
    }
    replaced
}

fn scrub_pem_blocks(scrubbed: &mut String) -> usize {
    const PEM_BEGIN_MARKER: &str = "-----BEGIN ";
    const PEM_LINE_SUFFIX: &str = "-----";

    let mut replaced = 0;
    let mut search_from = 0;

    while let Some(rel_begin) = scrubbed[search_from..].find(PEM_BEGIN_MARKER) {
        let begin = search_from + rel_begin;
        let kind_start = begin + PEM_BEGIN_MARKER.len();
        let Some(rel_kind_end) = scrubbed[kind_start..].find(PEM_LINE_SUFFIX) else {
            search_from = kind_start;
            continue;
        };

        let kind_end = kind_start + rel_kind_end;
        if kind_end == kind_start {
            search_from = kind_start;
            continue;
        }

        let end_marker = format!("-----END {}-----", &scrubbed[kind_start..kind_end]);
        let end_search_from = kind_end + PEM_LINE_SUFFIX.len();
        let Some(rel_end) = scrubbed[end_search_from..].find(&end_marker) else {
            search_from = kind_start;
            continue;
        };

        let replace_end = end_search_from + rel_end + end_marker.len();
        scrubbed.replace_range(begin..replace_end, API_KEY_MARKER);
        replaced += 1;
        search_from = begin + API_KEY_MARKER.len();
    }

    replaced
}

fn needs_scrubbing(input: &str) -> bool {
    input.contains("-----BEGIN ")
        || PREFIX_PATTERNS.iter().any(|p| input.contains(p))
        || MARKER_PATTERNS.iter().any(|p| input.contains(p))
}

/// Scrubs credential-shaped tokens and returns the text plus the number of
/// replacements made.
pub fn scrub_credentials(input: &str) -> (Cow<'_, str>, usize) {
    if !needs_scrubbing(input) {
        return (Cow::Borrowed(input), 0);
    }

    let mut scrubbed = input.to_string();
    let mut replaced = scrub_pem_blocks(&mut scrubbed);

    for marker in MARKER_PATTERNS {
        replaced += scrub_after_marker(&mut scrubbed, marker, true);
    }
    for prefix in PREFIX_PATTERNS {
        replaced += scrub_after_marker(&mut scrubbed, prefix, false);
    }

    if replaced == 0 {
        return (Cow::Borrowed(input), 0);
    }
    (Cow::Owned(scrubbed), replaced)
}

/// Makes upstream error text safe to keep: credentials and PII are
/// redacted and the result is truncated.
pub fn sanitize_error_text(input: &str) -> String {
    let redacted = super::redact(input, true).redacted_text;

    if redacted.chars().count() <= MAX_ERROR_CHARS {
        return redacted;
    }

    let mut end = MAX_ERROR_CHARS;
    while end > 0 && !redacted.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &redacted[..end])
}
