//! Pass 1: stateless structural patterns.

use std::ops::Range;

use regex::{Match, Regex};

use super::PassTally;
use super::credentials::scrub_credentials;
use crate::patterns::compile;
use crate::patterns::pii::{
    PiiCategory, PiiRule, STRUCTURAL_RULES, is_leading_function_word, is_name_exclusion,
    place_phrase_len,
};

use std::sync::LazyLock;

static NAME_TOKEN: LazyLock<Regex> = LazyLock::new(|| compile(r"[A-Za-z][A-Za-z'.]*"));

/// Applies every structural rule in order. Credential markers are scrubbed
/// before the regex-based API-key rule.
pub(super) fn run(text: &str) -> PassTally {
    let mut tally = PassTally::new(text);

    for rule in STRUCTURAL_RULES.iter() {
        if rule.category == PiiCategory::ApiKey {
            let (scrubbed, count) = scrub_credentials(&tally.text);
            if count > 0 {
                tally.text = scrubbed.into_owned();
                tally.record(PiiCategory::ApiKey, count);
            }
        }

        let spans = if rule.category == PiiCategory::Name {
            name_spans(&tally.text, rule)
        } else {
            rule_spans(&tally.text, rule)
        };
        tally.replace(spans, rule.category);
    }

    tally
}

pub(super) fn rule_spans(text: &str, rule: &PiiRule) -> Vec<Range<usize>> {
    rule.pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(rule.group))
        .filter(|m| !m.as_str().trim().is_empty())
        .map(|m| m.range())
        .collect()
}

/// Capitalized runs are split at boilerplate words, role labels and place
/// phrases. Each remaining sub-run is a name once its leading function
/// words are dropped and at least two full words are left.
fn name_spans(text: &str, rule: &PiiRule) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    for m in rule.pattern.find_iter(text) {
        let tokens: Vec<Match<'_>> = NAME_TOKEN.find_iter(m.as_str()).collect();
        let words: Vec<&str> = tokens.iter().map(Match::as_str).collect();
        let mut run: Vec<Match<'_>> = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            let phrase = place_phrase_len(&words[i..]);
            if phrase > 0 || is_name_exclusion(words[i]) {
                push_name_run(&run, m.start(), &mut spans);
                run.clear();
                i += phrase.max(1);
                continue;
            }
            if !(run.is_empty() && is_leading_function_word(words[i])) {
                run.push(tokens[i]);
            }
            i += 1;
        }
        push_name_run(&run, m.start(), &mut spans);
    }
    spans
}

fn push_name_run(run: &[Match<'_>], offset: usize, spans: &mut Vec<Range<usize>>) {
    let full_words = run.iter().filter(|t| !t.as_str().ends_with('.')).count();
    if full_words < 2 {
        return;
    }
    if let (Some(first), Some(last)) = (run.first(), run.last()) {
        spans.push(offset + first.start()..offset + last.end());
    }
}
