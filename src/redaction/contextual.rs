//! Pass 2: phrase-anchored patterns over the Pass-1 output.
//!
//! This is pattern matching around cue phrases ("my landlord", "I live in"),
//! not entity recognition. It catches single names and partial addresses
//! that Pass 1 deliberately leaves alone, and misses anything without a cue.

use super::PassTally;
use super::structural::rule_spans;
use crate::patterns::pii::{CONTEXTUAL_RULES, PiiCategory, is_name_exclusion};

#[derive(Debug, Clone, Copy, Default)]
pub struct ContextualPatternPass;

impl ContextualPatternPass {
    pub fn run(&self, text: &str) -> PassTally {
        let mut tally = PassTally::new(text);
        for rule in CONTEXTUAL_RULES.iter() {
            let mut spans = rule_spans(&tally.text, rule);
            if rule.category == PiiCategory::ContextualName {
                let current = &tally.text;
                spans.retain(|span| {
                    !current[span.clone()]
                        .split_whitespace()
                        .any(is_name_exclusion)
                });
            }
            tally.replace(spans, rule.category);
        }
        tally
    }
}
