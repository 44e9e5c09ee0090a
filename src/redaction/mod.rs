//! Two-pass PII redaction.
//!
//! Pass 1 applies fixed structural patterns in a fixed order. Pass 2
//! (`ContextualPatternPass`) runs over the Pass-1 output and redacts only
//! the captured span after a cue phrase. Every replacement marker is shaped
//! so that no pattern in either pass matches it, which makes `redact`
//! idempotent.

mod contextual;
pub mod credentials;
mod safe_log;
mod structural;

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;
use std::ops::Range;

use serde::Serialize;

pub use contextual::ContextualPatternPass;
pub use credentials::sanitize_error_text;
pub use safe_log::{CapturingSink, LogExtra, LogLevel, LogSink, SafeLogger, TracingSink, safe_log};

use crate::patterns::pii::PiiCategory;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedactionOutcome {
    pub redacted_text: String,
    pub categories: BTreeSet<PiiCategory>,
    pub pass1_count: usize,
    pub pass2_count: usize,
}

impl RedactionOutcome {
    pub fn total_count(&self) -> usize {
        self.pass1_count + self.pass2_count
    }

    pub fn is_clean(&self) -> bool {
        self.total_count() == 0
    }
}

/// Working state of a single pass.
pub struct PassTally {
    pub text: String,
    pub categories: BTreeSet<PiiCategory>,
    pub count: usize,
}

impl PassTally {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            categories: BTreeSet::new(),
            count: 0,
        }
    }

    fn record(&mut self, category: PiiCategory, replaced: usize) {
        if replaced > 0 {
            self.categories.insert(category);
            self.count += replaced;
        }
    }

    /// Replaces ascending, non-overlapping spans with the category marker.
    fn replace(&mut self, spans: Vec<Range<usize>>, category: PiiCategory) {
        let replaced = spans.len();
        for span in spans.into_iter().rev() {
            self.text.replace_range(span, category.marker());
        }
        self.record(category, replaced);
    }
}

/// Redacts `text`. Pure: the same input always yields the same outcome.
pub fn redact(text: &str, enable_contextual_pass: bool) -> RedactionOutcome {
    let pass1 = structural::run(text);
    let mut categories = pass1.categories;

    if !enable_contextual_pass {
        return RedactionOutcome {
            redacted_text: pass1.text,
            categories,
            pass1_count: pass1.count,
            pass2_count: 0,
        };
    }

    let pass2 = ContextualPatternPass.run(&pass1.text);
    categories.extend(pass2.categories);
    RedactionOutcome {
        redacted_text: pass2.text,
        categories,
        pass1_count: pass1.count,
        pass2_count: pass2.count,
    }
}

/// Shorthand for values interpolated into `tracing` fields.
pub fn redact_for_log(text: &str) -> String {
    redact(text, true).redacted_text
}
