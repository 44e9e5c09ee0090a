//! Pre-generation safety audit and post-generation grounding check.

use serde::{Deserialize, Serialize};

use crate::patterns::jurisdictions::SUPPORTED_JURISDICTIONS;
use crate::redaction::redact_for_log;

const PROHIBITED_TERMS: [&str; 6] = [
    "how to commit",
    "bypass security",
    "illegal drugs",
    "hack",
    "exploit",
    "untraceable",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum SafetyRejection {
    MissingJurisdiction,
    UnsupportedJurisdiction(String),
    ProhibitedContent(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum SafetyVerdict {
    Approved,
    Rejected { rejection: SafetyRejection },
}

impl SafetyVerdict {
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

/// Canonical name of a supported jurisdiction, compared case-insensitively.
pub fn supported_jurisdiction(jurisdiction: &str) -> Option<&'static str> {
    let wanted = jurisdiction.trim();
    SUPPORTED_JURISDICTIONS
        .iter()
        .copied()
        .find(|name| name.eq_ignore_ascii_case(wanted))
}

/// Gate run before any analysis is generated. Requests without a supported
/// US jurisdiction (or Federal) and requests containing prohibited phrases
/// are rejected.
pub fn red_team_audit(user_input: &str, jurisdiction: &str) -> SafetyVerdict {
    if jurisdiction.trim().chars().count() < 2 {
        return SafetyVerdict::Rejected {
            rejection: SafetyRejection::MissingJurisdiction,
        };
    }

    if supported_jurisdiction(jurisdiction).is_none() {
        let shown = redact_for_log(jurisdiction.trim());
        tracing::warn!(
            jurisdiction = shown.as_str(),
            "Red team audit: unsupported jurisdiction"
        );
        return SafetyVerdict::Rejected {
            rejection: SafetyRejection::UnsupportedJurisdiction(shown),
        };
    }

    let input_lower = user_input.to_lowercase();
    if let Some(term) = PROHIBITED_TERMS.iter().copied().find(|t| input_lower.contains(t)) {
        tracing::warn!(term, "Red team audit: prohibited content");
        return SafetyVerdict::Rejected {
            rejection: SafetyRejection::ProhibitedContent(term),
        };
    }

    SafetyVerdict::Approved
}

/// A research source supplied alongside the generated output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub uri: String,
}

impl Source {
    pub fn new(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            uri: uri.into(),
        }
    }

    fn is_cited_in(&self, text_lower: &str) -> bool {
        let cited = |field: &str| {
            let field = field.trim();
            !field.is_empty() && text_lower.contains(&field.to_lowercase())
        };
        cited(&self.title) || cited(&self.uri)
    }
}

/// Whether `output` is grounded in `sources`.
///
/// No sources means the output cannot be grounded. With fewer sources than
/// `minimum` the check passes, since the citation minimum is enforced by
/// structural validation. Otherwise at least `minimum` distinct sources
/// must be cited by title or URI.
pub fn validate_grounding(output: &str, sources: &[Source], minimum: usize) -> bool {
    if sources.is_empty() {
        return false;
    }
    if sources.len() < minimum {
        tracing::info!(
            sources = sources.len(),
            minimum,
            "Fewer grounding sources than the minimum; proceeding"
        );
        return true;
    }

    let text_lower = output.to_lowercase();
    let cited = sources.iter().filter(|s| s.is_cited_in(&text_lower)).count();
    tracing::debug!(cited, sources = sources.len(), "Grounding check");
    cited >= minimum
}
