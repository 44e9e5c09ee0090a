use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::CritiqueError;
use super::roadmap::extract_roadmap;
use super::types::{CritiqueResult, ItemVerification, RoadmapVerification, StatuteVerification};
use crate::citations::{CitationLookup, VerificationOptions, extract_citations, verify_citations};
use crate::config::CritiqueConfig;
use crate::document::{RoadmapStep, StructuredLegalOutput, extract_json_value};
use crate::patterns::compile;
use crate::patterns::contains_term;
use crate::patterns::jurisdictions::{PROCEDURAL_KEYWORDS, federal_profile, profile_for};
use crate::validation::{document_placeholders, find_placeholders};

static LABELED_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)(?:§+|\bsec(?:tion|\.)?|\brule|\bpart)\s*(\d+[a-z]?(?:[.:-](?:\d+[a-z]?|[a-z]\b))*)")
});

static ANY_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\d+[A-Za-z]?(?:[.:-]\d+[A-Za-z]?)*"));

static SUBSECTIONS: LazyLock<Regex> = LazyLock::new(|| compile(r"\([A-Za-z0-9]+\)"));

/// Prefixes that anchor a short section or rule number in research text.
const NUMBER_LABELS: [&str; 5] = ["§", "section", "sec.", "rule", "part"];

/// Everything measured about one output before it is scored.
struct Findings {
    statutes: Vec<StatuteVerification>,
    steps: Vec<RoadmapVerification>,
    placeholders: Vec<String>,
}

/// Audits an output against a research context and the known statute
/// patterns of its jurisdiction.
#[derive(Debug, Clone, Default)]
pub struct CritiqueVerifier {
    config: CritiqueConfig,
}

impl CritiqueVerifier {
    pub fn new(config: CritiqueConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CritiqueConfig {
        &self.config
    }

    pub fn audit(&self, output_text: &str, jurisdiction: &str, research_context: &str) -> CritiqueResult {
        match self.inspect(output_text, jurisdiction, research_context) {
            Ok(findings) => self.conclude(findings),
            Err(e) => {
                tracing::warn!(error = %e, "Critique failed; returning conservative result");
                CritiqueResult::conservative()
            }
        }
    }

    /// Like [`audit`](Self::audit), but citations the context and pattern
    /// tables cannot support are checked against an external lookup first.
    /// Confirmed ones count as verified.
    pub async fn audit_with_lookup(
        &self,
        output_text: &str,
        jurisdiction: &str,
        research_context: &str,
        lookup: &dyn CitationLookup,
        options: &VerificationOptions,
    ) -> CritiqueResult {
        let mut findings = match self.inspect(output_text, jurisdiction, research_context) {
            Ok(findings) => findings,
            Err(e) => {
                tracing::warn!(error = %e, "Critique failed; returning conservative result");
                return CritiqueResult::conservative();
            }
        };

        let pending: Vec<String> = findings
            .statutes
            .iter()
            .filter(|s| !s.is_verified)
            .map(|s| s.subject.clone())
            .collect();
        if !pending.is_empty() {
            let checks = verify_citations(lookup, &pending, options).await;
            let confirmed: HashSet<String> = checks
                .into_iter()
                .filter(|c| c.verified)
                .map(|c| c.citation)
                .collect();
            tracing::info!(
                lookup = lookup.name(),
                checked = pending.len(),
                confirmed = confirmed.len(),
                "External citation lookup finished"
            );
            for statute in &mut findings.statutes {
                if confirmed.contains(&statute.subject) {
                    *statute = ItemVerification::verified(
                        statute.subject.clone(),
                        self.config.lookup_confirmed_confidence,
                    );
                }
            }
        }

        self.conclude(findings)
    }

    fn inspect(
        &self,
        output_text: &str,
        jurisdiction: &str,
        research_context: &str,
    ) -> Result<Findings, CritiqueError> {
        let json = extract_json_value(output_text).ok().filter(Value::is_object);
        let context_lower = research_context.to_lowercase();

        let statutes = extract_citations(output_text)
            .into_iter()
            .map(|citation| self.check_citation(&citation, jurisdiction, &context_lower))
            .collect();

        let steps = extract_roadmap(json.as_ref(), output_text)?
            .iter()
            .map(|step| self.check_step(step, jurisdiction, &context_lower))
            .collect();

        let placeholders = match json
            .map(serde_json::from_value::<StructuredLegalOutput>)
            .transpose()
        {
            Ok(Some(doc)) => document_placeholders(&doc),
            Ok(None) | Err(_) => find_placeholders(narrative_portion(output_text)),
        };

        Ok(Findings {
            statutes,
            steps,
            placeholders,
        })
    }

    fn check_citation(&self, citation: &str, jurisdiction: &str, context_lower: &str) -> StatuteVerification {
        let citation_lower = citation.to_lowercase();
        let in_context = (!context_lower.is_empty() && context_lower.contains(&citation_lower))
            || section_number(citation).is_some_and(|number| number_in_context(context_lower, &number));
        if in_context {
            return ItemVerification::verified(citation, self.config.context_match_confidence);
        }

        let pattern_match = profile_for(jurisdiction)
            .into_iter()
            .chain(std::iter::once(federal_profile()))
            .filter_map(|profile| profile.best_match(citation))
            .max_by(|a, b| a.1.total_cmp(&b.1));
        if let Some((label, confidence)) = pattern_match {
            tracing::debug!(pattern = label, confidence, "Citation matched a known statute pattern");
            return ItemVerification::verified(citation, confidence);
        }

        ItemVerification::unverified(
            citation,
            self.config.unverified_citation_confidence,
            format!(
                "\"{citation}\" is not supported by the research context and does not match a known {} statute pattern",
                if jurisdiction.trim().is_empty() { "jurisdiction" } else { jurisdiction.trim() }
            ),
            format!("Confirm \"{citation}\" against an official source or remove it"),
        )
    }

    fn check_step(&self, step: &RoadmapStep, jurisdiction: &str, context_lower: &str) -> RoadmapVerification {
        let subject = if step.title.trim().is_empty() {
            format!("Step {}", step.step_number)
        } else {
            format!("Step {}: {}", step.step_number, step.title.trim())
        };
        let step_lower = format!("{} {}", step.title, step.description).to_lowercase();

        let shares_keyword = PROCEDURAL_KEYWORDS
            .iter()
            .any(|k| contains_term(&step_lower, k) && contains_term(context_lower, k));
        if shares_keyword {
            return ItemVerification::verified(subject, self.config.context_step_confidence);
        }

        let uses_terminology = profile_for(jurisdiction)
            .into_iter()
            .chain(std::iter::once(federal_profile()))
            .flat_map(|profile| profile.terms.iter())
            .any(|term| contains_term(&step_lower, term));
        if uses_terminology {
            return ItemVerification::verified(subject, self.config.terminology_step_confidence);
        }

        ItemVerification::unverified(
            subject.clone(),
            self.config.unverified_step_confidence,
            format!("{subject} is not supported by the research context"),
            "Check this step against the local court's published procedures".to_string(),
        )
    }

    fn conclude(&self, findings: Findings) -> CritiqueResult {
        let statute_mean = mean(findings.statutes.iter().map(|s| s.confidence));
        let roadmap_mean = mean(findings.steps.iter().map(|s| {
            if s.is_verified {
                self.config.verified_step_weight
            } else {
                self.config.unverified_step_weight
            }
        }));
        let overall_confidence = ((statute_mean + roadmap_mean) / 2.0).clamp(0.0, 1.0);

        let unverified_citations: Vec<&str> = findings
            .statutes
            .iter()
            .filter(|s| !s.is_verified)
            .map(|s| s.subject.as_str())
            .collect();
        let unverified_steps = findings.steps.iter().filter(|s| !s.is_verified).count();

        let mut recommended_actions = Vec::new();
        if !unverified_citations.is_empty() {
            recommended_actions.push(format!(
                "Verify or remove {} unverified citation(s): {}",
                unverified_citations.len(),
                unverified_citations.join("; ")
            ));
        }
        if unverified_steps > 0 {
            recommended_actions.push(format!(
                "Review {unverified_steps} roadmap step(s) against local court procedures"
            ));
        }
        if !findings.placeholders.is_empty() {
            let quoted: Vec<String> = findings.placeholders.iter().map(|p| format!("\"{p}\"")).collect();
            recommended_actions.push(format!(
                "Replace placeholder text with specific content: {}",
                quoted.join(", ")
            ));
        }
        if overall_confidence < self.config.low_confidence_threshold {
            recommended_actions
                .push("Regenerate the analysis with additional research context".to_string());
        }

        let is_valid = overall_confidence >= self.config.validity_threshold
            && unverified_citations.is_empty()
            && findings.placeholders.is_empty();

        tracing::debug!(
            statutes = findings.statutes.len(),
            steps = findings.steps.len(),
            overall_confidence,
            is_valid,
            "Critique complete"
        );

        CritiqueResult {
            is_valid,
            statute_issues: findings.statutes,
            roadmap_issues: findings.steps,
            overall_confidence,
            recommended_actions,
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0_u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / f64::from(count) }
}

/// The section or rule number a citation points at, lowercased.
fn section_number(citation: &str) -> Option<String> {
    LABELED_NUMBER
        .captures(citation)
        .map(|caps| caps[1].to_string())
        .or_else(|| {
            let stripped = SUBSECTIONS.replace_all(citation, "");
            ANY_NUMBER.find_iter(&stripped).last().map(|m| m.as_str().to_string())
        })
        .map(|number| number.to_lowercase())
}

/// Whether `number` occurs in the context as a whole token. Numbers shorter
/// than three characters must also follow a section or rule label.
fn number_in_context(context_lower: &str, number: &str) -> bool {
    if context_lower.is_empty() || number.is_empty() {
        return false;
    }
    let short = number.chars().count() < 3;
    context_lower.match_indices(number).any(|(start, _)| {
        let before = &context_lower[..start];
        let after = &context_lower[start + number.len()..];
        let before_ok = before.chars().next_back().is_none_or(|c| !c.is_alphanumeric() && c != '.' && c != '-');
        let mut rest = after.chars();
        let after_ok = match rest.next() {
            None => true,
            Some(c) if c.is_alphanumeric() => false,
            Some('.' | '-' | ':') => rest.next().is_none_or(|c| !c.is_alphanumeric()),
            Some(_) => true,
        };
        let labeled = !short || {
            let lead = before.trim_end();
            NUMBER_LABELS.iter().any(|label| lead.ends_with(label))
        };
        before_ok && after_ok && labeled
    })
}

/// The part of a rendered output that should be free of placeholders; the
/// filing template is a fill-in form.
fn narrative_portion(text: &str) -> &str {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim().eq_ignore_ascii_case("filing template:") {
            return &text[..offset];
        }
        offset += line.len();
    }
    text
}
