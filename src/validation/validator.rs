use serde::Serialize;

use super::placeholders::find_placeholders;
use crate::citations::is_valid_citation_format;
use crate::config::ValidationConfig;
use crate::document::{StructuredLegalOutput, parse_document};

const DISCLAIMER_ASSERTIONS: [&str; 5] = [
    "legal information",
    "not legal advice",
    "not a substitute for legal advice",
    "legal disclaimer",
    "not an attorney",
];

const TEMPLATE_MARKERS: [&str; 6] = [
    "caption",
    "court",
    "plaintiff",
    "defendant",
    "petitioner",
    "respondent",
];

/// Outcome of one validation call. Never cached.
///
/// `warnings` never affect validity or `needs_correction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationVerdict {
    Valid {
        data: StructuredLegalOutput,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        warnings: Vec<String>,
    },
    Invalid {
        errors: Vec<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        warnings: Vec<String>,
        needs_correction: bool,
    },
}

impl ValidationVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    pub fn errors(&self) -> &[String] {
        match self {
            Self::Valid { .. } => &[],
            Self::Invalid { errors, .. } => errors,
        }
    }

    pub fn warnings(&self) -> &[String] {
        match self {
            Self::Valid { warnings, .. } | Self::Invalid { warnings, .. } => warnings,
        }
    }

    pub fn needs_correction(&self) -> bool {
        matches!(
            self,
            Self::Invalid {
                needs_correction: true,
                ..
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Critical,
    Placeholder,
    Minor,
}

#[derive(Default)]
struct Findings {
    errors: Vec<(Severity, String)>,
    warnings: Vec<String>,
}

impl Findings {
    fn push(&mut self, severity: Severity, message: String) {
        self.errors.push((severity, message));
    }

    fn warn(&mut self, message: String) {
        self.warnings.push(message);
    }

    fn placeholders(&mut self, field: &str, text: &str) {
        for phrase in find_placeholders(text) {
            self.push(
                Severity::Placeholder,
                format!("{field}: contains placeholder text \"{phrase}\""),
            );
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StructuralValidator {
    config: ValidationConfig,
}

impl StructuralValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn validate(&self, candidate: &StructuredLegalOutput) -> ValidationVerdict {
        let mut findings = Findings::default();

        self.check_disclaimer(candidate, &mut findings);
        self.check_strategies(candidate, &mut findings);
        self.check_roadmap(candidate, &mut findings);
        self.check_filing_template(candidate, &mut findings);
        self.check_citations(candidate, &mut findings);
        self.check_logistics(candidate, &mut findings);
        self.check_procedural_checks(candidate, &mut findings);

        if findings.errors.is_empty() {
            return ValidationVerdict::Valid {
                data: candidate.clone(),
                warnings: findings.warnings,
            };
        }

        let needs_correction = findings
            .errors
            .iter()
            .any(|(severity, _)| matches!(severity, Severity::Critical | Severity::Placeholder))
            || findings.errors.len() >= self.config.error_count_threshold;
        let errors: Vec<String> = findings.errors.into_iter().map(|(_, e)| e).collect();

        tracing::debug!(
            error_count = errors.len(),
            warning_count = findings.warnings.len(),
            needs_correction,
            "Structural validation failed"
        );
        ValidationVerdict::Invalid {
            errors,
            warnings: findings.warnings,
            needs_correction,
        }
    }

    /// Parses and validates raw model output. Parse failures are an
    /// `Invalid` verdict that needs correction.
    pub fn validate_json(&self, raw: &str) -> ValidationVerdict {
        match parse_document(raw) {
            Ok(doc) => self.validate(&doc),
            Err(e) => ValidationVerdict::Invalid {
                errors: vec![format!("malformed document: {e}")],
                warnings: Vec::new(),
                needs_correction: true,
            },
        }
    }

    fn check_disclaimer(&self, doc: &StructuredLegalOutput, findings: &mut Findings) {
        let disclaimer = doc.disclaimer.trim();
        if disclaimer.is_empty() {
            findings.push(Severity::Critical, "disclaimer: missing".into());
            return;
        }
        let lower = disclaimer.to_lowercase();
        if !DISCLAIMER_ASSERTIONS.iter().any(|a| lower.contains(a)) {
            findings.push(
                Severity::Critical,
                "disclaimer: must state that this is legal information, not legal advice".into(),
            );
        }
    }

    fn check_strategies(&self, doc: &StructuredLegalOutput, findings: &mut Findings) {
        let fields = [
            ("strategy", doc.strategy.trim(), self.config.min_strategy_chars),
            (
                "adversarialStrategy",
                doc.adversarial_strategy.trim(),
                self.config.min_adversarial_chars,
            ),
        ];
        for (field, text, min_chars) in fields {
            let chars = text.chars().count();
            if chars == 0 {
                findings.push(Severity::Critical, format!("{field}: missing"));
                continue;
            }
            if chars <= min_chars {
                findings.push(
                    Severity::Critical,
                    format!("{field}: must be longer than {min_chars} characters (found {chars})"),
                );
            }
            findings.placeholders(field, text);
        }
    }

    fn check_roadmap(&self, doc: &StructuredLegalOutput, findings: &mut Findings) {
        if doc.roadmap.len() < self.config.min_roadmap_steps {
            findings.push(
                Severity::Critical,
                format!(
                    "roadmap: at least {} steps required (found {})",
                    self.config.min_roadmap_steps,
                    doc.roadmap.len()
                ),
            );
        }
        for (index, step) in doc.roadmap.iter().enumerate() {
            let label = format!("roadmap step {}", index + 1);
            if step.step_number == 0 {
                findings.push(
                    Severity::Critical,
                    format!("{label}: step number must be positive"),
                );
            }
            if step.title.trim().is_empty() {
                findings.push(Severity::Minor, format!("{label}: title is empty"));
            }
            if step.description.trim().is_empty() {
                findings.push(Severity::Critical, format!("{label}: description is empty"));
            }
            findings.placeholders(&format!("{label} title"), &step.title);
            findings.placeholders(&format!("{label} description"), &step.description);
        }
    }

    fn check_filing_template(&self, doc: &StructuredLegalOutput, findings: &mut Findings) {
        let template = doc.filing_template.trim();
        if template.is_empty() {
            findings.push(Severity::Critical, "filingTemplate: missing".into());
            return;
        }
        let lower = template.to_lowercase();
        if !TEMPLATE_MARKERS.iter().any(|m| lower.contains(m)) {
            findings.push(
                Severity::Critical,
                "filingTemplate: must include a caption naming the court and parties".into(),
            );
        }
    }

    fn check_citations(&self, doc: &StructuredLegalOutput, findings: &mut Findings) {
        let count = doc.citations.iter().filter(|c| !c.text.trim().is_empty()).count();
        if count < self.config.min_citations {
            findings.push(
                Severity::Critical,
                format!(
                    "citations: at least {} required (found {count})",
                    self.config.min_citations
                ),
            );
        }
        if count > 0 && !doc.citation_texts().any(is_valid_citation_format) {
            findings.push(
                Severity::Critical,
                "citations: none match a recognized statute, rule, or bill format".into(),
            );
        }
        for (index, citation) in doc.citations.iter().enumerate() {
            let text = citation.text.trim();
            if !text.is_empty() && !is_valid_citation_format(text) {
                findings.warn(format!(
                    "citations[{index}]: \"{text}\" does not match a recognized citation format"
                ));
            }
        }
    }

    fn check_logistics(&self, doc: &StructuredLegalOutput, findings: &mut Findings) {
        let Some(logistics) = &doc.local_logistics else {
            findings.push(Severity::Minor, "localLogistics: missing".into());
            return;
        };
        let chars = logistics.courthouse_address.trim().chars().count();
        if chars <= self.config.min_courthouse_address_chars {
            findings.push(
                Severity::Minor,
                format!(
                    "localLogistics.courthouseAddress: must be longer than {} characters (found {chars})",
                    self.config.min_courthouse_address_chars
                ),
            );
        }
    }

    fn check_procedural_checks(&self, doc: &StructuredLegalOutput, findings: &mut Findings) {
        let present = doc
            .procedural_checks
            .iter()
            .filter(|c| !c.trim().is_empty())
            .count();
        if present < self.config.min_procedural_checks {
            findings.push(
                Severity::Minor,
                format!(
                    "proceduralChecks: at least {} required (found {present})",
                    self.config.min_procedural_checks
                ),
            );
        }
        for (index, check) in doc.procedural_checks.iter().enumerate() {
            findings.placeholders(&format!("proceduralChecks[{index}]"), check);
        }
    }
}
