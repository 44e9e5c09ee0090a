//! End-to-end guard: parse, validate, repair, then audit a model output.
//!
//! Everything this module logs goes through [`SafeLogger`], so raw model
//! output and request text are redacted before they reach a sink.

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use crate::citations::{CitationLookup, CourtListenerLookup, VerificationOptions};
use crate::config::GuardConfig;
use crate::correction::{CompletionFn, CorrectionOrchestrator, CorrectionOutcome, CorrectionState};
use crate::critique::{CritiqueResult, CritiqueVerifier};
use crate::document::{StructuredLegalOutput, parse_document, render_text};
use crate::local_rules::LocalRulesCache;
use crate::redaction::{LogExtra, LogSink, SafeLogger};
use crate::safety::{SafetyVerdict, Source, red_team_audit, validate_grounding};

/// What the output is audited against.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditRequest<'a> {
    pub jurisdiction: &'a str,
    pub research_context: &'a str,
    /// County whose local rules are appended to the research context.
    pub county: Option<&'a str>,
    /// Research sources for the grounding check. Skipped when empty.
    pub sources: &'a [Source],
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub state: CorrectionState,
    pub document: StructuredLegalOutput,
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub completion_calls: u32,
    pub critique: CritiqueResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grounded: Option<bool>,
    /// Whether the document may be shown to the end user.
    pub release: bool,
}

pub struct GuardPipeline {
    config: GuardConfig,
    logger: SafeLogger,
    orchestrator: CorrectionOrchestrator,
    critic: CritiqueVerifier,
    local_rules: LocalRulesCache,
    lookup: Option<Arc<dyn CitationLookup>>,
}

impl GuardPipeline {
    pub fn new(config: GuardConfig, sink: Arc<dyn LogSink>) -> Self {
        let logger = SafeLogger::new(sink);
        let orchestrator =
            CorrectionOrchestrator::new(config.validation.clone(), &config.correction)
                .with_logger(logger.clone());
        let lookup: Option<Arc<dyn CitationLookup>> = config
            .verification
            .enabled
            .then(|| Arc::new(CourtListenerLookup::from_config(&config.verification)) as Arc<dyn CitationLookup>);
        Self {
            critic: CritiqueVerifier::new(config.critique.clone()),
            local_rules: LocalRulesCache::from_config(&config.local_rules),
            orchestrator,
            logger,
            lookup,
            config,
        }
    }

    /// Replaces the external citation lookup. Used regardless of
    /// `verification.enabled`.
    #[must_use]
    pub fn with_lookup(mut self, lookup: Arc<dyn CitationLookup>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Safety gate for an incoming request, before anything is generated.
    pub fn screen(&self, user_input: &str, jurisdiction: &str) -> SafetyVerdict {
        let verdict = red_team_audit(user_input, jurisdiction);
        if let SafetyVerdict::Rejected { rejection } = &verdict {
            let detail = serde_json::to_value(rejection).unwrap_or_default();
            self.logger
                .warn("Request rejected by safety audit", &[LogExtra::Json(&detail)]);
        }
        verdict
    }

    pub async fn process(
        &self,
        raw_output: &str,
        request: AuditRequest<'_>,
        completion: Option<&dyn CompletionFn>,
    ) -> PipelineReport {
        let outcome = match parse_document(raw_output) {
            Ok(candidate) => self.orchestrator.run(&candidate, completion).await,
            Err(e) => {
                self.logger.warn(
                    "Model output is not a structured document",
                    &[LogExtra::Error(&e), LogExtra::Text(raw_output)],
                );
                let errors = vec![format!("malformed document: {e}")];
                let empty = StructuredLegalOutput::default();
                match completion {
                    Some(completion) => self.orchestrator.correct(&empty, &errors, completion).await,
                    None => CorrectionOutcome {
                        state: CorrectionState::Invalid,
                        document: empty,
                        errors,
                        warnings: Vec::new(),
                        completion_calls: 0,
                    },
                }
            }
        };

        let text = render_text(&outcome.document);
        let context = self.research_context(request);
        let critique = match &self.lookup {
            Some(lookup) => {
                let options = VerificationOptions::from(&self.config.verification);
                self.critic
                    .audit_with_lookup(&text, request.jurisdiction, &context, lookup.as_ref(), &options)
                    .await
            }
            None => self.critic.audit(&text, request.jurisdiction, &context),
        };

        let grounded = (!request.sources.is_empty()).then(|| {
            validate_grounding(&text, request.sources, self.config.validation.min_citations)
        });

        let release = matches!(outcome.state, CorrectionState::Valid | CorrectionState::Corrected)
            && critique.is_valid
            && grounded.unwrap_or(true);

        let summary = json!({
            "state": outcome.state,
            "errors": outcome.errors,
            "warnings": outcome.warnings,
            "completion_calls": outcome.completion_calls,
            "overall_confidence": critique.overall_confidence,
            "unverified_citations": critique.unverified_citations().count(),
            "grounded": grounded,
            "release": release,
        });
        if release {
            self.logger.info("Guard pipeline finished", &[LogExtra::Json(&summary)]);
        } else {
            self.logger.warn("Guard pipeline withheld output", &[LogExtra::Json(&summary)]);
        }

        PipelineReport {
            state: outcome.state,
            document: outcome.document,
            errors: outcome.errors,
            warnings: outcome.warnings,
            completion_calls: outcome.completion_calls,
            critique,
            grounded,
            release,
        }
    }

    fn research_context(&self, request: AuditRequest<'_>) -> String {
        let mut context = request.research_context.to_string();
        if let Some(county) = request.county {
            let rules = self.local_rules.get(county);
            if !rules.is_empty() {
                if !context.is_empty() {
                    context.push_str("\n\n");
                }
                context.push_str(&self.local_rules.format_rules(county));
            }
        }
        context
    }
}
