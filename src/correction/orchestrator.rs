use serde::Serialize;

use super::CompletionFn;
use super::prompt::build_correction_prompt;
use crate::config::{CorrectionConfig, ValidationConfig};
use crate::document::{CorrectionMetadata, StructuredLegalOutput, parse_document};
use crate::redaction::{LogExtra, SafeLogger, sanitize_error_text};
use crate::validation::{StructuralValidator, ValidationVerdict};

/// Where a document ended up in the correction lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "attempt", rename_all = "snake_case")]
pub enum CorrectionState {
    PendingValidation,
    /// Passed validation as submitted.
    Valid,
    /// Failed validation, but not badly enough to warrant a repair.
    Invalid,
    Correcting(u32),
    Corrected,
    Failed,
}

impl CorrectionState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::PendingValidation | Self::Correcting(_))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CorrectionOutcome {
    pub state: CorrectionState,
    /// The corrected document, or the original one when no correction
    /// succeeded. Carries `CorrectionMetadata` whenever a repair ran.
    pub document: StructuredLegalOutput,
    /// Errors still outstanding. Empty for `Valid` and `Corrected`.
    pub errors: Vec<String>,
    /// Non-blocking findings from the most recent validation.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub completion_calls: u32,
}

/// Bounded, strictly sequential repair loop around a completion function.
#[derive(Debug, Clone)]
pub struct CorrectionOrchestrator {
    validator: StructuralValidator,
    max_attempts: u32,
    logger: SafeLogger,
}

impl Default for CorrectionOrchestrator {
    fn default() -> Self {
        Self::new(ValidationConfig::default(), &CorrectionConfig::default())
    }
}

impl CorrectionOrchestrator {
    pub fn new(validation: ValidationConfig, correction: &CorrectionConfig) -> Self {
        Self {
            validator: StructuralValidator::new(validation),
            max_attempts: correction.max_attempts.max(1),
            logger: SafeLogger::tracing(),
        }
    }

    #[must_use]
    pub fn with_logger(mut self, logger: SafeLogger) -> Self {
        self.logger = logger;
        self
    }

    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Validates `candidate` and repairs it when the verdict asks for
    /// correction and a completion function is available.
    pub async fn run(
        &self,
        candidate: &StructuredLegalOutput,
        completion: Option<&dyn CompletionFn>,
    ) -> CorrectionOutcome {
        match self.validator.validate(candidate) {
            ValidationVerdict::Valid { data, warnings } => CorrectionOutcome {
                state: CorrectionState::Valid,
                document: data,
                errors: Vec::new(),
                warnings,
                completion_calls: 0,
            },
            ValidationVerdict::Invalid {
                errors,
                warnings,
                needs_correction,
            } => match completion {
                Some(completion) if needs_correction => {
                    let mut outcome = self.correct(candidate, &errors, completion).await;
                    if outcome.state == CorrectionState::Failed && outcome.warnings.is_empty() {
                        outcome.warnings = warnings;
                    }
                    outcome
                }
                _ => CorrectionOutcome {
                    state: CorrectionState::Invalid,
                    document: candidate.clone(),
                    errors,
                    warnings,
                    completion_calls: 0,
                },
            },
        }
    }

    /// Runs up to `max_attempts` repair attempts. Completion and parse
    /// failures become error entries for the next attempt.
    pub async fn correct(
        &self,
        candidate: &StructuredLegalOutput,
        errors: &[String],
        completion: &dyn CompletionFn,
    ) -> CorrectionOutcome {
        let mut working = candidate.clone();
        let mut outstanding = errors.to_vec();
        let mut warnings = Vec::new();
        let mut completion_calls = 0;

        for attempt in 1..=self.max_attempts {
            let state = CorrectionState::Correcting(attempt);
            tracing::info!(
                ?state,
                max_attempts = self.max_attempts,
                outstanding = outstanding.len(),
                "Attempting document correction"
            );

            let prompt = build_correction_prompt(&working, &outstanding, self.validator.config());
            completion_calls += 1;
            let raw = match completion.complete(prompt).await {
                Ok(raw) => raw,
                Err(e) => {
                    let entry = format!(
                        "attempt {attempt}: completion failed: {}",
                        sanitize_error_text(&format!("{e:#}"))
                    );
                    self.logger.warn("Correction attempt failed", &[LogExtra::Anyhow(&e)]);
                    push_synthetic(&mut outstanding, entry);
                    continue;
                }
            };

            let corrected = match parse_document(&raw) {
                Ok(doc) => doc,
                Err(e) => {
                    let entry = format!("attempt {attempt}: could not parse corrected document: {e}");
                    self.logger.warn(
                        "Correction attempt returned unparseable output",
                        &[LogExtra::Error(&e)],
                    );
                    push_synthetic(&mut outstanding, entry);
                    continue;
                }
            };

            match self.validator.validate(&corrected) {
                ValidationVerdict::Valid {
                    data,
                    warnings: latest,
                } => {
                    tracing::info!(attempt, "Document corrected");
                    return CorrectionOutcome {
                        state: CorrectionState::Corrected,
                        document: data.with_correction(CorrectionMetadata::succeeded()),
                        errors: Vec::new(),
                        warnings: latest,
                        completion_calls,
                    };
                }
                ValidationVerdict::Invalid {
                    errors,
                    warnings: latest,
                    ..
                } => {
                    tracing::info!(
                        attempt,
                        remaining = errors.len(),
                        "Corrected document still invalid"
                    );
                    working = corrected;
                    outstanding = errors;
                    warnings = latest;
                }
            }
        }

        let remaining: Vec<String> = outstanding.iter().map(|e| sanitize_error_text(e)).collect();
        self.logger.warn(
            &format!(
                "Correction failed after {} attempt(s) with {} remaining error(s)",
                self.max_attempts,
                remaining.len()
            ),
            &[],
        );
        CorrectionOutcome {
            state: CorrectionState::Failed,
            document: candidate
                .clone()
                .with_correction(CorrectionMetadata::failed(remaining.clone())),
            errors: remaining,
            warnings,
            completion_calls,
        }
    }
}

/// Most synthetic entries kept at once; the oldest go first.
const MAX_SYNTHETIC_ENTRIES: usize = 8;

/// Appends a synthetic entry for a failed attempt.
fn push_synthetic(outstanding: &mut Vec<String>, entry: String) {
    outstanding.push(entry);
    let synthetic = outstanding.iter().filter(|e| e.starts_with("attempt ")).count();
    if synthetic > MAX_SYNTHETIC_ENTRIES
        && let Some(oldest) = outstanding.iter().position(|e| e.starts_with("attempt "))
    {
        outstanding.remove(oldest);
    }
}
