use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GuardConfig {
    /// Path the config was loaded from. Computed at runtime, never serialized.
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub redaction: RedactionConfig,

    #[serde(default)]
    pub validation: ValidationConfig,

    #[serde(default)]
    pub critique: CritiqueConfig,

    #[serde(default)]
    pub correction: CorrectionConfig,

    #[serde(default)]
    pub verification: VerificationConfig,

    #[serde(default)]
    pub local_rules: LocalRulesConfig,
}

// ── Redaction ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionConfig {
    #[serde(default = "default_true")]
    pub enable_contextual_pass: bool,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            enable_contextual_pass: default_true(),
        }
    }
}

// ── Validation ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_min_strategy_chars")]
    pub min_strategy_chars: usize,
    #[serde(default = "default_min_adversarial_chars")]
    pub min_adversarial_chars: usize,
    #[serde(default = "default_min_roadmap_steps")]
    pub min_roadmap_steps: usize,
    #[serde(default = "default_min_citations")]
    pub min_citations: usize,
    #[serde(default = "default_min_courthouse_address_chars")]
    pub min_courthouse_address_chars: usize,
    #[serde(default = "default_min_procedural_checks")]
    pub min_procedural_checks: usize,
    /// Non-critical errors at or above this count still force correction.
    #[serde(default = "default_error_count_threshold")]
    pub error_count_threshold: usize,
}

fn default_min_strategy_chars() -> usize {
    100
}
fn default_min_adversarial_chars() -> usize {
    50
}
fn default_min_roadmap_steps() -> usize {
    3
}
fn default_min_citations() -> usize {
    3
}
fn default_min_courthouse_address_chars() -> usize {
    10
}
fn default_min_procedural_checks() -> usize {
    1
}
fn default_error_count_threshold() -> usize {
    3
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_strategy_chars: default_min_strategy_chars(),
            min_adversarial_chars: default_min_adversarial_chars(),
            min_roadmap_steps: default_min_roadmap_steps(),
            min_citations: default_min_citations(),
            min_courthouse_address_chars: default_min_courthouse_address_chars(),
            min_procedural_checks: default_min_procedural_checks(),
            error_count_threshold: default_error_count_threshold(),
        }
    }
}

// ── Critique ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CritiqueConfig {
    #[serde(default = "default_validity_threshold")]
    pub validity_threshold: f64,
    #[serde(default = "default_low_confidence_threshold")]
    pub low_confidence_threshold: f64,
    #[serde(default = "default_context_match_confidence")]
    pub context_match_confidence: f64,
    #[serde(default = "default_unverified_citation_confidence")]
    pub unverified_citation_confidence: f64,
    #[serde(default = "default_lookup_confirmed_confidence")]
    pub lookup_confirmed_confidence: f64,
    #[serde(default = "default_context_step_confidence")]
    pub context_step_confidence: f64,
    #[serde(default = "default_terminology_step_confidence")]
    pub terminology_step_confidence: f64,
    #[serde(default = "default_unverified_step_confidence")]
    pub unverified_step_confidence: f64,
    /// Roadmap channel weight of a verified step.
    #[serde(default = "default_verified_step_weight")]
    pub verified_step_weight: f64,
    /// Roadmap channel weight of an unverified step.
    #[serde(default = "default_unverified_step_weight")]
    pub unverified_step_weight: f64,
}

fn default_validity_threshold() -> f64 {
    0.7
}
fn default_low_confidence_threshold() -> f64 {
    0.5
}
fn default_context_match_confidence() -> f64 {
    0.95
}
fn default_unverified_citation_confidence() -> f64 {
    0.3
}
fn default_lookup_confirmed_confidence() -> f64 {
    0.9
}
fn default_context_step_confidence() -> f64 {
    0.85
}
fn default_terminology_step_confidence() -> f64 {
    0.75
}
fn default_unverified_step_confidence() -> f64 {
    0.4
}
fn default_verified_step_weight() -> f64 {
    1.0
}
fn default_unverified_step_weight() -> f64 {
    0.3
}

impl Default for CritiqueConfig {
    fn default() -> Self {
        Self {
            validity_threshold: default_validity_threshold(),
            low_confidence_threshold: default_low_confidence_threshold(),
            context_match_confidence: default_context_match_confidence(),
            unverified_citation_confidence: default_unverified_citation_confidence(),
            lookup_confirmed_confidence: default_lookup_confirmed_confidence(),
            context_step_confidence: default_context_step_confidence(),
            terminology_step_confidence: default_terminology_step_confidence(),
            unverified_step_confidence: default_unverified_step_confidence(),
            verified_step_weight: default_verified_step_weight(),
            unverified_step_weight: default_unverified_step_weight(),
        }
    }
}

impl CritiqueConfig {
    fn unit_fields(&self) -> [(&'static str, f64); 10] {
        [
            ("validity_threshold", self.validity_threshold),
            ("low_confidence_threshold", self.low_confidence_threshold),
            ("context_match_confidence", self.context_match_confidence),
            ("unverified_citation_confidence", self.unverified_citation_confidence),
            ("lookup_confirmed_confidence", self.lookup_confirmed_confidence),
            ("context_step_confidence", self.context_step_confidence),
            ("terminology_step_confidence", self.terminology_step_confidence),
            ("unverified_step_confidence", self.unverified_step_confidence),
            ("verified_step_weight", self.verified_step_weight),
            ("unverified_step_weight", self.unverified_step_weight),
        ]
    }
}

// ── Correction ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_max_attempts() -> u32 {
    3
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
        }
    }
}

// ── Verification ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Never written back out.
    #[serde(default, skip_serializing)]
    pub courtlistener_api_key: Option<String>,
    #[serde(default = "default_courtlistener_base_url")]
    pub courtlistener_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_base_backoff_ms")]
    pub base_backoff_ms: u64,
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

fn default_courtlistener_base_url() -> String {
    "https://www.courtlistener.com/api/rest/v3".into()
}
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_concurrency() -> usize {
    4
}
fn default_max_retries() -> u32 {
    2
}
fn default_base_backoff_ms() -> u64 {
    200
}
fn default_max_backoff_ms() -> u64 {
    10_000
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            courtlistener_api_key: None,
            courtlistener_base_url: default_courtlistener_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            concurrency: default_concurrency(),
            max_retries: default_max_retries(),
            base_backoff_ms: default_base_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

// ── Local rules ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalRulesConfig {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_ttl_secs() -> u64 {
    3600
}

impl Default for LocalRulesConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

impl GuardConfig {
    /// Rejects values that would make scoring or retry behavior meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.critique.unit_fields() {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "critique.{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if self.critique.low_confidence_threshold > self.critique.validity_threshold {
            return Err(ConfigError::Validation(
                "critique.low_confidence_threshold must not exceed critique.validity_threshold"
                    .into(),
            ));
        }
        if self.correction.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "correction.max_attempts must be at least 1".into(),
            ));
        }
        if self.validation.error_count_threshold == 0 {
            return Err(ConfigError::Validation(
                "validation.error_count_threshold must be at least 1".into(),
            ));
        }
        if self.verification.concurrency == 0 {
            return Err(ConfigError::Validation(
                "verification.concurrency must be at least 1".into(),
            ));
        }
        if self.verification.max_backoff_ms < self.verification.base_backoff_ms {
            return Err(ConfigError::Validation(
                "verification.max_backoff_ms must be >= verification.base_backoff_ms".into(),
            ));
        }
        if self.verification.courtlistener_base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "verification.courtlistener_base_url must not be empty".into(),
            ));
        }
        Ok(())
    }
}
