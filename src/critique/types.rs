use serde::Serialize;

pub const CRITIQUE_FAILED_ACTION: &str = "critique failed - proceed with caution";

/// Verification record for one audited item (a citation or a roadmap step).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemVerification {
    pub subject: String,
    pub is_verified: bool,
    /// Always within `[0, 1]`.
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

pub type StatuteVerification = ItemVerification;
pub type RoadmapVerification = ItemVerification;

impl ItemVerification {
    pub(crate) fn verified(subject: impl Into<String>, confidence: f64) -> Self {
        Self {
            subject: subject.into(),
            is_verified: true,
            confidence: confidence.clamp(0.0, 1.0),
            issue: None,
            suggestion: None,
        }
    }

    pub(crate) fn unverified(
        subject: impl Into<String>,
        confidence: f64,
        issue: String,
        suggestion: String,
    ) -> Self {
        Self {
            subject: subject.into(),
            is_verified: false,
            confidence: confidence.clamp(0.0, 1.0),
            issue: Some(issue),
            suggestion: Some(suggestion),
        }
    }
}

/// Aggregate judgement over one output. The audited text is never modified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CritiqueResult {
    pub is_valid: bool,
    pub statute_issues: Vec<StatuteVerification>,
    pub roadmap_issues: Vec<RoadmapVerification>,
    pub overall_confidence: f64,
    pub recommended_actions: Vec<String>,
}

impl CritiqueResult {
    /// Returned whenever the audit itself cannot complete.
    pub fn conservative() -> Self {
        Self {
            is_valid: false,
            statute_issues: Vec::new(),
            roadmap_issues: Vec::new(),
            overall_confidence: 0.0,
            recommended_actions: vec![CRITIQUE_FAILED_ACTION.to_string()],
        }
    }

    pub fn unverified_citations(&self) -> impl Iterator<Item = &StatuteVerification> {
        self.statute_issues.iter().filter(|s| !s.is_verified)
    }

    pub fn unverified_steps(&self) -> impl Iterator<Item = &RoadmapVerification> {
        self.roadmap_issues.iter().filter(|s| !s.is_verified)
    }

    pub fn is_conservative(&self) -> bool {
        self.recommended_actions.len() == 1
            && self.recommended_actions[0] == CRITIQUE_FAILED_ACTION
            && self.statute_issues.is_empty()
            && self.roadmap_issues.is_empty()
    }
}
