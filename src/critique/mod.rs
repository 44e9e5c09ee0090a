//! Critique ("judge") verification of a finished output.
//!
//! Citations are scored against the research context and the statute
//! pattern tables of the requested jurisdiction (plus the federal table).
//! Roadmap steps are scored by procedural vocabulary shared with the
//! context or by jurisdiction terminology. The two channels are averaged
//! into one overall confidence.

mod roadmap;
mod types;
mod verifier;


pub use types::{
    CRITIQUE_FAILED_ACTION, CritiqueResult, ItemVerification, RoadmapVerification,
    StatuteVerification,
};
pub use verifier::CritiqueVerifier;

use thiserror::Error;

#[derive(Debug, Error)]
enum CritiqueError {
    #[error("malformed roadmap: {0}")]
    MalformedRoadmap(String),
}

/// Audits with default weights and thresholds.
pub fn audit(output_text: &str, jurisdiction: &str, research_context: &str) -> CritiqueResult {
    CritiqueVerifier::default().audit(output_text, jurisdiction, research_context)
}
