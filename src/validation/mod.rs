//! Structural validation of `StructuredLegalOutput` documents.
//!
//! Disclaimer, strategy, roadmap, filing-template and citation failures are
//! critical and always request correction, as does any placeholder phrase.
//! Logistics and procedural-check failures request correction only once the
//! error count reaches the configured threshold.

mod placeholders;
mod validator;


pub use placeholders::{contains_placeholder, document_placeholders, find_placeholders};
pub use validator::{StructuralValidator, ValidationVerdict};

use crate::document::StructuredLegalOutput;

/// Validates with default thresholds.
pub fn validate(candidate: &StructuredLegalOutput) -> ValidationVerdict {
    StructuralValidator::default().validate(candidate)
}
