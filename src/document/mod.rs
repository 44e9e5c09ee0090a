//! The structured legal-analysis document and its text/JSON forms.

mod parse;
mod render;
mod types;

pub(crate) use parse::extract_json_value;
pub use parse::parse_document;
pub use render::render_text;
pub use types::{
    Citation, CorrectionMetadata, LocalLogistics, RoadmapStep, SourceKind, StructuredLegalOutput,
};

/// Disclaimer attached to every generated analysis.
pub const STANDARD_DISCLAIMER: &str = "LEGAL DISCLAIMER: I am an AI helping you represent yourself \
(Pro Se). This is legal information, not legal advice. Always consult with a qualified attorney \
for advice specific to your situation.";
