#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_literal_bound,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod citations;
pub mod config;
pub mod correction;
pub mod critique;
pub mod document;
pub mod error;
pub mod local_rules;
pub mod patterns;
pub mod pipeline;
pub mod redaction;
pub mod safety;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use citations::{extract_citations, is_valid_citation_format};
pub use config::GuardConfig;
pub use correction::{CompletionFn, correct};
pub use critique::audit;
pub use document::StructuredLegalOutput;
pub use error::{GuardError, Result};
pub use pipeline::{AuditRequest, GuardPipeline, PipelineReport};
pub use redaction::{redact, safe_log};
pub use validation::{ValidationVerdict, validate};
