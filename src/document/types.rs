use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SourceKind {
    FederalStatute,
    StateStatute,
    CourtRule,
    CaseLaw,
    LocalRule,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "CitationRepr")]
pub struct Citation {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_kind: Option<SourceKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Citation {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Models emit citations either as bare strings or as objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum CitationRepr {
    Text(String),
    Full(FullCitation),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FullCitation {
    #[serde(default, alias = "citation")]
    text: String,
    #[serde(default, alias = "source_kind", alias = "source")]
    source_kind: Option<SourceKind>,
    #[serde(default)]
    url: Option<String>,
}

impl From<CitationRepr> for Citation {
    fn from(repr: CitationRepr) -> Self {
        match repr {
            CitationRepr::Text(text) => Self::new(text),
            CitationRepr::Full(full) => Self {
                text: full.text,
                source_kind: full.source_kind,
                url: full.url,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapStep {
    #[serde(default, alias = "step", alias = "step_number")]
    pub step_number: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "estimated_time", skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    #[serde(default, alias = "required_documents", skip_serializing_if = "Vec::is_empty")]
    pub required_documents: Vec<String>,
    #[serde(default, alias = "counter_measure", skip_serializing_if = "Option::is_none")]
    pub counter_measure: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalLogistics {
    #[serde(default, alias = "courthouse_address", alias = "courthouse")]
    pub courthouse_address: String,
    #[serde(default, alias = "filing_fees", skip_serializing_if = "Option::is_none")]
    pub filing_fees: Option<String>,
    #[serde(default, alias = "dress_code", skip_serializing_if = "Option::is_none")]
    pub dress_code: Option<String>,
    #[serde(default, alias = "parking_info", alias = "parking", skip_serializing_if = "Option::is_none")]
    pub parking_info: Option<String>,
    #[serde(default, alias = "hours_of_operation", alias = "hours", skip_serializing_if = "Option::is_none")]
    pub hours_of_operation: Option<String>,
    #[serde(default, alias = "local_rules_url", skip_serializing_if = "Option::is_none")]
    pub local_rules_url: Option<String>,
}

/// Set on a document whenever the correction loop ran over it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionMetadata {
    pub attempted: bool,
    pub successful: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_errors: Option<Vec<String>>,
    pub timestamp: DateTime<Utc>,
}

impl CorrectionMetadata {
    pub fn succeeded() -> Self {
        Self {
            attempted: true,
            successful: true,
            remaining_errors: None,
            timestamp: Utc::now(),
        }
    }

    pub fn failed(remaining_errors: Vec<String>) -> Self {
        Self {
            attempted: true,
            successful: false,
            remaining_errors: Some(remaining_errors),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuredLegalOutput {
    pub disclaimer: String,
    pub strategy: String,
    #[serde(alias = "adversarial_strategy")]
    pub adversarial_strategy: String,
    pub roadmap: Vec<RoadmapStep>,
    #[serde(alias = "filing_template")]
    pub filing_template: String,
    pub citations: Vec<Citation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
    #[serde(alias = "local_logistics", skip_serializing_if = "Option::is_none")]
    pub local_logistics: Option<LocalLogistics>,
    #[serde(alias = "procedural_checks")]
    pub procedural_checks: Vec<String>,
    #[serde(alias = "correction_metadata", skip_serializing_if = "Option::is_none")]
    pub correction: Option<CorrectionMetadata>,
}

impl StructuredLegalOutput {
    pub fn citation_texts(&self) -> impl Iterator<Item = &str> {
        self.citations.iter().map(|c| c.text.as_str())
    }

    pub fn with_correction(mut self, metadata: CorrectionMetadata) -> Self {
        self.correction = Some(metadata);
        self
    }
}
