//! Citation extraction, format checks and external verification.

mod courtlistener;
mod extractor;
mod verify;

pub use courtlistener::CourtListenerLookup;
pub use extractor::{
    CitationReport, DEFAULT_MIN_CITATIONS, ExtractedCitation, citation_report,
    classify_source_kind, count_valid_citations, extract_citations, extract_detailed,
    has_minimum_citations, is_valid_citation_format,
};
pub use verify::{
    CitationCheck, CitationLookup, LookupOutcome, VerificationOptions, verify_citations,
};
