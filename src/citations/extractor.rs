use std::collections::{BTreeMap, HashSet};

use regex::Regex;
use serde::Serialize;

use crate::document::SourceKind;
use crate::patterns::citations::{
    CitationFamily, GRAMMARS, LEADING_CONNECTIVES, is_code_name_word,
};

/// Minimum number of format-valid citations a complete analysis carries.
pub const DEFAULT_MIN_CITATIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedCitation {
    pub text: String,
    pub family: CitationFamily,
    pub format_valid: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitationReport {
    pub total_found: usize,
    pub total_valid: usize,
    pub minimum_met: bool,
    pub by_family: BTreeMap<CitationFamily, usize>,
    pub valid_citations: Vec<String>,
    pub citations: Vec<ExtractedCitation>,
}

struct Span {
    start: usize,
    end: usize,
    grammar: usize,
}

fn strip_connectives(mut text: &str) -> &str {
    loop {
        let before = text;
        for connective in LEADING_CONNECTIVES {
            if let Some(rest) = text.strip_prefix(connective)
                && rest.starts_with(char::is_whitespace)
            {
                text = rest.trim_start();
                break;
            }
        }
        if text.len() == before.len() {
            return text;
        }
    }
}

/// Drops capitalized prose ("Tenant", "Plaintiff") that a grammar's
/// optional prefix picked up, as long as the rest is still a whole match.
fn strip_leading_prose<'a>(mut text: &'a str, pattern: &Regex) -> &'a str {
    while let Some((word, rest)) = text.split_once(' ') {
        if !word.starts_with(|c: char| c.is_ascii_uppercase())
            || is_code_name_word(word)
            || !pattern.find(rest).is_some_and(|m| m.start() == 0 && m.end() == rest.len())
        {
            break;
        }
        text = rest;
    }
    text
}

fn normalize(text: &str, pattern: &Regex) -> String {
    let collapsed = strip_connectives(text.trim())
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    strip_leading_prose(&collapsed, pattern).to_string()
}

/// Extracts citations with their grammar family, in order of first
/// appearance.
pub fn extract_detailed(text: &str) -> Vec<ExtractedCitation> {
    let mut spans: Vec<Span> = GRAMMARS
        .iter()
        .enumerate()
        .flat_map(|(grammar, g)| {
            g.pattern.find_iter(text).map(move |m| Span {
                start: m.start(),
                end: m.end(),
                grammar,
            })
        })
        .collect();

    // Earliest start wins; among equal starts the longest, then the grammar
    // listed first.
    spans.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(b.end.cmp(&a.end))
            .then(a.grammar.cmp(&b.grammar))
    });

    let mut accepted_end = 0;
    let mut seen = HashSet::new();
    let mut citations = Vec::new();
    for span in spans {
        if span.start < accepted_end {
            continue;
        }
        accepted_end = span.end;

        let grammar = &GRAMMARS[span.grammar];
        let normalized = normalize(&text[span.start..span.end], &grammar.pattern);
        if normalized.is_empty() || !seen.insert(normalized.clone()) {
            continue;
        }
        citations.push(ExtractedCitation {
            format_valid: grammar.strict || is_valid_citation_format(&normalized),
            text: normalized,
            family: grammar.family,
        });
    }
    citations
}

/// Deduplicated citation strings in order of first appearance.
pub fn extract_citations(text: &str) -> Vec<String> {
    extract_detailed(text).into_iter().map(|c| c.text).collect()
}

/// Whether `citation` matches one of the strict citation grammars. Bare
/// `§ N` and `Rule N` forms do not.
pub fn is_valid_citation_format(citation: &str) -> bool {
    let citation = citation.trim();
    !citation.is_empty()
        && GRAMMARS
            .iter()
            .filter(|g| g.strict)
            .any(|g| g.pattern.is_match(citation))
}

pub fn count_valid_citations(text: &str) -> usize {
    extract_detailed(text)
        .iter()
        .filter(|c| c.format_valid)
        .count()
}

pub fn has_minimum_citations(text: &str, minimum: usize) -> bool {
    count_valid_citations(text) >= minimum
}

pub fn citation_report(text: &str) -> CitationReport {
    let citations = extract_detailed(text);
    let mut by_family = BTreeMap::new();
    for citation in &citations {
        *by_family.entry(citation.family).or_insert(0) += 1;
    }
    let valid_citations: Vec<String> = citations
        .iter()
        .filter(|c| c.format_valid)
        .map(|c| c.text.clone())
        .collect();
    CitationReport {
        total_found: citations.len(),
        total_valid: valid_citations.len(),
        minimum_met: valid_citations.len() >= DEFAULT_MIN_CITATIONS,
        by_family,
        valid_citations,
        citations,
    }
}

/// Best-effort source kind for a citation string.
pub fn classify_source_kind(citation: &str) -> SourceKind {
    let lower = citation.to_ascii_lowercase();
    if lower.contains(" v. ") || lower.contains(" vs. ") {
        return SourceKind::CaseLaw;
    }
    if lower.contains("local rule") || lower.starts_with("l.r.") {
        return SourceKind::LocalRule;
    }

    let family = GRAMMARS
        .iter()
        .find(|g| g.pattern.is_match(citation))
        .map(|g| g.family);
    match family {
        Some(CitationFamily::FederalCode) => SourceKind::FederalStatute,
        Some(CitationFamily::StateCode) => SourceKind::StateStatute,
        Some(CitationFamily::RuleOfProcedure) => SourceKind::CourtRule,
        Some(CitationFamily::LegislativeBill) => {
            if lower.starts_with("h.r") || lower.starts_with("hr") || lower.starts_with("pub") {
                SourceKind::FederalStatute
            } else {
                SourceKind::StateStatute
            }
        }
        Some(CitationFamily::BareSection) | None => SourceKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_inside_code_citation_is_reported_once() {
        let found = extract_citations("See Cal. Civ. Code § 1708 for the duty of care.");
        assert_eq!(found, vec!["Cal. Civ. Code § 1708".to_string()]);
    }

    #[test]
    fn repeated_citations_are_deduplicated_in_order() {
        let text = "Under 42 U.S.C. § 1983 and Fed. R. Civ. P. 12(b)(6), and again 42 U.S.C. § 1983.";
        assert_eq!(
            extract_citations(text),
            vec!["42 U.S.C. § 1983".to_string(), "Fed. R. Civ. P. 12(b)(6)".to_string()]
        );
    }

    #[test]
    fn trims_leading_connectives() {
        let found = extract_citations("Pursuant to Wis. Stat. § 704.17 the notice is void.");
        assert_eq!(found, vec!["Wis. Stat. § 704.17".to_string()]);
        let found = extract_citations("Under California Civil Code Section 1942 you may act.");
        assert_eq!(found, vec!["California Civil Code Section 1942".to_string()]);
    }

    #[test]
    fn capitalized_prose_before_a_code_is_not_part_of_the_citation() {
        let found = extract_citations("Tenant Cal. Civ. Code § 1708 applies; Cal. Civ. Code § 1708 again.");
        assert_eq!(found, vec!["Cal. Civ. Code § 1708".to_string()]);
        let found = extract_citations("Plaintiff Civil Code Section 1942 claims fail.");
        assert_eq!(found, vec!["Civil Code Section 1942".to_string()]);
    }

    #[test]
    fn code_of_civil_procedure_without_state_prefix() {
        let found = extract_detailed("Respond under Code Civ. Proc. § 1161 within five days.");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "Code Civ. Proc. § 1161");
        assert_eq!(found[0].family, CitationFamily::StateCode);
        assert!(found[0].format_valid);
        assert!(is_valid_citation_format("Code Civ. Proc. § 1161"));
    }

    #[test]
    fn bare_forms_are_extracted_but_not_valid() {
        let found = extract_detailed("Read § 1161 and Rule 12 together.");
        let texts: Vec<_> = found.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["§ 1161", "Rule 12"]);
        assert!(found.iter().all(|c| !c.format_valid));
        assert!(!is_valid_citation_format("§ 1161"));
        assert!(!is_valid_citation_format("Rule 12"));
    }

    #[test]
    fn recognises_bills() {
        let found = extract_citations("AB 1482 and Pub. L. 116-136 changed the rules.");
        assert_eq!(found, vec!["AB 1482".to_string(), "Pub. L. 116-136".to_string()]);
    }

    #[test]
    fn report_counts_by_family() {
        let report = citation_report(
            "Cal. Civ. Code § 1942, 42 U.S.C. § 3604, Fed. R. Civ. P. 56, and § 12.",
        );
        assert_eq!(report.total_found, 4);
        assert_eq!(report.total_valid, 3);
        assert!(report.minimum_met);
        assert_eq!(report.by_family.get(&CitationFamily::BareSection), Some(&1));
        assert!(has_minimum_citations("Cal. Civ. Code § 1942", 1));
        assert!(!has_minimum_citations("§ 12", 1));
    }

    #[test]
    fn classifies_source_kinds() {
        assert_eq!(classify_source_kind("42 U.S.C. § 1983"), SourceKind::FederalStatute);
        assert_eq!(classify_source_kind("Cal. Civ. Code § 1708"), SourceKind::StateStatute);
        assert_eq!(classify_source_kind("Fed. R. Civ. P. 12"), SourceKind::CourtRule);
        assert_eq!(classify_source_kind("Green v. Superior Court"), SourceKind::CaseLaw);
        assert_eq!(classify_source_kind("H.R. 748"), SourceKind::FederalStatute);
        assert_eq!(classify_source_kind("something else"), SourceKind::Other);
    }

    #[test]
    fn empty_text_has_no_citations() {
        assert!(extract_citations("").is_empty());
        assert!(!is_valid_citation_format("   "));
    }
}
