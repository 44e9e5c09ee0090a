//! Citation grammars.
//!
//! Five families are recognised. Only the `strict` grammars count toward
//! format validity; the bare section and bare rule forms are extracted so
//! they can be audited but never satisfy a minimum citation count.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use strum::{Display, IntoStaticStr};

use super::compile;
use super::jurisdictions::SUPPORTED_JURISDICTIONS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Display, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CitationFamily {
    FederalCode,
    StateCode,
    RuleOfProcedure,
    BareSection,
    LegislativeBill,
}

pub struct CitationGrammar {
    pub family: CitationFamily,
    pub pattern: Regex,
    pub strict: bool,
}

const SUBSECTIONS: &str = r"(?:\([A-Za-z0-9]+\))*";

fn grammar(family: CitationFamily, strict: bool, pattern: &str) -> CitationGrammar {
    CitationGrammar {
        family,
        pattern: compile(&pattern.replace("{SUB}", SUBSECTIONS)),
        strict,
    }
}

pub static GRAMMARS: LazyLock<Vec<CitationGrammar>> = LazyLock::new(|| {
    use CitationFamily as F;

    vec![
        grammar(
            F::FederalCode,
            true,
            r"\b\d{1,2}\s+U\.?\s?S\.?\s?C\.?(?:\s?A\.?)?\s*(?:§+|[Ss]ec(?:tion|\.)?)?\s*\d+[a-z]?(?:-\d+)?{SUB}",
        ),
        grammar(
            F::FederalCode,
            true,
            r"\b\d{1,2}\s+C\.?\s?F\.?\s?R\.?\s*(?:§+|[Pp]art)?\s*\d+(?:\.\d+)?{SUB}",
        ),
        // "Cal. Code Civ. Proc. § 1161", "Code Civ. Proc. § 1161"
        grammar(
            F::StateCode,
            true,
            r"\b(?:[A-Z][A-Za-z]*\.?\s+){0,2}Code\s+(?:[A-Z][A-Za-z]*\.?\s+){1,3}§+\s*\d+[A-Za-z]?(?:[.:-]\d+[A-Za-z]?)*{SUB}",
        ),
        // "Cal. Civ. Code § 1708", "California Civil Code Section 1942"
        grammar(
            F::StateCode,
            true,
            r"\b(?:[A-Z][A-Za-z]*\.?\s+(?:(?:&|and)\s+)?){1,4}Code\s*(?:Ann\.\s*)?(?:§+|[Ss]ec(?:tion|\.))\s*\d+[A-Za-z]?(?:[.:-]\d+[A-Za-z]?)*{SUB}",
        ),
        // "Wis. Stat. § 704.17", "Fla. Stat. § 83.56"
        grammar(
            F::StateCode,
            true,
            r"\b(?:[A-Z][A-Za-z]*\.?\s+){1,2}Stat(?:s|utes?)?\.?(?:\s+Ann\.)?\s*(?:§+\s*)?\d+(?:\.\d+)+{SUB}",
        ),
        // "N.Y. Real Prop. Law § 235-b"
        grammar(
            F::StateCode,
            true,
            r"\b(?:N\.?\s?Y\.?\s+)?(?:[A-Z][A-Za-z]*\.?\s+){1,4}Law\s*§+\s*\d+(?:-[a-z])?{SUB}",
        ),
        grammar(
            F::StateCode,
            true,
            r"\b(?:CPLR|RPAPL)\s*(?:§\s*)?\d{3,4}{SUB}",
        ),
        grammar(
            F::RuleOfProcedure,
            true,
            r"\bFed\.?\s*R\.?\s*(?:Civ|Crim|App|Evid|Bankr)\.?\s*(?:P\.?)?\s*\d+(?:\.\d+)?{SUB}",
        ),
        grammar(
            F::RuleOfProcedure,
            true,
            r"\b(?:FRCP|FRE|FRAP|FRCrP|CRC)\s*(?:§\s*|[Rr]ule\s*)?\d+(?:\.\d+)*{SUB}",
        ),
        // "Cal. Rules of Court, rule 3.1324"
        grammar(
            F::RuleOfProcedure,
            true,
            r"\b(?:[A-Z][A-Za-z]*\.?\s+){0,2}Rules?\s+of\s+(?:(?:Civil|Criminal|Appellate|Small\s+Claims)\s+)?(?:Procedure|Court|Evidence),?\s*(?:[Rr]ule\s*)?\d+(?:\.\d+)*{SUB}",
        ),
        // "Tex. R. Civ. P. 510"
        grammar(
            F::RuleOfProcedure,
            true,
            r"\b[A-Z][a-z]+\.?\s+R\.?\s*(?:Civ|Crim|App)\.?\s*P\.?\s*\d+(?:\.\d+)*{SUB}",
        ),
        grammar(
            F::RuleOfProcedure,
            false,
            r"\b[Rr]ule\s+\d+(?:\.\d+)*[a-z]?{SUB}",
        ),
        grammar(
            F::BareSection,
            false,
            r"§+\s*\d+[A-Za-z]?(?:[.:-]\d+[A-Za-z]?)*{SUB}",
        ),
        grammar(
            F::LegislativeBill,
            true,
            r"\b(?:A\.?B\.?|S\.?B\.?|H\.?B\.?|H\.?R\.?|Assembly\s+Bill|Senate\s+Bill|House\s+Bill)\s*(?:No\.\s*)?\d{1,5}\b",
        ),
        grammar(
            F::LegislativeBill,
            true,
            r"\bPub(?:lic)?\.?\s*L(?:aw)?\.?\s*(?:No\.\s*)?\d{2,3}-\d{1,4}\b",
        ),
    ]
});

/// Introductory words trimmed from the front of a match.
pub const LEADING_CONNECTIVES: &[&str] = &[
    "See also", "See", "Cf.", "Under", "Per", "Pursuant to", "Pursuant", "Citing", "And",
    "Also", "The", "In", "As", "By", "From", "Following",
];

/// Subject words that belong to a code or statute name ("Civil Code",
/// "Real Prop. Law"). Anything else capitalized in front of a match is prose.
pub const CODE_NAME_WORDS: &[&str] = &[
    "civil", "civ", "penal", "pen", "family", "fam", "government", "gov", "health", "safety",
    "real", "property", "prop", "procedure", "proc", "labor", "lab", "business", "bus",
    "professions", "prof", "vehicle", "veh", "evidence", "evid", "probate", "prob", "welfare",
    "institutions", "inst", "revenue", "taxation", "tax", "insurance", "ins", "education",
    "educ", "corporations", "corp", "commercial", "com", "financial", "fin", "unemployment",
    "public", "resources", "water", "food", "agricultural", "harbors", "navigation",
    "elections", "military", "veterans", "streets", "highways", "administrative", "admin",
    "general", "obligations", "municipal", "consumer", "multiple", "dwelling", "domestic",
    "relations", "judicial", "judiciary", "code", "codes", "revised", "rev", "compiled",
    "comp", "annotated", "ann", "consolidated", "consol", "laws", "statutes", "stat", "stats",
    "rules", "rule", "court", "united", "states",
];

/// Whether a leading word belongs to the citation: an abbreviation, an
/// all-caps reporter or code name, a jurisdiction word, or a code subject.
pub fn is_code_name_word(word: &str) -> bool {
    if word.ends_with('.') {
        return true;
    }
    let letters: Vec<char> = word.chars().filter(char::is_ascii_alphabetic).collect();
    if letters.len() >= 2 && letters.iter().all(char::is_ascii_uppercase) {
        return true;
    }
    let lower = word.to_ascii_lowercase();
    CODE_NAME_WORDS.contains(&lower.as_str())
        || SUPPORTED_JURISDICTIONS
            .iter()
            .flat_map(|name| name.split_whitespace())
            .any(|part| part.eq_ignore_ascii_case(word))
}
