//! Per-jurisdiction statute patterns and procedural terminology used by the
//! critique verifier.

use std::sync::LazyLock;

use regex::Regex;

use super::compile;

pub struct StatutePattern {
    pub label: &'static str,
    pub pattern: Regex,
    pub confidence: f64,
}

pub struct JurisdictionProfile {
    pub name: &'static str,
    /// Lowercase, dot-free spellings matched as whole words.
    pub aliases: &'static [&'static str],
    pub statutes: Vec<StatutePattern>,
    /// Lowercase procedure terms particular to this jurisdiction.
    pub terms: &'static [&'static str],
}

impl JurisdictionProfile {
    /// Highest confidence among the statute patterns matching `citation`.
    pub fn best_match(&self, citation: &str) -> Option<(&'static str, f64)> {
        self.statutes
            .iter()
            .filter(|s| s.pattern.is_match(citation))
            .map(|s| (s.label, s.confidence))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

fn statute(label: &'static str, pattern: &str, confidence: f64) -> StatutePattern {
    StatutePattern {
        label,
        pattern: compile(pattern),
        confidence,
    }
}

const CALIFORNIA_CODES: &str = r"(?:Civ(?:il)?|Civ\.\s*Proc|Code\s+Civ\.\s*Proc|Fam(?:ily)?|Penal|Pen|Gov(?:ernment|'t)?|Lab(?:or)?|Bus\.\s*&\s*Prof|Evid(?:ence)?|Health\s*&\s*Saf|Veh(?:icle)?|Prob(?:ate)?|Welf\.\s*&\s*Inst|Corp(?:orations)?|Ins(?:urance)?)";

static PROFILES: LazyLock<Vec<JurisdictionProfile>> = LazyLock::new(|| {
    vec![
        JurisdictionProfile {
            name: "California",
            aliases: &["california", "ca", "cal", "calif"],
            statutes: vec![
                statute(
                    "California code section",
                    &format!(
                        r"(?i)\b(?:Cal(?:ifornia)?\.?\s+)?{CALIFORNIA_CODES}\.?\s+Code\s*(?:§+|sec(?:tion|\.)?)\s*\d{{1,5}}(?:\.\d+)?\b(?:\([A-Za-z0-9]+\))*"
                    ),
                    0.9,
                ),
                statute(
                    "California Code of Civil Procedure",
                    r"(?i)\b(?:Cal\.?\s+)?Code\s+Civ\.?\s*Proc\.?\s*§+\s*\d{1,5}(?:\.\d+)?\b",
                    0.9,
                ),
                statute(
                    "California Rules of Court",
                    r"(?i)\b(?:Cal\.?\s+)?Rules?\s+of\s+Court,?\s*(?:rule\s*)?\d{1,2}\.\d{1,4}\b",
                    0.85,
                ),
                statute("California bill", r"\b(?:AB|SB|Assembly\s+Bill|Senate\s+Bill)\s*\d{1,4}\b", 0.7),
            ],
            terms: &[
                "unlawful detainer",
                "superior court",
                "small claims",
                "self-help center",
                "judicial council",
                "ud-105",
                "sc-100",
                "fl-300",
                "three-day notice",
                "3-day notice",
                "tenant protection act",
            ],
        },
        JurisdictionProfile {
            name: "Wisconsin",
            aliases: &["wisconsin", "wi", "wis"],
            statutes: vec![
                statute(
                    "Wisconsin statutes",
                    r"(?i)\b(?:Wis(?:consin)?\.?\s+)?Stat(?:s|utes)?\.?\s*(?:§+\s*)?\d{1,3}\.\d{2,4}\b(?:\([A-Za-z0-9]+\))*",
                    0.9,
                ),
                statute(
                    "Wisconsin administrative code",
                    r"(?i)\bWis\.?\s+Admin\.?\s+Code\s+(?:ATCP|DWD|DHS)\s*\d+(?:\.\d+)?\b",
                    0.85,
                ),
            ],
            terms: &["circuit court", "small claims", "atcp 134", "eviction", "summons and complaint", "return date"],
        },
        JurisdictionProfile {
            name: "New York",
            aliases: &["new york", "ny", "nys"],
            statutes: vec![
                statute(
                    "New York consolidated laws",
                    r"(?i)\b(?:N\.?\s?Y\.?\s+)?(?:Real\s+Prop(?:erty)?|Gen(?:eral)?\s+Oblig(?:ations)?|Gen(?:eral)?\s+Bus(?:iness)?|Penal|Lab(?:or)?|Dom(?:estic)?\s+Rel(?:ations)?|Exec(?:utive)?|Multiple\s+Dwelling)\.?\s+Law\s*§+\s*\d{1,4}(?:-[a-z])?\b",
                    0.9,
                ),
                statute("New York CPLR", r"(?i)\b(?:CPLR|C\.P\.L\.R\.)\s*(?:§\s*)?\d{3,4}\b", 0.9),
                statute("New York RPAPL", r"(?i)\bRPAPL\s*(?:§\s*)?\d{3,4}\b", 0.85),
            ],
            terms: &["housing court", "civil court", "supreme court", "notice of petition", "holdover", "nonpayment proceeding", "order to show cause"],
        },
        JurisdictionProfile {
            name: "Texas",
            aliases: &["texas", "tx", "tex"],
            statutes: vec![
                statute(
                    "Texas code",
                    r"(?i)\bTex(?:as)?\.?\s+(?:Prop(?:erty)?|Civ(?:il)?\.?\s+Prac\.?\s*&\s*Rem|Fam(?:ily)?|Penal|Gov(?:ernment|'t)?|Lab(?:or)?|Bus\.?\s*&\s*Com)\.?\s+Code\s*(?:Ann\.\s*)?§+\s*\d{1,3}\.\d{3,4}\b",
                    0.9,
                ),
                statute("Texas rules of civil procedure", r"(?i)\bTex\.?\s+R\.?\s*Civ\.?\s*P\.?\s*\d{1,3}(?:\.\d+)?\b", 0.85),
            ],
            terms: &["justice court", "justice of the peace", "county court at law", "notice to vacate", "writ of possession"],
        },
        JurisdictionProfile {
            name: "Florida",
            aliases: &["florida", "fl", "fla"],
            statutes: vec![
                statute(
                    "Florida statutes",
                    r"(?i)\b(?:Fla\.?|Florida)\s+Stat(?:s|utes)?\.?\s*(?:Ann\.\s*)?(?:§+\s*)?\d{1,3}\.\d{2,4}\b(?:\([A-Za-z0-9]+\))*",
                    0.9,
                ),
                statute("Florida rules of civil procedure", r"(?i)\bFla\.?\s+R\.?\s*Civ\.?\s*P\.?\s*\d\.\d{3}\b", 0.85),
            ],
            terms: &["county court", "circuit court", "three-day notice", "clerk of court", "registry of the court"],
        },
    ]
});

static FEDERAL: LazyLock<JurisdictionProfile> = LazyLock::new(|| JurisdictionProfile {
    name: "Federal",
    aliases: &["federal", "us", "usa", "united states"],
    statutes: vec![
        statute("United States Code", r"(?i)\b\d{1,2}\s+U\.?\s?S\.?\s?C\.?(?:\s?A\.?)?\s*§+\s*\d{1,5}[a-z]?\b", 0.75),
        statute("Code of Federal Regulations", r"(?i)\b\d{1,2}\s+C\.?\s?F\.?\s?R\.?\s*§*\s*\d{1,4}(?:\.\d+)?\b", 0.7),
        statute("Federal Rules of Civil Procedure", r"(?i)\b(?:Fed\.?\s*R\.?\s*Civ\.?\s*P\.?|FRCP)\s*\d{1,2}\b", 0.75),
        statute("Federal Rules of Evidence", r"(?i)\b(?:Fed\.?\s*R\.?\s*Evid\.?|FRE)\s*\d{3,4}\b", 0.7),
        statute("Public law", r"(?i)\bPub(?:lic)?\.?\s*L(?:aw)?\.?\s*(?:No\.\s*)?\d{2,3}-\d{1,4}\b", 0.7),
    ],
    terms: &["district court", "federal court", "pacer", "removal", "diversity jurisdiction", "federal question"],
});

/// Supported jurisdictions for the safety gate.
pub const SUPPORTED_JURISDICTIONS: [&str; 51] = [
    "Federal", "Alabama", "Alaska", "Arizona", "Arkansas", "California", "Colorado",
    "Connecticut", "Delaware", "Florida", "Georgia", "Hawaii", "Idaho", "Illinois", "Indiana",
    "Iowa", "Kansas", "Kentucky", "Louisiana", "Maine", "Maryland", "Massachusetts", "Michigan",
    "Minnesota", "Mississippi", "Missouri", "Montana", "Nebraska", "Nevada", "New Hampshire",
    "New Jersey", "New Mexico", "New York", "North Carolina", "North Dakota", "Ohio", "Oklahoma",
    "Oregon", "Pennsylvania", "Rhode Island", "South Carolina", "South Dakota", "Tennessee",
    "Texas", "Utah", "Vermont", "Virginia", "Washington", "West Virginia", "Wisconsin", "Wyoming",
];

/// Generic procedural vocabulary shared between roadmap steps and research
/// context.
pub const PROCEDURAL_KEYWORDS: &[&str] = &[
    "file", "filing", "serve", "service", "summons", "complaint", "answer", "motion", "hearing",
    "trial", "appeal", "notice", "petition", "judgment", "default", "discovery", "deadline",
    "clerk", "fee waiver", "proof of service", "declaration", "response", "mediation",
    "settlement", "continuance", "subpoena", "evidence", "court", "deposit", "eviction",
];

/// Lowercases, strips dots and folds every non-alphanumeric run into a
/// single space, padding both ends.
fn alias_haystack(jurisdiction: &str) -> String {
    let mut out = String::from(" ");
    let mut last_space = true;
    for c in jurisdiction.chars().filter(|c| *c != '.') {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
            last_space = false;
        } else if !last_space {
            out.push(' ');
            last_space = true;
        }
    }
    if !last_space {
        out.push(' ');
    }
    out
}

/// Profile for a free-form jurisdiction string such as `"CA"` or
/// `"Los Angeles County, California"`.
pub fn profile_for(jurisdiction: &str) -> Option<&'static JurisdictionProfile> {
    let haystack = alias_haystack(jurisdiction);
    PROFILES.iter().find(|profile| {
        profile
            .aliases
            .iter()
            .any(|alias| haystack.contains(&format!(" {alias} ")))
    })
}

pub fn federal_profile() -> &'static JurisdictionProfile {
    &FEDERAL
}

pub fn is_federal(jurisdiction: &str) -> bool {
    let haystack = alias_haystack(jurisdiction);
    FEDERAL
        .aliases
        .iter()
        .any(|alias| haystack.contains(&format!(" {alias} ")))
}
