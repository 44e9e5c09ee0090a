//! PII categories and the regex tables behind both redaction passes.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use super::compile;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PiiCategory {
    Email,
    Phone,
    Ssn,
    ApiKey,
    CaseNumber,
    Address,
    ZipCode,
    DateOfBirth,
    Name,
    DriversLicense,
    CreditCard,
    ContextualName,
    ContextualAddress,
    ContextualLocation,
    ContextualPhone,
    ContextualEmail,
}

impl PiiCategory {
    /// Replacement marker written in place of a match.
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Email => "[REDACTED_EMAIL]",
            Self::Phone => "[REDACTED_PHONE]",
            Self::Ssn => "[REDACTED_SSN]",
            Self::ApiKey => "[REDACTED_API_KEY]",
            Self::CaseNumber => "[REDACTED_CASE_NUMBER]",
            Self::Address => "[REDACTED_ADDRESS]",
            Self::ZipCode => "[REDACTED_ZIP_CODE]",
            Self::DateOfBirth => "[REDACTED_DATE_OF_BIRTH]",
            Self::Name => "[REDACTED_NAME]",
            Self::DriversLicense => "[REDACTED_DRIVERS_LICENSE]",
            Self::CreditCard => "[REDACTED_CREDIT_CARD]",
            Self::ContextualName => "[REDACTED_CONTEXTUAL_NAME]",
            Self::ContextualAddress => "[REDACTED_CONTEXTUAL_ADDRESS]",
            Self::ContextualLocation => "[REDACTED_CONTEXTUAL_LOCATION]",
            Self::ContextualPhone => "[REDACTED_CONTEXTUAL_PHONE]",
            Self::ContextualEmail => "[REDACTED_CONTEXTUAL_EMAIL]",
        }
    }

    pub const fn is_contextual(self) -> bool {
        matches!(
            self,
            Self::ContextualName
                | Self::ContextualAddress
                | Self::ContextualLocation
                | Self::ContextualPhone
                | Self::ContextualEmail
        )
    }
}

/// One regex rule. `group` selects the capture group that holds the
/// sensitive span; `0` redacts the whole match.
pub struct PiiRule {
    pub category: PiiCategory,
    pub pattern: Regex,
    pub group: usize,
}

impl PiiRule {
    fn whole(category: PiiCategory, pattern: &str) -> Self {
        Self {
            category,
            pattern: compile(pattern),
            group: 0,
        }
    }

    fn captured(category: PiiCategory, pattern: &str, group: usize) -> Self {
        Self {
            category,
            pattern: compile(pattern),
            group,
        }
    }
}

const ADDRESS_SUFFIXES: &str = "Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Lane|Ln|Drive|Dr|Ct|Way|Place|Pl|Terrace|Ter|Circle|Cir|Parkway|Pkwy|Highway|Hwy|Square|Sq|Trail|Trl";

/// Pass-1 rules in application order. Credential markers are handled
/// separately before the generic API-key rule runs.
pub static STRUCTURAL_RULES: LazyLock<Vec<PiiRule>> = LazyLock::new(|| {
    use PiiCategory as C;

    let street = format!(
        r"\b\d{{1,6}}\s+(?:[A-Z0-9][A-Za-z0-9.'-]*\s+){{1,4}}(?:{ADDRESS_SUFFIXES})\b\.?(?:,?\s*(?:Apt|Apartment|Unit|Suite|Ste|#)\.?\s*[A-Za-z0-9-]+)?"
    );

    vec![
        PiiRule::whole(C::Email, r"(?i)\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b"),
        // Phone variants, most specific first.
        PiiRule::whole(C::Phone, r"\+1[\s.-]?\(\d{3}\)\s*\d{3}[\s.-]\d{4}\b"),
        PiiRule::whole(C::Phone, r"\+1[\s.-]?\d{3}[\s.-]?\d{3}[\s.-]?\d{4}\b"),
        PiiRule::whole(C::Phone, r"\+\d{2,3}[\s.-]\d{1,4}[\s.-]\d{3,4}[\s.-]\d{3,4}\b"),
        PiiRule::whole(C::Phone, r"\b1-\d{3}-\d{3}-\d{4}\b"),
        PiiRule::whole(C::Phone, r"\(\d{3}\)\s*\d{3}[\s.-]\d{4}\b"),
        PiiRule::whole(C::Phone, r"\b\d{3}-\d{3}-\d{4}\b"),
        PiiRule::whole(C::Phone, r"\b\d{3}\.\d{3}\.\d{4}\b"),
        PiiRule::whole(C::Phone, r"\b\d{3} \d{3} \d{4}\b"),
        PiiRule::whole(C::Phone, r"\b\d{10}\b"),
        PiiRule::whole(C::Ssn, r"\b\d{3}-\d{2}-\d{4}\b"),
        PiiRule::whole(C::Ssn, r"\b\d{3} \d{2} \d{4}\b"),
        PiiRule::captured(
            C::Ssn,
            r"(?i)\b(?:ssn|social\s+security(?:\s+(?:no\.?|number))?)\s*[:#]?\s*(\d{9})\b",
            1,
        ),
        PiiRule::whole(C::ApiKey, r"\b[A-Za-z0-9]{32,}\b"),
        PiiRule::whole(
            C::CaseNumber,
            r"(?i)\b\d{1,2}:\d{2}-(?:cv|cr|mc|md|bk|ap|mj|po)-\d{3,6}(?:-[A-Z]{1,4})*\b",
        ),
        PiiRule::whole(C::CaseNumber, r"\b\d{2}[A-Z]{2,6}\d{4,8}\b"),
        PiiRule::whole(C::CaseNumber, r"(?i)\b(?:19|20)\d{2}-[A-Z]{2,4}-\d{3,7}\b"),
        PiiRule::captured(
            C::CaseNumber,
            r"(?i)\bcase\s*(?:no\.?|number|#)\s*[:#]?\s*([A-Z]{0,6}[-:]?\d[A-Z0-9:-]{2,})",
            1,
        ),
        PiiRule::whole(C::Address, &street),
        PiiRule::captured(
            C::ZipCode,
            r"(?:\b[A-Z]{2}|(?i:\bzip(?:\s*code)?)\s*[:#]?)\s+(\d{5}(?:-\d{4})?)\b",
            1,
        ),
        PiiRule::captured(
            C::DateOfBirth,
            r"(?i)(?:\bDOB|\bD\.O\.B\.?|\bdate\s+of\s+birth|\bbirth\s*date|\bborn(?:\s+on)?)\s*[:-]?\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|\d{4}-\d{2}-\d{2}|(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?\s+\d{1,2},?\s+\d{4})",
            1,
        ),
        PiiRule::whole(
            C::Name,
            r"\b[A-Z](?:'[A-Z])?[a-z]+(?:[A-Z][a-z]+)?(?:[ \t]+(?:[A-Z]\.[ \t]+)?[A-Z](?:'[A-Z])?[a-z]+(?:[A-Z][a-z]+)?)+\b",
        ),
        PiiRule::captured(
            C::DriversLicense,
            r"(?i)(?:\bdriver'?s?\s+licen[sc]e|\bDL|\bD\.L\.|\blicense)\s*(?:no\.?|number|#)?\s*[:#]?\s*([A-Z]{1,2}\d{5,8}|\d{7,9})\b",
            1,
        ),
        PiiRule::whole(C::DriversLicense, r"\b[A-Z]\d{7}\b"),
        PiiRule::whole(C::CreditCard, r"\b(?:\d{4}[ -]){3}\d{4}\b"),
        PiiRule::whole(C::CreditCard, r"\b\d{4}[ -]\d{6}[ -]\d{5}\b"),
        PiiRule::whole(C::CreditCard, r"\b\d{13,16}\b"),
    ]
});

/// Pass-2 rules. Prefixes are case-insensitive; the captured name must
/// still be capitalized.
pub static CONTEXTUAL_RULES: LazyLock<Vec<PiiRule>> = LazyLock::new(|| {
    use PiiCategory as C;

    let relation = "landlord|landlady|tenant|roommate|neighbor|neighbour|husband|wife|spouse|partner|ex-husband|ex-wife|ex|boyfriend|girlfriend|son|daughter|mother|father|mom|dad|brother|sister|boss|employer|manager|supervisor|coworker|co-worker|friend|attorney|lawyer|contractor|uncle|aunt|cousin|child|kid|grandmother|grandfather";
    let person = r"[A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)?";
    let street = format!(
        r"\d{{1,6}}[ \t]+[A-Z][A-Za-z]*(?:[ \t]+[A-Z][A-Za-z]*){{0,3}}(?:[ \t]+(?:{ADDRESS_SUFFIXES})\b\.?)?"
    );

    vec![
        PiiRule::captured(
            C::ContextualName,
            &format!(r"(?i:\b(?:my|our|his|her|their|the)[ \t]+(?:{relation}))[ \t]*,?[ \t]+({person})\b"),
            1,
        ),
        PiiRule::captured(
            C::ContextualName,
            r"\b([A-Z][a-z]+)'s[ \t]+(?i:apartment|house|home|car|lawyer|attorney|landlord|office|property|lease|account|phone|children|kids|wife|husband)\b",
            1,
        ),
        PiiRule::captured(
            C::ContextualName,
            &format!(r"(?i:\bmy[ \t]+name[ \t]+is)[ \t]+({person})\b"),
            1,
        ),
        PiiRule::captured(
            C::ContextualAddress,
            &format!(r"(?i:\b(?:the[ \t]+)?(?:property|house|home|apartment|unit|building|premises)[ \t]+(?:at|on|located[ \t]+at))[ \t]+({street})"),
            1,
        ),
        PiiRule::captured(
            C::ContextualLocation,
            r"(?i:\bI[ \t]+(?:live|reside|stay)[ \t]+(?:at|in|on))[ \t]+([A-Z0-9][A-Za-z0-9]*(?:[ \t]+[A-Z0-9][A-Za-z0-9]*){0,4})",
            1,
        ),
        PiiRule::captured(
            C::ContextualPhone,
            r"(?i)\b(?:my[ \t]+)?(?:phone|cell|mobile|number)(?:[ \t]+number)?[ \t]+is[ \t]+(\+?[\d(][\d\s().-]{6,}\d)",
            1,
        ),
        PiiRule::captured(
            C::ContextualEmail,
            r"(?i)\b(?:my[ \t]+)?e-?mail(?:[ \t]+address)?[ \t]+is[ \t]+(\S+@\S+)",
            1,
        ),
    ]
});

/// Boilerplate words that split a capitalized run. The tokens around them
/// are still considered as names on their own.
pub const NAME_EXCLUSIONS: &[&str] = &[
    "court", "courts", "superior", "supreme", "district", "county", "state", "states", "united",
    "federal", "code", "codes", "civil", "criminal", "procedure", "rule", "rules", "section",
    "statute", "statutes", "law", "laws", "legal", "disclaimer", "department", "dept", "case",
    "small", "claims", "appeals", "appellate", "circuit", "housing", "family", "penal",
    "evidence", "government", "labor", "vehicle", "business", "professions", "health", "safety",
    "probate", "act", "amendment", "constitution", "notice", "motion", "complaint", "answer",
    "summons", "order", "judgment", "exhibit", "declaration", "affidavit", "proof", "service",
    "form", "forms", "strategy", "roadmap", "adversarial", "filing", "template", "local",
    "logistics", "procedural", "checks", "step", "citations", "sources", "fees", "dress",
    "parking", "hours", "operation", "general", "public", "defender", "office", "city",
    "street", "avenue", "road", "building", "center", "unlawful", "detainer", "eviction",
    "property", "real", "residential", "commercial", "lease", "rent", "security", "deposit",
    "habitability", "warranty", "contract", "contracts", "damages", "relief", "injunction",
    "hearing", "trial", "appeal", "review", "estimated", "time", "required", "documents",
    "counter", "measure", "information", "advice", "self", "represented", "litigant",
    "litigants", "help", "division", "branch", "room", "floor", "suite", "mediation",
    "arbitration", "agency", "commission", "board", "bureau", "administrative", "regulations",
    "regulation", "chapter", "title", "article", "part", "paragraph", "subdivision", "bill",
    "assembly", "senate", "house", "congress", "legislature", "corporation", "company", "inc",
    "llc", "bank", "insurance", "internal", "revenue", "social", "medicare", "medicaid",
    "veterans", "affairs", "urban", "development", "fair", "employment", "standards",
    "commissioner", "northern", "southern", "eastern", "western", "central", "middle", "los",
    "san", "santa", "orange", "sacramento", "oakland", "fresno", "milwaukee", "chicago",
    "miami", "orlando", "tampa", "brooklyn", "manhattan", "queens", "bronx", "january",
    "february", "march", "july", "september", "october", "november", "december", "monday",
    "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "alabama", "alaska",
    "arizona", "arkansas", "california", "colorado", "connecticut", "delaware", "florida",
    "hawaii", "idaho", "illinois", "indiana", "iowa", "kansas", "kentucky", "louisiana",
    "maine", "maryland", "massachusetts", "michigan", "minnesota", "mississippi", "missouri",
    "montana", "nebraska", "nevada", "new", "north", "ohio", "oklahoma", "oregon",
    "pennsylvania", "south", "tennessee", "texas", "utah", "vermont", "west", "wisconsin",
    "wyoming", "columbia", "america", "american", "english", "spanish", "google", "microsoft",
    "amazon", "apple",
];

/// Party and role labels that precede names in legal prose
/// ("Plaintiff John Smith"). Treated like exclusions: skipped, never part
/// of the redacted span.
pub const ROLE_WORDS: &[&str] = &[
    "plaintiff", "plaintiffs", "defendant", "defendants", "petitioner", "respondent",
    "appellant", "appellee", "tenant", "tenants", "landlord", "landlords", "landlady", "owner",
    "witness", "witnesses", "judge", "justice", "honorable", "hon", "clerk", "attorney",
    "counsel", "officer", "deputy", "sheriff", "marshal", "neighbor", "neighbour", "manager",
    "employer", "employee", "mr", "mrs", "ms", "dr", "esq",
];

/// Place names excluded only as whole phrases, so the single words stay
/// available as given names or surnames ("Jose Garcia", "Sarah Hall").
pub const PLACE_PHRASES: &[&[&str]] = &[
    &["los", "angeles"],
    &["san", "francisco"],
    &["san", "diego"],
    &["san", "jose"],
    &["san", "bernardino"],
    &["santa", "monica"],
    &["long", "beach"],
    &["new", "york"],
    &["new", "jersey"],
    &["new", "mexico"],
    &["new", "hampshire"],
    &["north", "carolina"],
    &["south", "carolina"],
    &["north", "dakota"],
    &["south", "dakota"],
    &["west", "virginia"],
    &["rhode", "island"],
    &["washington", "state"],
];

/// Function words dropped from the front of a capitalized run before the
/// remaining tokens are considered as a name.
pub const LEADING_FUNCTION_WORDS: &[&str] = &[
    "the", "this", "that", "these", "those", "a", "an", "on", "in", "at", "if", "when", "my",
    "your", "our", "his", "her", "their", "dear", "hello", "hi", "please", "contact", "call",
    "email", "and", "or", "but", "then", "also", "after", "before", "during", "since",
    "because", "however", "per", "under", "see", "yes", "no", "i", "we", "you", "he", "she",
    "they", "it", "to", "from", "with", "for", "by", "as", "of", "ask", "tell", "thanks",
    "thank", "sincerely", "regards", "re", "attn", "cc", "sent", "signed", "today",
    "yesterday", "tomorrow", "last", "next", "every", "each", "some", "any", "all", "both",
    "while", "where", "what", "why", "how", "who", "whom", "whose", "which", "is", "was",
    "are", "were", "will", "would", "should", "could", "can", "may", "must", "do", "does",
    "did", "not", "only", "just", "even", "still", "yet", "so", "now", "here", "there",
];

/// Whether the token is boilerplate or a role label rather than part of a
/// name.
pub fn is_name_exclusion(token: &str) -> bool {
    let lower = token.trim_end_matches('.').to_ascii_lowercase();
    NAME_EXCLUSIONS.contains(&lower.as_str()) || ROLE_WORDS.contains(&lower.as_str())
}

/// Number of leading tokens that form a known place phrase, or 0.
pub fn place_phrase_len(tokens: &[&str]) -> usize {
    PLACE_PHRASES
        .iter()
        .find(|phrase| {
            phrase.len() <= tokens.len()
                && phrase
                    .iter()
                    .zip(tokens)
                    .all(|(word, token)| token.trim_end_matches('.').eq_ignore_ascii_case(word))
        })
        .map_or(0, |phrase| phrase.len())
}

pub fn is_leading_function_word(token: &str) -> bool {
    let lower = token.to_ascii_lowercase();
    LEADING_FUNCTION_WORDS.contains(&lower.as_str())
}
