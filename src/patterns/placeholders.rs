//! Placeholder phrases that mark unfinished model output.

use std::sync::LazyLock;

use regex::Regex;

use super::compile;

/// Phrases matched anywhere in a field.
pub static INLINE_PLACEHOLDERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\bto be determined\b",
        r"(?i)\bto be (?:added|provided|completed|filled in|confirmed|decided)\b",
        r"(?i)\bnot available\b",
        r"(?i)\bplaceholder\b",
        r"(?i)\bTBD\b",
        r"(?i)\bTBA\b",
        r"(?i)\bN/A\b",
        r"(?i)\blorem ipsum\b",
        r"(?i)\bcoming soon\b",
        r"(?i)\b(?:insert|add) (?:text|content|details|citation|address|information) here\b",
        r"(?i)\b(?:analysis|content|research|information|details) (?:is )?pending\b",
        r"(?i)\bpending (?:analysis|research|review|confirmation|further research)\b",
        r"(?i)\[(?:insert|your|enter|add|fill in|todo)\b[^\]]*\]",
        r"\{\{[^}]*\}\}",
        r"<<[^>]*>>",
        r"\[[A-Z][A-Z ]{2,}\]",
    ]
    .into_iter()
    .map(compile)
    .collect()
});

/// Words that are placeholders only when they make up the whole field or
/// a whole line.
pub static WHOLE_LINE_PLACEHOLDERS: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?im)^[ \t]*(?:pending|n/?a|none|null|tbd|todo|\.\.\.)[ \t]*\.?[ \t]*$")
});

/// Bare "pending" or "n/a" given as the value of a `Label:` line
/// ("Court fees: pending"). Group 1 is the placeholder word. "none" is a
/// legitimate label value ("Parking: none") and is left to the whole-line
/// rule.
pub static LABELED_PLACEHOLDERS: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i):[ \t]*(pending|n/a)[ \t]*(?:[.;,]|$|\n|\r)")
});
