use std::fmt::Write as _;

use crate::config::ValidationConfig;
use crate::document::{STANDARD_DISCLAIMER, StructuredLegalOutput};
use crate::validation::document_placeholders;

/// Remediation prompt for one correction attempt.
pub fn build_correction_prompt(
    current: &StructuredLegalOutput,
    errors: &[String],
    config: &ValidationConfig,
) -> String {
    let mut prompt = String::from(
        "The legal analysis below failed validation. Return a corrected version as a single \
         JSON object with the same fields. Do not include markdown fences or commentary.\n\n",
    );

    prompt.push_str("VALIDATION ERRORS:\n");
    if errors.is_empty() {
        prompt.push_str("(none reported)\n");
    }
    for (index, error) in errors.iter().enumerate() {
        let _ = writeln!(prompt, "{}. {error}", index + 1);
    }

    let placeholders = document_placeholders(current);
    if !placeholders.is_empty() {
        prompt.push_str("\nPLACEHOLDER TEXT TO REPLACE:\n");
        for phrase in &placeholders {
            let _ = writeln!(
                prompt,
                "- \"{phrase}\": replace with specific, concrete information for this case"
            );
        }
    }

    prompt.push_str("\nREQUIRED SECTIONS CHECKLIST:\n");
    for (index, item) in checklist(config).iter().enumerate() {
        let _ = writeln!(prompt, "{}. {item}", index + 1);
    }

    let _ = writeln!(prompt, "\nKeep this disclaimer verbatim: \"{STANDARD_DISCLAIMER}\"");

    let current_json =
        serde_json::to_string_pretty(current).unwrap_or_else(|_| "{}".to_string());
    let _ = write!(prompt, "\nCURRENT DOCUMENT:\n{current_json}\n");
    prompt
}

fn checklist(config: &ValidationConfig) -> [String; 7] {
    [
        format!(
            "strategy: a concrete legal strategy longer than {} characters",
            config.min_strategy_chars
        ),
        format!(
            "adversarialStrategy: the opposing party's likely arguments, longer than {} characters",
            config.min_adversarial_chars
        ),
        format!(
            "roadmap: at least {} numbered steps, each with stepNumber, title and description",
            config.min_roadmap_steps
        ),
        "filingTemplate: a court filing with a caption naming the court, plaintiff and defendant"
            .to_string(),
        format!(
            "citations: at least {} citations in a recognized format such as \"Cal. Civ. Code § 1942\" or \"42 U.S.C. § 3604\"",
            config.min_citations
        ),
        format!(
            "localLogistics: courthouseAddress longer than {} characters, plus filing fees and hours where known",
            config.min_courthouse_address_chars
        ),
        format!(
            "proceduralChecks: at least {} concrete procedural check(s)",
            config.min_procedural_checks
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_document, step};

    #[test]
    fn embeds_errors_placeholders_checklist_and_json() {
        let mut doc = sample_document();
        doc.roadmap[0] = step(1, "File", "TBD");
        let errors = vec!["roadmap step 1 description: contains placeholder text \"TBD\"".to_string()];
        let prompt = build_correction_prompt(&doc, &errors, &ValidationConfig::default());

        assert!(prompt.contains("1. roadmap step 1 description"));
        assert!(prompt.contains("- \"TBD\": replace with specific"));
        for section in [
            "strategy:",
            "adversarialStrategy:",
            "roadmap:",
            "filingTemplate:",
            "citations:",
            "localLogistics:",
            "proceduralChecks:",
        ] {
            assert!(prompt.contains(section), "missing {section}");
        }
        assert!(prompt.contains("\"adversarialStrategy\""));
        assert!(prompt.contains("CURRENT DOCUMENT:\n{"));
    }

    #[test]
    fn omits_placeholder_block_when_clean() {
        let prompt = build_correction_prompt(&sample_document(), &[], &ValidationConfig::default());
        assert!(!prompt.contains("PLACEHOLDER TEXT"));
        assert!(prompt.contains("(none reported)"));
    }
}
