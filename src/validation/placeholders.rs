use crate::document::StructuredLegalOutput;
use crate::patterns::placeholders::{
    INLINE_PLACEHOLDERS, LABELED_PLACEHOLDERS, WHOLE_LINE_PLACEHOLDERS,
};

/// Distinct placeholder phrases in `text`, in order of appearance.
pub fn find_placeholders(text: &str) -> Vec<String> {
    let mut hits: Vec<(usize, String)> = INLINE_PLACEHOLDERS
        .iter()
        .chain(std::iter::once(&*WHOLE_LINE_PLACEHOLDERS))
        .flat_map(|re| re.find_iter(text).map(|m| (m.start(), m.as_str().trim().to_string())))
        .chain(
            LABELED_PLACEHOLDERS
                .captures_iter(text)
                .filter_map(|caps| caps.get(1))
                .map(|m| (m.start(), m.as_str().to_string())),
        )
        .collect();
    hits.sort_by_key(|(start, _)| *start);

    let mut phrases: Vec<String> = Vec::new();
    for (_, phrase) in hits {
        if !phrases.iter().any(|p| p.eq_ignore_ascii_case(&phrase)) {
            phrases.push(phrase);
        }
    }
    phrases
}

pub fn contains_placeholder(text: &str) -> bool {
    INLINE_PLACEHOLDERS.iter().any(|re| re.is_match(text))
        || WHOLE_LINE_PLACEHOLDERS.is_match(text)
        || LABELED_PLACEHOLDERS.is_match(text)
}

/// Placeholder phrases across the narrative fields of a document. The
/// disclaimer and the fill-in filing template are not scanned.
pub fn document_placeholders(doc: &StructuredLegalOutput) -> Vec<String> {
    let mut fields: Vec<&str> = vec![doc.strategy.as_str(), doc.adversarial_strategy.as_str()];
    for step in &doc.roadmap {
        fields.push(step.title.as_str());
        fields.push(step.description.as_str());
    }
    fields.extend(doc.procedural_checks.iter().map(String::as_str));

    let mut phrases: Vec<String> = Vec::new();
    for phrase in fields.into_iter().flat_map(find_placeholders) {
        if !phrases.iter().any(|p| p.eq_ignore_ascii_case(&phrase)) {
            phrases.push(phrase);
        }
    }
    phrases
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::RoadmapStep;

    #[test]
    fn finds_distinct_phrases_in_order() {
        let found = find_placeholders("Fees: TBD. Deadline: to be determined. Also tbd.");
        assert_eq!(found, vec!["TBD".to_string(), "to be determined".to_string()]);
    }

    #[test]
    fn pending_label_values_are_placeholders() {
        let found = find_placeholders("Status: pending. Court fees: pending\n");
        assert_eq!(found, vec!["pending".to_string()]);
        assert!(contains_placeholder("Filing fee: N/A"));
        assert!(!contains_placeholder("A motion is pending before the court."));
        assert!(!contains_placeholder("The outcome is pending before the court."));
    }

    #[test]
    fn ordinary_prose_is_clean() {
        assert!(!contains_placeholder(
            "File the answer within five court days of service of the summons."
        ));
    }

    #[test]
    fn scans_roadmap_and_checks_but_not_template() {
        let doc = StructuredLegalOutput {
            roadmap: vec![RoadmapStep {
                step_number: 1,
                title: "Serve".into(),
                description: "To be determined".into(),
                ..RoadmapStep::default()
            }],
            procedural_checks: vec!["N/A".into()],
            filing_template: "Plaintiff: [INSERT NAME]".into(),
            ..StructuredLegalOutput::default()
        };
        let found = document_placeholders(&doc);
        assert_eq!(found, vec!["To be determined".to_string(), "N/A".to_string()]);
    }
}
