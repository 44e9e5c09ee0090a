use crate::error::DocumentError;

use super::StructuredLegalOutput;

/// Locates the JSON object in model output: the whole string when it
/// parses, otherwise the span from the first `{` to the last `}`. Code
/// fences and surrounding prose fall outside that span.
pub(crate) fn extract_json_value(raw: &str) -> Result<serde_json::Value, DocumentError> {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(raw.trim()) {
        return Ok(value);
    }
    let start = raw.find('{');
    let end = raw.rfind('}');
    match (start, end) {
        (Some(start), Some(end)) if start < end => {
            serde_json::from_str(&raw[start..=end]).map_err(|e| DocumentError::Malformed(e.to_string()))
        }
        _ => Err(DocumentError::NoJsonObject),
    }
}

/// Leniently parses a `StructuredLegalOutput` out of model output.
pub fn parse_document(raw: &str) -> Result<StructuredLegalOutput, DocumentError> {
    let value = extract_json_value(raw)?;
    if !value.is_object() {
        return Err(DocumentError::Malformed(
            "expected a JSON object at the top level".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(|e| DocumentError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_code_fences_and_prose() {
        let raw = "Here is the corrected analysis:\n```json\n{\"strategy\":\"Pay rent into escrow\"}\n```\nLet me know.";
        let doc = parse_document(raw).expect("parses");
        assert_eq!(doc.strategy, "Pay rent into escrow");
    }

    #[test]
    fn reports_missing_object() {
        assert!(matches!(parse_document("no json here"), Err(DocumentError::NoJsonObject)));
    }

    #[test]
    fn reports_malformed_object() {
        assert!(matches!(
            parse_document("{\"strategy\": }"),
            Err(DocumentError::Malformed(_))
        ));
        assert!(matches!(parse_document("[1, 2]"), Err(DocumentError::Malformed(_))));
    }

    #[test]
    fn wrong_field_types_are_malformed() {
        assert!(matches!(
            parse_document(r#"{"roadmap": "step one"}"#),
            Err(DocumentError::Malformed(_))
        ));
    }
}
