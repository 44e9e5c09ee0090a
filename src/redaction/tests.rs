use super::*;

const SAMPLE: &str = "My landlord John refused to fix the heat. Reach me at jane.roe@example.com \
or (555) 123-4567. I live in Pasadena. SSN 123-45-6789, case 2:23-cv-01234. \
Contact Maria Lopez about 742 Evergreen Terrace, Springfield, IL 62704.";

#[test]
fn redacts_email_in_sentence() {
    let outcome = redact("Contact me at john.doe@example.com", true);
    assert_eq!(outcome.redacted_text, "Contact me at [REDACTED_EMAIL]");
    assert_eq!(outcome.pass1_count, 1);
    assert_eq!(outcome.pass2_count, 0);
    assert!(outcome.categories.contains(&PiiCategory::Email));
}

#[test]
fn relationship_name_is_contextual() {
    let outcome = redact("My landlord John refused to fix the heat", true);
    assert!(!outcome.redacted_text.contains("John"));
    assert!(outcome.categories.contains(&PiiCategory::ContextualName));
    assert_eq!(outcome.pass2_count, 1);
}

#[test]
fn redaction_is_idempotent() {
    let once = redact(SAMPLE, true);
    let twice = redact(&once.redacted_text, true);
    assert_eq!(once.redacted_text, twice.redacted_text);
    assert!(twice.is_clean(), "second pass found {:?}", twice.categories);
}

#[test]
fn no_raw_values_survive() {
    let outcome = redact(SAMPLE, true);
    for raw in [
        "John",
        "jane.roe@example.com",
        "123-4567",
        "Pasadena",
        "123-45-6789",
        "01234",
        "Maria Lopez",
        "Evergreen",
        "62704",
    ] {
        assert!(
            !outcome.redacted_text.contains(raw),
            "{raw} leaked: {}",
            outcome.redacted_text
        );
    }
}

#[test]
fn disabling_pass_two_leaves_pass_one_untouched() {
    let with = redact(SAMPLE, true);
    let without = redact(SAMPLE, false);
    assert_eq!(with.pass1_count, without.pass1_count);
    assert_eq!(without.pass2_count, 0);
    assert!(without.categories.iter().all(|c| !c.is_contextual()));
    assert!(without.redacted_text.contains("John"));
}

#[test]
fn categories_are_merged_across_passes() {
    let outcome = redact(SAMPLE, true);
    assert!(outcome.categories.contains(&PiiCategory::Email));
    assert!(outcome.categories.contains(&PiiCategory::Phone));
    assert!(outcome.categories.contains(&PiiCategory::ContextualName));
    assert!(outcome.categories.contains(&PiiCategory::ContextualLocation));
    assert_eq!(
        outcome.total_count(),
        outcome.pass1_count + outcome.pass2_count
    );
}

#[test]
fn api_keys_are_redacted_via_markers_and_shape() {
    let outcome = redact(
        "key sk-live-abcdefghijklmnop and header Authorization: Bearer tok_123456789",
        false,
    );
    assert!(!outcome.redacted_text.contains("abcdefghijklmnop"));
    assert!(!outcome.redacted_text.contains("tok_123456789"));
    assert_eq!(outcome.categories.len(), 1);
    assert!(outcome.categories.contains(&PiiCategory::ApiKey));
}

#[test]
fn legal_text_is_left_alone() {
    let text = "Under California Civil Code § 1942, the tenant may repair and deduct.";
    let outcome = redact(text, true);
    assert_eq!(outcome.redacted_text, text);
    assert!(outcome.is_clean());
}

#[test]
fn safe_log_redacts_message_and_extras() {
    let sink = CapturingSink::new();
    let err = std::io::Error::other("write to jane.roe@example.com failed");
    let context = anyhow::anyhow!("call 555-123-4567").context("notify Maria Lopez");
    let json = serde_json::json!({
        "client": {"email": "jane.roe@example.com", "ids": ["123-45-6789", 7]},
    });

    safe_log(
        &sink,
        LogLevel::Warn,
        "My landlord John sent mail",
        &[
            LogExtra::Text("SSN 123-45-6789"),
            LogExtra::Error(&err),
            LogExtra::Anyhow(&context),
            LogExtra::Json(&json),
        ],
    );

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].0, LogLevel::Warn);
    let line = &lines[0].1;
    for raw in ["John", "jane.roe@example.com", "123-45-6789", "555-123-4567", "Maria Lopez"] {
        assert!(!line.contains(raw), "{raw} leaked into {line}");
    }
    assert!(line.contains("caused by"));
    assert!(line.contains("[REDACTED_EMAIL]"));
    assert!(line.contains("7"));
}

#[test]
fn safe_logger_writes_through_sink() {
    let sink = std::sync::Arc::new(CapturingSink::new());
    let logger = SafeLogger::new(sink.clone());
    logger.info("reach me at a@b.io", &[]);
    logger.error("done", &[]);
    let lines = sink.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].1, "reach me at [REDACTED_EMAIL]");
    assert_eq!(lines[1].0, LogLevel::Error);
}
