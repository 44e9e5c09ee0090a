use std::sync::Arc;

use lawsage_guard::patterns::pii::PiiCategory;
use lawsage_guard::redact;
use lawsage_guard::redaction::{CapturingSink, LogExtra, SafeLogger};

const INTAKE: &str = "My landlord John refused to fix the heat. Reach me at jane.roe@example.com \
or (555) 123-4567. SSN 123-45-6789. Under California Civil Code § 1942 I may repair and deduct.";

#[test]
fn intake_text_is_scrubbed_before_it_leaves_the_process() {
    let outcome = redact(INTAKE, true);

    for raw in ["John", "jane.roe@example.com", "123-4567", "123-45-6789"] {
        assert!(
            !outcome.redacted_text.contains(raw),
            "{raw} leaked: {}",
            outcome.redacted_text
        );
    }
    assert!(outcome.redacted_text.contains("[REDACTED_EMAIL]"));
    assert!(outcome.redacted_text.contains("California Civil Code § 1942"));
    assert!(outcome.categories.contains(&PiiCategory::Email));
    assert!(outcome.pass2_count >= 1);
}

#[test]
fn redacted_output_is_stable() {
    let once = redact(INTAKE, true);
    let twice = redact(&once.redacted_text, true);
    assert_eq!(once.redacted_text, twice.redacted_text);
    assert!(twice.is_clean());
}

#[test]
fn structural_only_mode_keeps_contextual_names() {
    let outcome = redact(INTAKE, false);
    assert_eq!(outcome.pass2_count, 0);
    assert!(outcome.redacted_text.contains("John"));
    assert!(!outcome.redacted_text.contains("jane.roe@example.com"));
}

#[test]
fn safe_logger_never_writes_raw_pii() {
    let sink = Arc::new(CapturingSink::new());
    let logger = SafeLogger::new(sink.clone());
    let failure = anyhow::anyhow!("upstream echoed jane.roe@example.com");

    logger.warn(
        "Completion failed for (555) 123-4567",
        &[LogExtra::Anyhow(&failure), LogExtra::Text(INTAKE)],
    );

    let logged = sink.joined();
    assert!(!logged.contains("jane.roe@example.com"));
    assert!(!logged.contains("123-45-6789"));
    assert!(logged.contains("[REDACTED_EMAIL]"));
}

#[test]
fn party_names_in_legal_prose_are_redacted() {
    for (input, name) in [
        ("Plaintiff John Smith sued the owner.", "John Smith"),
        ("Defendant Jane Doe failed to appear.", "Jane Doe"),
        ("The rent was paid by Jose Garcia last week.", "Jose Garcia"),
        ("My neighbor is Georgia Miller.", "Georgia Miller"),
        ("Witness Sarah Hall saw it.", "Sarah Hall"),
        ("Landlord Robert Jones refused repairs.", "Robert Jones"),
    ] {
        let outcome = redact(input, true);
        assert!(
            !outcome.redacted_text.contains(name),
            "{name} leaked: {}",
            outcome.redacted_text
        );
        assert!(outcome.categories.contains(&PiiCategory::Name), "input {input}");
        assert!(outcome.pass1_count >= 1);
    }
}
