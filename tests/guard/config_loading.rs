use std::io::Write;
use std::sync::Arc;

use lawsage_guard::GuardConfig;
use lawsage_guard::correction::CorrectionState;
use lawsage_guard::pipeline::{AuditRequest, GuardPipeline};
use lawsage_guard::redaction::TracingSink;

use crate::fixtures::{RESEARCH_CONTEXT, eviction_answer_json};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[tokio::test]
async fn stricter_citation_minimum_from_file_rejects_fixture() {
    let file = write_config("[validation]\nmin_citations = 4\n");
    let config = GuardConfig::load_from(file.path()).expect("config should load");
    assert_eq!(config.validation.min_citations, 4);
    assert_eq!(config.config_path, file.path());

    let pipeline = GuardPipeline::new(config, Arc::new(TracingSink));
    let request = AuditRequest {
        jurisdiction: "California",
        research_context: RESEARCH_CONTEXT,
        ..AuditRequest::default()
    };
    let report = pipeline.process(&eviction_answer_json(), request, None).await;
    assert_eq!(report.state, CorrectionState::Invalid);
    assert!(report.errors.iter().any(|e| e.contains("at least 4")));
    assert!(!report.release);
}

#[test]
fn out_of_range_threshold_is_rejected() {
    let file = write_config("[critique]\nvalidity_threshold = 1.5\n");
    let err = GuardConfig::load_from(file.path()).expect_err("threshold above 1 must fail");
    assert!(err.to_string().contains("validity_threshold"));
}

#[test]
fn unknown_sections_do_not_break_loading() {
    let file = write_config("[telemetry]\nenabled = true\n\n[correction]\nmax_attempts = 2\n");
    let config = GuardConfig::load_from(file.path()).expect("config should load");
    assert!(config.correction.max_attempts >= 1);
}
