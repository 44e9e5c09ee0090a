use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use lawsage_guard::correction::CorrectionState;
use lawsage_guard::document::Citation;
use lawsage_guard::redaction::CapturingSink;
use lawsage_guard::safety::{SafetyRejection, SafetyVerdict, Source};
use lawsage_guard::{AuditRequest, GuardConfig, GuardPipeline, audit, validate};

use crate::fixtures::{FABRICATED_CLAIM, RESEARCH_CONTEXT, eviction_answer, eviction_answer_json};

fn pipeline() -> (GuardPipeline, Arc<CapturingSink>) {
    let sink = Arc::new(CapturingSink::new());
    (GuardPipeline::new(GuardConfig::default(), sink.clone()), sink)
}

fn california() -> AuditRequest<'static> {
    AuditRequest {
        jurisdiction: "California",
        research_context: RESEARCH_CONTEXT,
        ..AuditRequest::default()
    }
}

#[test]
fn fixture_passes_structural_validation() {
    let verdict = validate(&eviction_answer());
    assert!(verdict.is_valid(), "errors: {:?}", verdict.errors());
}

#[tokio::test]
async fn grounded_answer_is_released_untouched() {
    let (pipeline, sink) = pipeline();
    let report = pipeline.process(&eviction_answer_json(), california(), None).await;

    assert_eq!(report.state, CorrectionState::Valid);
    assert_eq!(report.completion_calls, 0);
    assert!(report.release);
    assert!(report.document.correction.is_none());
    assert!(sink.joined().contains("Guard pipeline finished"));
}

#[tokio::test]
async fn model_prose_around_the_json_is_tolerated() {
    let (pipeline, _sink) = pipeline();
    let raw = format!("Here is your analysis:\n```json\n{}\n```\nGood luck!", eviction_answer_json());
    let report = pipeline.process(&raw, california(), None).await;
    assert!(report.release);
}

#[tokio::test]
async fn fabricated_statute_blocks_release() {
    let (pipeline, sink) = pipeline();
    let mut answer = eviction_answer();
    answer.citations[0] = Citation::new("California Civil Code § 999999");
    let raw = serde_json::to_string(&answer).expect("serializes");

    let report = pipeline.process(&raw, california(), None).await;
    assert_eq!(report.state, CorrectionState::Valid);
    assert!(!report.critique.is_valid);
    assert_eq!(report.critique.unverified_citations().count(), 1);
    assert!(!report.release);
    assert!(sink.joined().contains("Guard pipeline withheld output"));
}

#[test]
fn fabricated_claim_in_free_text_scores_low() {
    let result = audit(FABRICATED_CLAIM, "California", "");
    assert!(!result.is_valid);
    assert!(result.overall_confidence < 0.5);
    assert!(!result.recommended_actions.is_empty());
}

#[tokio::test]
async fn placeholder_step_is_repaired_by_the_model() {
    let (pipeline, _sink) = pipeline();
    let mut draft = eviction_answer();
    draft.roadmap[1].description = "[Insert service instructions here]".into();
    let raw = serde_json::to_string(&draft).expect("serializes");

    let calls = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&calls);
    let repaired = eviction_answer_json();
    let completion = move |prompt: String| {
        counter.fetch_add(1, Ordering::SeqCst);
        assert!(prompt.contains("VALIDATION ERRORS"));
        let reply = repaired.clone();
        async move { Ok::<_, anyhow::Error>(reply) }
    };

    let report = pipeline.process(&raw, california(), Some(&completion)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(report.state, CorrectionState::Corrected);
    assert!(report.document.correction.as_ref().is_some_and(|c| c.successful));
    assert!(report.release);
}

#[tokio::test]
async fn unrepairable_output_keeps_the_original_and_is_withheld() {
    let (pipeline, _sink) = pipeline();
    let mut draft = eviction_answer();
    draft.roadmap[1].description = "TBD".into();
    let raw = serde_json::to_string(&draft).expect("serializes");
    let completion =
        |_prompt: String| async { Ok::<_, anyhow::Error>("I'm sorry, I can't do that.".to_string()) };

    let report = pipeline.process(&raw, california(), Some(&completion)).await;
    assert_eq!(report.state, CorrectionState::Failed);
    assert_eq!(report.completion_calls, 3);
    assert_eq!(report.document.roadmap[1].description, "TBD");
    assert!(!report.release);
}

#[tokio::test]
async fn sources_must_be_cited_when_supplied() {
    let (pipeline, _sink) = pipeline();
    let sources = vec![
        Source::new("Cal. Civ. Code § 1942", "https://leginfo.legislature.ca.gov/1942"),
        Source::new("Cal. Code Civ. Proc. § 1161", "https://leginfo.legislature.ca.gov/1161"),
        Source::new("42 U.S.C. § 3604", "https://www.law.cornell.edu/uscode/text/42/3604"),
    ];
    let request = AuditRequest {
        sources: &sources,
        ..california()
    };
    let report = pipeline.process(&eviction_answer_json(), request, None).await;
    assert_eq!(report.grounded, Some(true));
    assert!(report.release);
}

#[test]
fn screen_rejects_before_generation() {
    let (pipeline, _sink) = pipeline();
    assert!(pipeline.screen("My landlord kept my deposit.", "California").is_approved());
    assert_eq!(
        pipeline.screen("My landlord kept my deposit.", "Narnia"),
        SafetyVerdict::Rejected {
            rejection: SafetyRejection::UnsupportedJurisdiction("Narnia".into())
        }
    );
}
