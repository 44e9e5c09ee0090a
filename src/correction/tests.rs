use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use super::*;
use crate::redaction::{CapturingSink, SafeLogger};
use crate::testing::{sample_document, step};
use crate::validation::validate;

fn broken_document() -> StructuredLegalOutput {
    let mut doc = sample_document();
    doc.roadmap[2] = step(3, "Prepare for the hearing", "To be determined");
    doc
}

fn errors_of(doc: &StructuredLegalOutput) -> Vec<String> {
    validate(doc).errors().to_vec()
}

#[tokio::test]
async fn makes_exactly_max_attempts_calls_then_fails() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&calls);
    let completion = move |_prompt: String| {
        counter.fetch_add(1, Ordering::SeqCst);
        async { Ok::<_, anyhow::Error>("I am unable to produce JSON.".to_string()) }
    };

    let original = broken_document();
    let outcome = correct(&original, &errors_of(&original), &completion, 3).await;

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(outcome.completion_calls, 3);
    assert_eq!(outcome.state, CorrectionState::Failed);

    let metadata = outcome.document.correction.as_ref().expect("metadata attached");
    assert!(metadata.attempted);
    assert!(!metadata.successful);
    assert!(metadata.remaining_errors.as_ref().is_some_and(|e| !e.is_empty()));

    let mut stripped = outcome.document.clone();
    stripped.correction = None;
    assert_eq!(stripped, original);
}

#[tokio::test]
async fn zero_attempts_still_tries_once() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&calls);
    let completion = move |_prompt: String| {
        counter.fetch_add(1, Ordering::SeqCst);
        async { Err::<String, _>(anyhow::anyhow!("model unavailable")) }
    };
    let original = broken_document();
    let outcome = correct(&original, &errors_of(&original), &completion, 0).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(outcome.state, CorrectionState::Failed);
}

#[tokio::test]
async fn returns_corrected_document_with_success_metadata() {
    let fixed = serde_json::to_string(&sample_document()).expect("serializes");
    let completion = move |_prompt: String| {
        let body = format!("Here you go:\n```json\n{fixed}\n```");
        async move { Ok::<_, anyhow::Error>(body) }
    };

    let original = broken_document();
    let outcome = correct(&original, &errors_of(&original), &completion, 3).await;

    assert_eq!(outcome.state, CorrectionState::Corrected);
    assert_eq!(outcome.completion_calls, 1);
    assert!(outcome.errors.is_empty());
    let metadata = outcome.document.correction.as_ref().expect("metadata attached");
    assert!(metadata.successful);
    assert!(metadata.remaining_errors.is_none());
    assert_eq!(outcome.document.roadmap[2].description, sample_document().roadmap[2].description);
}

#[tokio::test]
async fn completion_errors_become_synthetic_entries() {
    let prompts = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&prompts);
    let completion = move |prompt: String| {
        seen.lock().unwrap_or_else(PoisonError::into_inner).push(prompt);
        async { Err::<String, _>(anyhow::anyhow!("upstream rejected key sk-abcdefghijklmnopqrstuvwx")) }
    };

    let original = broken_document();
    let outcome = correct(&original, &errors_of(&original), &completion, 2).await;

    let prompts = prompts.lock().unwrap_or_else(PoisonError::into_inner);
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].contains("To be determined"));
    assert!(prompts[1].contains("attempt 1: completion failed"));
    assert!(!prompts[1].contains("sk-abcdefghijklmnopqrstuvwx"));
    assert!(outcome.errors.iter().any(|e| e.starts_with("attempt 1:")));
    assert!(outcome.errors.iter().any(|e| e.starts_with("attempt 2:")));
    assert!(outcome.errors.iter().any(|e| e.contains("To be determined")));
}

#[tokio::test]
async fn synthetic_entries_are_capped_at_the_newest() {
    let completion =
        |_prompt: String| async { Err::<String, _>(anyhow::anyhow!("service unavailable")) };

    let original = broken_document();
    let outcome = correct(&original, &errors_of(&original), &completion, 12).await;

    let synthetic: Vec<&String> = outcome
        .errors
        .iter()
        .filter(|e| e.starts_with("attempt "))
        .collect();
    assert_eq!(outcome.completion_calls, 12);
    assert_eq!(synthetic.len(), 8);
    assert!(synthetic[0].starts_with("attempt 5:"));
    assert!(synthetic[7].starts_with("attempt 12:"));
    assert!(outcome.errors.iter().any(|e| e.contains("To be determined")));
}

#[tokio::test]
async fn later_attempts_build_on_the_latest_draft() {
    let mut partial = sample_document();
    partial.citations.truncate(1);
    let partial_json = serde_json::to_string(&partial).expect("serializes");
    let fixed_json = serde_json::to_string(&sample_document()).expect("serializes");
    let calls = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&calls);
    let completion = move |prompt: String| {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        let reply = if n == 0 {
            partial_json.clone()
        } else {
            assert!(prompt.contains("citations: at least 3 required (found 1)"));
            fixed_json.clone()
        };
        async move { Ok::<_, anyhow::Error>(reply) }
    };

    let original = broken_document();
    let outcome = correct(&original, &errors_of(&original), &completion, 3).await;
    assert_eq!(outcome.state, CorrectionState::Corrected);
    assert_eq!(outcome.completion_calls, 2);
}

#[tokio::test]
async fn run_skips_repair_for_valid_and_minor_cases() {
    let orchestrator = CorrectionOrchestrator::default();
    let completion = |_prompt: String| async { Err::<String, _>(anyhow::anyhow!("must not be called")) };

    let valid = orchestrator.run(&sample_document(), Some(&completion)).await;
    assert_eq!(valid.state, CorrectionState::Valid);
    assert!(valid.document.correction.is_none());

    let mut minor = sample_document();
    minor.local_logistics = None;
    let outcome = orchestrator.run(&minor, Some(&completion)).await;
    assert_eq!(outcome.state, CorrectionState::Invalid);
    assert_eq!(outcome.completion_calls, 0);
    assert_eq!(outcome.errors.len(), 1);
}

#[tokio::test]
async fn run_without_completion_reports_invalid() {
    let outcome = CorrectionOrchestrator::default().run(&broken_document(), None).await;
    assert_eq!(outcome.state, CorrectionState::Invalid);
    assert!(outcome.document.correction.is_none());
}

#[tokio::test]
async fn failure_logs_are_redacted() {
    let sink = Arc::new(CapturingSink::new());
    let orchestrator = CorrectionOrchestrator::default()
        .with_max_attempts(1)
        .with_logger(SafeLogger::new(sink.clone()));
    let completion =
        |_prompt: String| async { Err::<String, _>(anyhow::anyhow!("timeout contacting jane.doe@example.com")) };

    let outcome = orchestrator.run(&broken_document(), Some(&completion)).await;
    assert_eq!(outcome.state, CorrectionState::Failed);

    let logged = sink.joined();
    assert!(logged.contains("Correction attempt failed"));
    assert!(!logged.contains("jane.doe@example.com"));
}

#[test]
fn terminal_states() {
    assert!(!CorrectionState::PendingValidation.is_terminal());
    assert!(!CorrectionState::Correcting(1).is_terminal());
    assert!(CorrectionState::Corrected.is_terminal());
    assert!(CorrectionState::Failed.is_terminal());
}
