use lawsage_guard::citations::{
    CitationLookup, CourtListenerLookup, VerificationOptions, verify_citations,
};
use lawsage_guard::critique::CritiqueVerifier;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::fixtures::FABRICATED_CLAIM;

fn fast_options(max_retries: u32) -> VerificationOptions {
    VerificationOptions {
        concurrency: 2,
        max_retries,
        base_backoff_ms: 1,
        max_backoff_ms: 4,
    }
}

fn citations(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

#[tokio::test]
async fn search_hits_mark_citation_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/"))
        .and(query_param("q", "42 U.S.C. § 1983"))
        .and(query_param("type", "o"))
        .and(header("Authorization", "Token test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 12 })))
        .expect(1)
        .mount(&server)
        .await;

    let lookup = CourtListenerLookup::with_base_url(Some("test-key"), &server.uri(), 5);
    let outcome = lookup
        .lookup("42 U.S.C. § 1983")
        .await
        .expect("lookup should succeed");
    assert!(outcome.found);
    assert_eq!(outcome.hits, 12);
}

#[tokio::test]
async fn zero_results_mean_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 0, "results": [] })))
        .mount(&server)
        .await;

    let lookup = CourtListenerLookup::with_base_url(Some("test-key"), &server.uri(), 5);
    let checks = verify_citations(&lookup, &citations(&["Cal. Civ. Code § 999999"]), &fast_options(2)).await;
    assert!(!checks[0].verified);
    assert_eq!(checks[0].attempts, 1);
    assert!(checks[0].error.is_none());
}

#[tokio::test]
async fn forbidden_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Invalid token."))
        .expect(1)
        .mount(&server)
        .await;

    let lookup = CourtListenerLookup::with_base_url(Some("bad-key"), &server.uri(), 5);
    let checks = verify_citations(&lookup, &citations(&["42 U.S.C. § 3604"]), &fast_options(3)).await;
    assert!(!checks[0].verified);
    assert_eq!(checks[0].attempts, 1);
    assert!(checks[0].error.as_deref().is_some_and(|e| e.contains("403")));
}

#[tokio::test]
async fn server_errors_are_retried_up_to_the_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let lookup = CourtListenerLookup::with_base_url(Some("test-key"), &server.uri(), 5);
    let checks = verify_citations(&lookup, &citations(&["42 U.S.C. § 3604"]), &fast_options(2)).await;
    assert!(!checks[0].verified);
    assert_eq!(checks[0].attempts, 3);
}

#[tokio::test]
async fn missing_key_sends_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 1 })))
        .expect(0)
        .mount(&server)
        .await;

    let lookup = CourtListenerLookup::with_base_url(None, &server.uri(), 5);
    let checks = verify_citations(&lookup, &citations(&["42 U.S.C. § 3604"]), &fast_options(3)).await;
    assert!(!checks[0].verified);
    assert_eq!(checks[0].attempts, 1);
}

#[tokio::test]
async fn confirmed_lookup_upgrades_an_unsupported_citation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 3 })))
        .mount(&server)
        .await;

    let lookup = CourtListenerLookup::with_base_url(Some("test-key"), &server.uri(), 5);
    let verifier = CritiqueVerifier::default();
    let offline = verifier.audit(FABRICATED_CLAIM, "California", "");
    let online = verifier
        .audit_with_lookup(FABRICATED_CLAIM, "California", "", &lookup, &fast_options(0))
        .await;

    assert!(!offline.statute_issues[0].is_verified);
    assert!(online.statute_issues[0].is_verified);
    assert!(online.overall_confidence > offline.overall_confidence);
}
