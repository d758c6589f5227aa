//! Integration tests for augmented README summaries against a mock generation endpoint.

use artifact_rank::metrics::scorers::{HttpSummaryClient, MISSING_EXAMPLES, ReadmeAssessment, ReadmeRisk};
use core::time::Duration;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "llama3.2";

const README: &str = "# Sentiment classifier\n\nA small text classifier fine-tuned on product reviews.\n\n\
                      ## Usage\n\nLoad the weights and call `predict` on a list of sentences. Apache-2.0 license.\n";

fn risk_for(server: &MockServer, timeout: Duration) -> ReadmeRisk {
    let endpoint = format!("{}/api/generate", server.uri());
    ReadmeRisk::augmented(HttpSummaryClient::new(&endpoint, MODEL, timeout).unwrap())
}

/// Metrics run on blocking threads, so the assessment is driven from one here too.
async fn assess(risk: ReadmeRisk) -> ReadmeAssessment {
    tokio::task::spawn_blocking(move || risk.assess(README)).await.unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn well_formed_responses_are_used() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({ "model": MODEL, "stream": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "SUMMARY: A sentiment classifier for product reviews with usage notes.\nRISK_FLAGS: missing_examples"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let assessment = assess(risk_for(&server, Duration::from_secs(5))).await;

    assert_eq!(assessment.summary, "A sentiment classifier for product reviews with usage notes.");
    assert_eq!(assessment.flags, vec![MISSING_EXAMPLES.to_string()]);
    assert!(assessment.score > 0.5 && assessment.score <= 0.8);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn malformed_responses_fall_back_to_the_heuristic() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "I am unable to review this file." })))
        .mount(&server)
        .await;

    let assessment = assess(risk_for(&server, Duration::from_secs(5))).await;
    assert!(assessment.summary.starts_with("Package includes: "));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn server_errors_fall_back_to_the_heuristic() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let assessment = assess(risk_for(&server, Duration::from_secs(5))).await;
    assert!(assessment.summary.starts_with("Package includes: "));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn slow_endpoints_fall_back_to_the_heuristic() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "response": "SUMMARY: too late\nRISK_FLAGS: none" }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let assessment = assess(risk_for(&server, Duration::from_millis(200))).await;
    assert!(assessment.summary.starts_with("Package includes: "));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn short_readmes_never_reach_the_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "SUMMARY: x\nRISK_FLAGS: none" })))
        .expect(0)
        .mount(&server)
        .await;

    let risk = risk_for(&server, Duration::from_secs(5));
    let assessment = tokio::task::spawn_blocking(move || risk.assess("tiny")).await.unwrap();
    assert!(assessment.flags.contains(&"missing_readme".to_string()));
}
