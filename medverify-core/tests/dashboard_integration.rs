//! End-to-end dashboard tests against a mock verification service.
//!
//! These run the real HTTP client and coordinator with a shortened stage
//! schedule, so they exercise the wire format and the rendering of whatever
//! the service returns.

use std::sync::Arc;

use medverify_core::config::{ServiceConfig, StageConfig};
use medverify_core::error::{CONNECTION_MESSAGE, EMPTY_INPUT_MESSAGE};
use medverify_core::{
    AnalysisStage, Coordinator, ErrorKind, HttpVerificationClient, MedVerifyConfig, SeverityBand,
    VerifyError,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MMR_CLAIM: &str = "The MMR vaccine causes autism.";

fn fast_stages() -> StageConfig {
    StageConfig {
        stage_interval_ms: 20,
        finish_delay_ms: 30,
    }
}

fn coordinator_for(endpoint: String) -> Coordinator {
    let service = ServiceConfig {
        endpoint,
        ..ServiceConfig::default()
    };
    let client = HttpVerificationClient::new(&service).expect("client should build");
    Coordinator::new(Arc::new(client), fast_stages())
}

// ===========================================================================
// TEST 1: MMR claim renders as a red, highly unreliable report
// ===========================================================================
#[tokio::test]
async fn test_mmr_claim_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/medverify/check"))
        .and(body_json(json!({ "input": MMR_CLAIM })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "credibility_score": 5,
            "llm_judgment": "Contradicted",
            "reasoning": "Multiple large studies found no link between MMR and autism.",
            "extracted_terms": ["MMR vaccine", "autism"],
            "source_origin": MMR_CLAIM
        })))
        .expect(1)
        .mount(&server)
        .await;

    let c = coordinator_for(format!("{}/medverify/check", server.uri()));
    let result = c.submit(MMR_CLAIM).await.expect("submission should succeed");
    assert_eq!(result.credibility_score, 5);

    let state = c.snapshot();
    assert!(!state.busy);
    assert!(state.error.is_none());
    assert_eq!(state.stage, AnalysisStage::FinalVerdict);

    let report = state.report().expect("result panel should render");
    assert_eq!(report.score_text, "5/100");
    assert_eq!(report.band, SeverityBand::Unreliable);
    assert_eq!(report.band.color_name(), "red");
    assert_eq!(report.verdict_label, "Highly Unreliable");
    assert_eq!(report.tags.len(), 2);
    assert_eq!(report.source_analyzed, MMR_CLAIM);
}

// ===========================================================================
// TEST 2: network rejection shows the generic connection error
// ===========================================================================
#[tokio::test]
async fn test_unreachable_service_shows_connection_error() {
    let c = coordinator_for("http://127.0.0.1:1/medverify/check".to_string());

    let err = c.submit(MMR_CLAIM).await.unwrap_err();
    assert!(matches!(err, VerifyError::Connection(_)));
    assert_eq!(err.to_string(), CONNECTION_MESSAGE);

    let state = c.snapshot();
    assert!(!state.busy);
    assert!(state.result.is_none());
    assert!(state.report().is_none());
    assert_eq!(state.stage, AnalysisStage::Idle);
    let error = state.error.expect("error should be shown");
    assert_eq!(error.kind, ErrorKind::Connection);
    assert_eq!(error.message, CONNECTION_MESSAGE);
}

// ===========================================================================
// TEST 3: a 500 from the service is indistinguishable to the user
// ===========================================================================
#[tokio::test]
async fn test_server_error_is_reported_as_connection_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "Internal server error during workflow execution.",
            "details": "quota exceeded"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let c = coordinator_for(format!("{}/medverify/check", server.uri()));
    let err = c.submit("sugar is good for health").await.unwrap_err();
    assert_eq!(err.to_string(), CONNECTION_MESSAGE);
    assert_eq!(c.snapshot().error.unwrap().message, CONNECTION_MESSAGE);
}

// ===========================================================================
// TEST 4: blank input sends zero requests
// ===========================================================================
#[tokio::test]
async fn test_blank_input_sends_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let c = coordinator_for(format!("{}/medverify/check", server.uri()));
    for blank in ["", "   ", "\n\t"] {
        let err = c.submit(blank).await.unwrap_err();
        assert!(matches!(err, VerifyError::EmptyInput));
    }
    assert_eq!(c.snapshot().error.unwrap().message, EMPTY_INPUT_MESSAGE);
}

// ===========================================================================
// TEST 5: service-side AI failure still renders, as inconclusive
// ===========================================================================
#[tokio::test]
async fn test_service_error_judgment_renders_inconclusive() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "credibility_score": 0,
            "llm_judgment": "ERROR",
            "trusted_reference": "API Unavailable",
            "reasoning": "AI client failed to initialize due to missing API Key.",
            "source_origin": "User-submitted Text (Linguistically Assessed)",
            "claims_processed": 1,
            "extracted_terms": [],
            "debug_message": "Full 5-Stage pipeline executed with stability fallback."
        })))
        .mount(&server)
        .await;

    let c = coordinator_for(format!("{}/medverify/check", server.uri()));
    let result = c.submit("Does drinking lemon water cure cancer?").await.unwrap();
    assert!(result.is_service_failure());

    let report = c.snapshot().report().unwrap();
    assert_eq!(report.verdict_label, "Analysis Inconclusive");
    assert!(report.tags.is_empty());
    assert_eq!(report.trusted_reference.as_deref(), Some("API Unavailable"));
}

// ===========================================================================
// TEST 6: from_config wires the configured endpoint
// ===========================================================================
#[tokio::test]
async fn test_from_config_uses_configured_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Welcome"))
        .mount(&server)
        .await;

    let mut config = MedVerifyConfig::default();
    config.service.endpoint = format!("{}/medverify/check", server.uri());
    config.stages = fast_stages();

    let (_coordinator, client) = Coordinator::from_config(&config).unwrap();
    assert_eq!(client.endpoint(), config.service.endpoint);
    assert_eq!(client.ping().await.unwrap(), "Welcome");
}
