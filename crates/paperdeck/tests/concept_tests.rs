//! Concept extractor tests against a mocked analysis backend.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use paperdeck::client::AnalysisClient;
use paperdeck::config::Config;
use paperdeck::error::ServiceError;
use paperdeck::pipeline::extract_concepts;

fn analysis_client(mock_server: &MockServer) -> AnalysisClient {
    let config = Config::for_testing(&mock_server.uri());
    AnalysisClient::new(&config).unwrap()
}

fn fenced(concepts: &[&str]) -> String {
    let inner = json!({ "main_concepts": concepts }).to_string();
    format!("```json\n{inner}\n```")
}

#[tokio::test]
async fn test_extracts_concepts_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/semantic_parts"))
        .and(body_partial_json(json!({ "user_query": "effects of smoking on health" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": fenced(&["smoking health effects", "tobacco policy"])
        })))
        .mount(&mock_server)
        .await;

    let client = analysis_client(&mock_server);
    let concepts = extract_concepts(&client, "effects of smoking on health").await.unwrap();

    assert_eq!(concepts, vec!["smoking health effects", "tobacco policy"]);
}

#[tokio::test]
async fn test_extraction_is_idempotent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/semantic_parts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": fenced(&["a", "b", "c"])
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = analysis_client(&mock_server);
    let first = extract_concepts(&client, "same thesis").await.unwrap();
    let second = extract_concepts(&client, "same thesis").await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_empty_concept_list_is_not_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/semantic_parts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": fenced(&[])
        })))
        .mount(&mock_server)
        .await;

    let client = analysis_client(&mock_server);
    let concepts = extract_concepts(&client, "obscure thesis").await.unwrap();
    assert!(concepts.is_empty());
}

#[tokio::test]
async fn test_missing_fenced_json_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/semantic_parts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "Sorry, I could not parse that thesis."
        })))
        .mount(&mock_server)
        .await;

    let client = analysis_client(&mock_server);
    let err = extract_concepts(&client, "thesis").await.unwrap_err();
    assert!(matches!(err, ServiceError::Unavailable(_)));
}

#[tokio::test]
async fn test_missing_response_field_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/semantic_parts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": "nope" })))
        .mount(&mock_server)
        .await;

    let client = analysis_client(&mock_server);
    let err = extract_concepts(&client, "thesis").await.unwrap_err();
    assert!(matches!(err, ServiceError::Unavailable(_)));
}

#[tokio::test]
async fn test_upstream_rejection_surfaces_without_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/semantic_parts"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend down"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = analysis_client(&mock_server);
    let err = extract_concepts(&client, "thesis").await.unwrap_err();
    assert!(matches!(err, ServiceError::Client(_)));
}
