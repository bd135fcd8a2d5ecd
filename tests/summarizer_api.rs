use profile_analyzer::{AnalysisKind, AnalyzerError, GeminiSummarizer, ProfileFields, Summarize};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fields() -> ProfileFields {
    ProfileFields {
        name: "Jane Doe".to_string(),
        headline: "Staff Engineer at Example Corp".to_string(),
        about: "Builds data platforms.".to_string(),
        experience: "Staff Engineer at Example Corp".to_string(),
        skills: "Rust; SQL".to_string(),
        education: "BSc Computer Science".to_string(),
    }
}

fn client(server: &MockServer) -> GeminiSummarizer {
    GeminiSummarizer::new("test-key".to_string(), "gemini-test".to_string())
        .unwrap()
        .with_base_url(server.uri())
}

fn generated(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn summarize_returns_generated_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-test:generateContent"))
        .and(query_param("key", "test-key"))
        .and(body_string_contains("Jane Doe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(generated("A concise bio.")))
        .expect(1)
        .mount(&server)
        .await;

    let text = client(&server)
        .summarize(&fields(), AnalysisKind::Bio)
        .await
        .unwrap();

    assert_eq!(text, "A concise bio.");
}

#[tokio::test]
async fn quota_exhaustion_is_a_summarizer_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = client(&server)
        .summarize(&fields(), AnalysisKind::Summary)
        .await
        .unwrap_err();

    match err {
        AnalyzerError::Summarizer(msg) => assert!(msg.contains("quota")),
        other => panic!("expected Summarizer, got {:?}", other),
    }
}

#[tokio::test]
async fn rejected_key_is_a_summarizer_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = client(&server)
        .summarize(&fields(), AnalysisKind::Bio)
        .await
        .unwrap_err();

    match err {
        AnalyzerError::Summarizer(msg) => assert!(msg.contains("API key")),
        other => panic!("expected Summarizer, got {:?}", other),
    }
}

#[tokio::test]
async fn empty_candidate_list_is_a_summarizer_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "candidates": [] })),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .summarize(&fields(), AnalysisKind::Analysis)
        .await
        .unwrap_err();

    match err {
        AnalyzerError::Summarizer(msg) => assert!(msg.contains("no candidates")),
        other => panic!("expected Summarizer, got {:?}", other),
    }
}

#[tokio::test]
async fn blank_generated_text_is_a_summarizer_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(generated("   ")))
        .mount(&server)
        .await;

    let err = client(&server)
        .summarize(&fields(), AnalysisKind::Bio)
        .await
        .unwrap_err();

    match err {
        AnalyzerError::Summarizer(msg) => assert!(msg.contains("empty")),
        other => panic!("expected Summarizer, got {:?}", other),
    }
}

#[tokio::test]
async fn all_empty_fields_still_produce_a_request_not_a_crash() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("(not provided)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(generated(
            "Little information is available about this profile.",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let text = client(&server)
        .summarize(&ProfileFields::default(), AnalysisKind::Summary)
        .await
        .unwrap();

    assert!(text.contains("Little information"));
}
