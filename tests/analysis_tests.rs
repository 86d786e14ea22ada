//! Analysis client integration tests against a mock Gemini server

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use talk_advisor::application::ports::{AnalysisClient, AnalysisError};
use talk_advisor::domain::capture::{MediaMimeType, RecordedArtifact};
use talk_advisor::domain::scenario::ScenarioId;
use talk_advisor::infrastructure::GeminiClient;

const MODEL: &str = "test-model";

fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::with_model("test-key", MODEL).with_base_url(server.uri())
}

fn test_artifact() -> RecordedArtifact {
    RecordedArtifact::new(vec![0u8; 128], MediaMimeType::AudioFlac)
}

/// Wrap answer text in the Gemini response envelope
fn envelope(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "parts": [{ "text": text }]
            }
        }]
    })
}

fn generate_path() -> String {
    format!("/{}:generateContent", MODEL)
}

const MEDIA_ANSWER: &str = r#"{
    "totalScore": 82,
    "metrics": {"clarity": 8, "confidence": 7, "empathy": 9, "logic": 8},
    "feedback": "落ち着いた話し方です。",
    "strengths": ["明瞭な発音", "適切な敬語"],
    "improvements": ["結論を先に述べる"],
    "transcription": "本日はよろしくお願いします。"
}"#;

const TRANSCRIPT_ANSWER: &str = r#"{
    "scores": [
        {"label": "信頼感", "value": 8},
        {"label": "結論先行", "value": 6}
    ],
    "summary": "丁寧な自己紹介でした。",
    "advice": "結論から話し始めましょう。",
    "beforeAfter": [
        {"before": "えっと、私は", "after": "私は", "reason": "冒頭の迷いを消す"}
    ]
}"#;

#[tokio::test]
async fn media_evaluation_parses_structured_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(MEDIA_ANSWER)))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let report = client
        .evaluate_media(&test_artifact(), ScenarioId::Interview.profile())
        .await
        .unwrap();

    assert_eq!(report.total_score, 82.0);
    assert_eq!(report.metrics.empathy, 9.0);
    assert_eq!(report.strengths.len(), 2);
    assert_eq!(report.transcription, "本日はよろしくお願いします。");
}

#[tokio::test]
async fn transcript_evaluation_parses_plain_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(TRANSCRIPT_ANSWER)))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let report = client
        .evaluate_transcript("本日はよろしくお願いします", ScenarioId::Interview.profile())
        .await
        .unwrap();

    assert_eq!(report.scores[0].label, "信頼感");
    assert_eq!(report.before_after[0].after, "私は");
}

#[tokio::test]
async fn transcript_evaluation_strips_markdown_fences() {
    let server = MockServer::start().await;
    let fenced = format!("```json\n{}\n```", TRANSCRIPT_ANSWER);
    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&fenced)))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let report = client
        .evaluate_transcript("テストの発言です", ScenarioId::Daily.profile())
        .await
        .unwrap();

    assert_eq!(report.summary, "丁寧な自己紹介でした。");
}

#[tokio::test]
async fn unauthorized_maps_to_invalid_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .evaluate_transcript("テストの発言です", ScenarioId::Daily.profile())
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::InvalidApiKey));
}

#[tokio::test]
async fn too_many_requests_maps_to_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .evaluate_media(&test_artifact(), ScenarioId::Sales.profile())
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::RateLimited));
}

#[tokio::test]
async fn server_error_maps_to_request_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .evaluate_media(&test_artifact(), ScenarioId::Debate.profile())
        .await
        .unwrap_err();

    match err {
        AnalysisError::RequestFailed { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("internal error"));
        }
        other => panic!("Expected RequestFailed, got: {:?}", other),
    }
}

#[tokio::test]
async fn empty_candidates_map_to_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": []
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .evaluate_transcript("テストの発言です", ScenarioId::Trouble.profile())
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::EmptyResponse));
}

#[tokio::test]
async fn non_json_answer_maps_to_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope("すみません、評価できません。")),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .evaluate_transcript("テストの発言です", ScenarioId::Presentation.profile())
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::MalformedResponse(_)));
}

#[tokio::test]
async fn answer_missing_required_field_maps_to_malformed_response() {
    let server = MockServer::start().await;
    // totalScore is absent
    let partial = r#"{"metrics": {"clarity": 8, "confidence": 7, "empathy": 9, "logic": 8},
        "feedback": "", "strengths": [], "improvements": [], "transcription": ""}"#;
    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(partial)))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .evaluate_media(&test_artifact(), ScenarioId::Interview.profile())
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::MalformedResponse(_)));
}
