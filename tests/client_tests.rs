//! HTTP contract tests for `HttpClient` against a wiremock server.

use serde_json::json;
use std::rc::Rc;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use feedback_lens::api::{
    MultimodalRequest, Upload, AUDIO_PATH, CHAT_PATH, HEALTH_PATH, MULTIMODAL_PATH, TEXT_PATH,
};
use feedback_lens::client::{AnalysisApi, ChatApi, HttpClient};
use feedback_lens::error::{ANALYSIS_FALLBACK_DETAIL, CHAT_FALLBACK_DETAIL};
use feedback_lens::forms::AnalysisForms;
use feedback_lens::page::{ids, MemoryPage, Page};
use feedback_lens::ui::PageUi;
use feedback_lens::UiError;

fn text_body() -> serde_json::Value {
    json!({
        "success": true,
        "sentimiento": {"clasificacion": "positivo", "emoji": "😊", "score": 0.7, "intensidad": 0.9},
        "entidades": [],
        "categoria": "Producto",
        "recomendacion": "Mantener"
    })
}

async fn received_body(server: &MockServer) -> String {
    let requests = server.received_requests().await.expect("recording enabled");
    let last = requests.last().expect("one request");
    String::from_utf8_lossy(&last.body).into_owned()
}

#[tokio::test]
async fn test_chat_posts_message_and_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(body_string_contains("name=\"message\""))
        .and(body_string_contains("name=\"session_id\""))
        .and(body_string_contains("session_1_abcdefghi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "¡Hola!",
            "timestamp": "2024-01-01T00:00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(server.uri());
    let reply = client
        .send_message("hola", "session_1_abcdefghi")
        .await
        .expect("reply");
    assert_eq!(reply, "¡Hola!");
}

#[tokio::test]
async fn test_chat_error_without_detail_uses_chat_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let err = HttpClient::new(server.uri())
        .send_message("hola", "s")
        .await
        .expect_err("should fail");
    assert_eq!(err.status(), Some(503));
    assert_eq!(err.to_string(), CHAT_FALLBACK_DETAIL);
}

#[tokio::test]
async fn test_text_analysis_decodes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .and(body_string_contains("name=\"text\""))
        .and(body_string_contains("Muy buen producto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_body()))
        .expect(1)
        .mount(&server)
        .await;

    let result = HttpClient::new(server.uri())
        .analyze_text("Muy buen producto")
        .await
        .expect("analysis");
    assert_eq!(result.sentiment.classification, "positivo");
    assert_eq!(result.category, "Producto");
}

#[tokio::test]
async fn test_audio_sent_as_file_part() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(AUDIO_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "transcripcion": "hola",
            "confianza_audio": 0.9,
            "sentimiento": {"clasificacion": "neutral", "score": 0.0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let upload = Upload::new("nota.wav", "audio/wav", b"RIFFdata".to_vec());
    let result = HttpClient::new(server.uri())
        .analyze_audio(upload)
        .await
        .expect("analysis");
    assert_eq!(result.transcription, "hola");

    let body = received_body(&server).await;
    assert!(body.contains("name=\"file\"; filename=\"nota.wav\""), "{body}");
    assert!(body.contains("Content-Type: audio/wav"), "{body}");
    assert!(body.contains("RIFFdata"));
}

#[tokio::test]
async fn test_multimodal_sends_only_present_parts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MULTIMODAL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "apis_usadas": ["Cloud Natural Language", "Cloud Vision"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = MultimodalRequest {
        text: Some("hola".into()),
        audio: None,
        image: Some(Upload::new("foto.png", "image/png", b"PNGDATA".to_vec())),
    };
    let result = HttpClient::new(server.uri())
        .analyze_multimodal(request)
        .await
        .expect("analysis");
    assert_eq!(result.apis_used.len(), 2);

    let body = received_body(&server).await;
    assert!(body.contains("name=\"text\""));
    assert!(body.contains("name=\"image_file\"; filename=\"foto.png\""));
    assert!(!body.contains("audio_file"));
}

#[tokio::test]
async fn test_server_detail_becomes_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "bad file"})))
        .mount(&server)
        .await;

    match HttpClient::new(server.uri()).analyze_text("x").await {
        Err(UiError::Server { status, detail }) => {
            assert_eq!(status, 400);
            assert_eq!(detail, "bad file");
        }
        other => panic!("expected server error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_without_detail_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "x"})))
        .mount(&server)
        .await;

    let err = HttpClient::new(server.uri())
        .analyze_text("x")
        .await
        .expect_err("should fail");
    assert_eq!(err.to_string(), ANALYSIS_FALLBACK_DETAIL);
}

#[tokio::test]
async fn test_malformed_success_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    match HttpClient::new(server.uri()).analyze_text("x").await {
        Err(UiError::Decode { endpoint, .. }) => assert_eq!(endpoint, TEXT_PATH),
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let err = HttpClient::new("http://127.0.0.1:1")
        .analyze_text("x")
        .await
        .expect_err("should fail");
    assert!(matches!(err, UiError::Transport { .. }), "{err:?}");
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(HEALTH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "apis": ["Natural Language", "Speech-to-Text", "Vision"],
            "chatbot": "enabled",
            "chatbot_mode": "simple"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let health = HttpClient::new(server.uri()).health().await.expect("health");
    assert!(health.is_ok());
    assert_eq!(health.apis.len(), 3);
    assert_eq!(health.chatbot_mode.as_deref(), Some("simple"));
}

#[tokio::test]
async fn test_form_over_http_alerts_server_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(AUDIO_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "bad file"})))
        .expect(1)
        .mount(&server)
        .await;

    let page = Rc::new(MemoryPage::with_layout());
    let ui = Rc::new(PageUi::new(Rc::clone(&page)));
    let forms =
        AnalysisForms::new(Rc::clone(&page), HttpClient::new(server.uri()), ui).expect("forms");
    page.select_file(
        ids::INPUT_AUDIO,
        Upload::new("nota.wav", "audio/wav", b"RIFF".to_vec()),
    );

    assert!(!forms.submit_audio().await.is_rendered());
    assert_eq!(page.alerts(), vec!["Error: bad file".to_string()]);
    assert!(page.has_class(ids::LOADING_OVERLAY, ids::HIDDEN));
}
