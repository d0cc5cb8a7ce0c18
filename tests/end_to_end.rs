//! Questionnaire values -> mapped payload -> provider -> recommendations.

use std::sync::{Arc, Mutex};

use axum::{body::Bytes, extract::State, http::header, response::IntoResponse, routing::post, Router};
use giftwise::config::GatewayConfig;
use giftwise::server::{app_router, AppState};
use giftwise::{Budget, GiftAssistant, PayloadMapper, RawFormValues, RecommendationGateway};
use serde_json::{json, Value};
use tower::ServiceExt;

type Captured = Arc<Mutex<Vec<Value>>>;

/// Provider stand-in answering with five well-formed items.
async fn spawn_provider() -> (String, Captured) {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));

    async fn handle(State(captured): State<Captured>, body: Bytes) -> impl IntoResponse {
        captured
            .lock()
            .unwrap()
            .push(serde_json::from_slice(&body).unwrap_or(Value::Null));

        let items: Vec<Value> = (1..=5)
            .map(|i| {
                json!({
                    "title": format!("Idea {}", i),
                    "description": "A thoughtful pick",
                    "approx_price": 10 + i * 3,
                    "reason": "Matches their love of coffee",
                })
            })
            .collect();
        let envelope = json!({
            "choices": [{"message": {"role": "assistant", "content": json!({"items": items}).to_string()}}]
        });
        (
            [(header::CONTENT_TYPE, "application/json")],
            envelope.to_string(),
        )
    }

    let app = Router::new()
        .route("/api/v1/chat/completions", post(handle))
        .with_state(captured.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/api/v1", addr), captured)
}

fn reference_form() -> RawFormValues {
    serde_json::from_value(json!({
        "relationship": "Colleague / Boss",
        "ageRange": "25–34",
        "budget": "10-25",
        "giftStyle": "Useful",
        "interests": ["Coffee & tea"]
    }))
    .unwrap()
}

fn assistant(base_url: String) -> GiftAssistant {
    let gateway = RecommendationGateway::new(
        GatewayConfig::default()
            .with_api_key("sk-e2e")
            .with_base_url(base_url),
    )
    .unwrap();
    GiftAssistant::new(PayloadMapper::default(), gateway)
}

#[tokio::test]
async fn test_reference_scenario_end_to_end() {
    let (base_url, captured) = spawn_provider().await;
    let assistant = assistant(base_url);

    let payload = assistant.preview(&reference_form());
    assert_eq!(payload.recipient.relationship, "colleague");
    assert_eq!(payload.budget, Budget::new(10.0, 25.0));
    assert_eq!(payload.interests, vec!["coffee_tea"]);

    let recs = assistant.submit(&reference_form()).await.unwrap();
    assert_eq!(recs.len(), 5);
    let titles: Vec<_> = recs.iter().map(|r| r.title.clone()).collect();
    assert_eq!(titles, vec!["Idea 1", "Idea 2", "Idea 3", "Idea 4", "Idea 5"]);

    let sent = captured.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let user = sent[0]["messages"][1]["content"].as_str().unwrap();
    let embedded: Value = serde_json::from_str(user.split_once('\n').unwrap().1).unwrap();
    assert_eq!(embedded["recipient"]["relationship"], "colleague");
    assert_eq!(embedded["budget"], json!({"min": 10.0, "max": 25.0}));
    assert_eq!(embedded["interests"], json!(["coffee_tea"]));
}

#[tokio::test]
async fn test_show_more_ideas_reissues_full_flow() {
    let (base_url, captured) = spawn_provider().await;
    let assistant = assistant(base_url);

    let first = assistant.submit(&reference_form()).await.unwrap();
    let second = assistant.refetch(&reference_form(), 1).await.unwrap();
    assert_eq!(first.len(), 5);
    assert_eq!(second.len(), 5);
    assert_eq!(captured.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_http_surface_end_to_end() {
    let (base_url, _captured) = spawn_provider().await;
    let app = app_router(AppState::new(assistant(base_url)));

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/gift-ideas")
        .header("Content-Type", "application/json")
        .body(axum::body::Body::from(
            json!({"form": serde_json::to_value(reference_form()).unwrap(), "variant": 0}).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["items"].as_array().unwrap().len(), 5);
    assert_eq!(json["items"][4]["approx_price"], 25.0);
}
