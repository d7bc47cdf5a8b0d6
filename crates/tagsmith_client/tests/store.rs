use pretty_assertions::assert_eq;
use serde_json::json;
use tagsmith_client::{ApiClient, ApiSettings, HistoryDraft, PromptsConfig, RequestKind, StoreError};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), ApiSettings::default()).expect("client")
}

#[tokio::test]
async fn fetch_history_decodes_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 2,
                "title": "example.com/news",
                "date_str": "5 August 2026",
                "full_input": "https://example.com/news",
                "output": "tags",
                "type": "url",
                "created_at": "2026-08-05T10:00:00"
            },
            {
                "id": 1,
                "title": "Untitled 1",
                "date_str": "4 August 2026",
                "full_input": "pasted words",
                "output": "more tags",
                "type": "text"
            }
        ])))
        .mount(&server)
        .await;

    let items = client(&server).fetch_history().await.expect("history");

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, 2);
    assert_eq!(items[0].kind, RequestKind::Url);
    assert_eq!(items[0].created_at.as_deref(), Some("2026-08-05T10:00:00"));
    assert_eq!(items[1].kind, RequestKind::Text);
    assert_eq!(items[1].created_at, None);
}

#[tokio::test]
async fn save_history_posts_the_draft_and_returns_the_created_item() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/history"))
        .and(body_json(json!({
            "title": "example.com",
            "date_str": "5 August 2026",
            "full_input": "https://example.com",
            "output": "tags",
            "type": "url"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "title": "example.com",
            "date_str": "5 August 2026",
            "full_input": "https://example.com",
            "output": "tags",
            "type": "url"
        })))
        .mount(&server)
        .await;

    let draft = HistoryDraft {
        title: "example.com".to_string(),
        date_str: "5 August 2026".to_string(),
        full_input: "https://example.com".to_string(),
        output: "tags".to_string(),
        kind: RequestKind::Url,
    };
    let created = client(&server).save_history(&draft).await.expect("saved");
    assert_eq!(created.id, 7);
}

#[tokio::test]
async fn update_title_puts_only_the_title() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/history/7"))
        .and(body_json(json!({"title": "Renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "title": "Renamed",
            "date_str": "5 August 2026",
            "full_input": "https://example.com",
            "output": "tags",
            "type": "url"
        })))
        .mount(&server)
        .await;

    client(&server)
        .update_title(7, "Renamed")
        .await
        .expect("updated");
}

#[tokio::test]
async fn update_title_maps_missing_item_to_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/history/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client(&server).update_title(99, "x").await.unwrap_err();
    assert!(matches!(err, StoreError::Status(404)));
}

#[tokio::test]
async fn delete_item_hits_the_id_route() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/history/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).delete_item(3).await.expect("deleted");
    server.verify().await;
}

#[tokio::test]
async fn prompts_roundtrip() {
    let server = MockServer::start().await;
    let config = PromptsConfig {
        openai_system: "analyze".to_string(),
        openai_user: "text follows".to_string(),
        anthropic_system: "generate".to_string(),
        anthropic_user: "use the analysis".to_string(),
    };
    Mock::given(method("GET"))
        .and(path("/api/prompts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "openai_system": "analyze",
            "openai_user": "text follows",
            "anthropic_system": "generate",
            "anthropic_user": "use the analysis"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/prompts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "success", "message": "updated"})),
        )
        .mount(&server)
        .await;

    let fetched = client(&server).fetch_prompts().await.expect("prompts");
    assert_eq!(fetched, config);
    client(&server).save_prompts(&config).await.expect("saved");
}

#[tokio::test]
async fn prompts_save_rejection_carries_the_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/prompts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "error", "message": "read-only config"})),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .save_prompts(&PromptsConfig::default())
        .await
        .unwrap_err();
    match err {
        StoreError::Rejected(message) => assert_eq!(message, "read-only config"),
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn store_calls_map_non_success_statuses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/history"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server).fetch_history().await.unwrap_err();
    assert!(matches!(err, StoreError::Status(500)));
}
