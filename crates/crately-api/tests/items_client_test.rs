// Integration tests for `ItemsClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crately_api::models::{ItemCreateUpdate, ItemResponse};
use crately_api::{Error, ItemsClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ItemsClient) {
    let server = MockServer::start().await;
    let client = ItemsClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn bolt_json() -> serde_json::Value {
    json!({ "id": 1, "name": "Bolt", "quantity": 10, "price": 0.5, "category": "Hardware" })
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_items() {
    let (server, client) = setup().await;

    let body = json!([
        bolt_json(),
        { "id": 2, "name": "Nut", "quantity": 100, "price": 0.1, "category": "Hardware" },
    ]);

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let items: Vec<ItemResponse> = client.list_items().await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, 1);
    assert_eq!(items[0].name, "Bolt");
    assert_eq!(items[1].quantity, 100);
    assert_eq!(items[1].category, "Hardware");
}

#[tokio::test]
async fn test_create_item() {
    let (server, client) = setup().await;

    let req = ItemCreateUpdate {
        name: "Washer".into(),
        quantity: 250,
        price: 0.05,
        category: "Hardware".into(),
    };

    let response_body = json!({
        "id": 3, "name": "Washer", "quantity": 250, "price": 0.05, "category": "Hardware"
    });

    Mock::given(method("POST"))
        .and(path("/items"))
        .and(body_json(&req))
        .respond_with(ResponseTemplate::new(201).set_body_json(&response_body))
        .mount(&server)
        .await;

    let created = client.create_item(&req).await.unwrap();

    assert_eq!(created.id, 3);
    assert_eq!(created.name, "Washer");
    assert_eq!(created.quantity, 250);
}

#[tokio::test]
async fn test_update_item() {
    let (server, client) = setup().await;

    let req = ItemCreateUpdate {
        name: "Bolt M8".into(),
        quantity: 12,
        price: 0.6,
        category: "Hardware".into(),
    };

    let response_body = json!({
        "id": 1, "name": "Bolt M8", "quantity": 12, "price": 0.6, "category": "Hardware"
    });

    Mock::given(method("PUT"))
        .and(path("/items/1"))
        .and(body_json(&req))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
        .mount(&server)
        .await;

    let updated = client.update_item(1, &req).await.unwrap();

    assert_eq!(updated.id, 1);
    assert_eq!(updated.name, "Bolt M8");
}

#[tokio::test]
async fn test_delete_item() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/items/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "deleted" })))
        .mount(&server)
        .await;

    client.delete_item(7).await.unwrap();
}

// ── Error-mapping tests ─────────────────────────────────────────────

#[tokio::test]
async fn test_update_missing_item_maps_to_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/items/99"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "item not found" })),
        )
        .mount(&server)
        .await;

    let req = ItemCreateUpdate {
        name: "Ghost".into(),
        quantity: 1,
        price: 1.0,
        category: "Misc".into(),
    };

    let err = client.update_item(99, &req).await.unwrap_err();

    assert!(err.is_not_found());
    match err {
        Error::Rejected { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "item not found");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rejected_create_maps_to_validation() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/items"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "name is required" })),
        )
        .mount(&server)
        .await;

    let req = ItemCreateUpdate {
        name: String::new(),
        quantity: 0,
        price: 0.0,
        category: "Misc".into(),
    };

    let err = client.create_item(&req).await.unwrap_err();

    assert!(err.is_validation());
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_non_json_error_body_is_preserved() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/items/1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal server error"))
        .mount(&server)
        .await;

    let err = client.delete_item(1).await.unwrap_err();

    match err {
        Error::Rejected { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "internal server error");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_maps_to_deserialization() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let err = client.list_items().await.unwrap_err();

    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "not json at all"),
        other => panic!("expected Deserialization, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_transient() {
    // Port from a server that has been shut down — connection refused.
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = ItemsClient::from_reqwest(&uri, reqwest::Client::new()).unwrap();
    let err = client.list_items().await.unwrap_err();

    assert!(err.is_transient());
}
