//! Transport, fallback and failure-reporting behaviour per environment.

use std::sync::Arc;

use serde_json::Value;

use logistics_client::http::{ErrorCategory, OutboundRequest, Payload, RequestClient};
use logistics_client::storage::{KeyValueStore, MemoryStore, TOKEN_KEY};

mod common;

use common::RecordingNotifier;

fn client(config: &logistics_client::ClientConfig) -> (RequestClient, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let client = RequestClient::new(config, Arc::new(MemoryStore::new()))
        .unwrap()
        .with_notifier(notifier.clone());
    (client, notifier)
}

#[tokio::test]
async fn test_remote_envelope_passthrough() {
    let (addr, captured) = common::start_fixed_backend(
        200,
        r#"{"code":200,"message":"from remote","data":{"list":[],"total":0,"page":1,"pageSize":10}}"#,
    )
    .await;
    let (client, _) = client(&common::developer_config(addr));

    let envelope = client.orders().list(&Default::default()).await.unwrap();
    assert_eq!(envelope.message, "from remote");
    assert_eq!(envelope.data.unwrap().total, 0);

    let requests = captured.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with("GET /api/orders "));
}

#[tokio::test]
async fn test_remote_non_envelope_is_raw() {
    let (addr, _) = common::start_fixed_backend(200, r#"{"items":[1,2,3]}"#).await;
    let (client, _) = client(&common::developer_config(addr));

    let payload = client.send(OutboundRequest::get("/anything")).await.unwrap();
    match payload {
        Payload::Raw(value) => assert_eq!(value["items"][2], 3),
        other => panic!("expected raw payload, got {other:?}"),
    }
}

#[tokio::test]
async fn test_remote_domain_miss_is_not_an_error() {
    let (addr, _) = common::start_fixed_backend(200, r#"{"code":404,"message":"order not found"}"#).await;
    let (client, notifier) = client(&common::developer_config(addr));

    let envelope = client.orders().get("ORD404").await.unwrap();
    assert_eq!(envelope.code, 404);
    assert!(envelope.data.is_none());
    assert_eq!(notifier.count(), 0);
}

#[tokio::test]
async fn test_developer_mode_recovers_server_error() {
    let (addr, _) = common::start_fixed_backend(500, r#"{"message":"boom"}"#).await;
    let (client, notifier) = client(&common::developer_config(addr));

    let order = client.orders().get("ORD202401001").await.unwrap().data.unwrap();
    assert_eq!(order.customer_name, "Shanghai Steel Trading Co.");
    assert_eq!(notifier.count(), 0);
}

#[tokio::test]
async fn test_developer_mode_recovers_unreachable_backend() {
    let addr = common::closed_address().await;
    let (client, _) = client(&common::developer_config(addr));

    let stats = client.tracking().statistics().await.unwrap();
    assert_eq!(stats.code, 200);
}

#[tokio::test]
async fn test_developer_mode_notifies_when_fallback_misses() {
    let addr = common::closed_address().await;
    let (client, notifier) = client(&common::developer_config(addr));

    let err = client.send(OutboundRequest::get("/no/such/route")).await.unwrap_err();
    assert_eq!(err.category(), Some(ErrorCategory::Network));
    assert_eq!(notifier.count(), 1);
    assert!(notifier.messages.lock().unwrap()[0].starts_with("Network error"));
}

#[tokio::test]
async fn test_deployed_with_address_never_falls_back() {
    let (addr, _) = common::start_fixed_backend(503, "unavailable").await;
    let (client, notifier) = client(&common::deployed_config(Some(addr)));

    let err = client.orders().get("ORD202401001").await.unwrap_err();
    assert_eq!(err.category(), Some(ErrorCategory::ServerError));
    assert_eq!(err.user_message(), "Server error");
    assert_eq!(notifier.count(), 0);
}

#[tokio::test]
async fn test_deployed_status_classification() {
    for (status, category) in [
        (401, ErrorCategory::Unauthorized),
        (403, ErrorCategory::Forbidden),
        (404, ErrorCategory::NotFound),
        (500, ErrorCategory::ServerError),
    ] {
        let (addr, _) = common::start_programmable_backend(move |_| async move {
            (status, r#"{"code":0,"message":"remote says no"}"#.to_string())
        })
        .await;
        let (client, _) = client(&common::deployed_config(Some(addr)));
        let err = client.send(OutboundRequest::get("/orders")).await.unwrap_err();
        assert_eq!(err.category(), Some(category), "status {status}");
    }
}

#[tokio::test]
async fn test_deployed_without_address_uses_synthetic() {
    let (client, _) = client(&common::deployed_config(None));

    assert!(client.policy().fallback_eligible);
    let page = client.carriers().list(&Default::default()).await.unwrap().data.unwrap();
    assert_eq!(page.total, 3);
}

#[tokio::test]
async fn test_bearer_token_reaches_backend() {
    let (addr, captured) = common::start_fixed_backend(200, r#"{"code":200,"message":"ok"}"#).await;
    let store = Arc::new(MemoryStore::new());
    store.set(TOKEN_KEY, Value::String("abc123".into())).unwrap();
    let client = RequestClient::new(&common::developer_config(addr), store).unwrap();

    client.send(OutboundRequest::get("/orders")).await.unwrap();

    let requests = captured.lock().unwrap();
    let head = requests[0].to_ascii_lowercase();
    assert!(head.contains("authorization: bearer abc123"));
    assert!(head.contains("x-request-id: "));
    assert!(head.contains("content-type: application/json"));
}

#[tokio::test]
async fn test_query_and_body_on_the_wire() {
    let (addr, captured) = common::start_fixed_backend(200, r#"{"code":200,"message":"ok"}"#).await;
    let (client, _) = client(&common::developer_config(addr));

    let request = OutboundRequest::post("/orders")
        .with_param("source", "cli")
        .with_body(serde_json::json!({"customerName": "Harbor Metals"}));
    client.send(request).await.unwrap();

    let requests = captured.lock().unwrap();
    assert!(requests[0].starts_with("POST /api/orders?source=cli "));
    assert!(requests[0].ends_with(r#"{"customerName":"Harbor Metals"}"#));
}
