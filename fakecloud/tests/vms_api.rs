use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use fakecloud::{App, configuration::DatabaseSettings, database, handlers::app};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn test_app() -> Router {
    let pool = database::connect(&DatabaseSettings::in_memory())
        .await
        .expect("Failed to open in-memory database");
    database::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    app(App::new(pool))
}

fn json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn create_vm(app: &Router, name: &str, instance_type: &str) -> Value {
    let body = json!({ "name": name, "instance_type": instance_type }).to_string();
    let (status, body) = send(app, json_request(Method::POST, "/vms", &body)).await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn create_then_get_returns_identical_body() {
    let app = test_app().await;

    let (status, created) = send(
        &app,
        json_request(
            Method::POST,
            "/vms",
            r#"{"name":"web1","instance_type":"t2.micro"}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created: Value = serde_json::from_slice(&created).unwrap();
    assert_eq!(
        created,
        json!({ "id": 1, "name": "web1", "instance_type": "t2.micro" })
    );

    let (status, fetched) = send(&app, empty_request(Method::GET, "/vms/1")).await;
    assert_eq!(status, StatusCode::OK);
    let fetched: Value = serde_json::from_slice(&fetched).unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_ignores_client_supplied_id() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/vms",
            r#"{"id":99,"name":"web1","instance_type":"t2.micro"}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(created["id"], 1);
}

#[tokio::test]
async fn list_starts_empty_and_grows_with_creates() {
    let app = test_app().await;

    let (status, body) = send(&app, empty_request(Method::GET, "/vms")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!([]));

    let mut created = Vec::new();
    for i in 0..3 {
        created.push(create_vm(&app, &format!("vm{i}"), "t2.micro").await);
    }

    let (status, body) = send(&app, empty_request(Method::GET, "/vms")).await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<Value> = serde_json::from_slice(&body).unwrap();
    assert_eq!(listed, created);
}

#[tokio::test]
async fn get_unknown_id_is_not_found() {
    let app = test_app().await;
    let (status, _) = send(&app, empty_request(Method::GET, "/vms/12")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() {
    let app = test_app().await;
    let (status, _) = send(&app, empty_request(Method::GET, "/vms/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let app = test_app().await;

    for body in [
        "{not json",
        r#"{"name":"web1"}"#,
        r#"{"name":1,"instance_type":"t2.micro"}"#,
        r#"{"name":"","instance_type":"t2.micro"}"#,
    ] {
        let (status, text) = send(&app, json_request(Method::POST, "/vms", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert!(!text.is_empty());
    }

    let (status, _) = send(&app, json_request(Method::PUT, "/vms/1", "{")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, empty_request(Method::GET, "/vms")).await;
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!([]));
}

#[tokio::test]
async fn update_is_reflected_by_get() {
    let app = test_app().await;
    let created = create_vm(&app, "web1", "t2.micro").await;
    let uri = format!("/vms/{}", created["id"]);

    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            &uri,
            r#"{"name":"web1-big","instance_type":"m5.large"}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        updated,
        json!({ "id": created["id"], "name": "web1-big", "instance_type": "m5.large" })
    );

    let (_, body) = send(&app, empty_request(Method::GET, &uri)).await;
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), updated);
}

#[tokio::test]
async fn update_of_unknown_id_echoes_request_without_creating() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            "/vms/5",
            r#"{"name":"ghost","instance_type":"t2.nano"}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_slice::<Value>(&body).unwrap(),
        json!({ "id": 5, "name": "ghost", "instance_type": "t2.nano" })
    );

    let (status, _) = send(&app, empty_request(Method::GET, "/vms/5")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_record_and_tolerates_missing_ids() {
    let app = test_app().await;
    let created = create_vm(&app, "web1", "t2.micro").await;
    let uri = format!("/vms/{}", created["id"]);

    let (status, body) = send(&app, empty_request(Method::DELETE, &uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let (status, _) = send(&app, empty_request(Method::GET, &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, empty_request(Method::DELETE, &uri)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = test_app().await;
    let response = app
        .oneshot(empty_request(Method::GET, "/vms"))
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn openapi_document_lists_vm_paths() {
    let app = test_app().await;
    let (status, body) = send(&app, empty_request(Method::GET, "/api-docs/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);

    let doc: Value = serde_json::from_slice(&body).unwrap();
    assert!(doc["paths"]["/vms"].is_object());
    assert!(doc["paths"]["/vms/{vm_id}"]["put"].is_object());
}

#[tokio::test]
async fn create_accepts_json_without_content_type() {
    let app = test_app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/vms")
        .body(Body::from(r#"{"name":"web1","instance_type":"t2.micro"}"#))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        serde_json::from_slice::<Value>(&body).unwrap(),
        json!({ "id": 1, "name": "web1", "instance_type": "t2.micro" })
    );
}

#[tokio::test]
async fn update_echo_uses_path_id_over_body_id() {
    let app = test_app().await;
    create_vm(&app, "web1", "t2.micro").await;

    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            "/vms/1",
            r#"{"id":7,"name":"web1","instance_type":"t3.micro"}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_slice::<Value>(&body).unwrap(),
        json!({ "id": 1, "name": "web1", "instance_type": "t3.micro" })
    );

    let (status, _) = send(&app, empty_request(Method::GET, "/vms/7")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn caller_request_id_is_propagated() {
    let app = test_app().await;
    let request = Request::builder()
        .method(Method::GET)
        .uri("/vms")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "abc-123");
}
