//! End-to-end REST flow against the in-memory store.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tasksense::{
    http::{AppState, create_router},
    task::{adapters::memory::InMemoryTaskRepository, services::TaskLifecycleService},
};
use tower::ServiceExt;

#[fixture]
fn app() -> Router {
    let service = TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    );
    create_router(
        AppState::new(service, "development"),
        &["http://localhost:3000".to_owned()],
    )
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.map_or_else(Body::empty, |json| Body::from(json.to_string())))
        .expect("request should build");
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router should respond");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).expect("body should be JSON");
    (status, value)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rest_flow_covers_every_route(app: Router) {
    let (status, created) = call(
        &app,
        Method::POST,
        "/api/tasks",
        Some(json!({
            "title": "Install the new server",
            "description": "Coordinate with Facilities team",
            "due_date": "2026-04-01T12:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["data"]["id"]
        .as_str()
        .expect("id should be a string")
        .to_owned();
    assert_eq!(created["data"]["category"], json!("technical"));
    assert_eq!(
        created["data"]["extracted_entities"]["people"],
        json!(["Facilities", "team"])
    );

    let (status, updated) = call(
        &app,
        Method::PATCH,
        &format!("/api/tasks/{id}"),
        Some(json!({"status": "completed", "due_date": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["status"], json!("completed"));
    assert_eq!(updated["data"]["due_date"], Value::Null);

    let (status, fetched) = call(&app, Method::GET, &format!("/api/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["history"].as_array().map(Vec::len), Some(2));

    let (status, listed) = call(&app, Method::GET, "/api/tasks?status=completed", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["count"], json!(1));

    let (status, stats) = call(&app, Method::GET, "/api/tasks/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["data"]["byStatus"]["completed"], json!(1));

    let (status, _) = call(&app, Method::DELETE, &format!("/api/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, deleted) = call(&app, Method::DELETE, &format!("/api/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(deleted["success"], json!(false));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_update_is_rejected_before_the_store(app: Router) {
    let (_, created) = call(
        &app,
        Method::POST,
        "/api/tasks",
        Some(json!({"title": "Review notes"})),
    )
    .await;
    let id = created["data"]["id"].as_str().expect("id should be a string");

    let (status, body) = call(
        &app,
        Method::PATCH,
        &format!("/api/tasks/{id}"),
        Some(json!({"status": "archived", "priority": "extreme"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .expect("errors should be an array")
        .iter()
        .filter_map(|error| error["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["status", "priority"]);
}
