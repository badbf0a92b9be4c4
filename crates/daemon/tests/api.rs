//! End-to-end tests for the /api/v0/fs routes, driven through the router

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use drivefs_daemon::http_server;
use drivefs_daemon::ServiceState;

fn app(state: &ServiceState) -> Router {
    http_server::router(state.clone(), tracing::Level::DEBUG)
}

async fn post(state: &ServiceState, route: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/api/v0/fs/{}", route))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn get(state: &ServiceState, uri: &str) -> StatusCode {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app(state).oneshot(request).await.unwrap().status()
}

async fn setup() -> ServiceState {
    let state = ServiceState::default();
    for (path, kind, name) in [
        ("", "drive", "C"),
        ("/C", "folder", "Documents"),
        ("/C", "folder", "OtherFolder"),
        ("/C/Documents", "file", "file1.txt"),
    ] {
        let (status, _) = post(
            &state,
            "create",
            json!({"path": path, "entity_type": kind, "name": name}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{path} {name}");
    }
    state
}

#[tokio::test]
async fn test_create_response() {
    let state = ServiceState::default();

    let (status, body) = post(
        &state,
        "create",
        json!({"path": "", "entity_type": "drive", "name": "C"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "message": "Drive C created successfully.",
            "path": "",
            "entity_type": "drive",
            "name": "C",
        })
    );

    let (_, body) = post(
        &state,
        "create",
        json!({"path": "/C", "entity_type": "folder", "name": "Documents"}),
    )
    .await;
    assert_eq!(body["message"], "Folder Documents created successfully.");
}

#[tokio::test]
async fn test_hello_world_scenario() {
    let state = setup().await;

    let (status, body) = post(
        &state,
        "write",
        json!({"path": "/C/Documents/file1.txt", "content": "Hello, World!"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Content written to /C/Documents/file1.txt.");
    assert_eq!(body["size"], 13);

    let (status, body) = post(&state, "read", json!({"path": "/C/Documents/file1.txt"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"path": "/C/Documents/file1.txt", "content": "Hello, World!"})
    );
}

#[tokio::test]
async fn test_move_scenario() {
    let state = setup().await;

    let (status, body) = post(
        &state,
        "move",
        json!({"source_path": "/C/Documents/file1.txt", "destination_path": "/C/OtherFolder"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Moved /C/Documents/file1.txt to /C/OtherFolder."
    );

    let (_, body) = post(&state, "list", json!({"path": "/C/OtherFolder"})).await;
    assert_eq!(
        body,
        json!({"path": "/C/OtherFolder", "items": [{"name": "file1.txt", "type": "file"}]})
    );

    let (_, body) = post(&state, "list", json!({"path": "/C/Documents"})).await;
    assert_eq!(body["items"], json!([]));
}

#[tokio::test]
async fn test_failures_are_bad_requests_with_detail() {
    let state = setup().await;

    let cases = [
        (
            "create",
            json!({"path": "", "entity_type": "drive", "name": "C"}),
            "Drive C already exists.",
        ),
        (
            "create",
            json!({"path": "/C", "entity_type": "symlink", "name": "x"}),
            "Invalid entity type.",
        ),
        (
            "create",
            json!({"path": "/C/Documents", "entity_type": "file", "name": "file1.txt"}),
            "File file1.txt already exists in /C/Documents.",
        ),
        (
            "create",
            json!({"path": "/C", "entity_type": "folder", "name": "Documents"}),
            "Folder Documents already exists in /C.",
        ),
        (
            "create",
            json!({"path": "/C/Documents/file1.txt", "entity_type": "file", "name": "x.txt"}),
            "Cannot create file under a non-folder entity.",
        ),
        (
            "delete",
            json!({"path": "/C/Documents/nope.txt"}),
            "Entity nope.txt does not exist at /C/Documents/nope.txt.",
        ),
        (
            "read",
            json!({"path": "/D/file1.txt"}),
            "Drive D does not exist.",
        ),
        (
            "write",
            json!({"path": "/C/Documents", "content": "x"}),
            "Cannot write to non-file entity /C/Documents.",
        ),
        (
            "read",
            json!({"path": "/C/Documents"}),
            "Cannot read from non-file entity /C/Documents.",
        ),
        (
            "move",
            json!({"source_path": "/C/OtherFolder", "destination_path": "/C/Documents/file1.txt"}),
            "Cannot move to non-folder destination /C/Documents/file1.txt.",
        ),
        (
            "move",
            json!({"source_path": "/C/Documents/file1.txt", "destination_path": "/C/Documents"}),
            "An entity with the name file1.txt already exists in /C/Documents.",
        ),
        (
            "list",
            json!({"path": "/C/Documents/file1.txt"}),
            "Path /C/Documents/file1.txt is not a folder.",
        ),
    ];

    for (route, body, detail) in cases {
        let (status, response) = post(&state, route, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{route}");
        assert_eq!(response, json!({"detail": detail}), "{route}");
    }
}

#[tokio::test]
async fn test_failed_move_leaves_tree_unchanged() {
    let state = setup().await;
    post(
        &state,
        "create",
        json!({"path": "/C/OtherFolder", "entity_type": "file", "name": "file1.txt"}),
    )
    .await;

    let (status, _) = post(
        &state,
        "move",
        json!({"source_path": "/C/Documents/file1.txt", "destination_path": "/C/OtherFolder"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(&state, "stat", json!({"path": "/C/Documents/file1.txt"})).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = post(&state, "list", json!({"path": "/C/OtherFolder"})).await;
    assert_eq!(body["items"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_delete_then_read_fails() {
    let state = setup().await;

    let (status, body) = post(&state, "delete", json!({"path": "/C/Documents"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Entity at /C/Documents deleted successfully.");

    let (status, body) = post(&state, "read", json!({"path": "/C/Documents/file1.txt"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Path /C/Documents/file1.txt does not exist.");
}

#[tokio::test]
async fn test_drives_and_stat() {
    let state = setup().await;
    post(
        &state,
        "create",
        json!({"path": "", "entity_type": "drive", "name": "D"}),
    )
    .await;
    post(
        &state,
        "write",
        json!({"path": "/C/Documents/file1.txt", "content": "Hello"}),
    )
    .await;

    let (status, body) = post(&state, "drives", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"drives": ["C", "D"]}));

    let (status, body) = post(&state, "stat", json!({"path": "/C/Documents/file1.txt"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "file1.txt");
    assert_eq!(body["kind"], "file");
    assert_eq!(body["size"], 5);
    assert_eq!(body["mime_type"], "text/plain");
    assert!(body.get("children").is_none());

    let (_, body) = post(&state, "stat", json!({"path": "/C"})).await;
    assert_eq!(body["kind"], "drive");
    assert_eq!(body["children"], 2);
}

#[tokio::test]
async fn test_state_is_shared_between_routers() {
    let state = setup().await;
    assert_eq!(state.read().ls("/C").unwrap().len(), 2);

    state.write().create("/C", "folder", "Direct").unwrap();
    let (_, body) = post(&state, "list", json!({"path": "/C"})).await;
    assert_eq!(body["items"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_health_routes() {
    let state = ServiceState::default();

    assert_eq!(get(&state, "/_status/livez").await, StatusCode::OK);
    assert_eq!(get(&state, "/_status/readyz").await, StatusCode::OK);
    assert_eq!(get(&state, "/_status/version").await, StatusCode::OK);
    assert_eq!(get(&state, "/nope").await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_body_is_rejected_by_extractor() {
    let state = ServiceState::default();

    let (status, _) = post(&state, "create", json!({"path": "/C"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
