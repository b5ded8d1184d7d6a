#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use ecoweb_server::{
    config::{Config, NotifyConfig},
    db::Database,
    AppState,
};

pub fn test_config(carbon_api_url: &str) -> Config {
    Config {
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test-secret".to_string(),
        carbon_api_url: carbon_api_url.to_string(),
        notify: NotifyConfig {
            url: None,
            from: "no-reply@test.local".to_string(),
            to: "inbox@test.local".to_string(),
        },
    }
}

pub async fn test_db() -> Database {
    let db = Database::in_memory().await.expect("in-memory database");
    db.run_migrations().await.expect("migrations");
    db
}

pub async fn test_state(carbon_api_url: &str) -> AppState {
    AppState::new(test_db().await, test_config(carbon_api_url))
}

/// Sends one request and decodes the body as JSON (`Null` when empty).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    (status, value)
}

/// Registers a throwaway user and returns its bearer token.
pub async fn token(app: &Router) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "email": "tester@example.com",
            "password": "long enough password",
            "firstName": "Test",
            "lastName": "User"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

pub async fn create_project(app: &Router, token: &str, name: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/projects",
        Some(token),
        Some(json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create project failed: {body}");
    body["id"].as_str().unwrap().to_string()
}

pub async fn create_page(app: &Router, token: &str, project_id: &str, url: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        &format!("/api/pages/project/{project_id}"),
        Some(token),
        Some(json!({ "url": url })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create page failed: {body}");
    body["id"].as_str().unwrap().to_string()
}

pub async fn count_results(db: &Database, page_id: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM results WHERE page_id = ?")
        .bind(page_id)
        .fetch_one(&db.pool)
        .await
        .unwrap()
}

pub async fn count_contact_messages(db: &Database) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contact_messages")
        .fetch_one(&db.pool)
        .await
        .unwrap()
}

pub fn carbon_body(grams: f64, adjusted_bytes: u64, green: Value) -> Value {
    json!({
        "statistics": {
            "co2": { "grid": { "grams": grams } },
            "adjustedBytes": adjusted_bytes
        },
        "green": green
    })
}
