mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use common::{
    carbon_body, count_results, create_page, create_project, send, test_state, token,
};
use ecoweb_server::app;

#[tokio::test]
async fn protected_routes_require_a_token() {
    let app = app(test_state("http://unused/?url=").await);

    let (status, _) = send(&app, Method::GET, "/api/projects", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/api/projects", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::POST, "/api/results/analyze/x", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn project_crud() {
    let app = app(test_state("http://unused/?url=").await);
    let token = token(&app).await;

    let id = create_project(&app, &token, "Corporate site").await;

    let (status, body) = send(&app, Method::GET, "/api/projects", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Corporate site");

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/projects/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());

    let (status, _) = send(&app, Method::GET, "/api/projects/missing", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/projects",
        Some(&token),
        Some(json!({ "name": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn pages_are_listed_per_project() {
    let app = app(test_state("http://unused/?url=").await);
    let token = token(&app).await;

    let first = create_project(&app, &token, "First").await;
    let second = create_project(&app, &token, "Second").await;
    create_page(&app, &token, &first, "https://a.example").await;
    create_page(&app, &token, &first, "https://b.example").await;
    create_page(&app, &token, &second, "").await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/pages/project/{first}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let pages = body.as_array().unwrap();
    assert_eq!(pages.len(), 2);
    assert!(pages.iter().all(|p| p["projectId"] == first.as_str()));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/pages/project/missing",
        Some(&token),
        Some(json!({ "url": "https://c.example" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_page_removes_its_results() {
    let carbon = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/site"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(carbon_body(0.3, 4096, json!(false))),
        )
        .mount(&carbon)
        .await;

    let state = test_state(&format!("{}/site?url=", carbon.uri())).await;
    let db = state.db.clone();
    let app = app(state);
    let token = token(&app).await;
    let project = create_project(&app, &token, "Shop").await;
    let page = create_page(&app, &token, &project, "https://shop.example").await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/results/analyze/{page}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["id"].is_string());
    assert_eq!(count_results(&db, &page).await, 1);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/pages/{page}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(db.find_page(&page).await.unwrap().is_none());
    assert_eq!(count_results(&db, &page).await, 0);
}

#[tokio::test]
async fn deleting_a_page_without_result() {
    let state = test_state("http://unused/?url=").await;
    let db = state.db.clone();
    let app = app(state);
    let token = token(&app).await;
    let project = create_project(&app, &token, "Blog").await;
    let keep = create_page(&app, &token, &project, "https://blog.example").await;
    let stale = create_page(&app, &token, &project, "https://blog.example/old").await;

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/pages/{stale}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(db.find_page(&stale).await.unwrap().is_none());
    assert!(db.find_page(&keep).await.unwrap().is_some());
    assert!(db.find_project(&project).await.unwrap().is_some());
}

#[tokio::test]
async fn deleting_an_unknown_page_is_no_content() {
    let app = app(test_state("http://unused/?url=").await);
    let token = token(&app).await;

    let (status, _) = send(
        &app,
        Method::DELETE,
        "/api/pages/does-not-exist",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn store_failure_on_delete_answers_500() {
    let state = test_state("http://unused/?url=").await;
    let db = state.db.clone();
    let app = app(state);
    let token = token(&app).await;
    let project = create_project(&app, &token, "Closed").await;
    let page = create_page(&app, &token, &project, "https://closed.example").await;
    db.pool.close().await;

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/pages/{page}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
