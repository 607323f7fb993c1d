//! Web API post lifecycle tests.

mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{create_test_server, register_and_login};

async fn create_post(server: &axum_test::TestServer, token: &str, body: Value) -> Value {
    let response = server
        .post("/api/posts")
        .add_header(AUTHORIZATION, format!("Bearer {token}"))
        .json(&body)
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

#[tokio::test]
async fn test_create_post_requires_auth() {
    let (server, _db, _mailer) = create_test_server().await;

    let response = server
        .post("/api/posts")
        .json(&json!({ "title": "Hello", "content": "body" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_post_returns_code() {
    let (server, _db, mailer) = create_test_server().await;
    let token = register_and_login(&server, &mailer, "alice@example.com", "Alice").await;

    let body = create_post(
        &server,
        &token,
        json!({ "title": "Hello", "content": "body" }),
    )
    .await;

    assert!(body["data"]["code"].is_string());
    assert_eq!(body["data"]["title"], "Hello");
    assert_eq!(body["data"]["view_count"], 0);
    assert_eq!(body["data"]["read_permission"], 0);
    assert_eq!(body["data"]["owner_email"], "alice@example.com");
    assert!(body["data"]["start_date"].is_string());
}

#[tokio::test]
async fn test_create_post_empty_title() {
    let (server, _db, mailer) = create_test_server().await;
    let token = register_and_login(&server, &mailer, "alice@example.com", "Alice").await;

    let response = server
        .post("/api/posts")
        .add_header(AUTHORIZATION, format!("Bearer {token}"))
        .json(&json!({ "title": "", "content": "body" }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_detail_counts_views() {
    let (server, _db, mailer) = create_test_server().await;
    let token = register_and_login(&server, &mailer, "alice@example.com", "Alice").await;

    let body = create_post(&server, &token, json!({ "title": "Hello" })).await;
    let code = body["data"]["code"].as_str().unwrap();

    let body: Value = server.get(&format!("/api/posts/{code}")).await.json();
    assert_eq!(body["data"]["view_count"], 1);

    let body: Value = server.get(&format!("/api/posts/{code}")).await.json();
    assert_eq!(body["data"]["view_count"], 2);
}

#[tokio::test]
async fn test_detail_unknown_code() {
    let (server, _db, _mailer) = create_test_server().await;

    let response = server.get("/api/posts/no-such-code").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_public_listing_excludes_hidden_and_ended() {
    let (server, _db, mailer) = create_test_server().await;
    let token = register_and_login(&server, &mailer, "alice@example.com", "Alice").await;

    create_post(&server, &token, json!({ "title": "Visible" })).await;
    create_post(
        &server,
        &token,
        json!({ "title": "Hidden", "read_permission": 1 }),
    )
    .await;
    let ended = create_post(
        &server,
        &token,
        json!({ "title": "Ended", "end_date": "2000-01-01 00:00:00" }),
    )
    .await;

    let body: Value = server.get("/api/posts").await.json();
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Visible"]);
    assert_eq!(body["meta"]["total"], 1);

    // Ended posts stay reachable by code
    let code = ended["data"]["code"].as_str().unwrap();
    server
        .get(&format!("/api/posts/{code}"))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_listing_sort_and_pagination() {
    let (server, _db, mailer) = create_test_server().await;
    let token = register_and_login(&server, &mailer, "alice@example.com", "Alice").await;

    let mut codes = Vec::new();
    for i in 0..3 {
        let body = create_post(&server, &token, json!({ "title": format!("Post {i}") })).await;
        codes.push(body["data"]["code"].as_str().unwrap().to_string());
    }

    // Views sort puts the most-fetched post first
    server.get(&format!("/api/posts/{}", codes[1])).await.assert_status_ok();

    let body: Value = server.get("/api/posts?sort=views").await.json();
    assert_eq!(body["data"][0]["title"], "Post 1");

    let body: Value = server.get("/api/posts?sort=oldest&per_page=2").await.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0]["title"], "Post 0");
    assert_eq!(body["meta"]["total"], 3);

    let body: Value = server
        .get("/api/posts?sort=oldest&per_page=2&page=2")
        .await
        .json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["title"], "Post 2");
}

#[tokio::test]
async fn test_my_posts_listing() {
    let (server, _db, mailer) = create_test_server().await;
    let alice = register_and_login(&server, &mailer, "alice@example.com", "Alice").await;
    let bob = register_and_login(&server, &mailer, "bob@example.com", "Bob").await;

    create_post(
        &server,
        &alice,
        json!({ "title": "Mine hidden", "read_permission": 1 }),
    )
    .await;
    create_post(
        &server,
        &alice,
        json!({ "title": "Mine ended", "end_date": "2000-01-01 00:00:00" }),
    )
    .await;
    create_post(&server, &bob, json!({ "title": "Bob's" })).await;

    let body: Value = server
        .get("/api/posts/my")
        .add_header(AUTHORIZATION, format!("Bearer {alice}"))
        .await
        .json();
    assert_eq!(body["meta"]["total"], 2);

    let body: Value = server
        .get("/api/posts/my?exclude_ended=true")
        .add_header(AUTHORIZATION, format!("Bearer {alice}"))
        .await
        .json();
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["title"], "Mine hidden");
}

#[tokio::test]
async fn test_update_post_partial_and_clear_end_date() {
    let (server, _db, mailer) = create_test_server().await;
    let token = register_and_login(&server, &mailer, "alice@example.com", "Alice").await;

    let body = create_post(
        &server,
        &token,
        json!({ "title": "Hello", "content": "body", "end_date": "2030-01-01 00:00:00" }),
    )
    .await;
    let code = body["data"]["code"].as_str().unwrap().to_string();

    // Only the title changes
    let response = server
        .put(&format!("/api/posts/{code}"))
        .add_header(AUTHORIZATION, format!("Bearer {token}"))
        .json(&json!({ "title": "Renamed" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["title"], "Renamed");
    assert_eq!(body["data"]["content"], "body");
    assert_eq!(body["data"]["end_date"], "2030-01-01 00:00:00");

    // Explicit null clears the end date
    let response = server
        .put(&format!("/api/posts/{code}"))
        .add_header(AUTHORIZATION, format!("Bearer {token}"))
        .json(&json!({ "end_date": null }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["data"].get("end_date").is_none());
}

#[tokio::test]
async fn test_update_and_delete_foreign_post_forbidden() {
    let (server, _db, mailer) = create_test_server().await;
    let alice = register_and_login(&server, &mailer, "alice@example.com", "Alice").await;
    let bob = register_and_login(&server, &mailer, "bob@example.com", "Bob").await;

    let body = create_post(&server, &alice, json!({ "title": "Alice's" })).await;
    let code = body["data"]["code"].as_str().unwrap().to_string();

    let response = server
        .put(&format!("/api/posts/{code}"))
        .add_header(AUTHORIZATION, format!("Bearer {bob}"))
        .json(&json!({ "title": "Stolen" }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = server
        .delete(&format!("/api/posts/{code}"))
        .add_header(AUTHORIZATION, format!("Bearer {bob}"))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    // Storage unchanged
    let body: Value = server.get(&format!("/api/posts/{code}")).await.json();
    assert_eq!(body["data"]["title"], "Alice's");
}

#[tokio::test]
async fn test_owner_delete_removes_from_listing() {
    let (server, _db, mailer) = create_test_server().await;
    let token = register_and_login(&server, &mailer, "alice@example.com", "Alice").await;

    let body = create_post(&server, &token, json!({ "title": "Ephemeral" })).await;
    let code = body["data"]["code"].as_str().unwrap().to_string();

    let body: Value = server.get("/api/posts").await.json();
    assert_eq!(body["meta"]["total"], 1);

    server
        .delete(&format!("/api/posts/{code}"))
        .add_header(AUTHORIZATION, format!("Bearer {token}"))
        .await
        .assert_status_ok();

    let body: Value = server.get("/api/posts").await.json();
    assert_eq!(body["meta"]["total"], 0);

    let response = server.get(&format!("/api/posts/{code}")).await;
    response.assert_status(StatusCode::NOT_FOUND);
}
