//! API integration tests
//!
//! Drives the full router over the in-memory store.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`

use locallibrary_server::{
    api::create_router,
    config::AppConfig,
    models::{CreateAuthor, CreateBook},
    repository::{AuthorStore, BookStore, MemoryStore},
    AppState,
};

fn setup_app() -> (Router, MemoryStore) {
    let store = MemoryStore::new();
    let state = AppState::new(AppConfig::default(), Arc::new(store.clone()));
    (create_router(state), store)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn extract_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

async fn add_author(store: &MemoryStore, first: &str, family: &str) -> i32 {
    store
        .author_save(&CreateAuthor {
            first_name: first.to_string(),
            family_name: family.to_string(),
            date_of_birth: None,
            date_of_death: None,
        })
        .await
        .unwrap()
        .id
}

async fn add_book(store: &MemoryStore, author_id: i32, title: &str) {
    store
        .book_save(&CreateBook {
            title: title.to_string(),
            author_id,
            summary: "summary".to_string(),
            isbn: "9780000000000".to_string(),
            genre_ids: vec![],
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup_app();

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_check() {
    let (app, _) = setup_app();

    let response = app.oneshot(get("/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(extract_json(response).await["status"], "ready");
}

#[tokio::test]
async fn test_author_list_sorted() {
    let (app, store) = setup_app();
    add_author(&store, "Mary", "Shelley").await;
    add_author(&store, "Jane", "Austen").await;
    add_author(&store, "John", "Tolkien").await;

    let response = app.oneshot(get("/catalog/authors")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response).await;
    assert_eq!(body["template"], "author_list");
    assert_eq!(body["title"], "Author List");
    let names: Vec<&str> = body["author_list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["family_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Austen", "Shelley", "Tolkien"]);
}

#[tokio::test]
async fn test_author_detail_not_found() {
    let (app, _) = setup_app();

    let response = app.oneshot(get("/catalog/author/12345")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_author_detail_with_books() {
    let (app, store) = setup_app();
    let id = add_author(&store, "Mary", "Shelley").await;
    add_book(&store, id, "Frankenstein").await;

    let response = app
        .oneshot(get(&format!("/catalog/author/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response).await;
    assert_eq!(body["author"]["full_name"], "Shelley, Mary");
    assert_eq!(body["author"]["date_of_birth_formatted"], "Invalid DateTime");
    assert_eq!(body["author"]["lifespan"], " - ");
    assert_eq!(body["author_books"][0]["title"], "Frankenstein");
}

#[tokio::test]
async fn test_create_form() {
    let (app, _) = setup_app();

    let response = app.oneshot(get("/catalog/author/create")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response).await;
    assert_eq!(body["template"], "author_form");
    assert_eq!(body["title"], "Create Author");
}

#[tokio::test]
async fn test_create_author_redirects_to_detail() {
    let (app, store) = setup_app();

    let response = app
        .clone()
        .oneshot(post_form(
            "/catalog/author/create",
            "first_name=Mary&family_name=Shelley&date_of_birth=1980-05-01&date_of_death=",
        ))
        .await
        .unwrap();
    assert!(response.status().is_redirection());
    let target = location(&response).to_string();
    assert!(target.starts_with("/catalog/author/"));

    let response = app.oneshot(get(&target)).await.unwrap();
    let body = extract_json(response).await;
    assert_eq!(body["author"]["full_name"], "Shelley, Mary");
    assert_eq!(body["author"]["date_of_birth_formatted"], "May 1, 1980");
    assert_eq!(body["author"]["lifespan"], "May 1, 1980 - ");

    let authors = store
        .authors_find(locallibrary_server::repository::SortOrder::Ascending)
        .await
        .unwrap();
    assert_eq!(authors.len(), 1);
}

#[tokio::test]
async fn test_create_author_with_errors_redisplays_form() {
    let (app, _) = setup_app();

    let response = app
        .oneshot(post_form(
            "/catalog/author/create",
            "first_name=&family_name=%3Cb%3EShelley&date_of_birth=someday",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response).await;
    assert_eq!(body["template"], "author_form");
    assert_eq!(body["author"]["family_name"], "<b>Shelley");
    assert_eq!(body["author"]["date_of_birth"], "someday");

    let messages: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["message"].as_str().unwrap())
        .collect();
    assert_eq!(
        messages,
        vec![
            "First name must be specified",
            "Family name has non-alphanumeric characters",
            "Invalid date of birth",
        ]
    );
}

#[tokio::test]
async fn test_delete_get_unknown_author_redirects() {
    let (app, _) = setup_app();

    let response = app.oneshot(get("/catalog/author/77/delete")).await.unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/catalog/authors");
}

#[tokio::test]
async fn test_delete_post_blocked_by_books() {
    let (app, store) = setup_app();
    let id = add_author(&store, "Mary", "Shelley").await;
    add_book(&store, id, "Frankenstein").await;

    let response = app
        .oneshot(post_form(
            &format!("/catalog/author/{}/delete", id),
            &format!("authorid={}", id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response).await;
    assert_eq!(body["template"], "author_delete");
    assert_eq!(body["author_books"].as_array().unwrap().len(), 1);
    assert!(store.author_find_by_id(id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_post_removes_author() {
    let (app, store) = setup_app();
    let id = add_author(&store, "Jane", "Austen").await;

    let response = app
        .clone()
        .oneshot(post_form(
            &format!("/catalog/author/{}/delete", id),
            &format!("authorid={}", id),
        ))
        .await
        .unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/catalog/authors");
    assert!(store.author_find_by_id(id).await.unwrap().is_none());

    let response = app
        .oneshot(get(&format!("/catalog/author/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_post_prefers_form_author_id() {
    let (app, store) = setup_app();
    let path_id = add_author(&store, "Mary", "Shelley").await;
    let form_id = add_author(&store, "Jane", "Austen").await;

    let response = app
        .oneshot(post_form(
            &format!("/catalog/author/{}/delete", path_id),
            &format!("authorid={}", form_id),
        ))
        .await
        .unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/catalog/authors");
    assert!(store.author_find_by_id(form_id).await.unwrap().is_none());
    assert!(store.author_find_by_id(path_id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_post_without_form_id_uses_path() {
    let (app, store) = setup_app();
    let id = add_author(&store, "Jane", "Austen").await;
    let other = add_author(&store, "Mary", "Shelley").await;

    let response = app
        .oneshot(post_form(&format!("/catalog/author/{}/delete", id), ""))
        .await
        .unwrap();
    assert!(response.status().is_redirection());
    assert!(store.author_find_by_id(id).await.unwrap().is_none());
    assert!(store.author_find_by_id(other).await.unwrap().is_some());
}

#[tokio::test]
async fn test_create_author_accepts_basic_iso_date() {
    let (app, _) = setup_app();

    let response = app
        .clone()
        .oneshot(post_form(
            "/catalog/author/create",
            "first_name=Mary&family_name=Shelley&date_of_birth=19800501&date_of_death=1990-05",
        ))
        .await
        .unwrap();
    assert!(response.status().is_redirection());

    let target = location(&response).to_string();
    let body = extract_json(app.oneshot(get(&target)).await.unwrap()).await;
    assert_eq!(body["author"]["lifespan"], "May 1, 1980 - May 1, 1990");
}

#[tokio::test]
async fn test_update_placeholders() {
    let (app, store) = setup_app();
    let id = add_author(&store, "Jane", "Austen").await;

    let response = app
        .clone()
        .oneshot(get(&format!("/catalog/author/{}/update", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"NOT IMPLEMENTED: Author update GET");

    let response = app
        .oneshot(post_form(&format!("/catalog/author/{}/update", id), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(store.author_find_by_id(id).await.unwrap().is_some());
}
