//! JSON REST API for the blog backend.
//!
//! Exposes an axum [`Router`] backed by any [`blog_core::store::BlogStore`].
//! Server bootstrap, configuration and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .merge(blog_api::api_router(store.clone()))
//! ```

pub mod authors;
pub mod comments;
pub mod error;
pub mod posts;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use blog_core::store::BlogStore;
use serde::Serialize;

pub use error::ApiError;

/// Confirmation body returned by the delete endpoints.
#[derive(Debug, Serialize)]
pub struct Message {
  pub message: &'static str,
}

impl Message {
  pub fn new(message: &'static str) -> Self { Self { message } }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be merged or nested into any parent router
/// regardless of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: BlogStore + 'static,
{
  Router::new()
    // Authors
    .route("/authors", get(authors::list::<S>).post(authors::create::<S>))
    .route(
      "/authors/{id}",
      get(authors::get_one::<S>)
        .put(authors::update::<S>)
        .delete(authors::delete::<S>),
    )
    .route("/authors/{id}/posts", get(authors::posts::<S>))
    // Posts
    .route("/posts", get(posts::list::<S>).post(posts::create::<S>))
    .route(
      "/posts/{id}",
      get(posts::get_one::<S>)
        .put(posts::update::<S>)
        .delete(posts::delete::<S>),
    )
    .route("/posts/{id}/publish", post(posts::publish::<S>))
    .route(
      "/posts/{id}/comments",
      get(posts::comments::<S>).post(posts::add_comment::<S>),
    )
    // Comments
    .route("/comments", post(comments::create::<S>))
    .route(
      "/comments/{id}",
      get(comments::get_one::<S>)
        .put(comments::update::<S>)
        .delete(comments::delete::<S>),
    )
    .with_state(store)
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use blog_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = app
      .clone()
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
  }

  async fn create_author(app: &Router, email: &str) -> i64 {
    let (status, body) = send(
      app,
      "POST",
      "/authors",
      Some(json!({ "name": "John Doe", "email": email, "bio": "A passionate writer" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_i64().unwrap()
  }

  async fn create_post(app: &Router, author_id: i64, title: &str) -> i64 {
    let (status, body) = send(
      app,
      "POST",
      "/posts",
      Some(json!({ "title": title, "content": "Body", "author_id": author_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_i64().unwrap()
  }

  // ── Authors ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_and_get_author() {
    let app = app().await;
    let id = create_author(&app, "john@example.com").await;

    let (status, body) = send(&app, "GET", &format!("/authors/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "John Doe");
    assert_eq!(body["email"], "john@example.com");
    assert_eq!(body["bio"], "A passionate writer");
    assert_eq!(body["posts"], json!([]));
  }

  #[tokio::test]
  async fn duplicate_email_returns_400() {
    let app = app().await;
    create_author(&app, "john@example.com").await;

    let (status, body) = send(
      &app,
      "POST",
      "/authors",
      Some(json!({ "name": "Jane", "email": "john@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("email already registered"));
  }

  #[tokio::test]
  async fn email_domain_is_case_insensitive() {
    let app = app().await;
    create_author(&app, "john@example.com").await;

    let (status, body) = send(
      &app,
      "POST",
      "/authors",
      Some(json!({ "name": "Jane", "email": "john@EXAMPLE.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("email already registered"));
  }

  #[tokio::test]
  async fn invalid_email_returns_422() {
    let app = app().await;
    let (status, _) = send(
      &app,
      "POST",
      "/authors",
      Some(json!({ "name": "Jane", "email": "not-an-email" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  }

  #[tokio::test]
  async fn missing_required_field_is_rejected_before_the_service() {
    let app = app().await;
    let (status, _) =
      send(&app, "POST", "/authors", Some(json!({ "email": "a@example.com" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, authors) = send(&app, "GET", "/authors", None).await;
    assert_eq!(authors, json!([]));
  }

  #[tokio::test]
  async fn update_author_is_partial() {
    let app = app().await;
    let id = create_author(&app, "john@example.com").await;

    let (status, body) = send(
      &app,
      "PUT",
      &format!("/authors/{id}"),
      Some(json!({ "name": "Johnny" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Johnny");
    assert_eq!(body["bio"], "A passionate writer");
    assert_eq!(body["email"], "john@example.com");
  }

  #[tokio::test]
  async fn list_authors_and_their_posts() {
    let app = app().await;
    let john = create_author(&app, "john@example.com").await;
    create_author(&app, "jane@example.com").await;
    create_post(&app, john, "P1").await;

    let (status, body) = send(&app, "GET", "/authors", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["email"], "john@example.com");

    let (status, body) = send(&app, "GET", &format!("/authors/{john}/posts"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["title"], "P1");

    let (status, _) = send(&app, "GET", "/authors/999/posts", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn delete_author() {
    let app = app().await;
    let id = create_author(&app, "john@example.com").await;

    let (status, body) = send(&app, "DELETE", &format!("/authors/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Author deleted" }));

    let (status, _) = send(&app, "GET", &format!("/authors/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn delete_author_with_posts_returns_400() {
    let app = app().await;
    let id = create_author(&app, "john@example.com").await;
    create_post(&app, id, "P1").await;

    let (status, _) = send(&app, "DELETE", &format!("/authors/{id}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn missing_ids_return_404() {
    let app = app().await;
    for (method, uri, body) in [
      ("GET", "/authors/999", None),
      ("PUT", "/authors/999", Some(json!({ "name": "X" }))),
      ("DELETE", "/authors/999", None),
      ("GET", "/posts/999", None),
      ("PUT", "/posts/999", Some(json!({ "title": "X" }))),
      ("DELETE", "/posts/999", None),
      ("POST", "/posts/999/publish", None),
      ("GET", "/posts/999/comments", None),
      ("GET", "/comments/999", None),
      ("PUT", "/comments/999", Some(json!({ "author_name": "A", "content": "B" }))),
      ("DELETE", "/comments/999", None),
    ] {
      let (status, body) = send(&app, method, uri, body).await;
      assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
      assert!(body["error"].is_string());
    }
  }

  // ── Posts ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_post_is_draft() {
    let app = app().await;
    let author = create_author(&app, "john@example.com").await;
    let (status, body) = send(
      &app,
      "POST",
      "/posts",
      Some(json!({ "title": "My First Post", "content": "Hello", "author_id": author })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "My First Post");
    assert_eq!(body["status"], "draft");
    assert!(body["created_at"].is_string());
    assert_eq!(body["comments"], json!([]));
  }

  #[tokio::test]
  async fn create_post_for_missing_author_returns_404() {
    let app = app().await;
    let (status, _) = send(
      &app,
      "POST",
      "/posts",
      Some(json!({ "title": "T", "content": "C", "author_id": 999 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn publish_twice_returns_400() {
    let app = app().await;
    let author = create_author(&app, "john@example.com").await;
    let post = create_post(&app, author, "P1").await;

    let (status, body) = send(&app, "POST", &format!("/posts/{post}/publish"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "published");

    let (status, body) = send(&app, "POST", &format!("/posts/{post}/publish"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("already published"));
  }

  #[tokio::test]
  async fn list_posts_paginates_and_filters() {
    let app = app().await;
    let author = create_author(&app, "john@example.com").await;
    let mut ids = Vec::new();
    for i in 0..5 {
      ids.push(create_post(&app, author, &format!("Post {i}")).await);
    }
    send(&app, "POST", &format!("/posts/{}/publish", ids[4]), None).await;

    let (status, body) = send(&app, "GET", "/posts?skip=2&limit=2", None).await;
    assert_eq!(status, StatusCode::OK);
    let got: Vec<i64> = body
      .as_array()
      .unwrap()
      .iter()
      .map(|p| p["id"].as_i64().unwrap())
      .collect();
    assert_eq!(got, &ids[2..4]);

    let (status, body) = send(&app, "GET", "/posts?status=published", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["status"], "published");

    let (status, body) =
      send(&app, "GET", &format!("/posts?author_id={author}&status=draft"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 4);
  }

  #[tokio::test]
  async fn list_posts_rejects_bad_query() {
    let app = app().await;
    let (status, _) = send(&app, "GET", "/posts?status=invalid-value", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/posts?limit=0", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "GET", "/posts?skip=-1", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  }

  #[tokio::test]
  async fn update_post_cannot_return_to_draft() {
    let app = app().await;
    let author = create_author(&app, "john@example.com").await;
    let post = create_post(&app, author, "P1").await;

    let (status, body) = send(
      &app,
      "PUT",
      &format!("/posts/{post}"),
      Some(json!({ "content": "Edited" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "Edited");
    assert_eq!(body["title"], "P1");

    send(&app, "POST", &format!("/posts/{post}/publish"), None).await;
    let (status, _) = send(
      &app,
      "PUT",
      &format!("/posts/{post}"),
      Some(json!({ "status": "draft" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  // ── Comments ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn comments_on_a_post() {
    let app = app().await;
    let author = create_author(&app, "john@example.com").await;
    let post = create_post(&app, author, "P1").await;

    let (status, first) = send(
      &app,
      "POST",
      &format!("/posts/{post}/comments"),
      Some(json!({ "author_name": "Reader", "content": "Great post!" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["post_id"], post);

    let (status, second) = send(
      &app,
      "POST",
      "/comments",
      Some(json!({ "post_id": post, "author_name": "Other", "content": "Agreed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, listed) = send(&app, "GET", &format!("/posts/{post}/comments"), None).await;
    assert_eq!(listed, json!([first, second]));

    let (_, detail) = send(&app, "GET", &format!("/posts/{post}"), None).await;
    assert_eq!(detail["comments"], listed);
  }

  #[tokio::test]
  async fn every_post_view_carries_comments() {
    let app = app().await;
    let author = create_author(&app, "john@example.com").await;
    let post = create_post(&app, author, "P1").await;
    let (_, comment) = send(
      &app,
      "POST",
      &format!("/posts/{post}/comments"),
      Some(json!({ "author_name": "Reader", "content": "Great post!" })),
    )
    .await;

    let (_, listed) = send(&app, "GET", "/posts", None).await;
    assert_eq!(listed[0]["comments"], json!([comment]));

    let (_, detail) = send(&app, "GET", &format!("/authors/{author}"), None).await;
    assert_eq!(detail["posts"][0]["comments"], json!([comment]));

    let (status, updated) = send(
      &app,
      "PUT",
      &format!("/posts/{post}"),
      Some(json!({ "content": "Edited" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["content"], "Edited");
    assert_eq!(updated["comments"], json!([comment]));
  }

  #[tokio::test]
  async fn comment_for_missing_post_returns_404() {
    let app = app().await;
    let (status, _) = send(
      &app,
      "POST",
      "/comments",
      Some(json!({ "post_id": 999, "author_name": "A", "content": "B" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
      &app,
      "POST",
      "/posts/999/comments",
      Some(json!({ "author_name": "A", "content": "B" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn update_and_delete_comment() {
    let app = app().await;
    let author = create_author(&app, "john@example.com").await;
    let post = create_post(&app, author, "P1").await;
    let (_, created) = send(
      &app,
      "POST",
      "/comments",
      Some(json!({ "post_id": post, "author_name": "A", "content": "B" })),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = send(
      &app,
      "PUT",
      &format!("/comments/{id}"),
      Some(json!({ "author_name": "Alice", "content": "Updated" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["author_name"], "Alice");
    assert_eq!(updated["content"], "Updated");

    let (status, body) = send(&app, "DELETE", &format!("/comments/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Comment deleted" }));
  }

  #[tokio::test]
  async fn delete_post_removes_its_comments() {
    let app = app().await;
    let author = create_author(&app, "john@example.com").await;
    let post = create_post(&app, author, "P1").await;
    let (_, c) = send(
      &app,
      "POST",
      &format!("/posts/{post}/comments"),
      Some(json!({ "author_name": "A", "content": "B" })),
    )
    .await;

    let (status, body) = send(&app, "DELETE", &format!("/posts/{post}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Post deleted" }));

    let (status, _) = send(&app, "GET", &format!("/comments/{}", c["id"]), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }
}
