//! Handlers for `/comments` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/comments` | Body: [`NewComment`]; 404 if the post is missing |
//! | `GET`    | `/comments/{id}` | |
//! | `PUT`    | `/comments/{id}` | Body: [`CommentBody`]; replaces both fields |
//! | `DELETE` | `/comments/{id}` | |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use blog_core::{
  comment::{Comment, CommentBody, NewComment},
  service::comments,
  store::BlogStore,
};

use crate::{Message, error::ApiError};

/// `POST /comments`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewComment>,
) -> Result<Json<Comment>, ApiError>
where
  S: BlogStore,
{
  Ok(Json(comments::create(&*store, body).await?))
}

/// `GET /comments/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Comment>, ApiError>
where
  S: BlogStore,
{
  Ok(Json(comments::get(&*store, id).await?))
}

/// `PUT /comments/{id}`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<CommentBody>,
) -> Result<Json<Comment>, ApiError>
where
  S: BlogStore,
{
  Ok(Json(comments::update(&*store, id, body).await?))
}

/// `DELETE /comments/{id}`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Message>, ApiError>
where
  S: BlogStore,
{
  comments::delete(&*store, id).await?;
  Ok(Json(Message::new("Comment deleted")))
}
