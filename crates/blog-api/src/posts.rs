//! Handlers for `/posts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/posts` | `?skip&limit&status&author_id`; 400 on unknown status; posts embed comments |
//! | `POST`   | `/posts` | Body: [`NewPost`]; 404 if the author is missing |
//! | `GET`    | `/posts/{id}` | Post with embedded comments |
//! | `PUT`    | `/posts/{id}` | Body: [`PostPatch`] |
//! | `DELETE` | `/posts/{id}` | Also deletes the post's comments |
//! | `POST`   | `/posts/{id}/publish` | 400 if already published |
//! | `GET`    | `/posts/{id}/comments` | Comments, insertion order |
//! | `POST`   | `/posts/{id}/comments` | Body: [`CommentBody`] |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use blog_core::{
  comment::{Comment, CommentBody},
  post::{NewPost, Post, PostDetail, PostPatch},
  service::posts::{self, ListParams},
  store::BlogStore,
};

use crate::{Message, error::ApiError};

/// `GET /posts[?skip=..][&limit=..][&status=..][&author_id=..]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<PostDetail>>, ApiError>
where
  S: BlogStore,
{
  Ok(Json(posts::list(&*store, params).await?))
}

/// `POST /posts`; the new post is always a draft.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewPost>,
) -> Result<Json<PostDetail>, ApiError>
where
  S: BlogStore,
{
  Ok(Json(posts::create(&*store, body).await?))
}

/// `GET /posts/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<PostDetail>, ApiError>
where
  S: BlogStore,
{
  Ok(Json(posts::get(&*store, id).await?))
}

/// `PUT /posts/{id}`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(patch): Json<PostPatch>,
) -> Result<Json<PostDetail>, ApiError>
where
  S: BlogStore,
{
  Ok(Json(posts::update(&*store, id, patch).await?))
}

/// `DELETE /posts/{id}`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Message>, ApiError>
where
  S: BlogStore,
{
  posts::delete(&*store, id).await?;
  Ok(Json(Message::new("Post deleted")))
}

/// `POST /posts/{id}/publish`
pub async fn publish<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Post>, ApiError>
where
  S: BlogStore,
{
  Ok(Json(posts::publish(&*store, id).await?))
}

/// `GET /posts/{id}/comments`
pub async fn comments<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Vec<Comment>>, ApiError>
where
  S: BlogStore,
{
  Ok(Json(posts::list_comments(&*store, id).await?))
}

/// `POST /posts/{id}/comments`
pub async fn add_comment<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<CommentBody>,
) -> Result<Json<Comment>, ApiError>
where
  S: BlogStore,
{
  Ok(Json(posts::add_comment(&*store, id, body).await?))
}
