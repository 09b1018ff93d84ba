//! Handlers for `/authors` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/authors` | All authors, insertion order |
//! | `POST`   | `/authors` | Body: [`NewAuthor`]; 400 if the email is taken |
//! | `GET`    | `/authors/{id}` | Author with embedded posts and their comments |
//! | `PUT`    | `/authors/{id}` | Body: [`AuthorPatch`] |
//! | `DELETE` | `/authors/{id}` | 400 while the author still has posts |
//! | `GET`    | `/authors/{id}/posts` | The author's posts |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use blog_core::{
  author::{Author, AuthorDetail, AuthorPatch, NewAuthor},
  post::Post,
  service::authors,
  store::BlogStore,
};

use crate::{Message, error::ApiError};

/// `GET /authors`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Author>>, ApiError>
where
  S: BlogStore,
{
  Ok(Json(authors::list(&*store).await?))
}

/// `POST /authors`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewAuthor>,
) -> Result<Json<Author>, ApiError>
where
  S: BlogStore,
{
  Ok(Json(authors::create(&*store, body).await?))
}

/// `GET /authors/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<AuthorDetail>, ApiError>
where
  S: BlogStore,
{
  Ok(Json(authors::get(&*store, id).await?))
}

/// `PUT /authors/{id}`; only the supplied fields change.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(patch): Json<AuthorPatch>,
) -> Result<Json<Author>, ApiError>
where
  S: BlogStore,
{
  Ok(Json(authors::update(&*store, id, patch).await?))
}

/// `DELETE /authors/{id}`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Message>, ApiError>
where
  S: BlogStore,
{
  authors::delete(&*store, id).await?;
  Ok(Json(Message::new("Author deleted")))
}

/// `GET /authors/{id}/posts`
pub async fn posts<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Vec<Post>>, ApiError>
where
  S: BlogStore,
{
  Ok(Json(authors::list_posts(&*store, id).await?))
}
