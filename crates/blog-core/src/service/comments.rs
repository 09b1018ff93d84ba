//! Comment operations.

use crate::{
  Error, Result,
  comment::{Comment, CommentBody, NewComment},
  service::{posts, store_err},
  store::BlogStore,
};

/// Attach a comment to an existing post.
pub async fn create<S: BlogStore>(store: &S, input: NewComment) -> Result<Comment> {
  posts::require(store, input.post_id).await?;
  let comment = store.insert_comment(input).await.map_err(store_err)?;
  tracing::debug!(comment_id = comment.id, post_id = comment.post_id, "created comment");
  Ok(comment)
}

pub async fn get<S: BlogStore>(store: &S, id: i64) -> Result<Comment> {
  store
    .get_comment(id)
    .await
    .map_err(store_err)?
    .ok_or(Error::CommentNotFound(id))
}

/// Replace the author name and content of a comment.
pub async fn update<S: BlogStore>(store: &S, id: i64, body: CommentBody) -> Result<Comment> {
  let comment = store
    .update_comment(id, body)
    .await
    .map_err(store_err)?
    .ok_or(Error::CommentNotFound(id))?;
  tracing::debug!(comment_id = id, "updated comment");
  Ok(comment)
}

pub async fn delete<S: BlogStore>(store: &S, id: i64) -> Result<()> {
  if !store.delete_comment(id).await.map_err(store_err)? {
    return Err(Error::CommentNotFound(id));
  }
  tracing::debug!(comment_id = id, "deleted comment");
  Ok(())
}
