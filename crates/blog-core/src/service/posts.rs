//! Post operations, including the draft → published transition.

use std::collections::HashMap;

use serde::Deserialize;

use crate::{
  Error, Result,
  comment::{Comment, CommentBody},
  post::{NewPost, Post, PostDetail, PostPatch, PostQuery},
  service::{authors, comments, store_err},
  store::BlogStore,
  validate,
};

/// Raw list parameters as they arrive from a caller, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
  pub skip:      Option<i64>,
  pub limit:     Option<i64>,
  /// Must be `draft` or `published` when present.
  pub status:    Option<String>,
  pub author_id: Option<i64>,
}

impl ListParams {
  /// Validate and resolve defaults. An empty `status` and an `author_id` of
  /// `0` both mean no filter.
  pub fn into_query(self) -> Result<PostQuery> {
    let status = self.status.as_deref().filter(|s| !s.is_empty());
    let status = validate::status_filter(status)?;
    let (offset, limit) = validate::pagination(self.skip, self.limit)?;
    Ok(PostQuery {
      status,
      author_id: self.author_id.filter(|&id| id != 0),
      offset,
      limit: Some(limit),
    })
  }
}

/// Create a draft post for an existing author. A new post has no comments.
pub async fn create<S: BlogStore>(store: &S, input: NewPost) -> Result<PostDetail> {
  authors::require(store, input.author_id).await?;
  let post = store.insert_post(input).await.map_err(store_err)?;
  tracing::debug!(post_id = post.id, author_id = post.author_id, "created post");
  Ok(PostDetail {
    post,
    comments: Vec::new(),
  })
}

pub async fn list<S: BlogStore>(store: &S, params: ListParams) -> Result<Vec<PostDetail>> {
  let query = params.into_query()?;
  let posts = store.list_posts(query).await.map_err(store_err)?;
  with_comments(store, posts).await
}

/// Fetch a post with its comments.
pub async fn get<S: BlogStore>(store: &S, id: i64) -> Result<PostDetail> {
  let post = require(store, id).await?;
  let comments = store.list_comments(id).await.map_err(store_err)?;
  Ok(PostDetail { post, comments })
}

/// Partially update a post. A status change must respect the state machine:
/// a published post cannot go back to draft.
pub async fn update<S: BlogStore>(store: &S, id: i64, patch: PostPatch) -> Result<PostDetail> {
  if let Some(next) = patch.status {
    let current = require(store, id).await?;
    if !current.status.can_become(next) {
      return Err(Error::IllegalTransition {
        id,
        from: current.status,
        to: next,
      });
    }
  }

  let post = store
    .update_post(id, patch)
    .await
    .map_err(store_err)?
    .ok_or(Error::PostNotFound(id))?;
  tracing::debug!(post_id = id, "updated post");
  let comments = store.list_comments(id).await.map_err(store_err)?;
  Ok(PostDetail { post, comments })
}

/// Delete a post and, with it, all of its comments.
pub async fn delete<S: BlogStore>(store: &S, id: i64) -> Result<()> {
  if !store.delete_post(id).await.map_err(store_err)? {
    return Err(Error::PostNotFound(id));
  }
  tracing::debug!(post_id = id, "deleted post");
  Ok(())
}

/// Move a draft to published. Publishing twice is an error.
pub async fn publish<S: BlogStore>(store: &S, id: i64) -> Result<Post> {
  let current = require(store, id).await?;
  if current.status.is_published() {
    return Err(Error::AlreadyPublished(id));
  }

  let post = store
    .update_post(id, PostPatch::publish())
    .await
    .map_err(store_err)?
    .ok_or(Error::PostNotFound(id))?;
  tracing::info!(post_id = id, "published post");
  Ok(post)
}

pub async fn list_comments<S: BlogStore>(store: &S, id: i64) -> Result<Vec<Comment>> {
  require(store, id).await?;
  store.list_comments(id).await.map_err(store_err)
}

pub async fn add_comment<S: BlogStore>(
  store: &S,
  id: i64,
  body: CommentBody,
) -> Result<Comment> {
  comments::create(store, body.on(id)).await
}

/// Attach each post's comments with a single lookup, keeping post order.
pub(crate) async fn with_comments<S: BlogStore>(
  store: &S,
  posts: Vec<Post>,
) -> Result<Vec<PostDetail>> {
  let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
  let mut by_post: HashMap<i64, Vec<Comment>> = HashMap::new();
  for comment in store.list_comments_for_posts(ids).await.map_err(store_err)? {
    by_post.entry(comment.post_id).or_default().push(comment);
  }

  Ok(
    posts
      .into_iter()
      .map(|post| {
        let comments = by_post.remove(&post.id).unwrap_or_default();
        PostDetail { post, comments }
      })
      .collect(),
  )
}

/// Load a post or fail with [`Error::PostNotFound`].
pub(crate) async fn require<S: BlogStore>(store: &S, id: i64) -> Result<Post> {
  store
    .get_post(id)
    .await
    .map_err(store_err)?
    .ok_or(Error::PostNotFound(id))
}
