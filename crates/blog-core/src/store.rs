//! The `BlogStore` trait: persistence operations behind the services.
//!
//! The trait is implemented by storage backends (e.g. `blog-store-sqlite`).
//! Methods report absence as `None`/`false` rather than as errors; turning
//! absence into a typed failure is the job of [`crate::service`].

use std::future::Future;

use crate::{
  author::{Author, AuthorPatch, NewAuthor},
  comment::{Comment, CommentBody, NewComment},
  post::{NewPost, Post, PostPatch, PostQuery},
};

/// Abstraction over a blog storage backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait BlogStore: Send + Sync {
  /// Backend errors must convert into the domain error so services can
  /// propagate them. Backends map their own constraint violations (e.g. a
  /// duplicate email) to the matching domain variant.
  type Error: std::error::Error + Send + Sync + 'static + Into<crate::Error>;

  // ── Authors ───────────────────────────────────────────────────────────

  /// Persist a new author and return it with its generated id.
  fn insert_author(
    &self,
    input: NewAuthor,
  ) -> impl Future<Output = Result<Author, Self::Error>> + Send + '_;

  fn get_author(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Author>, Self::Error>> + Send + '_;

  /// Exact-match lookup on the unique email column.
  fn find_author_by_email(
    &self,
    email: String,
  ) -> impl Future<Output = Result<Option<Author>, Self::Error>> + Send + '_;

  /// All authors in insertion order.
  fn list_authors(
    &self,
  ) -> impl Future<Output = Result<Vec<Author>, Self::Error>> + Send + '_;

  /// Apply `patch` and return the updated row, or `None` if `id` is unknown.
  fn update_author(
    &self,
    id: i64,
    patch: AuthorPatch,
  ) -> impl Future<Output = Result<Option<Author>, Self::Error>> + Send + '_;

  /// Returns `false` if no author had this id.
  fn delete_author(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Posts ─────────────────────────────────────────────────────────────

  /// Persist a new draft post. `created_at` and `updated_at` are set by the
  /// store.
  fn insert_post(
    &self,
    input: NewPost,
  ) -> impl Future<Output = Result<Post, Self::Error>> + Send + '_;

  fn get_post(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Post>, Self::Error>> + Send + '_;

  /// Posts matching `query`, in insertion order.
  fn list_posts(
    &self,
    query: PostQuery,
  ) -> impl Future<Output = Result<Vec<Post>, Self::Error>> + Send + '_;

  fn count_posts_by_author(
    &self,
    author_id: i64,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Apply `patch`, refresh `updated_at`, and return the updated row.
  fn update_post(
    &self,
    id: i64,
    patch: PostPatch,
  ) -> impl Future<Output = Result<Option<Post>, Self::Error>> + Send + '_;

  /// Delete a post together with all of its comments, atomically.
  /// Returns `false` if no post had this id.
  fn delete_post(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Comments ──────────────────────────────────────────────────────────

  fn insert_comment(
    &self,
    input: NewComment,
  ) -> impl Future<Output = Result<Comment, Self::Error>> + Send + '_;

  fn get_comment(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Comment>, Self::Error>> + Send + '_;

  /// Comments on one post, in insertion order.
  fn list_comments(
    &self,
    post_id: i64,
  ) -> impl Future<Output = Result<Vec<Comment>, Self::Error>> + Send + '_;

  /// Comments on any of `post_ids`, ordered by id. Grouping is left to the
  /// caller.
  fn list_comments_for_posts(
    &self,
    post_ids: Vec<i64>,
  ) -> impl Future<Output = Result<Vec<Comment>, Self::Error>> + Send + '_;

  /// Replace both mutable fields of a comment.
  fn update_comment(
    &self,
    id: i64,
    body: CommentBody,
  ) -> impl Future<Output = Result<Option<Comment>, Self::Error>> + Send + '_;

  fn delete_comment(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
