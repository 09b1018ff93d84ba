//! Posts: an article owned by an author, with a one-way publication status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::comment::Comment;

// ─── Status ──────────────────────────────────────────────────────────────────

/// Publication status. `Draft` is initial, `Published` is terminal.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PostStatus {
  #[default]
  Draft,
  Published,
}

impl PostStatus {
  /// Whether a post in `self` may be moved to `next` by an update.
  ///
  /// Staying put is allowed here; the explicit publish operation rejects
  /// `Published -> Published` on its own.
  pub fn can_become(self, next: PostStatus) -> bool {
    match (self, next) {
      (Self::Draft, _) => true,
      (Self::Published, Self::Published) => true,
      (Self::Published, Self::Draft) => false,
    }
  }

  pub fn is_published(self) -> bool { matches!(self, Self::Published) }
}

// ─── Post ────────────────────────────────────────────────────────────────────

/// A persisted post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
  pub id:         i64,
  pub title:      String,
  pub content:    String,
  pub author_id:  i64,
  pub status:     PostStatus,
  /// Set once by the store at creation.
  pub created_at: DateTime<Utc>,
  /// Refreshed by the store on every mutation.
  pub updated_at: DateTime<Utc>,
}

/// A post as returned over the API: the post plus its comments. New posts
/// carry an empty list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
  #[serde(flatten)]
  pub post:     Post,
  pub comments: Vec<Comment>,
}

/// Input to [`crate::store::BlogStore::insert_post`]. New posts are always
/// drafts; status and timestamps are not accepted from callers.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPost {
  pub title:     String,
  pub content:   String,
  pub author_id: i64,
}

/// Partial update for a post. Every `Some` field overwrites the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PostPatch {
  #[serde(default)]
  pub title:   Option<String>,
  #[serde(default)]
  pub content: Option<String>,
  #[serde(default)]
  pub status:  Option<PostStatus>,
}

impl PostPatch {
  pub fn publish() -> Self {
    Self {
      status: Some(PostStatus::Published),
      ..Self::default()
    }
  }
}

// ─── Query ───────────────────────────────────────────────────────────────────

/// Validated parameters for [`crate::store::BlogStore::list_posts`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuery {
  pub status:    Option<PostStatus>,
  pub author_id: Option<i64>,
  pub offset:    u64,
  /// `None` returns every remaining row.
  pub limit:     Option<u64>,
}

impl PostQuery {
  /// All posts of one author, unpaginated.
  pub fn by_author(author_id: i64) -> Self {
    Self {
      author_id: Some(author_id),
      ..Self::default()
    }
  }
}
