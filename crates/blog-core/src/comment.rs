//! Comments: a free-text reply attached to a post.
//!
//! Commenters are not registered authors; `author_name` is plain text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
  pub id:          i64,
  pub post_id:     i64,
  pub author_name: String,
  pub content:     String,
  pub created_at:  DateTime<Utc>,
}

/// Input to [`crate::store::BlogStore::insert_comment`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewComment {
  pub post_id:     i64,
  pub author_name: String,
  pub content:     String,
}

/// The mutable fields of a comment. Updates replace both.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommentBody {
  pub author_name: String,
  pub content:     String,
}

impl CommentBody {
  pub fn on(self, post_id: i64) -> NewComment {
    NewComment {
      post_id,
      author_name: self.author_name,
      content: self.content,
    }
  }
}
