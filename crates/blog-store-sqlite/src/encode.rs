//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings and statuses as their lowercase
//! tag.

use std::str::FromStr;

use blog_core::{
  author::Author,
  comment::Comment,
  post::{Post, PostStatus},
};
use chrono::{DateTime, Utc};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── PostStatus ──────────────────────────────────────────────────────────────

pub fn encode_status(s: PostStatus) -> &'static str {
  match s {
    PostStatus::Draft => "draft",
    PostStatus::Published => "published",
  }
}

pub fn decode_status(s: &str) -> Result<PostStatus> {
  PostStatus::from_str(s).map_err(|_| Error::UnknownStatus(s.to_owned()))
}

// ─── Row mappers ─────────────────────────────────────────────────────────────

pub const AUTHOR_COLUMNS: &str = "id, name, email, bio";
pub const POST_COLUMNS: &str =
  "id, title, content, author_id, status, created_at, updated_at";
pub const COMMENT_COLUMNS: &str = "id, post_id, author_name, content, created_at";

pub fn author_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Author> {
  Ok(Author {
    id:    row.get(0)?,
    name:  row.get(1)?,
    email: row.get(2)?,
    bio:   row.get(3)?,
  })
}

pub fn post_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawPost> {
  Ok(RawPost {
    id:         row.get(0)?,
    title:      row.get(1)?,
    content:    row.get(2)?,
    author_id:  row.get(3)?,
    status:     row.get(4)?,
    created_at: row.get(5)?,
    updated_at: row.get(6)?,
  })
}

pub fn comment_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawComment> {
  Ok(RawComment {
    id:          row.get(0)?,
    post_id:     row.get(1)?,
    author_name: row.get(2)?,
    content:     row.get(3)?,
    created_at:  row.get(4)?,
  })
}

// ─── Raw row types ───────────────────────────────────────────────────────────

/// Column values read from `posts` before decoding.
pub struct RawPost {
  pub id:         i64,
  pub title:      String,
  pub content:    String,
  pub author_id:  i64,
  pub status:     String,
  pub created_at: String,
  pub updated_at: String,
}

impl RawPost {
  pub fn into_post(self) -> Result<Post> {
    Ok(Post {
      id:         self.id,
      title:      self.title,
      content:    self.content,
      author_id:  self.author_id,
      status:     decode_status(&self.status)?,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Column values read from `comments` before decoding.
pub struct RawComment {
  pub id:          i64,
  pub post_id:     i64,
  pub author_name: String,
  pub content:     String,
  pub created_at:  String,
}

impl RawComment {
  pub fn into_comment(self) -> Result<Comment> {
    Ok(Comment {
      id:          self.id,
      post_id:     self.post_id,
      author_name: self.author_name,
      content:     self.content,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}
