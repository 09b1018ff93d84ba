//! [`SqliteStore`], the SQLite implementation of [`BlogStore`].

use std::path::Path;

use blog_core::{
  author::{Author, AuthorPatch, NewAuthor},
  comment::{Comment, CommentBody, NewComment},
  post::{NewPost, Post, PostPatch, PostQuery, PostStatus},
  store::BlogStore,
};
use chrono::Utc;
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{
    AUTHOR_COLUMNS, COMMENT_COLUMNS, POST_COLUMNS, RawComment, RawPost, author_row,
    comment_row, encode_dt, encode_status, post_row,
  },
  schema::SCHEMA,
};

/// Path that [`SqliteStore::open`] treats as a request for an in-memory
/// database.
pub const MEMORY_PATH: &str = ":memory:";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A blog store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    if path.as_ref() == Path::new(MEMORY_PATH) {
      return Self::open_in_memory().await;
    }
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn fetch_post(&self, id: i64) -> Result<Option<Post>> {
    let raw: Option<RawPost> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?1"),
              rusqlite::params![id],
              post_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPost::into_post).transpose()
  }

  async fn fetch_comment(&self, id: i64) -> Result<Option<Comment>> {
    let raw: Option<RawComment> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = ?1"),
              rusqlite::params![id],
              comment_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawComment::into_comment).transpose()
  }
}

/// Whether `e` is a `UNIQUE` constraint violation.
fn is_unique_violation(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(f, _)
      if f.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

// ─── BlogStore impl ──────────────────────────────────────────────────────────

impl BlogStore for SqliteStore {
  type Error = Error;

  // ── Authors ───────────────────────────────────────────────────────────────

  async fn insert_author(&self, input: NewAuthor) -> Result<Author> {
    let NewAuthor { name, email, bio } = input;
    let (name_c, email_c, bio_c) = (name.clone(), email.clone(), bio.clone());

    let id: Option<i64> = self
      .conn
      .call(move |conn| {
        match conn.execute(
          "INSERT INTO authors (name, email, bio) VALUES (?1, ?2, ?3)",
          rusqlite::params![name_c, email_c, bio_c],
        ) {
          Ok(_) => Ok(Some(conn.last_insert_rowid())),
          Err(e) if is_unique_violation(&e) => Ok(None),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    let id = id.ok_or_else(|| Error::EmailTaken(email.clone()))?;
    tracing::debug!(author_id = id, "inserted author row");
    Ok(Author { id, name, email, bio })
  }

  async fn get_author(&self, id: i64) -> Result<Option<Author>> {
    Ok(
      self
        .conn
        .call(move |conn| {
          Ok(
            conn
              .query_row(
                &format!("SELECT {AUTHOR_COLUMNS} FROM authors WHERE id = ?1"),
                rusqlite::params![id],
                author_row,
              )
              .optional()?,
          )
        })
        .await?,
    )
  }

  async fn find_author_by_email(&self, email: String) -> Result<Option<Author>> {
    Ok(
      self
        .conn
        .call(move |conn| {
          Ok(
            conn
              .query_row(
                &format!("SELECT {AUTHOR_COLUMNS} FROM authors WHERE email = ?1"),
                rusqlite::params![email],
                author_row,
              )
              .optional()?,
          )
        })
        .await?,
    )
  }

  async fn list_authors(&self) -> Result<Vec<Author>> {
    Ok(
      self
        .conn
        .call(|conn| {
          let mut stmt =
            conn.prepare(&format!("SELECT {AUTHOR_COLUMNS} FROM authors ORDER BY id"))?;
          let rows = stmt
            .query_map([], author_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn update_author(&self, id: i64, patch: AuthorPatch) -> Result<Option<Author>> {
    let AuthorPatch { name, bio } = patch;
    // `bio` is tri-state: a flag says whether to touch the column at all.
    let set_bio = bio.is_some();
    let bio = bio.flatten();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE authors
             SET name = COALESCE(?2, name),
                 bio  = CASE WHEN ?3 THEN ?4 ELSE bio END
           WHERE id = ?1",
          rusqlite::params![id, name, set_bio, bio],
        )?)
      })
      .await?;

    if changed == 0 {
      return Ok(None);
    }
    self.get_author(id).await
  }

  async fn delete_author(&self, id: i64) -> Result<bool> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM authors WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;
    Ok(deleted > 0)
  }

  // ── Posts ─────────────────────────────────────────────────────────────────

  async fn insert_post(&self, input: NewPost) -> Result<Post> {
    let now = Utc::now();
    let NewPost { title, content, author_id } = input;

    let (title_c, content_c) = (title.clone(), content.clone());
    let status_str = encode_status(PostStatus::Draft);
    let at_str = encode_dt(now);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO posts (title, content, author_id, status, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
          rusqlite::params![title_c, content_c, author_id, status_str, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Post {
      id,
      title,
      content,
      author_id,
      status: PostStatus::Draft,
      created_at: now,
      updated_at: now,
    })
  }

  async fn get_post(&self, id: i64) -> Result<Option<Post>> { self.fetch_post(id).await }

  async fn list_posts(&self, query: PostQuery) -> Result<Vec<Post>> {
    let status_str = query.status.map(encode_status);
    let author_id  = query.author_id;
    // SQLite treats a negative LIMIT as "no limit".
    let limit_val  = query.limit.map_or(-1, |l| l as i64);
    let offset_val = query.offset as i64;

    let raws: Vec<RawPost> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {POST_COLUMNS}
           FROM posts
           WHERE (?1 IS NULL OR status = ?1)
             AND (?2 IS NULL OR author_id = ?2)
           ORDER BY id
           LIMIT ?3 OFFSET ?4"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![status_str, author_id, limit_val, offset_val],
            post_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPost::into_post).collect()
  }

  async fn count_posts_by_author(&self, author_id: i64) -> Result<u64> {
    let count: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM posts WHERE author_id = ?1",
          rusqlite::params![author_id],
          |r| r.get(0),
        )?)
      })
      .await?;
    Ok(count as u64)
  }

  async fn update_post(&self, id: i64, patch: PostPatch) -> Result<Option<Post>> {
    let PostPatch { title, content, status } = patch;
    let status_str = status.map(encode_status);
    let at_str     = encode_dt(Utc::now());

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE posts
             SET title      = COALESCE(?2, title),
                 content    = COALESCE(?3, content),
                 status     = COALESCE(?4, status),
                 updated_at = ?5
           WHERE id = ?1",
          rusqlite::params![id, title, content, status_str, at_str],
        )?)
      })
      .await?;

    if changed == 0 {
      return Ok(None);
    }
    self.fetch_post(id).await
  }

  async fn delete_post(&self, id: i64) -> Result<bool> {
    let (comments, posts) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let comments =
          tx.execute("DELETE FROM comments WHERE post_id = ?1", rusqlite::params![id])?;
        let posts = tx.execute("DELETE FROM posts WHERE id = ?1", rusqlite::params![id])?;
        tx.commit()?;
        Ok((comments, posts))
      })
      .await?;

    if posts > 0 {
      tracing::debug!(post_id = id, comments, "deleted post row and its comments");
    }
    Ok(posts > 0)
  }

  // ── Comments ──────────────────────────────────────────────────────────────

  async fn insert_comment(&self, input: NewComment) -> Result<Comment> {
    let now = Utc::now();
    let NewComment { post_id, author_name, content } = input;

    let (author_name_c, content_c) = (author_name.clone(), content.clone());
    let at_str = encode_dt(now);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO comments (post_id, author_name, content, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![post_id, author_name_c, content_c, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Comment {
      id,
      post_id,
      author_name,
      content,
      created_at: now,
    })
  }

  async fn get_comment(&self, id: i64) -> Result<Option<Comment>> {
    self.fetch_comment(id).await
  }

  async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>> {
    let raws: Vec<RawComment> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {COMMENT_COLUMNS} FROM comments WHERE post_id = ?1 ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![post_id], comment_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawComment::into_comment).collect()
  }

  async fn list_comments_for_posts(&self, post_ids: Vec<i64>) -> Result<Vec<Comment>> {
    if post_ids.is_empty() {
      return Ok(Vec::new());
    }

    let raws: Vec<RawComment> = self
      .conn
      .call(move |conn| {
        let placeholders = vec!["?"; post_ids.len()].join(", ");
        let mut stmt = conn.prepare(&format!(
          "SELECT {COMMENT_COLUMNS} FROM comments WHERE post_id IN ({placeholders}) ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(post_ids.iter()), comment_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawComment::into_comment).collect()
  }

  async fn update_comment(&self, id: i64, body: CommentBody) -> Result<Option<Comment>> {
    let CommentBody { author_name, content } = body;

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE comments SET author_name = ?2, content = ?3 WHERE id = ?1",
          rusqlite::params![id, author_name, content],
        )?)
      })
      .await?;

    if changed == 0 {
      return Ok(None);
    }
    self.fetch_comment(id).await
  }

  async fn delete_comment(&self, id: i64) -> Result<bool> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM comments WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;
    Ok(deleted > 0)
  }
}
