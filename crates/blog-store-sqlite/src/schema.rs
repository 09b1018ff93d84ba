//! SQL schema for the blog SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS authors (
    id     INTEGER PRIMARY KEY AUTOINCREMENT,
    name   TEXT NOT NULL,
    email  TEXT NOT NULL UNIQUE,
    bio    TEXT
);

-- Deleting an author that still owns posts is rejected by the FK.
CREATE TABLE IF NOT EXISTS posts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    content     TEXT NOT NULL,
    author_id   INTEGER NOT NULL REFERENCES authors(id),
    status      TEXT NOT NULL DEFAULT 'draft'
                CHECK (status IN ('draft', 'published')),
    created_at  TEXT NOT NULL,   -- RFC 3339 UTC; set once
    updated_at  TEXT NOT NULL    -- RFC 3339 UTC; refreshed on every mutation
);

CREATE TABLE IF NOT EXISTS comments (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    post_id      INTEGER NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
    author_name  TEXT NOT NULL,
    content      TEXT NOT NULL,
    created_at   TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS authors_name_idx   ON authors(name);
CREATE INDEX IF NOT EXISTS posts_author_idx   ON posts(author_id);
CREATE INDEX IF NOT EXISTS posts_status_idx   ON posts(status);
CREATE INDEX IF NOT EXISTS comments_post_idx  ON comments(post_id);

PRAGMA user_version = 1;
";
