//! Error type for `blog-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown post status in database: {0:?}")]
  UnknownStatus(String),

  /// The `UNIQUE` constraint on `authors.email` rejected an insert.
  #[error("email already registered: {0}")]
  EmailTaken(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<Error> for blog_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::EmailTaken(email) => blog_core::Error::EmailTaken(email),
      other => blog_core::Error::Store(Box::new(other)),
    }
  }
}
