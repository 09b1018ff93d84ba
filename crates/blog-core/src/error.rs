//! Error types for `blog-core`.

use thiserror::Error;

use crate::post::PostStatus;

#[derive(Debug, Error)]
pub enum Error {
  #[error("author not found: {0}")]
  AuthorNotFound(i64),

  #[error("post not found: {0}")]
  PostNotFound(i64),

  #[error("comment not found: {0}")]
  CommentNotFound(i64),

  #[error("email already registered: {0}")]
  EmailTaken(String),

  #[error("author {0} still has posts")]
  AuthorHasPosts(i64),

  #[error("invalid post status: {0:?}")]
  InvalidStatus(String),

  #[error("post {0} is already published")]
  AlreadyPublished(i64),

  #[error("post {id} cannot move from {from} to {to}")]
  IllegalTransition {
    id:   i64,
    from: PostStatus,
    to:   PostStatus,
  },

  #[error("invalid email address: {0:?}")]
  InvalidEmail(String),

  #[error("invalid pagination: {0}")]
  InvalidPagination(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Coarse classification of an [`Error`], independent of transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// A referenced entity id does not exist.
  NotFound,
  /// A uniqueness or ownership constraint would be violated.
  Conflict,
  /// A filter value is outside its closed set.
  InvalidArgument,
  /// The requested status transition is not allowed.
  InvalidState,
  /// The input failed a syntactic check (email, pagination bounds).
  Validation,
  /// The storage backend failed.
  Internal,
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::AuthorNotFound(_) | Self::PostNotFound(_) | Self::CommentNotFound(_) => {
        ErrorKind::NotFound
      }
      Self::EmailTaken(_) | Self::AuthorHasPosts(_) => ErrorKind::Conflict,
      Self::InvalidStatus(_) => ErrorKind::InvalidArgument,
      Self::AlreadyPublished(_) | Self::IllegalTransition { .. } => ErrorKind::InvalidState,
      Self::InvalidEmail(_) | Self::InvalidPagination(_) => ErrorKind::Validation,
      Self::Store(_) => ErrorKind::Internal,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
