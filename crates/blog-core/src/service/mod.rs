//! Entity services: the business rules for authors, posts and comments.
//!
//! Every operation takes the storage handle explicitly and turns persistence
//! results (or their absence) into either a value or a typed [`crate::Error`].

pub mod authors;
pub mod comments;
pub mod posts;

use crate::Error;

/// Lift a backend error into the domain error.
pub(crate) fn store_err<E: Into<Error>>(e: E) -> Error { e.into() }
