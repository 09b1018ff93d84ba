//! Authors: a registered writer who owns posts.

use serde::{Deserialize, Deserializer, Serialize};

use crate::post::PostDetail;

/// A persisted author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
  pub id:    i64,
  pub name:  String,
  /// Unique across all authors.
  pub email: String,
  pub bio:   Option<String>,
}

/// Read model returned by `GET /authors/{id}`: the author plus its posts,
/// each with its comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorDetail {
  #[serde(flatten)]
  pub author: Author,
  pub posts:  Vec<PostDetail>,
}

/// Input to [`crate::store::BlogStore::insert_author`].
/// The id is always assigned by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAuthor {
  pub name:  String,
  pub email: String,
  #[serde(default)]
  pub bio:   Option<String>,
}

/// Partial update for an author. Email and id are not patchable.
///
/// `name`: `Some` overwrites; `None` (absent or `null`) keeps the stored name.
/// `bio`: absent keeps the stored bio, `null` clears it, a string replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthorPatch {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default, deserialize_with = "present")]
  pub bio:  Option<Option<String>>,
}

/// Distinguishes an explicit `null` from an absent field: only called when the
/// key is present, so `null` becomes `Some(None)`.
fn present<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(de).map(Some)
}
