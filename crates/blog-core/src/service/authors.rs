//! Author operations.

use crate::{
  Error, Result,
  author::{Author, AuthorDetail, AuthorPatch, NewAuthor},
  post::{Post, PostQuery},
  service::{posts, store_err},
  store::BlogStore,
  validate,
};

/// Register a new author. The email must be well-formed and not taken; it is
/// stored and compared in normalised form.
pub async fn create<S: BlogStore>(store: &S, input: NewAuthor) -> Result<Author> {
  let email = validate::email(&input.email)?;

  if store
    .find_author_by_email(email.clone())
    .await
    .map_err(store_err)?
    .is_some()
  {
    return Err(Error::EmailTaken(email));
  }

  let input = NewAuthor { email, ..input };

  let author = store.insert_author(input).await.map_err(store_err)?;
  tracing::debug!(author_id = author.id, "created author");
  Ok(author)
}

/// Fetch an author with all of their posts, each carrying its comments.
pub async fn get<S: BlogStore>(store: &S, id: i64) -> Result<AuthorDetail> {
  let author = require(store, id).await?;
  let owned = store
    .list_posts(PostQuery::by_author(id))
    .await
    .map_err(store_err)?;
  let posts = posts::with_comments(store, owned).await?;
  Ok(AuthorDetail { author, posts })
}

pub async fn update<S: BlogStore>(store: &S, id: i64, patch: AuthorPatch) -> Result<Author> {
  let author = store
    .update_author(id, patch)
    .await
    .map_err(store_err)?
    .ok_or(Error::AuthorNotFound(id))?;
  tracing::debug!(author_id = id, "updated author");
  Ok(author)
}

/// Delete an author. Authors that still own posts cannot be deleted; their
/// posts have to be removed first.
pub async fn delete<S: BlogStore>(store: &S, id: i64) -> Result<()> {
  require(store, id).await?;

  let owned = store.count_posts_by_author(id).await.map_err(store_err)?;
  if owned > 0 {
    return Err(Error::AuthorHasPosts(id));
  }

  if !store.delete_author(id).await.map_err(store_err)? {
    return Err(Error::AuthorNotFound(id));
  }
  tracing::debug!(author_id = id, "deleted author");
  Ok(())
}

pub async fn list<S: BlogStore>(store: &S) -> Result<Vec<Author>> {
  store.list_authors().await.map_err(store_err)
}

pub async fn list_posts<S: BlogStore>(store: &S, id: i64) -> Result<Vec<Post>> {
  require(store, id).await?;
  store
    .list_posts(PostQuery::by_author(id))
    .await
    .map_err(store_err)
}

/// Load an author or fail with [`Error::AuthorNotFound`].
pub(crate) async fn require<S: BlogStore>(store: &S, id: i64) -> Result<Author> {
  store
    .get_author(id)
    .await
    .map_err(store_err)?
    .ok_or(Error::AuthorNotFound(id))
}
