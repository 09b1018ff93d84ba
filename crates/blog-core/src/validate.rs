//! Input validation shared by the services.
//!
//! Shape checks (required fields, JSON types) happen during deserialisation;
//! the checks here cover what the type system cannot express.

use std::{str::FromStr, sync::LazyLock};

use regex::Regex;

use crate::{Error, Result, post::PostStatus};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~.-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
  )
  .expect("valid email regex")
});

/// Check that `address` is a syntactically valid email address (a dot-atom
/// local part, an `@`, and a domain with at least two labels) and return its
/// normalised form.
///
/// Domains are case-insensitive, so the domain is lowercased; the local part
/// is kept as given.
pub fn email(address: &str) -> Result<String> {
  let invalid = || Error::InvalidEmail(address.to_owned());

  if address.len() > 254 || !EMAIL_RE.is_match(address) {
    return Err(invalid());
  }
  let (local, domain) = address.rsplit_once('@').ok_or_else(invalid)?;
  if local.len() > 64 || local.starts_with('.') || local.ends_with('.') || local.contains("..")
  {
    return Err(invalid());
  }
  Ok(format!("{local}@{}", domain.to_ascii_lowercase()))
}

/// Parse an optional status filter; anything outside the closed set is an
/// [`Error::InvalidStatus`].
pub fn status_filter(raw: Option<&str>) -> Result<Option<PostStatus>> {
  raw
    .map(|s| PostStatus::from_str(s).map_err(|_| Error::InvalidStatus(s.to_owned())))
    .transpose()
}

/// Resolve `skip`/`limit` to `(offset, limit)`, applying defaults.
/// `skip` must be non-negative and `limit` within `1..=MAX_LIMIT`.
pub fn pagination(skip: Option<i64>, limit: Option<i64>) -> Result<(u64, u64)> {
  let skip = skip.unwrap_or(0);
  let limit = limit.unwrap_or(DEFAULT_LIMIT);

  let skip = u64::try_from(skip)
    .map_err(|_| Error::InvalidPagination(format!("skip must be >= 0, got {skip}")))?;
  if !(1..=MAX_LIMIT).contains(&limit) {
    return Err(Error::InvalidPagination(format!(
      "limit must be between 1 and {MAX_LIMIT}, got {limit}"
    )));
  }
  Ok((skip, limit as u64))
}
