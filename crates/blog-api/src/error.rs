//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use blog_core::ErrorKind;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub blog_core::Error);

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self.0.kind() {
      ErrorKind::NotFound => StatusCode::NOT_FOUND,
      ErrorKind::Conflict | ErrorKind::InvalidArgument | ErrorKind::InvalidState => {
        StatusCode::BAD_REQUEST
      }
      ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
      ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self.0, "request failed");
    }
    (status, Json(json!({ "error": self.0.to_string() }))).into_response()
  }
}
