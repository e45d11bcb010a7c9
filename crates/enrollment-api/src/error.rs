//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use enrollment_core::ErrorKind;
use serde_json::json;
use thiserror::Error;

use crate::pagination::PaginationError;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Service(#[from] enrollment_core::Error),

  #[error(transparent)]
  Pagination(#[from] PaginationError),

  /// Request body missing, not JSON, or not the expected shape.
  #[error(transparent)]
  Json(#[from] JsonRejection),

  /// Unparseable list parameters, e.g. a non-numeric `page`.
  #[error(transparent)]
  Query(#[from] QueryRejection),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::Service(e) => match e.kind() {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Upstream => StatusCode::INTERNAL_SERVER_ERROR,
      },
      ApiError::Pagination(_) | ApiError::Query(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
      ApiError::Json(_) => StatusCode::BAD_REQUEST,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }
    let body = json!({ "status": status.as_u16(), "error": self.to_string() });
    (status, Json(body)).into_response()
  }
}
