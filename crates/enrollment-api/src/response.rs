//! Success envelope shared by every endpoint.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::pagination::Meta;

/// A successful response carrying a payload of type `T`.
///
/// Serialised as `{"status": <code>, "message": "success", "data": ..,
/// "meta": ..}`; `data` and `meta` are omitted when absent.
#[derive(Debug)]
pub struct ApiResponse<T> {
  status: StatusCode,
  data:   Option<T>,
  meta:   Option<Meta>,
}

impl<T> ApiResponse<T> {
  pub fn ok(data: T) -> Self {
    Self { status: StatusCode::OK, data: Some(data), meta: None }
  }

  pub fn created(data: T) -> Self {
    Self { status: StatusCode::CREATED, data: Some(data), meta: None }
  }

  pub fn with_meta(mut self, meta: Meta) -> Self {
    self.meta = Some(meta);
    self
  }
}

impl ApiResponse<()> {
  /// `200` with neither data nor meta.
  pub fn empty() -> Self {
    Self { status: StatusCode::OK, data: None, meta: None }
  }
}

#[derive(Serialize)]
struct Envelope<'a, T> {
  status:  u16,
  message: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  data:    Option<&'a T>,
  #[serde(skip_serializing_if = "Option::is_none")]
  meta:    Option<&'a Meta>,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
  fn into_response(self) -> Response {
    let envelope = Envelope {
      status:  self.status.as_u16(),
      message: "success",
      data:    self.data.as_ref(),
      meta:    self.meta.as_ref(),
    };
    (self.status, Json(envelope)).into_response()
  }
}
