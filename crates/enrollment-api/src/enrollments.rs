//! Handlers for `/enrollments` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `POST`  | `/enrollments` | Body: `{"user_id":"..","course_id":".."}`; returns 201 + stored enrollment |
//! | `GET`   | `/enrollments` | Optional `user_id`, `course_id`, `page`, `limit` |
//! | `PATCH` | `/enrollments/{id}` | Body: `{"status":"P"\|"A"\|"S"}`; omitted status changes nothing |

use axum::extract::{Path, State};
use enrollment_core::{
  Error,
  enrollment::{Enrollment, Filters},
  lookup::{CourseLookup, UserLookup},
  store::EnrollmentStore,
};
use serde::Deserialize;

use crate::{
  ApiState,
  error::ApiError,
  extract::{JsonBody, QueryParams},
  pagination::Meta,
  response::ApiResponse,
};

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct CreateBody {
  #[serde(default)]
  pub user_id:   String,
  #[serde(default)]
  pub course_id: String,
}

impl CreateBody {
  fn validate(&self) -> Result<(), Error> {
    if self.user_id.is_empty() {
      return Err(Error::UserIdRequired);
    }
    if self.course_id.is_empty() {
      return Err(Error::CourseIdRequired);
    }
    Ok(())
  }
}

/// `POST /enrollments`: returns 201 + the stored [`Enrollment`].
pub async fn create<S, U, C>(
  State(state): State<ApiState<S, U, C>>,
  JsonBody(body): JsonBody<CreateBody>,
) -> Result<ApiResponse<Enrollment>, ApiError>
where
  S: EnrollmentStore + 'static,
  U: UserLookup + 'static,
  C: CourseLookup + 'static,
{
  body.validate()?;
  let enrollment = state.service.create(&body.user_id, &body.course_id).await?;
  Ok(ApiResponse::created(enrollment))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  pub user_id:   Option<String>,
  pub course_id: Option<String>,
  /// 1-based; defaults to the first page.
  pub page:      Option<u64>,
  /// Page size; defaults to the configured page limit.
  pub limit:     Option<u64>,
}

/// `GET /enrollments[?user_id=..][&course_id=..][&page=..][&limit=..]`
pub async fn list<S, U, C>(
  State(state): State<ApiState<S, U, C>>,
  QueryParams(params): QueryParams<ListParams>,
) -> Result<ApiResponse<Vec<Enrollment>>, ApiError>
where
  S: EnrollmentStore + 'static,
  U: UserLookup + 'static,
  C: CourseLookup + 'static,
{
  let filters = Filters {
    user_id:   params.user_id,
    course_id: params.course_id,
  };

  let total = state.service.count(&filters).await?;
  let meta = Meta::new(
    params.page.unwrap_or(1),
    params.limit.unwrap_or(0),
    total,
    state.page_limit_default,
  )?;

  let enrollments = state
    .service
    .get_all(&filters, meta.offset(), meta.limit())
    .await?;
  Ok(ApiResponse::ok(enrollments).with_meta(meta))
}

// ─── Update ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct UpdateBody {
  /// Absent means "leave the status as it is".
  #[serde(default)]
  pub status: Option<String>,
}

/// `PATCH /enrollments/{id}` with body `{"status":"A"}`.
pub async fn update<S, U, C>(
  State(state): State<ApiState<S, U, C>>,
  Path(id): Path<String>,
  JsonBody(body): JsonBody<UpdateBody>,
) -> Result<ApiResponse<()>, ApiError>
where
  S: EnrollmentStore + 'static,
  U: UserLookup + 'static,
  C: CourseLookup + 'static,
{
  if body.status.as_deref() == Some("") {
    return Err(Error::StatusRequired.into());
  }
  state.service.update(&id, body.status.as_deref()).await?;
  Ok(ApiResponse::empty())
}
