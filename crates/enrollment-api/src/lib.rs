//! JSON REST API for enrollments.
//!
//! Exposes an axum [`Router`] backed by an [`EnrollmentService`] over any
//! store and lookup implementations. CORS, TLS, and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = enrollment_api::api_router(ApiState::new(service, 10));
//! ```

pub mod enrollments;
pub mod error;
pub mod extract;
pub mod pagination;
pub mod response;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, patch},
};
use enrollment_core::{
  EnrollmentService,
  lookup::{CourseLookup, UserLookup},
  store::EnrollmentStore,
};

pub use error::ApiError;
pub use pagination::Meta;
pub use response::ApiResponse;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct ApiState<S, U, C> {
  pub service:            Arc<EnrollmentService<S, U, C>>,
  /// Page size used when a list request does not give one.
  pub page_limit_default: u64,
}

impl<S, U, C> ApiState<S, U, C> {
  pub fn new(service: EnrollmentService<S, U, C>, page_limit_default: u64) -> Self {
    Self { service: Arc::new(service), page_limit_default }
  }
}

impl<S, U, C> Clone for ApiState<S, U, C> {
  fn clone(&self) -> Self {
    Self {
      service:            Arc::clone(&self.service),
      page_limit_default: self.page_limit_default,
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, U, C>(state: ApiState<S, U, C>) -> Router<()>
where
  S: EnrollmentStore + 'static,
  U: UserLookup + 'static,
  C: CourseLookup + 'static,
{
  Router::new()
    .route(
      "/enrollments",
      get(enrollments::list::<S, U, C>).post(enrollments::create::<S, U, C>),
    )
    .route("/enrollments/{id}", patch(enrollments::update::<S, U, C>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::sync::atomic::{AtomicUsize, Ordering};

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use enrollment_core::lookup::{Course, User};
  use enrollment_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  use super::*;

  /// A user directory and course catalog that know a fixed set of ids.
  #[derive(Clone, Default)]
  struct Directory {
    known: Vec<&'static str>,
    fail:  bool,
    calls: Arc<AtomicUsize>,
  }

  impl Directory {
    fn knowing(known: &[&'static str]) -> Self {
      Self { known: known.to_vec(), ..Self::default() }
    }

    fn broken() -> Self { Self { fail: true, ..Self::default() } }

    fn lookup(&self, id: &str) -> std::io::Result<bool> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      if self.fail {
        return Err(std::io::Error::other("unexpected error"));
      }
      Ok(self.known.iter().any(|k| *k == id))
    }
  }

  impl UserLookup for Directory {
    type Error = std::io::Error;

    async fn get(&self, id: &str) -> std::io::Result<Option<User>> {
      Ok(self.lookup(id)?.then(|| User {
        id:         id.to_owned(),
        first_name: String::new(),
        last_name:  String::new(),
        email:      String::new(),
      }))
    }
  }

  impl CourseLookup for Directory {
    type Error = std::io::Error;

    async fn get(&self, id: &str) -> std::io::Result<Option<Course>> {
      Ok(self.lookup(id)?.then(|| Course { id: id.to_owned(), name: String::new() }))
    }
  }

  type TestState = ApiState<SqliteStore, Directory, Directory>;

  async fn make_state(users: Directory, courses: Directory, limit: u64) -> TestState {
    let store = SqliteStore::open_in_memory().await.unwrap();
    ApiState::new(EnrollmentService::new(store, users, courses), limit)
  }

  async fn default_state() -> TestState {
    make_state(
      Directory::knowing(&["123-test", "1", "2"]),
      Directory::knowing(&["222-test", "4"]),
      10,
    )
    .await
  }

  async fn call(state: TestState, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    send(state, builder.body(body).unwrap()).await
  }

  async fn send(state: TestState, req: Request<Body>) -> (StatusCode, Value) {
    let resp = api_router(state).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
  }

  async fn create(state: &TestState, user: &str, course: &str) -> Value {
    let (status, body) = call(
      state.clone(),
      "POST",
      "/enrollments",
      Some(json!({ "user_id": user, "course_id": course })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"].clone()
  }

  // ── POST ─────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_then_list_by_user() {
    let state = default_state().await;

    let (status, body) = call(
      state.clone(),
      "POST",
      "/enrollments",
      Some(json!({ "user_id": "123-test", "course_id": "222-test" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], 201);
    assert_eq!(body["message"], "success");
    let created = &body["data"];
    assert!(!created["id"].as_str().unwrap().is_empty());
    assert_eq!(created["user_id"], "123-test");
    assert_eq!(created["course_id"], "222-test");
    assert_eq!(created["status"], "P");

    let (status, body) = call(
      state,
      "GET",
      "/enrollments?user_id=123-test&course_id=222-test",
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], 200);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(&body["data"][0], created);
    assert_eq!(body["meta"]["total_count"], 1);
  }

  #[tokio::test]
  async fn empty_ids_are_rejected_before_any_lookup() {
    let users = Directory::knowing(&["1"]);
    let courses = Directory::knowing(&["4"]);
    let state = make_state(users.clone(), courses.clone(), 10).await;

    let (status, body) =
      call(state.clone(), "POST", "/enrollments", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "user id is required");

    let (status, body) = call(
      state,
      "POST",
      "/enrollments",
      Some(json!({ "user_id": "1", "course_id": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "course id is required");

    assert_eq!(users.calls.load(Ordering::SeqCst), 0);
    assert_eq!(courses.calls.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn unknown_user_or_course_is_404() {
    let state = default_state().await;

    let (status, body) = call(
      state.clone(),
      "POST",
      "/enrollments",
      Some(json!({ "user_id": "nobody", "course_id": "4" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "user nobody not found");

    let (status, _) = call(
      state.clone(),
      "POST",
      "/enrollments",
      Some(json!({ "user_id": "1", "course_id": "nothing" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = call(state, "GET", "/enrollments", None).await;
    assert_eq!(body["meta"]["total_count"], 0);
  }

  #[tokio::test]
  async fn lookup_failure_is_500() {
    let state = make_state(Directory::broken(), Directory::knowing(&["4"]), 10).await;

    let (status, body) = call(
      state,
      "POST",
      "/enrollments",
      Some(json!({ "user_id": "1", "course_id": "4" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], 500);
  }

  // ── GET ──────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_is_paginated_newest_first() {
    let state = default_state().await;
    let first = create(&state, "1", "4").await;
    let second = create(&state, "2", "4").await;
    let third = create(&state, "1", "222-test").await;

    let (status, body) = call(state.clone(), "GET", "/enrollments?limit=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([third.clone(), second.clone()]));
    assert_eq!(
      body["meta"],
      json!({ "total_count": 3, "page": 1, "per_page": 2, "page_count": 2 })
    );

    let (_, body) = call(state.clone(), "GET", "/enrollments?limit=2&page=2", None).await;
    assert_eq!(body["data"], json!([first.clone()]));

    let (_, body) = call(state, "GET", "/enrollments?course_id=4", None).await;
    assert_eq!(body["data"], json!([second, first]));
    assert_eq!(body["meta"]["per_page"], 10);
  }

  #[tokio::test]
  async fn zero_page_limit_is_500() {
    let state = make_state(Directory::default(), Directory::default(), 0).await;

    let (status, body) = call(state, "GET", "/enrollments", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "page limit must be greater than zero");
  }

  #[tokio::test]
  async fn unparseable_list_params_are_500_with_envelope() {
    let state = default_state().await;

    for uri in ["/enrollments?page=abc", "/enrollments?limit=-1"] {
      let (status, body) = call(state.clone(), "GET", uri, None).await;
      assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
      assert_eq!(body["status"], 500);
      let msg = body["error"].as_str().unwrap();
      assert!(msg.contains("query string"), "{msg}");
    }
  }

  #[tokio::test]
  async fn malformed_body_is_400_with_envelope() {
    let state = default_state().await;

    let req = Request::builder()
      .method("POST")
      .uri("/enrollments")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{bad"))
      .unwrap();
    let (status, body) = send(state.clone(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["error"].as_str().unwrap().contains("JSON"), "{body}");

    let req = Request::builder()
      .method("PATCH")
      .uri("/enrollments/20")
      .body(Body::empty())
      .unwrap();
    let (status, body) = send(state, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "{body}");
  }

  // ── PATCH ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn update_status_is_visible_in_list() {
    let state = default_state().await;
    let created = create(&state, "123-test", "222-test").await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = call(
      state.clone(),
      "PATCH",
      &format!("/enrollments/{id}"),
      Some(json!({ "status": "A" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": 200, "message": "success" }));

    let (_, body) = call(state, "GET", "/enrollments?user_id=123-test", None).await;
    assert_eq!(body["data"][0]["id"], id);
    assert_eq!(body["data"][0]["status"], "A");
  }

  #[tokio::test]
  async fn empty_status_is_400() {
    let state = default_state().await;
    let created = create(&state, "1", "4").await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = call(
      state,
      "PATCH",
      &format!("/enrollments/{id}"),
      Some(json!({ "status": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "status is required");
  }

  #[tokio::test]
  async fn unknown_status_is_400() {
    let state = default_state().await;
    let created = create(&state, "1", "4").await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = call(
      state,
      "PATCH",
      &format!("/enrollments/{id}"),
      Some(json!({ "status": "Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid status \"Z\"");
  }

  #[tokio::test]
  async fn update_unknown_id_is_404() {
    let state = default_state().await;

    for payload in [json!({ "status": "A" }), json!({})] {
      let (status, body) =
        call(state.clone(), "PATCH", "/enrollments/20", Some(payload)).await;
      assert_eq!(status, StatusCode::NOT_FOUND);
      assert_eq!(body["error"], "enrollment 20 doesn't exist");
    }
  }

  #[tokio::test]
  async fn update_without_status_is_a_no_op() {
    let state = default_state().await;
    let created = create(&state, "1", "4").await;
    let id = created["id"].as_str().unwrap();

    let (status, _) =
      call(state.clone(), "PATCH", &format!("/enrollments/{id}"), Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = call(state, "GET", "/enrollments", None).await;
    assert_eq!(body["data"][0]["status"], "P");
  }
}
