//! Process wiring for the enrollment service: configuration, HTTP lookup
//! clients, and the outer middleware stack around
//! [`enrollment_api::api_router`].

pub mod lookup;

use std::path::PathBuf;

use axum::{Router, http::Method};
use enrollment_api::ApiState;
use enrollment_core::{
  lookup::{CourseLookup, UserLookup},
  store::EnrollmentStore,
};
use serde::Deserialize;
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ENROLLMENT_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:               String,
  #[serde(default = "default_port")]
  pub port:               u16,
  #[serde(default = "default_store_path")]
  pub store_path:         PathBuf,
  #[serde(default = "default_page_limit")]
  pub page_limit_default: u64,
  pub user_api_url:       String,
  pub course_api_url:     String,
  #[serde(default)]
  pub course_api_token:   Option<String>,
}

fn default_host() -> String { "127.0.0.1".into() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("enrollments.db") }

fn default_page_limit() -> u64 { 10 }

// ─── Application ──────────────────────────────────────────────────────────────

/// The full HTTP application: API routes plus request tracing and permissive
/// CORS. Preflight requests are answered by the CORS layer.
pub fn app<S, U, C>(state: ApiState<S, U, C>) -> Router
where
  S: EnrollmentStore + 'static,
  U: UserLookup + 'static,
  C: CourseLookup + 'static,
{
  let cors = CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([
      Method::GET,
      Method::POST,
      Method::PATCH,
      Method::OPTIONS,
      Method::DELETE,
      Method::HEAD,
    ])
    .allow_headers(Any);

  enrollment_api::api_router(state)
    .layer(TraceLayer::new_for_http())
    .layer(cors)
}
