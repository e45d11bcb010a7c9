//! Error types for `enrollment-core`.

use thiserror::Error;

/// Boxed failure from a collaborator whose concrete error type the core does
/// not know.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("user id is required")]
  UserIdRequired,

  #[error("course id is required")]
  CourseIdRequired,

  #[error("status is required")]
  StatusRequired,

  #[error("invalid status {0:?}")]
  InvalidStatus(String),

  #[error("user {0} not found")]
  UserNotFound(String),

  #[error("course {0} not found")]
  CourseNotFound(String),

  #[error("enrollment {0} doesn't exist")]
  EnrollmentNotFound(String),

  #[error("lookup error: {0}")]
  Lookup(#[source] BoxError),

  #[error("store error: {0}")]
  Store(#[source] BoxError),
}

/// Coarse classification of [`Error`]; the transport layer maps each kind to
/// exactly one response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// The caller sent something malformed. Never retried.
  Validation,
  /// A referenced user, course, or enrollment does not exist.
  NotFound,
  /// An opaque failure from storage or a lookup collaborator.
  Upstream,
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::UserIdRequired
      | Self::CourseIdRequired
      | Self::StatusRequired
      | Self::InvalidStatus(_) => ErrorKind::Validation,
      Self::UserNotFound(_)
      | Self::CourseNotFound(_)
      | Self::EnrollmentNotFound(_) => ErrorKind::NotFound,
      Self::Lookup(_) | Self::Store(_) => ErrorKind::Upstream,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
