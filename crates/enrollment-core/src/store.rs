//! The `EnrollmentStore` trait.
//!
//! Implemented by storage backends (e.g. `enrollment-store-sqlite`). The
//! service and the HTTP layer depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::enrollment::{EnrollStatus, Enrollment, Filters};

/// Persistence for enrollment records.
///
/// The backend's error type must convert into [`crate::Error`] so that a
/// missing record surfaces as [`crate::Error::EnrollmentNotFound`] and every
/// other failure as [`crate::Error::Store`].
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait EnrollmentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + Into<crate::Error> + 'static;

  /// Insert `enrollment`, writing the generated `id` and `created_at` back
  /// into it.
  fn create<'a>(
    &'a self,
    enrollment: &'a mut Enrollment,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Enrollments matching `filters`, newest first, windowed by
  /// `offset`/`limit`. An empty page is not an error.
  fn get_all<'a>(
    &'a self,
    filters: &'a Filters,
    offset: u64,
    limit: u64,
  ) -> impl Future<Output = Result<Vec<Enrollment>, Self::Error>> + Send + 'a;

  /// Set `status` on the enrollment `id` when one is given.
  ///
  /// Fails with a not-found error when no enrollment has that id, even if
  /// `status` is `None`. Writing the value a record already holds succeeds.
  fn update<'a>(
    &'a self,
    id: &'a str,
    status: Option<EnrollStatus>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Number of enrollments matching `filters`, ignoring pagination.
  fn count<'a>(
    &'a self,
    filters: &'a Filters,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + 'a;
}
