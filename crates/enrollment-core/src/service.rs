//! [`EnrollmentService`] sequences the lookups and the store for each
//! enrollment operation.

use tracing::warn;

use crate::{
  Error, Result,
  enrollment::{EnrollStatus, Enrollment, Filters},
  lookup::{CourseLookup, UserLookup},
  store::EnrollmentStore,
};

/// The enrollment lifecycle: creation gated on the referenced user and course
/// existing, listing, counting, and status updates.
///
/// Holds no mutable state of its own; share it behind an `Arc`.
pub struct EnrollmentService<S, U, C> {
  store:   S,
  users:   U,
  courses: C,
}

impl<S, U, C> EnrollmentService<S, U, C>
where
  S: EnrollmentStore,
  U: UserLookup,
  C: CourseLookup,
{
  pub fn new(store: S, users: U, courses: C) -> Self {
    Self { store, users, courses }
  }

  /// Enroll `user_id` in `course_id`.
  ///
  /// The user is checked first, then the course; the first failure returns
  /// before anything is written. Ids are assumed non-empty.
  pub async fn create(&self, user_id: &str, course_id: &str) -> Result<Enrollment> {
    match self.users.get(user_id).await {
      Ok(Some(_)) => {}
      Ok(None) => return Err(Error::UserNotFound(user_id.to_owned())),
      Err(e) => {
        warn!(user_id, error = %e, "user lookup failed");
        return Err(Error::Lookup(Box::new(e)));
      }
    }

    match self.courses.get(course_id).await {
      Ok(Some(_)) => {}
      Ok(None) => return Err(Error::CourseNotFound(course_id.to_owned())),
      Err(e) => {
        warn!(course_id, error = %e, "course lookup failed");
        return Err(Error::Lookup(Box::new(e)));
      }
    }

    let mut enrollment = Enrollment::pending(user_id, course_id);
    self
      .store
      .create(&mut enrollment)
      .await
      .map_err(upstream("create enrollment"))?;
    Ok(enrollment)
  }

  pub async fn get_all(
    &self,
    filters: &Filters,
    offset: u64,
    limit: u64,
  ) -> Result<Vec<Enrollment>> {
    self
      .store
      .get_all(filters, offset, limit)
      .await
      .map_err(upstream("list enrollments"))
  }

  pub async fn count(&self, filters: &Filters) -> Result<u64> {
    self
      .store
      .count(filters)
      .await
      .map_err(upstream("count enrollments"))
  }

  /// Change the status of enrollment `id`.
  ///
  /// `status` of `None` requests no change. A present value must be one of
  /// the known status codes; anything else fails before the store is touched.
  pub async fn update(&self, id: &str, status: Option<&str>) -> Result<()> {
    let status = status.map(str::parse::<EnrollStatus>).transpose()?;
    self
      .store
      .update(id, status)
      .await
      .map_err(upstream("update enrollment"))
  }
}

/// Convert a store error, logging it unless it is a plain not-found.
fn upstream<E: Into<Error>>(op: &'static str) -> impl Fn(E) -> Error {
  move |e| {
    let err = e.into();
    if let Error::Store(source) = &err {
      warn!(error = %source, "{op} failed");
    }
    err
  }
}
