//! Read-only ports onto the user directory and the course catalog.
//!
//! Both are owned by other services. The enrollment core only needs to know
//! whether a referenced id exists, so the records carry little beyond it.

use std::future::Future;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id:         String,
  #[serde(default)]
  pub first_name: String,
  #[serde(default)]
  pub last_name:  String,
  #[serde(default)]
  pub email:      String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
  pub id:   String,
  #[serde(default)]
  pub name: String,
}

/// Lookup of users by id.
pub trait UserLookup: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch a user. Returns `None` if the directory has no such user.
  fn get<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;
}

/// Lookup of courses by id.
pub trait CourseLookup: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch a course. Returns `None` if the catalog has no such course.
  fn get<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Course>, Self::Error>> + Send + 'a;
}
