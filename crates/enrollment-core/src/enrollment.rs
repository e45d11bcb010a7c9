//! The enrollment record linking a user to a course.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

// ─── Status ──────────────────────────────────────────────────────────────────

/// Where an enrollment stands. Serialised as the single-letter codes shared
/// with the rest of the platform.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub enum EnrollStatus {
  #[default]
  #[serde(rename = "P")]
  Pending,
  #[serde(rename = "A")]
  Active,
  #[serde(rename = "S")]
  Studying,
}

impl EnrollStatus {
  /// The code stored in the `status` column and sent over the wire.
  pub fn code(self) -> &'static str {
    match self {
      Self::Pending => "P",
      Self::Active => "A",
      Self::Studying => "S",
    }
  }
}

impl FromStr for EnrollStatus {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "P" => Ok(Self::Pending),
      "A" => Ok(Self::Active),
      "S" => Ok(Self::Studying),
      other => Err(Error::InvalidStatus(other.to_owned())),
    }
  }
}

impl fmt::Display for EnrollStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.code())
  }
}

// ─── Enrollment ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
  /// Assigned by the store; empty until the record is persisted.
  pub id:         String,
  pub user_id:    String,
  pub course_id:  String,
  pub status:     EnrollStatus,
  /// Set by the store when the record is persisted.
  pub created_at: DateTime<Utc>,
}

impl Enrollment {
  /// A not-yet-persisted enrollment in the initial [`EnrollStatus::Pending`]
  /// state.
  pub fn pending(user_id: impl Into<String>, course_id: impl Into<String>) -> Self {
    Self {
      id:         String::new(),
      user_id:    user_id.into(),
      course_id:  course_id.into(),
      status:     EnrollStatus::Pending,
      created_at: DateTime::<Utc>::default(),
    }
  }
}

// ─── Filters ─────────────────────────────────────────────────────────────────

/// Equality constraints for listing and counting. Empty fields impose no
/// constraint; set fields are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
  pub user_id:   Option<String>,
  pub course_id: Option<String>,
}

impl Filters {
  /// The user constraint, treating an empty string as absent.
  pub fn user_id(&self) -> Option<&str> {
    self.user_id.as_deref().filter(|s| !s.is_empty())
  }

  /// The course constraint, treating an empty string as absent.
  pub fn course_id(&self) -> Option<&str> {
    self.course_id.as_deref().filter(|s| !s.is_empty())
  }
}
