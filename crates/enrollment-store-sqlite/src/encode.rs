//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with a fixed nanosecond width so
//! that lexical order matches chronological order.

use chrono::{DateTime, SecondsFormat, Utc};
use enrollment_core::enrollment::{EnrollStatus, Enrollment};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── EnrollStatus ────────────────────────────────────────────────────────────

pub fn encode_status(s: EnrollStatus) -> &'static str { s.code() }

pub fn decode_status(s: &str) -> Result<EnrollStatus> {
  s.parse().map_err(|_| Error::UnknownStatus(s.to_owned()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from an `enrollments` row.
pub struct RawEnrollment {
  pub id:         String,
  pub user_id:    String,
  pub course_id:  String,
  pub status:     String,
  pub created_at: String,
}

impl RawEnrollment {
  /// Columns in the order [`RawEnrollment::from_row`] expects.
  pub const COLUMNS: &'static str = "id, user_id, course_id, status, created_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      user_id:    row.get(1)?,
      course_id:  row.get(2)?,
      status:     row.get(3)?,
      created_at: row.get(4)?,
    })
  }

  pub fn into_enrollment(self) -> Result<Enrollment> {
    Ok(Enrollment {
      id:         self.id,
      user_id:    self.user_id,
      course_id:  self.course_id,
      status:     decode_status(&self.status)?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
