//! Error type for `enrollment-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown status code in row: {0:?}")]
  UnknownStatus(String),

  /// No row matched the id given to an update.
  #[error("enrollment {0} doesn't exist")]
  EnrollmentNotFound(String),
}

impl From<Error> for enrollment_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::EnrollmentNotFound(id) => Self::EnrollmentNotFound(id),
      other => Self::Store(Box::new(other)),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
