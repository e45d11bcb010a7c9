//! [`SqliteStore`], the SQLite implementation of [`EnrollmentStore`].

use std::path::Path;

use chrono::Utc;
use enrollment_core::{
  enrollment::{EnrollStatus, Enrollment, Filters},
  store::EnrollmentStore,
};
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{RawEnrollment, encode_dt, encode_status},
  schema::SCHEMA,
};

/// Equality predicates shared by listing and counting. `?1`/`?2` are bound to
/// the user and course filters; a NULL binding disables that predicate.
const FILTER_CLAUSE: &str =
  "(?1 IS NULL OR user_id = ?1) AND (?2 IS NULL OR course_id = ?2)";

// ─── Store ───────────────────────────────────────────────────────────────────

/// An enrollment store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

fn filter_params(filters: &Filters) -> (Option<String>, Option<String>) {
  (
    filters.user_id().map(str::to_owned),
    filters.course_id().map(str::to_owned),
  )
}

// ─── EnrollmentStore impl ────────────────────────────────────────────────────

impl EnrollmentStore for SqliteStore {
  type Error = Error;

  async fn create(&self, enrollment: &mut Enrollment) -> Result<()> {
    let id         = Uuid::new_v4().hyphenated().to_string();
    let created_at = Utc::now();

    let id_str     = id.clone();
    let user_id    = enrollment.user_id.clone();
    let course_id  = enrollment.course_id.clone();
    let status_str = encode_status(enrollment.status).to_owned();
    let at_str     = encode_dt(created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO enrollments (id, user_id, course_id, status, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, user_id, course_id, status_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    enrollment.id = id;
    enrollment.created_at = created_at;
    tracing::debug!(id = %enrollment.id, "enrollment created");
    Ok(())
  }

  async fn get_all(
    &self,
    filters: &Filters,
    offset:  u64,
    limit:   u64,
  ) -> Result<Vec<Enrollment>> {
    let (user_id, course_id) = filter_params(filters);
    let limit_val  = i64::try_from(limit).unwrap_or(i64::MAX);
    let offset_val = i64::try_from(offset).unwrap_or(i64::MAX);

    let raws: Vec<RawEnrollment> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {cols}
           FROM enrollments
           WHERE {FILTER_CLAUSE}
           ORDER BY created_at DESC, rowid DESC
           LIMIT ?3 OFFSET ?4",
          cols = RawEnrollment::COLUMNS,
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params![user_id, course_id, limit_val, offset_val],
            RawEnrollment::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEnrollment::into_enrollment).collect()
  }

  async fn update(&self, id: &str, status: Option<EnrollStatus>) -> Result<()> {
    let id_str     = id.to_owned();
    let status_str = status.map(encode_status).map(str::to_owned);

    let matched: i64 = self
      .conn
      .call(move |conn| {
        let n = match status_str {
          Some(s) => conn.execute(
            "UPDATE enrollments SET status = ?1 WHERE id = ?2",
            rusqlite::params![s, id_str],
          )? as i64,
          // Nothing to write; only confirm the target exists.
          None => conn.query_row(
            "SELECT COUNT(*) FROM enrollments WHERE id = ?1",
            rusqlite::params![id_str],
            |row| row.get::<_, i64>(0),
          )?,
        };
        Ok(n)
      })
      .await?;

    if matched == 0 {
      tracing::debug!(id, "enrollment does not exist");
      return Err(Error::EnrollmentNotFound(id.to_owned()));
    }
    Ok(())
  }

  async fn count(&self, filters: &Filters) -> Result<u64> {
    let (user_id, course_id) = filter_params(filters);

    let n: i64 = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT COUNT(*) FROM enrollments WHERE {FILTER_CLAUSE}");
        Ok(conn.query_row(
          &sql,
          rusqlite::params![user_id, course_id],
          |row| row.get(0),
        )?)
      })
      .await?;

    Ok(n.max(0) as u64)
  }
}
