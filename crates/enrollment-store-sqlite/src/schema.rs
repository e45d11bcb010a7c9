//! SQL schema for the enrollment SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS enrollments (
    id          TEXT PRIMARY KEY,   -- UUID v4, server-assigned
    user_id     TEXT NOT NULL,
    course_id   TEXT NOT NULL,
    status      TEXT NOT NULL DEFAULT 'P'
                CHECK (status IN ('P', 'A', 'S')),
    created_at  TEXT NOT NULL       -- RFC 3339 UTC, fixed nanosecond width
);

CREATE INDEX IF NOT EXISTS enrollments_user_idx    ON enrollments(user_id);
CREATE INDEX IF NOT EXISTS enrollments_course_idx  ON enrollments(course_id);
CREATE INDEX IF NOT EXISTS enrollments_created_idx ON enrollments(created_at);

PRAGMA user_version = 1;
";
