//! Core types and trait definitions for the enrollment service.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! storage backend and the user/course lookups plug in through the traits in
//! [`store`] and [`lookup`]; [`service::EnrollmentService`] sequences them.

pub mod enrollment;
pub mod error;
pub mod lookup;
pub mod service;
pub mod store;

pub use error::{Error, ErrorKind, Result};
pub use service::EnrollmentService;
