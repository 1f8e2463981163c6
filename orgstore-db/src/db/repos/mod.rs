//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Borrows a [`ConnectionFactory`](crate::ConnectionFactory) and opens one
//!   connection per call
//! - Absent rows come back as `Ok(None)`, faults as [`RepoError`](crate::RepoError)
//! - Rows are decoded by the functions in [`mapping`](crate::db::mapping)

pub mod organizations;

pub use organizations::{OrganizationRepo, DEFAULT_PROCEDURE_TIMEOUT, SHOW_BY_MEMBER_PROCEDURE};
