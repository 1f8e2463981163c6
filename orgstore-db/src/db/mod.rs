//! Database layer - connection provider, row mapping and repositories
//!
//! # Design Principles
//!
//! - One fresh connection per repository call, closed on every exit path
//! - One round trip per call: a single statement, a batch, or a procedure
//! - Parameters are always bound, never spliced into SQL text
//! - No transactions spanning calls; each round trip is its own unit

pub mod connection;
pub mod mapping;
pub mod repos;

pub use connection::ConnectionFactory;
pub use repos::{OrganizationRepo, DEFAULT_PROCEDURE_TIMEOUT};
