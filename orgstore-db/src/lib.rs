//! orgstore-db: PostgreSQL data access for organizations and members
//!
//! Provides:
//! - Configuration ([`DbConfig`])
//! - A per-call connection provider ([`ConnectionFactory`])
//! - Typed errors the boundary layer can branch on ([`RepoError`], [`ErrorKind`])
//! - The [`OrganizationRepo`] with its two aggregation paths: reading
//!   several result sets from one batch, and flattening a parent/child
//!   join into deduplicated aggregates

pub mod config;
pub mod db;
pub mod error;

pub use config::DbConfig;
pub use db::{ConnectionFactory, OrganizationRepo, DEFAULT_PROCEDURE_TIMEOUT};
pub use error::{ErrorKind, RepoError, RepoResult};
pub use orgstore_core::{CreateOrganization, Member, Organization, UpdateOrganization};
