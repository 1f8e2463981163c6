//! Row-to-entity mapping
//!
//! - [`rows`]: explicit per-entity column decoders
//! - [`result_sets`]: reading several statements' results off one batch
//! - [`aggregate`]: folding parent/child join rows into aggregates

pub mod aggregate;
pub mod result_sets;
pub mod rows;

pub use aggregate::{attach_members, flatten_join, OrganizationAggregator};
pub use result_sets::ResultSets;
pub use rows::{decode_join_row, decode_member, decode_organization};
