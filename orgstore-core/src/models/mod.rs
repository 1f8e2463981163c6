//! Entities and create/update shapes
//!
//! Entities are built fresh per repository call and owned by the caller.
//! Shapes are what the boundary layer hands in; they carry no server-side
//! state such as the identity column.

pub mod validation;
pub mod organization;
pub mod member;

pub use validation::{validate_id, ValidationError};
pub use organization::{CreateOrganization, Organization, UpdateOrganization};
pub use member::Member;
