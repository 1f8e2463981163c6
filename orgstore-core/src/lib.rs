//! orgstore-core: entity and boundary-shape model
//!
//! Plain data records shared by the repository (`orgstore-db`) and
//! whatever boundary layer sits in front of it.

pub mod models;

pub use models::{
    validate_id, CreateOrganization, Member, Organization, UpdateOrganization, ValidationError,
};
