//! Organization entity and its boundary shapes

use serde::{Deserialize, Serialize};

use super::{validate_id, Member, ValidationError};

/// Organization aggregate.
///
/// `members` is never absent: lookups that do not load members return an
/// empty list, and payloads without the field deserialize to one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub country: String,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl Organization {
    /// Build an organization with no members loaded.
    pub fn new(
        id: i32,
        name: impl Into<String>,
        address: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            address: address.into(),
            country: country.into(),
            members: Vec::new(),
        }
    }

    /// Echo a create-shape back as an entity under a server-assigned id.
    ///
    /// Nothing is re-read from storage, so column defaults or triggers that
    /// rewrite values are not reflected here.
    pub fn from_created(id: i32, input: CreateOrganization) -> Self {
        Self::new(id, input.name, input.address, input.country)
    }
}

/// Create-shape: the identity column is assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrganization {
    pub name: String,
    pub address: String,
    pub country: String,
}

/// Update-shape: `id` must name the row being updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOrganization {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub country: String,
}

impl UpdateOrganization {
    /// Check that this shape targets the row `id`.
    ///
    /// The repository itself only uses the `id` it is called with; this is
    /// for the caller to reject mismatched payloads before issuing the update.
    pub fn validate_target(&self, id: i32) -> Result<(), ValidationError> {
        validate_id(id)?;
        if self.id != id {
            return Err(ValidationError::IdMismatch {
                expected: id,
                actual: self.id,
            });
        }
        Ok(())
    }
}
