//! Member entity (read-only from the repository's side)

use serde::{Deserialize, Serialize};

/// A member row. Owned by exactly one organization through `organization_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: i32,
    pub name: String,
    pub organization_id: i32,
}
