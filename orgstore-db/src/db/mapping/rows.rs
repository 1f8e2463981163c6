//! Explicit column decoding for each entity

use orgstore_core::{Member, Organization};
use sqlx::postgres::PgRow;
use sqlx::Row;

/// Decode an `organizations` row (`id, name, address, country`).
///
/// The result has no members loaded.
pub fn decode_organization(row: &PgRow) -> Result<Organization, sqlx::Error> {
    Ok(Organization::new(
        row.try_get::<i32, _>("id")?,
        row.try_get::<String, _>("name")?,
        row.try_get::<String, _>("address")?,
        row.try_get::<String, _>("country")?,
    ))
}

/// Decode a `members` row (`id, name, organization_id`).
pub fn decode_member(row: &PgRow) -> Result<Member, sqlx::Error> {
    Ok(Member {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        organization_id: row.try_get("organization_id")?,
    })
}

/// Decode one organization/member join row.
///
/// Member columns are aliased (`member_id`, `member_name`) so they do not
/// collide with the organization's `id` and `name`.
pub fn decode_join_row(row: &PgRow) -> Result<(Organization, Member), sqlx::Error> {
    let organization = decode_organization(row)?;
    let member = Member {
        id: row.try_get("member_id")?,
        name: row.try_get("member_name")?,
        organization_id: row.try_get("organization_id")?,
    };

    Ok((organization, member))
}
