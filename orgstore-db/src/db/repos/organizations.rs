//! Organization repository
//!
//! Each call opens its own connection, makes exactly one round trip and
//! closes the connection before returning, whatever the outcome:
//! - plain CRUD: one parameterized statement
//! - `get_by_member_id`: a server-side procedure under a deadline
//! - `get_with_members`: a two-statement batch read as two result sets
//! - `list_all_with_members`: one join flattened into aggregates

use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use orgstore_core::{CreateOrganization, Organization, UpdateOrganization};
use sqlx::postgres::PgConnection;
use sqlx::{Executor, Row};
use tracing::{debug, instrument};

use crate::config::DbConfig;
use crate::db::connection::{release, ConnectionFactory};
use crate::db::mapping::{
    attach_members, decode_join_row, decode_member, decode_organization, flatten_join, ResultSets,
};
use crate::error::{RepoError, RepoResult};

/// Bound applied to procedure calls when none is configured
pub const DEFAULT_PROCEDURE_TIMEOUT: Duration = Duration::from_secs(60);

/// Server-side procedure resolving a member to its organization
pub const SHOW_BY_MEMBER_PROCEDURE: &str = "show_organization_by_member_id";

const LIST_ALL: &str = r#"
    SELECT id, name, address, country
    FROM organizations
    ORDER BY id
"#;

const GET_BY_ID: &str = r#"
    SELECT id, name, address, country
    FROM organizations
    WHERE id = $1
"#;

const INSERT: &str = r#"
    INSERT INTO organizations (name, address, country)
    VALUES ($1, $2, $3)
    RETURNING id
"#;

const UPDATE: &str = r#"
    UPDATE organizations
    SET name = $2, address = $3, country = $4
    WHERE id = $1
"#;

const DELETE: &str = "DELETE FROM organizations WHERE id = $1";

const SHOW_BY_MEMBER: &str = r#"
    SELECT id, name, address, country
    FROM show_organization_by_member_id($1)
"#;

const LIST_WITH_MEMBERS: &str = r#"
    SELECT
        o.id,
        o.name,
        o.address,
        o.country,
        m.id AS member_id,
        m.name AS member_name,
        m.organization_id
    FROM organizations o
    INNER JOIN members m ON m.organization_id = o.id
    ORDER BY o.id, m.id
"#;

/// Two statements, one round trip: the parent row, then its members.
///
/// The simple-query protocol used for batches carries no bind parameters;
/// the only value written into the text is the `i32` id.
fn with_members_batch(id: i32) -> String {
    format!(
        "SELECT id, name, address, country FROM organizations WHERE id = {id};\n\
         SELECT id, name, organization_id FROM members WHERE organization_id = {id} ORDER BY id;"
    )
}

/// Organization repository
pub struct OrganizationRepo<'a> {
    connections: &'a ConnectionFactory,
    procedure_timeout: Duration,
}

impl<'a> OrganizationRepo<'a> {
    pub fn new(connections: &'a ConnectionFactory) -> Self {
        Self {
            connections,
            procedure_timeout: DEFAULT_PROCEDURE_TIMEOUT,
        }
    }

    /// Repository using the procedure bound from `config`.
    pub fn from_config(connections: &'a ConnectionFactory, config: &DbConfig) -> Self {
        Self::new(connections).with_procedure_timeout(config.procedure_timeout)
    }

    /// Override the bound used by [`get_by_member_id`](Self::get_by_member_id).
    pub fn with_procedure_timeout(mut self, timeout: Duration) -> Self {
        self.procedure_timeout = timeout;
        self
    }

    /// Run `op` on a fresh connection and release the connection afterwards.
    ///
    /// A timed-out call leaves the protocol mid-exchange, so that connection
    /// is dropped (socket torn down) instead of being closed politely.
    async fn with_connection<T, F>(&self, op: F) -> RepoResult<T>
    where
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, RepoResult<T>>,
    {
        let mut conn = self.connections.create_connection().await?;
        let result = op(&mut conn).await;

        match &result {
            Err(RepoError::Timeout { .. }) => drop(conn),
            _ => release(conn).await,
        }

        result
    }

    /// List every organization, members not loaded.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> RepoResult<Vec<Organization>> {
        let organizations = self
            .with_connection(|conn| {
                async move {
                    let rows = sqlx::query(LIST_ALL).fetch_all(&mut *conn).await?;
                    rows.iter()
                        .map(decode_organization)
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(RepoError::from)
                }
                .boxed()
            })
            .await?;

        debug!(rows = organizations.len(), "Listed organizations");
        Ok(organizations)
    }

    /// Look up one organization. `Ok(None)` when no row matches.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> RepoResult<Option<Organization>> {
        self.with_connection(|conn| {
            async move {
                let row = sqlx::query(GET_BY_ID)
                    .bind(id)
                    .fetch_optional(&mut *conn)
                    .await?;

                Ok::<_, RepoError>(row.as_ref().map(decode_organization).transpose()?)
            }
            .boxed()
        })
        .await
    }

    /// Insert a row and return it under its generated id.
    ///
    /// The returned entity echoes `input`; it is not re-read, so server-side
    /// defaults or triggers that rewrite columns are not reflected.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: CreateOrganization) -> RepoResult<Organization> {
        let created = self
            .with_connection(|conn| {
                async move {
                    let row = sqlx::query(INSERT)
                        .bind(input.name.as_str())
                        .bind(input.address.as_str())
                        .bind(input.country.as_str())
                        .fetch_one(&mut *conn)
                        .await?;

                    let id: i32 = row.try_get("id")?;
                    Ok::<_, RepoError>(Organization::from_created(id, input))
                }
                .boxed()
            })
            .await?;

        debug!(organization_id = created.id, "Created organization");
        Ok(created)
    }

    /// Overwrite the columns of row `id`.
    ///
    /// The affected-row count is not inspected: updating a missing id is a
    /// silent no-op here. Existence checks belong to the caller.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: UpdateOrganization) -> RepoResult<()> {
        self.with_connection(|conn| {
            async move {
                sqlx::query(UPDATE)
                    .bind(id)
                    .bind(input.name.as_str())
                    .bind(input.address.as_str())
                    .bind(input.country.as_str())
                    .execute(&mut *conn)
                    .await?;
                Ok::<_, RepoError>(())
            }
            .boxed()
        })
        .await
    }

    /// Delete row `id`. Missing rows are a no-op, so repeats are harmless.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> RepoResult<()> {
        self.with_connection(|conn| {
            async move {
                sqlx::query(DELETE).bind(id).execute(&mut *conn).await?;
                Ok::<_, RepoError>(())
            }
            .boxed()
        })
        .await
    }

    /// Resolve a member to its organization through the server procedure,
    /// bounded by the repository's procedure timeout.
    pub async fn get_by_member_id(&self, member_id: i32) -> RepoResult<Option<Organization>> {
        self.get_by_member_id_within(member_id, self.procedure_timeout)
            .await
    }

    /// Same as [`get_by_member_id`](Self::get_by_member_id) with an explicit
    /// deadline. Exceeding it yields [`RepoError::Timeout`].
    #[instrument(skip(self))]
    pub async fn get_by_member_id_within(
        &self,
        member_id: i32,
        timeout: Duration,
    ) -> RepoResult<Option<Organization>> {
        self.with_connection(|conn| {
            async move {
                let call = sqlx::query(SHOW_BY_MEMBER)
                    .bind(member_id)
                    .fetch_optional(&mut *conn);

                let row = tokio::time::timeout(timeout, call)
                    .await
                    .map_err(|_| RepoError::Timeout {
                        procedure: SHOW_BY_MEMBER_PROCEDURE,
                        after: timeout,
                    })??;

                Ok::<_, RepoError>(row.as_ref().map(decode_organization).transpose()?)
            }
            .boxed()
        })
        .await
    }

    /// Load one organization and its members from a two-statement batch.
    ///
    /// The member set is only decoded when the parent exists; otherwise it
    /// is drained and discarded so the connection ends in a clean state.
    #[instrument(skip(self))]
    pub async fn get_with_members(&self, id: i32) -> RepoResult<Option<Organization>> {
        self.with_connection(|conn| {
            async move {
                let sql = with_members_batch(id);
                let mut sets = ResultSets::new((&mut *conn).fetch_many(sqlx::raw_sql(&sql)));

                let parent = match sets.next_set().await? {
                    Some(rows) => rows.first().map(decode_organization).transpose()?,
                    None => None,
                };

                let members = match parent {
                    Some(_) => sets
                        .next_set()
                        .await?
                        .unwrap_or_default()
                        .iter()
                        .map(decode_member)
                        .collect::<Result<Vec<_>, _>>()?,
                    None => Vec::new(),
                };

                let discarded = sets.finish().await?;
                debug!(
                    found = parent.is_some(),
                    members = members.len(),
                    discarded,
                    "Read organization batch"
                );

                Ok::<_, RepoError>(attach_members(parent, members))
            }
            .boxed()
        })
        .await
    }

    /// List organizations that have members, each with all of its members.
    ///
    /// Organizations without members do not appear (inner join).
    #[instrument(skip(self))]
    pub async fn list_all_with_members(&self) -> RepoResult<Vec<Organization>> {
        let organizations = self
            .with_connection(|conn| {
                async move {
                    let rows = sqlx::query(LIST_WITH_MEMBERS).fetch_all(&mut *conn).await?;

                    let decoded = rows
                        .iter()
                        .map(decode_join_row)
                        .collect::<Result<Vec<_>, _>>()?;
                    let organizations = flatten_join(decoded);

                    debug!(
                        rows = rows.len(),
                        organizations = organizations.len(),
                        "Flattened organization join"
                    );
                    Ok::<_, RepoError>(organizations)
                }
                .boxed()
            })
            .await?;

        Ok(organizations)
    }
}
