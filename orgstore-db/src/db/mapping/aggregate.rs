//! Parent/child aggregation
//!
//! A one-to-many join repeats the parent columns on every child row. The
//! aggregator keeps one `Organization` per distinct id in an arena and
//! appends each row's member to that single aggregate, so three rows for
//! id 5 grow one organization rather than producing three.

use std::collections::HashMap;

use orgstore_core::{Member, Organization};

/// Arena of organizations indexed by id, in first-seen order
#[derive(Debug, Default)]
pub struct OrganizationAggregator {
    organizations: Vec<Organization>,
    slots: HashMap<i32, usize>,
}

impl OrganizationAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one join row.
    ///
    /// The first row for an id registers its organization (members reset to
    /// empty); later rows for the same id only contribute their member.
    pub fn push(&mut self, organization: Organization, member: Member) {
        let slot = match self.slots.get(&organization.id) {
            Some(&slot) => slot,
            None => {
                let slot = self.organizations.len();
                self.slots.insert(organization.id, slot);
                self.organizations.push(Organization {
                    members: Vec::new(),
                    ..organization
                });
                slot
            }
        };

        self.organizations[slot].members.push(member);
    }

    /// Number of distinct organizations seen so far
    pub fn len(&self) -> usize {
        self.organizations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.organizations.is_empty()
    }

    /// Aggregates in first-seen order, members in row order.
    pub fn finish(self) -> Vec<Organization> {
        self.organizations
    }
}

/// Fold join rows into one organization per distinct id.
pub fn flatten_join<I>(rows: I) -> Vec<Organization>
where
    I: IntoIterator<Item = (Organization, Member)>,
{
    let mut aggregator = OrganizationAggregator::new();
    for (organization, member) in rows {
        aggregator.push(organization, member);
    }
    aggregator.finish()
}

/// Attach members to a parent read from a separate result set.
///
/// Without a parent the members are discarded and the result is absent.
pub fn attach_members(parent: Option<Organization>, members: Vec<Member>) -> Option<Organization> {
    parent.map(|mut organization| {
        organization.members = members;
        organization
    })
}
