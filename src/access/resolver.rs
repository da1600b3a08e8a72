//! Effective permission computation

use std::collections::HashMap;

use super::roles::{Role, RoleTable};
use super::types::{Capabilities, CapabilityOverride, MenuNode};

/// Compute the effective capability tuple for every catalog node.
///
/// The merge is per node and per field, not per record: each override field
/// that is explicitly set wins, and every unset field inherits the role
/// default at resolution time. An administrator can therefore grant a single
/// operation on a single section without restating the other three flags.
///
/// The senior-role floor follows from the same rule: a node with no override
/// row resolves to the unmodified role default, so the most senior role is
/// never reduced by the mere absence of data, while an explicit override
/// still trims exactly the fields it sets.
pub fn resolve(
    role: Role,
    nodes: &[MenuNode],
    overrides: &HashMap<i64, CapabilityOverride>,
    table: &RoleTable,
) -> HashMap<i64, Capabilities> {
    let base = table.defaults_for(role);

    nodes
        .iter()
        .map(|node| {
            let effective = match overrides.get(&node.id) {
                Some(row) => row.apply_to(base),
                None => base,
            };
            (node.id, effective)
        })
        .collect()
}
