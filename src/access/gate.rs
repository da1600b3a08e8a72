//! Request-time access decisions

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::storage::StorageLayer;
use crate::utils::error::Result;

use super::resolver::resolve;
use super::roles::RoleTable;
use super::tree::{MenuTreeNode, build_authorized_tree, build_full_tree};
use super::types::{Action, Capabilities, CapabilityOverride};

/// Reference to a catalog node, by id or by display name
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    ById(i64),
    ByName(&'a str),
}

/// Permission engine facade.
///
/// Resolves effective capabilities against the live catalog and override
/// store and answers gate checks. Stateless between calls: every resolution
/// re-reads the catalog and the user's overrides.
#[derive(Clone)]
pub struct AccessEngine {
    roles: Arc<RoleTable>,
    storage: Arc<StorageLayer>,
}

impl AccessEngine {
    /// Create a new engine over the given role table and storage layer
    pub fn new(roles: RoleTable, storage: Arc<StorageLayer>) -> Self {
        Self {
            roles: Arc::new(roles),
            storage,
        }
    }

    /// The injected role profile table
    pub fn role_table(&self) -> &RoleTable {
        &self.roles
    }

    /// Effective capabilities for every catalog node.
    ///
    /// An unknown user id resolves to an empty map, which downstream callers
    /// treat as "no access", not as an error.
    pub async fn resolve_for_user(&self, user_id: Uuid) -> Result<HashMap<i64, Capabilities>> {
        let Some(user) = self.storage.database.find_user_by_id(user_id).await? else {
            debug!("Resolving permissions for unknown user {}", user_id);
            return Ok(HashMap::new());
        };

        let nodes = self.storage.database.list_menu_nodes().await?;
        let overrides = self.storage.database.overrides_for_user(user_id).await?;

        Ok(resolve(user.role, &nodes, &overrides, &self.roles))
    }

    /// Whether the user may perform `action` on the referenced node.
    ///
    /// Absent users and absent nodes both answer `false`.
    pub async fn has_capability(
        &self,
        user_id: Uuid,
        node: NodeRef<'_>,
        action: Action,
    ) -> Result<bool> {
        let node = match node {
            NodeRef::ById(id) => self.storage.database.find_menu_node_by_id(id).await?,
            NodeRef::ByName(name) => self.storage.database.find_menu_node_by_name(name).await?,
        };
        let Some(node) = node else {
            return Ok(false);
        };

        let effective = self.resolve_for_user(user_id).await?;
        let allowed = effective
            .get(&node.id)
            .is_some_and(|caps| caps.allows(action));

        debug!(
            "Gate check: user {} action {} on node {} -> {}",
            user_id,
            action.as_str(),
            node.id,
            allowed
        );
        Ok(allowed)
    }

    /// The menu tree pruned to what the user may read
    pub async fn authorized_tree(&self, user_id: Uuid) -> Result<Vec<MenuTreeNode>> {
        let effective = self.resolve_for_user(user_id).await?;
        let nodes = self.storage.database.list_menu_nodes().await?;
        Ok(build_authorized_tree(&nodes, &effective))
    }

    /// The complete, unfiltered catalog tree for administrative editing
    pub async fn full_tree(&self) -> Result<Vec<MenuTreeNode>> {
        let nodes = self.storage.database.list_menu_nodes().await?;
        Ok(build_full_tree(&nodes))
    }

    /// The explicit override rows for a user, not the resolved set
    pub async fn overrides_view(&self, user_id: Uuid) -> Result<HashMap<i64, CapabilityOverride>> {
        self.storage.database.overrides_for_user(user_id).await
    }
}
