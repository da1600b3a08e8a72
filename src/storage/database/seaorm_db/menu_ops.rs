use sea_orm::*;
use tracing::debug;

use crate::access::types::{MenuNode, NewMenuNode};
use crate::utils::error::{BackofficeError, Result};

use super::super::entities::{self, menu_node};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// List the complete menu catalog, ordered for display
    pub async fn list_menu_nodes(&self) -> Result<Vec<MenuNode>> {
        debug!("Listing menu catalog");

        let models = entities::MenuNode::find()
            .order_by_asc(menu_node::Column::SortOrder)
            .order_by_asc(menu_node::Column::Id)
            .all(&self.db)
            .await
            .map_err(BackofficeError::Database)?;

        Ok(models.iter().map(|model| model.to_domain_node()).collect())
    }

    /// Find a menu node by ID
    pub async fn find_menu_node_by_id(&self, id: i64) -> Result<Option<MenuNode>> {
        debug!("Finding menu node by ID: {}", id);

        let model = entities::MenuNode::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(BackofficeError::Database)?;

        Ok(model.map(|m| m.to_domain_node()))
    }

    /// Find a menu node by display name
    pub async fn find_menu_node_by_name(&self, name: &str) -> Result<Option<MenuNode>> {
        debug!("Finding menu node by name: {}", name);

        let model = entities::MenuNode::find()
            .filter(menu_node::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(BackofficeError::Database)?;

        Ok(model.map(|m| m.to_domain_node()))
    }

    /// Create a new menu node.
    ///
    /// The parent, when given, must already exist.
    pub async fn create_menu_node(&self, node: NewMenuNode) -> Result<MenuNode> {
        debug!("Creating menu node: {}", node.name);

        if let Some(parent_id) = node.parent_id {
            self.assert_node_exists(parent_id).await?;
        }

        let now = chrono::Utc::now();
        let active_model = menu_node::ActiveModel {
            id: NotSet,
            name: Set(node.name),
            name_secondary: Set(node.name_secondary),
            icon: Set(node.icon),
            path: Set(node.path),
            sort_order: Set(node.sort_order),
            parent_id: Set(node.parent_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let result = entities::MenuNode::insert(active_model)
            .exec(&self.db)
            .await
            .map_err(BackofficeError::Database)?;

        let created = entities::MenuNode::find_by_id(result.last_insert_id)
            .one(&self.db)
            .await
            .map_err(BackofficeError::Database)?
            .ok_or_else(|| {
                BackofficeError::internal("Menu node vanished right after insertion")
            })?;

        Ok(created.to_domain_node())
    }

    /// Replace a menu node's attributes.
    ///
    /// Rejects a parent change that would make the node its own ancestor.
    pub async fn update_menu_node(&self, id: i64, node: NewMenuNode) -> Result<MenuNode> {
        debug!("Updating menu node: {}", id);

        let existing = entities::MenuNode::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(BackofficeError::Database)?
            .ok_or_else(|| {
                BackofficeError::not_found(format!("menu node {} does not exist", id))
            })?;

        if let Some(parent_id) = node.parent_id {
            if parent_id == id {
                return Err(BackofficeError::validation(format!(
                    "menu node {} cannot be its own parent",
                    id
                )));
            }
            self.assert_not_descendant(id, parent_id).await?;
        }

        let mut active_model: menu_node::ActiveModel = existing.into();
        active_model.name = Set(node.name);
        active_model.name_secondary = Set(node.name_secondary);
        active_model.icon = Set(node.icon);
        active_model.path = Set(node.path);
        active_model.sort_order = Set(node.sort_order);
        active_model.parent_id = Set(node.parent_id);
        active_model.updated_at = Set(chrono::Utc::now().into());

        let updated = active_model
            .update(&self.db)
            .await
            .map_err(BackofficeError::Database)?;

        Ok(updated.to_domain_node())
    }

    /// Delete a menu node.
    ///
    /// Deletion is blocked while child nodes exist.
    pub async fn delete_menu_node(&self, id: i64) -> Result<()> {
        debug!("Deleting menu node: {}", id);

        let children = entities::MenuNode::find()
            .filter(menu_node::Column::ParentId.eq(id))
            .count(&self.db)
            .await
            .map_err(BackofficeError::Database)?;
        if children > 0 {
            return Err(BackofficeError::conflict(format!(
                "menu node {} still has {} child node(s)",
                id, children
            )));
        }

        let result = entities::MenuNode::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(BackofficeError::Database)?;
        if result.rows_affected == 0 {
            return Err(BackofficeError::not_found(format!(
                "menu node {} does not exist",
                id
            )));
        }

        Ok(())
    }

    async fn assert_node_exists(&self, id: i64) -> Result<()> {
        let count = entities::MenuNode::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(BackofficeError::Database)?;
        if count == 0 {
            return Err(BackofficeError::validation(format!(
                "unknown parent menu node id {}",
                id
            )));
        }
        Ok(())
    }

    /// Walk the ancestor chain of `parent_id` and reject if it passes
    /// through `id`. The persisted catalog is acyclic, so the walk
    /// terminates at a top-level node.
    async fn assert_not_descendant(&self, id: i64, parent_id: i64) -> Result<()> {
        let mut cursor = Some(parent_id);
        while let Some(current) = cursor {
            if current == id {
                return Err(BackofficeError::validation(format!(
                    "menu node {} cannot be moved under its own descendant {}",
                    id, parent_id
                )));
            }

            let ancestor = entities::MenuNode::find_by_id(current)
                .one(&self.db)
                .await
                .map_err(BackofficeError::Database)?
                .ok_or_else(|| {
                    BackofficeError::validation(format!("unknown parent menu node id {}", current))
                })?;
            cursor = ancestor.parent_id;
        }
        Ok(())
    }
}
