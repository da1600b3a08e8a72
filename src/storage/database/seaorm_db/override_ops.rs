use std::collections::{HashMap, HashSet};

use sea_orm::*;
use tracing::debug;

use crate::access::types::{CapabilityOverride, OverrideEntry};
use crate::utils::error::{BackofficeError, Result};

use super::super::entities::{self, permission_override};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// The explicit override rows for a user, keyed by menu node
    pub async fn overrides_for_user(
        &self,
        user_id: uuid::Uuid,
    ) -> Result<HashMap<i64, CapabilityOverride>> {
        debug!("Loading permission overrides for user: {}", user_id);

        let rows = entities::PermissionOverride::find()
            .filter(permission_override::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(BackofficeError::Database)?;

        Ok(rows
            .iter()
            .map(|row| (row.menu_node_id, row.to_capability_override()))
            .collect())
    }

    /// Replace the complete override set for a user.
    ///
    /// Runs in a single transaction: the user and every referenced node are
    /// verified, all existing rows are deleted, and the new set is inserted.
    /// Readers never observe the deleted-but-not-reinserted intermediate
    /// state. A concurrent replace for the same user either serializes or
    /// loses on the (user_id, menu_node_id) unique index and surfaces as a
    /// retryable conflict.
    pub async fn replace_overrides(
        &self,
        user_id: uuid::Uuid,
        entries: &[OverrideEntry],
    ) -> Result<()> {
        debug!(
            "Replacing {} permission override(s) for user: {}",
            entries.len(),
            user_id
        );

        // Dropped transactions roll back, so every early return below leaves
        // the stored set untouched.
        let txn = self.db.begin().await.map_err(BackofficeError::Database)?;

        entities::User::find_by_id(user_id)
            .one(&txn)
            .await
            .map_err(BackofficeError::Database)?
            .ok_or_else(|| {
                BackofficeError::not_found(format!("user {} does not exist", user_id))
            })?;

        let mut seen = HashSet::new();
        for entry in entries {
            if !seen.insert(entry.menu_node_id) {
                return Err(BackofficeError::validation(format!(
                    "menu node id {} appears more than once in the override set",
                    entry.menu_node_id
                )));
            }

            let exists = entities::MenuNode::find_by_id(entry.menu_node_id)
                .count(&txn)
                .await
                .map_err(BackofficeError::Database)?;
            if exists == 0 {
                return Err(BackofficeError::validation(format!(
                    "unknown menu node id {}",
                    entry.menu_node_id
                )));
            }
        }

        entities::PermissionOverride::delete_many()
            .filter(permission_override::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(BackofficeError::Database)?;

        if !entries.is_empty() {
            let now = chrono::Utc::now();
            let models: Vec<permission_override::ActiveModel> = entries
                .iter()
                .map(|entry| permission_override::ActiveModel {
                    id: NotSet,
                    user_id: Set(user_id),
                    menu_node_id: Set(entry.menu_node_id),
                    can_read: Set(entry.fields.read),
                    can_create: Set(entry.fields.create),
                    can_update: Set(entry.fields.update),
                    can_delete: Set(entry.fields.delete),
                    created_at: Set(now.into()),
                })
                .collect();

            entities::PermissionOverride::insert_many(models)
                .exec(&txn)
                .await
                .map_err(|e| match e.sql_err() {
                    Some(SqlErr::UniqueConstraintViolation(_)) => BackofficeError::conflict(
                        format!("concurrent override replace for user {}", user_id),
                    ),
                    _ => BackofficeError::Database(e),
                })?;
        }

        txn.commit().await.map_err(BackofficeError::Database)?;
        Ok(())
    }
}
