use sea_orm::*;
use tracing::debug;

use crate::access::types::UserAccount;
use crate::utils::error::{BackofficeError, Result};

use super::super::entities::{self, user};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Find user by ID
    pub async fn find_user_by_id(&self, user_id: uuid::Uuid) -> Result<Option<UserAccount>> {
        debug!("Finding user by ID: {}", user_id);

        let user_model = entities::User::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(BackofficeError::Database)?;

        Ok(user_model.map(|model| model.to_domain_account()))
    }

    /// Find user by username
    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<UserAccount>> {
        debug!("Finding user by username: {}", username);

        let user_model = entities::User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(BackofficeError::Database)?;

        Ok(user_model.map(|model| model.to_domain_account()))
    }

    /// Create a new user
    pub async fn create_user(&self, account: &UserAccount) -> Result<UserAccount> {
        debug!("Creating user: {}", account.username);

        let active_model = user::Model::from_domain_account(account);

        entities::User::insert(active_model)
            .exec(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => BackofficeError::conflict(format!(
                    "username {} is already taken",
                    account.username
                )),
                _ => BackofficeError::Database(e),
            })?;

        Ok(account.clone())
    }
}
