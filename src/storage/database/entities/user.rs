use std::str::FromStr;

use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::access::roles::Role;
use crate::access::types::UserAccount;

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// User ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Username (unique)
    #[sea_orm(unique)]
    pub username: String,

    /// Role name; resolved against the role table on every read
    pub role: String,

    /// Owning company, when company scoping is layered on top
    pub company_id: Option<Uuid>,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// User entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Permission overrides relation
    #[sea_orm(has_many = "super::permission_override::Entity")]
    PermissionOverrides,
}

impl Related<super::permission_override::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PermissionOverrides.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// Conversion methods between SeaORM model and the domain model
impl Model {
    /// Convert SeaORM model to the domain account model.
    ///
    /// An unrecognized stored role falls back to the least-privileged role.
    pub fn to_domain_account(&self) -> UserAccount {
        UserAccount {
            id: self.id,
            username: self.username.clone(),
            role: Role::from_str(&self.role).unwrap_or(Role::User),
            company_id: self.company_id,
            created_at: self.created_at.naive_utc().and_utc(),
            updated_at: self.updated_at.naive_utc().and_utc(),
        }
    }

    /// Convert a domain account model to a SeaORM active model
    pub fn from_domain_account(account: &UserAccount) -> ActiveModel {
        ActiveModel {
            id: Set(account.id),
            username: Set(account.username.clone()),
            role: Set(account.role.as_str().to_string()),
            company_id: Set(account.company_id),
            created_at: Set(account.created_at.into()),
            updated_at: Set(account.updated_at.into()),
        }
    }
}
