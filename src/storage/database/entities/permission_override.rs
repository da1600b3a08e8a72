use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::access::types::CapabilityOverride;

/// Per-user, per-node permission override row.
///
/// Each capability column is a genuine tri-state: NULL inherits the role
/// default at resolution time, while an explicit value always wins. One row
/// per (user, node) pair, enforced by a unique index.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "permission_overrides")]
pub struct Model {
    /// Row ID
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Target user
    pub user_id: Uuid,

    /// Target menu node
    pub menu_node_id: i64,

    pub can_read: Option<bool>,
    pub can_create: Option<bool>,
    pub can_update: Option<bool>,
    pub can_delete: Option<bool>,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,
}

/// Permission override entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Owning user relation
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,

    /// Target menu node relation
    #[sea_orm(
        belongs_to = "super::menu_node::Entity",
        from = "Column::MenuNodeId",
        to = "super::menu_node::Column::Id"
    )]
    MenuNode,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::menu_node::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuNode.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// The tri-state capability fields of this row
    pub fn to_capability_override(&self) -> CapabilityOverride {
        CapabilityOverride {
            read: self.can_read,
            create: self.can_create,
            update: self.can_update,
            delete: self.can_delete,
        }
    }
}
