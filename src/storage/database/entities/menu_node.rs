use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::access::types::MenuNode;

/// Menu catalog database model.
///
/// The hierarchy is stored flat: children are discovered by scanning for
/// rows whose `parent_id` matches, never via an owned collection.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "menu_nodes")]
pub struct Model {
    /// Node ID
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Display name
    pub name: String,

    /// Second-language display name
    pub name_secondary: Option<String>,

    /// Icon tag
    pub icon: Option<String>,

    /// Navigation target; NULL for pure grouping nodes
    pub path: Option<String>,

    /// Sibling sort order
    pub sort_order: i32,

    /// Parent node; NULL for top-level nodes
    pub parent_id: Option<i64>,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// Menu node entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Permission overrides relation
    #[sea_orm(has_many = "super::permission_override::Entity")]
    PermissionOverrides,

    /// Self-referencing parent relation
    #[sea_orm(belongs_to = "Entity", from = "Column::ParentId", to = "Column::Id")]
    Parent,
}

impl Related<super::permission_override::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PermissionOverrides.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert SeaORM model to the domain catalog entry
    pub fn to_domain_node(&self) -> MenuNode {
        MenuNode {
            id: self.id,
            name: self.name.clone(),
            name_secondary: self.name_secondary.clone(),
            icon: self.icon.clone(),
            path: self.path.clone(),
            sort_order: self.sort_order,
            parent_id: self.parent_id,
        }
    }
}
