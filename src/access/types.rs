//! Permission engine type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::roles::Role;

/// One of the four operations a capability tuple covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

impl Action {
    /// Wire name of the action
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl std::str::FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "read" => Ok(Action::Read),
            "create" => Ok(Action::Create),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            _ => Err(()),
        }
    }
}

/// The four independent permission flags for one menu node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub read: bool,
    pub create: bool,
    pub update: bool,
    pub delete: bool,
}

impl Capabilities {
    /// No access at all
    pub const NONE: Self = Self {
        read: false,
        create: false,
        update: false,
        delete: false,
    };

    /// Read access only
    pub const READ_ONLY: Self = Self {
        read: true,
        create: false,
        update: false,
        delete: false,
    };

    /// All four operations
    pub const ALL: Self = Self {
        read: true,
        create: true,
        update: true,
        delete: true,
    };

    /// Whether this tuple permits the given action
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::Read => self.read,
            Action::Create => self.create,
            Action::Update => self.update,
            Action::Delete => self.delete,
        }
    }
}

/// Per-node capability override with tri-state fields.
///
/// `None` means the field was never specified and inherits the role default
/// at resolution time; `Some(v)` always wins over the default, even for the
/// most senior role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityOverride {
    pub read: Option<bool>,
    pub create: Option<bool>,
    pub update: Option<bool>,
    pub delete: Option<bool>,
}

impl CapabilityOverride {
    /// Merge this override onto a role's default tuple, field by field
    pub fn apply_to(&self, base: Capabilities) -> Capabilities {
        Capabilities {
            read: self.read.unwrap_or(base.read),
            create: self.create.unwrap_or(base.create),
            update: self.update.unwrap_or(base.update),
            delete: self.delete.unwrap_or(base.delete),
        }
    }

    /// True when no field is explicitly set
    pub fn is_empty(&self) -> bool {
        self.read.is_none()
            && self.create.is_none()
            && self.update.is_none()
            && self.delete.is_none()
    }
}

/// One override row as submitted or returned by the administrative API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverrideEntry {
    pub menu_node_id: i64,
    pub fields: CapabilityOverride,
}

/// A menu catalog entry as the engine sees it (storage-independent)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    pub id: i64,
    pub name: String,
    /// Second-language display label
    pub name_secondary: Option<String>,
    pub icon: Option<String>,
    /// Navigation target; `None` marks a pure grouping node
    pub path: Option<String>,
    pub sort_order: i32,
    pub parent_id: Option<i64>,
}

/// Payload for creating a catalog node, or fully replacing one on update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMenuNode {
    pub name: String,
    pub name_secondary: Option<String>,
    pub icon: Option<String>,
    pub path: Option<String>,
    pub sort_order: i32,
    pub parent_id: Option<i64>,
}

/// The slice of the user record the permission engine needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
    /// Reserved for company scoping layered on top of the engine
    pub company_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
