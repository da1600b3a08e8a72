//! Role identities and their default capability profiles

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::types::Capabilities;

/// The closed set of roles the application knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Root,
    Audit,
    Admin,
    User,
}

impl Role {
    /// Wire/storage name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Root => "root",
            Role::Audit => "audit",
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "root" => Ok(Role::Root),
            "audit" => Ok(Role::Audit),
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default capability profile and seniority rank for every role.
///
/// Constructed once at startup and handed to the resolver explicitly, so the
/// engine has no global state and stays independently testable. Lookups are
/// total: a role missing from the profile map resolves to read-only, never
/// to an elevated profile.
#[derive(Debug, Clone)]
pub struct RoleTable {
    profiles: HashMap<Role, Capabilities>,
}

impl RoleTable {
    /// The built-in profile table
    pub fn builtin() -> Self {
        let profiles = HashMap::from([
            (Role::Root, Capabilities::ALL),
            (Role::Audit, Capabilities::READ_ONLY),
            (
                Role::Admin,
                Capabilities {
                    read: true,
                    create: true,
                    update: true,
                    delete: false,
                },
            ),
            (Role::User, Capabilities::READ_ONLY),
        ]);

        Self { profiles }
    }

    /// Default capability tuple for a role
    pub fn defaults_for(&self, role: Role) -> Capabilities {
        self.profiles
            .get(&role)
            .copied()
            .unwrap_or(Capabilities::READ_ONLY)
    }

    /// Seniority rank; higher outranks lower
    pub fn seniority(&self, role: Role) -> u8 {
        match role {
            Role::Root => 3,
            Role::Audit => 2,
            Role::Admin => 1,
            Role::User => 0,
        }
    }

    /// Whether role `a` is at least as privileged as role `b`
    pub fn is_at_least_as_senior(&self, a: Role, b: Role) -> bool {
        self.seniority(a) >= self.seniority(b)
    }

    /// The single most senior role
    pub fn most_senior(&self) -> Role {
        Role::Root
    }

    /// Whether the role is the single most senior one
    pub fn is_most_senior(&self, role: Role) -> bool {
        role == self.most_senior()
    }
}

impl Default for RoleTable {
    fn default() -> Self {
        Self::builtin()
    }
}
