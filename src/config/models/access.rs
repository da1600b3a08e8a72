//! Access control configuration

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::access::roles::Role;

/// Access control configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Role assigned to newly provisioned users when none is given
    #[serde(default = "default_role")]
    pub default_role: String,
    /// Roles allowed to manage users and their permission overrides
    #[serde(default = "default_manager_roles")]
    pub manager_roles: Vec<String>,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            default_role: default_role(),
            manager_roles: default_manager_roles(),
        }
    }
}

impl AccessConfig {
    /// Merge access configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.default_role != default_role() {
            self.default_role = other.default_role;
        }
        if other.manager_roles != default_manager_roles() {
            self.manager_roles = other.manager_roles;
        }
        self
    }

    /// Whether a role name is configured as a manager role
    pub fn is_manager_role(&self, role: Role) -> bool {
        self.manager_roles.iter().any(|r| r == role.as_str())
    }

    /// Validate access configuration
    pub fn validate(&self) -> Result<(), String> {
        Role::from_str(&self.default_role)
            .map_err(|_| format!("Unknown default role: {}", self.default_role))?;

        for role in &self.manager_roles {
            if Role::from_str(role).is_err() {
                warn!("Ignoring unknown manager role in configuration: {}", role);
            }
        }

        Ok(())
    }
}

fn default_role() -> String {
    "user".to_string()
}

fn default_manager_roles() -> Vec<String> {
    vec!["root".to_string(), "admin".to_string()]
}
