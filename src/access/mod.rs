//! Role-based menu permission engine
//!
//! Combines each role's default capability profile with optional per-user,
//! per-node overrides, and prunes the menu catalog down to what a user may
//! see. The same resolution feeds both menu rendering and request-time
//! authorization, so the two can never disagree.

pub mod gate;
pub mod resolver;
pub mod roles;
pub mod tree;
pub mod types;


pub use gate::{AccessEngine, NodeRef};
pub use resolver::resolve;
pub use roles::{Role, RoleTable};
pub use tree::{MenuTreeNode, build_authorized_tree, build_full_tree};
pub use types::{
    Action, Capabilities, CapabilityOverride, MenuNode, NewMenuNode, OverrideEntry, UserAccount,
};
