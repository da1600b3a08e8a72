/// Menu node entity module
pub mod menu_node;
/// Permission override entity module
pub mod permission_override;
/// User entity module
pub mod user;

pub use menu_node::Entity as MenuNode;
pub use permission_override::Entity as PermissionOverride;
pub use user::Entity as User;
