mod connection;
mod menu_ops;
mod override_ops;
mod types;
mod user_ops;

pub use types::{DatabaseBackendType, SeaOrmDatabase};
