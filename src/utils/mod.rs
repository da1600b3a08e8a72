//! Utility modules for the backoffice service

pub mod error;

pub use error::{BackofficeError, Result};
