//! HTTP route modules
//!
//! This module contains all HTTP route handlers organized by functionality.

pub mod menu;
pub mod users;

use actix_web::HttpResponse;

/// Standard API response structure
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Error response helpers
pub mod errors {
    use super::*;
    use crate::utils::error::BackofficeError;

    /// Convert BackofficeError to HTTP response
    pub fn backoffice_error_to_response(error: BackofficeError) -> HttpResponse {
        let (status, message) = match error {
            BackofficeError::NotFound(msg) => (actix_web::http::StatusCode::NOT_FOUND, msg),
            BackofficeError::Unauthorized(msg) => {
                (actix_web::http::StatusCode::UNAUTHORIZED, msg)
            }
            BackofficeError::Forbidden(msg) => (actix_web::http::StatusCode::FORBIDDEN, msg),
            BackofficeError::Conflict(msg) => (actix_web::http::StatusCode::CONFLICT, msg),
            BackofficeError::Validation(msg) => (actix_web::http::StatusCode::BAD_REQUEST, msg),
            _ => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        HttpResponse::build(status).json(ApiResponse::<()>::error(message))
    }

    /// Create a validation error response
    pub fn validation_error(message: &str) -> HttpResponse {
        HttpResponse::BadRequest().json(ApiResponse::<()>::error(message.to_string()))
    }

    /// Create an unauthorized error response
    pub fn unauthorized_error(message: &str) -> HttpResponse {
        HttpResponse::Unauthorized().json(ApiResponse::<()>::error(message.to_string()))
    }

    /// Create a forbidden error response
    pub fn forbidden_error(message: &str) -> HttpResponse {
        HttpResponse::Forbidden().json(ApiResponse::<()>::error(message.to_string()))
    }

    /// Create a not found error response
    pub fn not_found_error(message: &str) -> HttpResponse {
        HttpResponse::NotFound().json(ApiResponse::<()>::error(message.to_string()))
    }

    /// Create an internal server error response
    pub fn internal_error(message: &str) -> HttpResponse {
        HttpResponse::InternalServerError().json(ApiResponse::<()>::error(message.to_string()))
    }
}

/// Role guards shared by the administrative routes
pub mod guards {
    use tracing::error;
    use uuid::Uuid;

    use super::errors;
    use crate::access::roles::Role;
    use crate::access::types::UserAccount;
    use crate::server::AppState;
    use actix_web::HttpResponse;

    /// Load the calling user's account; an identity the store does not know
    /// is rejected before any authorization logic runs.
    pub async fn load_caller(
        state: &AppState,
        user_id: Uuid,
    ) -> Result<UserAccount, HttpResponse> {
        match state.storage.database.find_user_by_id(user_id).await {
            Ok(Some(account)) => Ok(account),
            Ok(None) => Err(errors::unauthorized_error("Unknown caller identity")),
            Err(e) => {
                error!("Failed to load caller {}: {}", user_id, e);
                Err(errors::internal_error("Database error"))
            }
        }
    }

    /// Catalog administration is reserved for the single most senior role
    pub async fn require_most_senior(
        state: &AppState,
        user_id: Uuid,
    ) -> Result<UserAccount, HttpResponse> {
        let caller = load_caller(state, user_id).await?;
        if !state.access.role_table().is_most_senior(caller.role) {
            return Err(errors::forbidden_error(
                "Catalog administration requires the most senior role",
            ));
        }
        Ok(caller)
    }

    /// User administration requires a configured manager role that is at
    /// least as senior as the target
    pub async fn require_manager(
        state: &AppState,
        user_id: Uuid,
        target_role: Role,
    ) -> Result<UserAccount, HttpResponse> {
        let caller = load_caller(state, user_id).await?;

        if !state.config.access.is_manager_role(caller.role) {
            return Err(errors::forbidden_error(
                "User administration requires a manager role",
            ));
        }
        if !state
            .access
            .role_table()
            .is_at_least_as_senior(caller.role, target_role)
        {
            return Err(errors::forbidden_error(
                "Cannot manage a user with a more senior role",
            ));
        }

        Ok(caller)
    }
}
