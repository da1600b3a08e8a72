//! User administration and permission override endpoints
//!
//! All endpoints here require a configured manager role; a manager can only
//! act on users whose role is not more senior than their own.

use std::str::FromStr;

use actix_web::{HttpResponse, Result as ActixResult, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::access::roles::Role;
use crate::access::types::{CapabilityOverride, OverrideEntry, UserAccount};
use crate::server::AppState;
use crate::server::identity::CallerIdentity;
use crate::server::routes::{ApiResponse, errors, guards};

/// Configure user administration routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .service(web::resource("").route(web::post().to(create_user)))
            .service(web::resource("/{user_id}").route(web::get().to(get_user)))
            .service(
                web::resource("/{user_id}/overrides")
                    .route(web::get().to(list_overrides))
                    .route(web::put().to(replace_overrides)),
            ),
    );
}

/// User creation request
#[derive(Debug, Deserialize)]
struct CreateUserRequest {
    username: String,
    role: Option<String>,
    company_id: Option<Uuid>,
}

/// User response (role rendered as its wire name)
#[derive(Debug, Serialize)]
struct UserResponse {
    id: Uuid,
    username: String,
    role: String,
    company_id: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl From<UserAccount> for UserResponse {
    fn from(account: UserAccount) -> Self {
        Self {
            id: account.id,
            username: account.username,
            role: account.role.as_str().to_string(),
            company_id: account.company_id,
            created_at: account.created_at,
        }
    }
}

/// One override row on the wire; absent capability fields mean "inherit"
#[derive(Debug, Serialize, Deserialize)]
struct OverrideEntryDto {
    node_id: i64,
    #[serde(default)]
    can_read: Option<bool>,
    #[serde(default)]
    can_create: Option<bool>,
    #[serde(default)]
    can_update: Option<bool>,
    #[serde(default)]
    can_delete: Option<bool>,
}

impl OverrideEntryDto {
    fn to_entry(&self) -> OverrideEntry {
        OverrideEntry {
            menu_node_id: self.node_id,
            fields: CapabilityOverride {
                read: self.can_read,
                create: self.can_create,
                update: self.can_update,
                delete: self.can_delete,
            },
        }
    }

    fn from_row(node_id: i64, fields: &CapabilityOverride) -> Self {
        Self {
            node_id,
            can_read: fields.read,
            can_create: fields.create,
            can_update: fields.update,
            can_delete: fields.delete,
        }
    }
}

/// Provision a user record
async fn create_user(
    state: web::Data<AppState>,
    caller: CallerIdentity,
    request: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    if request.username.trim().is_empty() {
        return Ok(errors::validation_error("Username cannot be empty"));
    }

    let role = match &request.role {
        Some(raw) => match Role::from_str(raw) {
            Ok(role) => role,
            Err(_) => {
                return Ok(errors::validation_error(&format!("Unknown role: {}", raw)));
            }
        },
        None => Role::from_str(&state.config.access.default_role).unwrap_or(Role::User),
    };

    let manager = match guards::require_manager(&state, caller.user_id, role).await {
        Ok(account) => account,
        Err(response) => return Ok(response),
    };

    let now = Utc::now();
    let account = UserAccount {
        id: Uuid::new_v4(),
        username: request.username.trim().to_string(),
        role,
        company_id: request.company_id,
        created_at: now,
        updated_at: now,
    };

    match state.storage.database.create_user(&account).await {
        Ok(created) => {
            info!(
                "User {} provisioned account {} with role {}",
                manager.username, created.username, created.role
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(UserResponse::from(created))))
        }
        Err(e) => Ok(errors::backoffice_error_to_response(e)),
    }
}

/// Fetch a user record
async fn get_user(
    state: web::Data<AppState>,
    caller: CallerIdentity,
    user_id: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    let target = match load_target(&state, *user_id).await {
        Ok(account) => account,
        Err(response) => return Ok(response),
    };

    if let Err(response) = guards::require_manager(&state, caller.user_id, target.role).await {
        return Ok(response);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(UserResponse::from(target))))
}

/// The explicit override rows for a user (not the resolved permission set)
async fn list_overrides(
    state: web::Data<AppState>,
    caller: CallerIdentity,
    user_id: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    let target = match load_target(&state, *user_id).await {
        Ok(account) => account,
        Err(response) => return Ok(response),
    };

    if let Err(response) = guards::require_manager(&state, caller.user_id, target.role).await {
        return Ok(response);
    }

    match state.access.overrides_view(target.id).await {
        Ok(rows) => {
            let mut entries: Vec<OverrideEntryDto> = rows
                .iter()
                .map(|(node_id, fields)| OverrideEntryDto::from_row(*node_id, fields))
                .collect();
            entries.sort_by_key(|entry| entry.node_id);

            Ok(HttpResponse::Ok().json(ApiResponse::success(entries)))
        }
        Err(e) => {
            error!("Failed to load overrides for {}: {}", target.id, e);
            Ok(errors::internal_error("Failed to load overrides"))
        }
    }
}

/// Replace the complete override set for a user.
///
/// Not incremental: the submitted list becomes the user's entire override
/// set. A payload referencing an unknown node id is rejected as a whole.
async fn replace_overrides(
    state: web::Data<AppState>,
    caller: CallerIdentity,
    user_id: web::Path<Uuid>,
    payload: web::Json<Vec<OverrideEntryDto>>,
) -> ActixResult<HttpResponse> {
    let target = match load_target(&state, *user_id).await {
        Ok(account) => account,
        Err(response) => return Ok(response),
    };

    let manager = match guards::require_manager(&state, caller.user_id, target.role).await {
        Ok(account) => account,
        Err(response) => return Ok(response),
    };

    let entries: Vec<OverrideEntry> = payload.iter().map(OverrideEntryDto::to_entry).collect();

    match state
        .storage
        .database
        .replace_overrides(target.id, &entries)
        .await
    {
        Ok(()) => {
            info!(
                "User {} replaced {} override(s) for {}",
                manager.username,
                entries.len(),
                target.username
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({
                "user_id": target.id,
                "overrides": entries.len(),
            }))))
        }
        Err(e) => Ok(errors::backoffice_error_to_response(e)),
    }
}

async fn load_target(state: &AppState, user_id: Uuid) -> Result<UserAccount, HttpResponse> {
    match state.storage.database.find_user_by_id(user_id).await {
        Ok(Some(account)) => Ok(account),
        Ok(None) => Err(errors::not_found_error(&format!(
            "User {} does not exist",
            user_id
        ))),
        Err(e) => {
            error!("Failed to load user {}: {}", user_id, e);
            Err(errors::internal_error("Database error"))
        }
    }
}
