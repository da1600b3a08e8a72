//! Menu and catalog endpoints
//!
//! The authorized menu and gate check are available to every authenticated
//! caller; catalog administration is reserved for the most senior role.

use std::str::FromStr;

use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::access::types::{Action, MenuNode, NewMenuNode};
use crate::access::NodeRef;
use crate::server::AppState;
use crate::server::identity::CallerIdentity;
use crate::server::routes::{ApiResponse, errors, guards};

/// Configure menu and catalog routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/menu").route("", web::get().to(authorized_menu)),
    );
    cfg.service(
        web::scope("/api/access").route("/check", web::get().to(access_check)),
    );
    cfg.service(
        web::scope("/api/catalog")
            .service(web::resource("").route(web::get().to(full_catalog)))
            .service(web::resource("/nodes").route(web::post().to(create_node)))
            .service(
                web::resource("/nodes/{id}")
                    .route(web::put().to(update_node))
                    .route(web::delete().to(delete_node)),
            ),
    );
}

/// Menu node create/update request
#[derive(Debug, Deserialize)]
struct NodePayload {
    name: String,
    name_secondary: Option<String>,
    icon: Option<String>,
    path: Option<String>,
    #[serde(default)]
    sort_order: i32,
    parent_id: Option<i64>,
}

impl NodePayload {
    fn into_new_node(self) -> NewMenuNode {
        NewMenuNode {
            name: self.name,
            name_secondary: self.name_secondary,
            icon: self.icon,
            path: self.path,
            sort_order: self.sort_order,
            parent_id: self.parent_id,
        }
    }
}

/// Gate check query parameters
#[derive(Debug, Deserialize)]
struct AccessCheckQuery {
    /// Node id or display name
    node: String,
    /// One of read/create/update/delete
    action: String,
}

/// Gate check response
#[derive(Debug, Serialize)]
struct AccessCheckResponse {
    allowed: bool,
}

/// The menu tree pruned to what the caller may read.
///
/// A caller the store does not know gets an empty tree, not an error.
async fn authorized_menu(
    state: web::Data<AppState>,
    caller: CallerIdentity,
) -> ActixResult<HttpResponse> {
    match state.access.authorized_tree(caller.user_id).await {
        Ok(tree) => Ok(HttpResponse::Ok().json(ApiResponse::success(tree))),
        Err(e) => {
            error!("Failed to build authorized menu for {}: {}", caller.user_id, e);
            Ok(errors::internal_error("Failed to build menu"))
        }
    }
}

/// Ask the gate whether the caller may perform an action on a node
async fn access_check(
    state: web::Data<AppState>,
    caller: CallerIdentity,
    query: web::Query<AccessCheckQuery>,
) -> ActixResult<HttpResponse> {
    let action = match Action::from_str(&query.action) {
        Ok(action) => action,
        Err(_) => {
            return Ok(errors::validation_error(&format!(
                "Unknown action: {}",
                query.action
            )));
        }
    };
    let node_ref = match i64::from_str(&query.node) {
        Ok(id) => NodeRef::ById(id),
        Err(_) => NodeRef::ByName(&query.node),
    };

    match state
        .access
        .has_capability(caller.user_id, node_ref, action)
        .await
    {
        Ok(allowed) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(AccessCheckResponse { allowed })))
        }
        Err(e) => {
            error!("Gate check failed for {}: {}", caller.user_id, e);
            Ok(errors::internal_error("Gate check failed"))
        }
    }
}

/// The complete catalog tree for administrative editing
async fn full_catalog(
    state: web::Data<AppState>,
    caller: CallerIdentity,
) -> ActixResult<HttpResponse> {
    if let Err(response) = guards::require_most_senior(&state, caller.user_id).await {
        return Ok(response);
    }

    match state.access.full_tree().await {
        Ok(tree) => Ok(HttpResponse::Ok().json(ApiResponse::success(tree))),
        Err(e) => {
            error!("Failed to build full catalog: {}", e);
            Ok(errors::internal_error("Failed to build catalog"))
        }
    }
}

/// Create a catalog node
async fn create_node(
    state: web::Data<AppState>,
    caller: CallerIdentity,
    payload: web::Json<NodePayload>,
) -> ActixResult<HttpResponse> {
    let admin = match guards::require_most_senior(&state, caller.user_id).await {
        Ok(account) => account,
        Err(response) => return Ok(response),
    };

    if payload.name.trim().is_empty() {
        return Ok(errors::validation_error("Node name cannot be empty"));
    }

    match state
        .storage
        .database
        .create_menu_node(payload.into_inner().into_new_node())
        .await
    {
        Ok(node) => {
            info!("User {} created menu node {}", admin.username, node.id);
            Ok(HttpResponse::Created().json(ApiResponse::<MenuNode>::success(node)))
        }
        Err(e) => Ok(errors::backoffice_error_to_response(e)),
    }
}

/// Replace a catalog node's attributes
async fn update_node(
    state: web::Data<AppState>,
    caller: CallerIdentity,
    id: web::Path<i64>,
    payload: web::Json<NodePayload>,
) -> ActixResult<HttpResponse> {
    let admin = match guards::require_most_senior(&state, caller.user_id).await {
        Ok(account) => account,
        Err(response) => return Ok(response),
    };

    if payload.name.trim().is_empty() {
        return Ok(errors::validation_error("Node name cannot be empty"));
    }

    let id = id.into_inner();
    match state
        .storage
        .database
        .update_menu_node(id, payload.into_inner().into_new_node())
        .await
    {
        Ok(node) => {
            info!("User {} updated menu node {}", admin.username, id);
            Ok(HttpResponse::Ok().json(ApiResponse::<MenuNode>::success(node)))
        }
        Err(e) => Ok(errors::backoffice_error_to_response(e)),
    }
}

/// Delete a catalog node; blocked while child nodes exist
async fn delete_node(
    state: web::Data<AppState>,
    caller: CallerIdentity,
    id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let admin = match guards::require_most_senior(&state, caller.user_id).await {
        Ok(account) => account,
        Err(response) => return Ok(response),
    };

    let id = id.into_inner();
    match state.storage.database.delete_menu_node(id).await {
        Ok(()) => {
            info!("User {} deleted menu node {}", admin.username, id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(json!({ "deleted": id }))))
        }
        Err(e) => Ok(errors::backoffice_error_to_response(e)),
    }
}
