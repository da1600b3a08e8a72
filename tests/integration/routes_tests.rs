//! HTTP route tests
//!
//! Drives the actual route configuration through actix-web's test service,
//! backed by an in-memory SQLite database.

use std::sync::Arc;

use actix_web::{http::StatusCode, test};
use serde_json::{Value, json};

use backoffice_rs::access::Role;
use backoffice_rs::config::Config;
use backoffice_rs::server::AppState;
use backoffice_rs::storage::StorageLayer;

use crate::common::fixtures::{engine, memory_storage, node_payload, seed_user};

macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .configure(backoffice_rs::server::routes::menu::configure_routes)
                .configure(backoffice_rs::server::routes::users::configure_routes),
        )
        .await
    };
}

async fn test_state() -> (Arc<StorageLayer>, AppState) {
    let storage = memory_storage().await;
    let access = engine(&storage);
    let state = AppState::new(Config::default(), access, Arc::clone(&storage));
    (storage, state)
}

fn as_user(user_id: uuid::Uuid) -> (&'static str, String) {
    ("X-User-Id", user_id.to_string())
}

#[tokio::test]
async fn test_menu_requires_identity_header() {
    let (_storage, state) = test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/api/menu").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_menu_is_empty_for_unknown_user() {
    let (_storage, state) = test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/menu")
        .insert_header(as_user(uuid::Uuid::new_v4()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_catalog_requires_most_senior_role() {
    let (storage, state) = test_state().await;
    let admin = seed_user(&storage, "admin", Role::Admin).await;
    let root = seed_user(&storage, "root", Role::Root).await;
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/catalog")
        .insert_header(as_user(admin.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/catalog")
        .insert_header(as_user(root.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_catalog_mutation_and_menu_flow() {
    let (storage, state) = test_state().await;
    let root = seed_user(&storage, "root", Role::Root).await;
    let clerk = seed_user(&storage, "clerk", Role::User).await;
    let app = test_app!(state);

    // Root creates a grouping node and a child section.
    let req = test::TestRequest::post()
        .uri("/api/catalog/nodes")
        .insert_header(as_user(root.id))
        .set_json(json!({ "name": "Finance", "sort_order": 1 }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], json!(true));
    let finance_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/catalog/nodes")
        .insert_header(as_user(root.id))
        .set_json(json!({
            "name": "Expenses",
            "path": "/expenses",
            "sort_order": 1,
            "parent_id": finance_id,
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let expenses_id = body["data"]["id"].as_i64().unwrap();

    // The clerk sees both nodes, nested.
    let req = test::TestRequest::get()
        .uri("/api/menu")
        .insert_header(as_user(clerk.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"][0]["id"].as_i64(), Some(finance_id));
    assert_eq!(body["data"][0]["children"][0]["id"].as_i64(), Some(expenses_id));

    // Root blanks the clerk's read flag on the grouping node.
    let req = test::TestRequest::put()
        .uri(&format!("/api/users/{}/overrides", clerk.id))
        .insert_header(as_user(root.id))
        .set_json(json!([{ "node_id": finance_id, "can_read": false }]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // The whole subtree disappears from the clerk's menu.
    let req = test::TestRequest::get()
        .uri("/api/menu")
        .insert_header(as_user(clerk.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"], json!([]));

    // The explicit rows read back exactly as stored: one row, one field set.
    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}/overrides", clerk.id))
        .insert_header(as_user(root.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["node_id"].as_i64(), Some(finance_id));
    assert_eq!(body["data"][0]["can_read"], json!(false));
    assert_eq!(body["data"][0]["can_update"], json!(null));

    // The gate agrees with the menu for the clerk, by name and by id.
    let req = test::TestRequest::get()
        .uri("/api/access/check?node=Finance&action=read")
        .insert_header(as_user(clerk.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["allowed"], json!(false));

    let req = test::TestRequest::get()
        .uri(&format!("/api/access/check?node={}&action=read", expenses_id))
        .insert_header(as_user(clerk.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["allowed"], json!(true));
}

#[tokio::test]
async fn test_replace_overrides_with_unknown_node_is_rejected() {
    let (storage, state) = test_state().await;
    let root = seed_user(&storage, "root", Role::Root).await;
    let clerk = seed_user(&storage, "clerk", Role::User).await;
    let app = test_app!(state);

    let req = test::TestRequest::put()
        .uri(&format!("/api/users/{}/overrides", clerk.id))
        .insert_header(as_user(root.id))
        .set_json(json!([{ "node_id": 12345, "can_read": false }]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_overrides_require_manager_role() {
    let (storage, state) = test_state().await;
    let clerk = seed_user(&storage, "clerk", Role::User).await;
    let other = seed_user(&storage, "other", Role::User).await;
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}/overrides", other.id))
        .insert_header(as_user(clerk.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_manager_cannot_touch_a_more_senior_user() {
    let (storage, state) = test_state().await;
    let admin = seed_user(&storage, "admin", Role::Admin).await;
    let root = seed_user(&storage, "root", Role::Root).await;
    let app = test_app!(state);

    let req = test::TestRequest::put()
        .uri(&format!("/api/users/{}/overrides", root.id))
        .insert_header(as_user(admin.id))
        .set_json(json!([]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_node_with_children_is_conflict() {
    let (storage, state) = test_state().await;
    let root = seed_user(&storage, "root", Role::Root).await;
    let parent = storage
        .database
        .create_menu_node(node_payload("Payroll", None, 1))
        .await
        .unwrap();
    storage
        .database
        .create_menu_node(node_payload("Salaries", Some(parent.id), 1))
        .await
        .unwrap();
    let app = test_app!(state);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/catalog/nodes/{}", parent.id))
        .insert_header(as_user(root.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_user_provisioning() {
    let (storage, state) = test_state().await;
    let root = seed_user(&storage, "root", Role::Root).await;
    let admin = seed_user(&storage, "admin", Role::Admin).await;
    let app = test_app!(state);

    // Root provisions an auditor.
    let req = test::TestRequest::post()
        .uri("/api/users")
        .insert_header(as_user(root.id))
        .set_json(json!({ "username": "auditor", "role": "audit" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Duplicate usernames conflict.
    let req = test::TestRequest::post()
        .uri("/api/users")
        .insert_header(as_user(root.id))
        .set_json(json!({ "username": "auditor", "role": "audit" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Unknown roles are rejected outright, not coerced.
    let req = test::TestRequest::post()
        .uri("/api/users")
        .insert_header(as_user(root.id))
        .set_json(json!({ "username": "intruder", "role": "emperor" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // An admin cannot mint a user above their own seniority.
    let req = test::TestRequest::post()
        .uri("/api/users")
        .insert_header(as_user(admin.id))
        .set_json(json!({ "username": "root2", "role": "root" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Role defaults to the configured default when omitted.
    let req = test::TestRequest::post()
        .uri("/api/users")
        .insert_header(as_user(admin.id))
        .set_json(json!({ "username": "newbie" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["role"], json!("user"));
}

#[tokio::test]
async fn test_get_user_not_found() {
    let (storage, state) = test_state().await;
    let root = seed_user(&storage, "root", Role::Root).await;
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", uuid::Uuid::new_v4()))
        .insert_header(as_user(root.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
