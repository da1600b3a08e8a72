//! Database integration tests
//!
//! Tests storage operations using a real in-memory SQLite database.

use backoffice_rs::BackofficeError;
use backoffice_rs::access::Role;

use crate::common::fixtures::{memory_storage, node_payload, seed_user};

/// Basic connectivity and health check after migrations
#[tokio::test]
async fn test_database_health_check() {
    let storage = memory_storage().await;

    let health = storage.health_check().await.expect("health check errored");
    assert!(health.database);
    assert!(health.overall);
}

/// Running migrations twice is harmless
#[tokio::test]
async fn test_migrations_are_idempotent() {
    let storage = memory_storage().await;
    storage.migrate().await.expect("second migration run failed");
}

#[tokio::test]
async fn test_user_operations() {
    let storage = memory_storage().await;

    let missing = storage
        .database
        .find_user_by_username("nobody")
        .await
        .unwrap();
    assert!(missing.is_none());

    let created = seed_user(&storage, "clerk", Role::User).await;

    let by_id = storage
        .database
        .find_user_by_id(created.id)
        .await
        .unwrap()
        .expect("user not found by id");
    assert_eq!(by_id.username, "clerk");
    assert_eq!(by_id.role, Role::User);

    let by_name = storage
        .database
        .find_user_by_username("clerk")
        .await
        .unwrap()
        .expect("user not found by username");
    assert_eq!(by_name.id, created.id);
}

#[tokio::test]
async fn test_duplicate_username_is_a_conflict() {
    let storage = memory_storage().await;
    let first = seed_user(&storage, "taken", Role::User).await;

    let mut clone = first.clone();
    clone.id = uuid::Uuid::new_v4();
    let result = storage.database.create_user(&clone).await;

    assert!(matches!(result, Err(BackofficeError::Conflict(_))));
}

#[tokio::test]
async fn test_catalog_crud() {
    let storage = memory_storage().await;

    let finance = storage
        .database
        .create_menu_node(node_payload("Finance", None, 1))
        .await
        .unwrap();
    let expenses = storage
        .database
        .create_menu_node(node_payload("Expenses", Some(finance.id), 1))
        .await
        .unwrap();

    let all = storage.database.list_menu_nodes().await.unwrap();
    assert_eq!(all.len(), 2);

    let by_name = storage
        .database
        .find_menu_node_by_name("Expenses")
        .await
        .unwrap()
        .expect("node not found by name");
    assert_eq!(by_name.id, expenses.id);
    assert_eq!(by_name.parent_id, Some(finance.id));

    let mut changed = node_payload("Expense Claims", Some(finance.id), 5);
    changed.icon = Some("receipt".to_string());
    let updated = storage
        .database
        .update_menu_node(expenses.id, changed)
        .await
        .unwrap();
    assert_eq!(updated.name, "Expense Claims");
    assert_eq!(updated.sort_order, 5);
    assert_eq!(updated.icon.as_deref(), Some("receipt"));
}

#[tokio::test]
async fn test_create_node_with_unknown_parent_is_rejected() {
    let storage = memory_storage().await;

    let result = storage
        .database
        .create_menu_node(node_payload("Orphan", Some(4242), 1))
        .await;

    match result {
        Err(BackofficeError::Validation(msg)) => assert!(msg.contains("4242")),
        other => panic!("expected validation error, got {:?}", other.map(|n| n.id)),
    }
}

#[tokio::test]
async fn test_delete_node_with_children_is_rejected() {
    let storage = memory_storage().await;

    let parent = storage
        .database
        .create_menu_node(node_payload("Payroll", None, 1))
        .await
        .unwrap();
    let child = storage
        .database
        .create_menu_node(node_payload("Salaries", Some(parent.id), 1))
        .await
        .unwrap();

    let result = storage.database.delete_menu_node(parent.id).await;
    assert!(matches!(result, Err(BackofficeError::Conflict(_))));

    // Catalog unchanged after the rejected deletion.
    assert_eq!(storage.database.list_menu_nodes().await.unwrap().len(), 2);

    // Leaf-first deletion goes through.
    storage.database.delete_menu_node(child.id).await.unwrap();
    storage.database.delete_menu_node(parent.id).await.unwrap();
    assert!(storage.database.list_menu_nodes().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_missing_node_is_not_found() {
    let storage = memory_storage().await;

    let result = storage.database.delete_menu_node(99).await;
    assert!(matches!(result, Err(BackofficeError::NotFound(_))));
}

#[tokio::test]
async fn test_update_rejects_self_parent() {
    let storage = memory_storage().await;

    let node = storage
        .database
        .create_menu_node(node_payload("Partners", None, 1))
        .await
        .unwrap();

    let result = storage
        .database
        .update_menu_node(node.id, node_payload("Partners", Some(node.id), 1))
        .await;

    assert!(matches!(result, Err(BackofficeError::Validation(_))));
}

#[tokio::test]
async fn test_update_rejects_cycle_through_descendant() {
    let storage = memory_storage().await;

    let top = storage
        .database
        .create_menu_node(node_payload("Invoicing", None, 1))
        .await
        .unwrap();
    let mid = storage
        .database
        .create_menu_node(node_payload("Outgoing", Some(top.id), 1))
        .await
        .unwrap();
    let leaf = storage
        .database
        .create_menu_node(node_payload("Drafts", Some(mid.id), 1))
        .await
        .unwrap();

    // Moving the top node under its own grandchild would close a cycle.
    let result = storage
        .database
        .update_menu_node(top.id, node_payload("Invoicing", Some(leaf.id), 1))
        .await;

    assert!(matches!(result, Err(BackofficeError::Validation(_))));

    // The catalog still reads back acyclic and unchanged.
    let reloaded = storage
        .database
        .find_menu_node_by_id(top.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.parent_id, None);
}

#[tokio::test]
async fn test_update_missing_node_is_not_found() {
    let storage = memory_storage().await;

    let result = storage
        .database
        .update_menu_node(7, node_payload("Ghost", None, 1))
        .await;

    assert!(matches!(result, Err(BackofficeError::NotFound(_))));
}
