//! Permission resolution tests through the storage-backed engine

use uuid::Uuid;

use backoffice_rs::BackofficeError;
use backoffice_rs::access::types::{CapabilityOverride, OverrideEntry};
use backoffice_rs::access::{Action, Capabilities, NodeRef, Role};

use crate::common::fixtures::{engine, memory_storage, node_payload, seed_user};

fn override_entry(menu_node_id: i64, fields: CapabilityOverride) -> OverrideEntry {
    OverrideEntry {
        menu_node_id,
        fields,
    }
}

#[tokio::test]
async fn test_resolution_without_overrides_matches_role_defaults() {
    let storage = memory_storage().await;
    let access = engine(&storage);

    let finance = storage
        .database
        .create_menu_node(node_payload("Finance", None, 1))
        .await
        .unwrap();
    let admin = seed_user(&storage, "admin", Role::Admin).await;

    let resolved = access.resolve_for_user(admin.id).await.unwrap();
    assert_eq!(
        resolved[&finance.id],
        Capabilities {
            read: true,
            create: true,
            update: true,
            delete: false,
        }
    );
}

#[tokio::test]
async fn test_unknown_user_resolves_to_empty_map() {
    let storage = memory_storage().await;
    let access = engine(&storage);

    storage
        .database
        .create_menu_node(node_payload("Finance", None, 1))
        .await
        .unwrap();

    let resolved = access.resolve_for_user(Uuid::new_v4()).await.unwrap();
    assert!(resolved.is_empty());

    let tree = access.authorized_tree(Uuid::new_v4()).await.unwrap();
    assert!(tree.is_empty());
}

#[tokio::test]
async fn test_partial_override_grants_a_single_field() {
    // An admin picks up delete on one node via an override that sets
    // nothing else, and keeps role defaults everywhere else.
    let storage = memory_storage().await;
    let access = engine(&storage);

    let company = storage
        .database
        .create_menu_node(node_payload("Company Info", None, 1))
        .await
        .unwrap();
    let partners = storage
        .database
        .create_menu_node(node_payload("Partners", None, 2))
        .await
        .unwrap();
    let admin = seed_user(&storage, "admin7", Role::Admin).await;

    storage
        .database
        .replace_overrides(
            admin.id,
            &[override_entry(
                company.id,
                CapabilityOverride {
                    delete: Some(true),
                    ..CapabilityOverride::default()
                },
            )],
        )
        .await
        .unwrap();

    let resolved = access.resolve_for_user(admin.id).await.unwrap();
    assert_eq!(resolved[&company.id], Capabilities::ALL);
    assert_eq!(
        resolved[&partners.id],
        Capabilities {
            read: true,
            create: true,
            update: true,
            delete: false,
        }
    );
}

#[tokio::test]
async fn test_senior_role_floor_through_storage() {
    let storage = memory_storage().await;
    let access = engine(&storage);

    let finance = storage
        .database
        .create_menu_node(node_payload("Finance", None, 1))
        .await
        .unwrap();
    let audit_log = storage
        .database
        .create_menu_node(node_payload("Audit Log", None, 2))
        .await
        .unwrap();
    let root = seed_user(&storage, "root", Role::Root).await;

    // No rows at all: full profile everywhere.
    let resolved = access.resolve_for_user(root.id).await.unwrap();
    assert_eq!(resolved[&finance.id], Capabilities::ALL);
    assert_eq!(resolved[&audit_log.id], Capabilities::ALL);

    // A partial row still trims exactly what it names, root or not.
    storage
        .database
        .replace_overrides(
            root.id,
            &[override_entry(
                finance.id,
                CapabilityOverride {
                    delete: Some(false),
                    ..CapabilityOverride::default()
                },
            )],
        )
        .await
        .unwrap();

    let resolved = access.resolve_for_user(root.id).await.unwrap();
    assert!(!resolved[&finance.id].delete);
    assert!(resolved[&finance.id].read);
    assert_eq!(resolved[&audit_log.id], Capabilities::ALL);
}

#[tokio::test]
async fn test_replace_overrides_is_idempotent() {
    let storage = memory_storage().await;
    let access = engine(&storage);

    let node = storage
        .database
        .create_menu_node(node_payload("Payroll", None, 1))
        .await
        .unwrap();
    let user = seed_user(&storage, "clerk", Role::User).await;

    let entries = [override_entry(
        node.id,
        CapabilityOverride {
            read: Some(false),
            ..CapabilityOverride::default()
        },
    )];

    storage
        .database
        .replace_overrides(user.id, &entries)
        .await
        .unwrap();
    let first = access.resolve_for_user(user.id).await.unwrap();

    storage
        .database
        .replace_overrides(user.id, &entries)
        .await
        .unwrap();
    let second = access.resolve_for_user(user.id).await.unwrap();

    assert_eq!(first, second);
    assert!(!second[&node.id].read);
}

#[tokio::test]
async fn test_replace_with_unknown_node_rejected_atomically() {
    let storage = memory_storage().await;
    let access = engine(&storage);

    let node = storage
        .database
        .create_menu_node(node_payload("Expenses", None, 1))
        .await
        .unwrap();
    let user = seed_user(&storage, "clerk", Role::User).await;

    storage
        .database
        .replace_overrides(
            user.id,
            &[override_entry(
                node.id,
                CapabilityOverride {
                    create: Some(true),
                    ..CapabilityOverride::default()
                },
            )],
        )
        .await
        .unwrap();

    // A payload naming a deleted/unknown node id is rejected as a whole...
    let result = storage
        .database
        .replace_overrides(
            user.id,
            &[
                override_entry(node.id, CapabilityOverride::default()),
                override_entry(
                    777,
                    CapabilityOverride {
                        read: Some(false),
                        ..CapabilityOverride::default()
                    },
                ),
            ],
        )
        .await;
    match result {
        Err(BackofficeError::Validation(msg)) => assert!(msg.contains("777")),
        other => panic!("expected validation error, got {:?}", other),
    }

    // ...and the previous set is still in place.
    let rows = access.overrides_view(user.id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[&node.id].create, Some(true));
}

#[tokio::test]
async fn test_replace_rejects_duplicate_node_ids() {
    let storage = memory_storage().await;

    let node = storage
        .database
        .create_menu_node(node_payload("Expenses", None, 1))
        .await
        .unwrap();
    let user = seed_user(&storage, "clerk", Role::User).await;

    let result = storage
        .database
        .replace_overrides(
            user.id,
            &[
                override_entry(node.id, CapabilityOverride::default()),
                override_entry(node.id, CapabilityOverride::default()),
            ],
        )
        .await;

    assert!(matches!(result, Err(BackofficeError::Validation(_))));
}

#[tokio::test]
async fn test_replace_for_unknown_user_is_not_found() {
    let storage = memory_storage().await;

    let result = storage
        .database
        .replace_overrides(Uuid::new_v4(), &[])
        .await;

    assert!(matches!(result, Err(BackofficeError::NotFound(_))));
}

#[tokio::test]
async fn test_replace_with_empty_list_clears_all_rows() {
    let storage = memory_storage().await;
    let access = engine(&storage);

    let node = storage
        .database
        .create_menu_node(node_payload("Expenses", None, 1))
        .await
        .unwrap();
    let user = seed_user(&storage, "clerk", Role::User).await;

    storage
        .database
        .replace_overrides(
            user.id,
            &[override_entry(
                node.id,
                CapabilityOverride {
                    read: Some(false),
                    ..CapabilityOverride::default()
                },
            )],
        )
        .await
        .unwrap();

    storage.database.replace_overrides(user.id, &[]).await.unwrap();

    assert!(access.overrides_view(user.id).await.unwrap().is_empty());
    // Back to pure role defaults.
    let resolved = access.resolve_for_user(user.id).await.unwrap();
    assert!(resolved[&node.id].read);
}

#[tokio::test]
async fn test_gate_checks_by_id_and_name() {
    let storage = memory_storage().await;
    let access = engine(&storage);

    let node = storage
        .database
        .create_menu_node(node_payload("Company Info", None, 1))
        .await
        .unwrap();
    let user = seed_user(&storage, "clerk", Role::User).await;

    assert!(
        access
            .has_capability(user.id, NodeRef::ById(node.id), Action::Read)
            .await
            .unwrap()
    );
    assert!(
        access
            .has_capability(user.id, NodeRef::ByName("Company Info"), Action::Read)
            .await
            .unwrap()
    );
    assert!(
        !access
            .has_capability(user.id, NodeRef::ByName("Company Info"), Action::Update)
            .await
            .unwrap()
    );

    // Absent node and absent user both answer false, never an error.
    assert!(
        !access
            .has_capability(user.id, NodeRef::ByName("No Such Section"), Action::Read)
            .await
            .unwrap()
    );
    assert!(
        !access
            .has_capability(Uuid::new_v4(), NodeRef::ById(node.id), Action::Read)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_authorized_tree_hides_unreadable_subtree() {
    let storage = memory_storage().await;
    let access = engine(&storage);

    let org = storage
        .database
        .create_menu_node(node_payload("Organization", None, 1))
        .await
        .unwrap();
    let company = storage
        .database
        .create_menu_node(node_payload("Company Info", Some(org.id), 1))
        .await
        .unwrap();
    let finance = storage
        .database
        .create_menu_node(node_payload("Finance", None, 2))
        .await
        .unwrap();
    let user = seed_user(&storage, "clerk", Role::User).await;

    // Everything readable by default.
    let tree = access.authorized_tree(user.id).await.unwrap();
    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].id, org.id);
    assert_eq!(tree[0].children[0].id, company.id);

    // Blocking the parent hides the child too, even though the child's own
    // read flag is untouched.
    storage
        .database
        .replace_overrides(
            user.id,
            &[override_entry(
                org.id,
                CapabilityOverride {
                    read: Some(false),
                    ..CapabilityOverride::default()
                },
            )],
        )
        .await
        .unwrap();

    let tree = access.authorized_tree(user.id).await.unwrap();
    let ids: Vec<i64> = tree.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![finance.id]);
}

#[tokio::test]
async fn test_full_tree_is_unfiltered() {
    let storage = memory_storage().await;
    let access = engine(&storage);

    let org = storage
        .database
        .create_menu_node(node_payload("Organization", None, 2))
        .await
        .unwrap();
    let finance = storage
        .database
        .create_menu_node(node_payload("Finance", None, 1))
        .await
        .unwrap();
    storage
        .database
        .create_menu_node(node_payload("Company Info", Some(org.id), 1))
        .await
        .unwrap();

    let tree = access.full_tree().await.unwrap();
    assert_eq!(tree.len(), 2);
    // Siblings come back in sort order.
    assert_eq!(tree[0].id, finance.id);
    assert_eq!(tree[1].id, org.id);
    assert_eq!(tree[1].children.len(), 1);
}
