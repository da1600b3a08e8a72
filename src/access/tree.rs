//! Menu tree assembly and permission filtering

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::types::{Capabilities, MenuNode};

/// One node of an assembled menu tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuTreeNode {
    pub id: i64,
    pub name: String,
    pub name_secondary: Option<String>,
    pub icon: Option<String>,
    pub path: Option<String>,
    pub children: Vec<MenuTreeNode>,
}

impl MenuTreeNode {
    fn from_node(node: &MenuNode, children: Vec<MenuTreeNode>) -> Self {
        Self {
            id: node.id,
            name: node.name.clone(),
            name_secondary: node.name_secondary.clone(),
            icon: node.icon.clone(),
            path: node.path.clone(),
            children,
        }
    }
}

/// Group the complete catalog into a tree for administrative editing.
///
/// Every input node appears exactly once; siblings are ordered by
/// `sort_order` ascending, ties broken by id. A node whose declared parent
/// is absent from the input set surfaces at top level (catalog validation
/// keeps dangling parents out of persisted data, so this only matters for
/// ad-hoc node sets).
pub fn build_full_tree(nodes: &[MenuNode]) -> Vec<MenuTreeNode> {
    let ids: HashSet<i64> = nodes.iter().map(|n| n.id).collect();

    let mut by_parent: HashMap<Option<i64>, Vec<&MenuNode>> = HashMap::new();
    for node in nodes {
        let parent = node.parent_id.filter(|p| ids.contains(p));
        by_parent.entry(parent).or_default().push(node);
    }
    for siblings in by_parent.values_mut() {
        siblings.sort_by_key(|n| (n.sort_order, n.id));
    }

    assemble(&by_parent, None)
}

fn assemble(
    by_parent: &HashMap<Option<i64>, Vec<&MenuNode>>,
    parent: Option<i64>,
) -> Vec<MenuTreeNode> {
    by_parent
        .get(&parent)
        .map(|siblings| {
            siblings
                .iter()
                .map(|node| MenuTreeNode::from_node(node, assemble(by_parent, Some(node.id))))
                .collect()
        })
        .unwrap_or_default()
}

/// Assemble the tree a user is allowed to see.
///
/// Only nodes whose effective `read` flag is set are considered, and the
/// walk descends from readable top-level nodes through readable chains only:
/// an unreadable node hides its entire subtree, even when a descendant would
/// be readable on its own.
pub fn build_authorized_tree(
    nodes: &[MenuNode],
    effective: &HashMap<i64, Capabilities>,
) -> Vec<MenuTreeNode> {
    let mut by_parent: HashMap<Option<i64>, Vec<&MenuNode>> = HashMap::new();
    for node in nodes {
        by_parent.entry(node.parent_id).or_default().push(node);
    }
    for siblings in by_parent.values_mut() {
        siblings.sort_by_key(|n| (n.sort_order, n.id));
    }

    assemble_readable(&by_parent, effective, None)
}

fn assemble_readable(
    by_parent: &HashMap<Option<i64>, Vec<&MenuNode>>,
    effective: &HashMap<i64, Capabilities>,
    parent: Option<i64>,
) -> Vec<MenuTreeNode> {
    by_parent
        .get(&parent)
        .map(|siblings| {
            siblings
                .iter()
                .filter(|node| effective.get(&node.id).is_some_and(|caps| caps.read))
                .map(|node| {
                    MenuTreeNode::from_node(
                        node,
                        assemble_readable(by_parent, effective, Some(node.id)),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}
