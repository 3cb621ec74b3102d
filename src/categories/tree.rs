// Category hierarchy helpers

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::categories::models::{Category, ROOT_PARENT_ID};

/// A category together with its nested children
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryNode {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<CategoryNode>,
}

fn sibling_key(category: &Category) -> (i32, i32) {
    (category.sort_order, category.id)
}

/// Build the category forest
///
/// Top-level categories and categories whose parent is missing become roots.
/// Rows caught in a parent cycle are promoted to roots as well, so every
/// category appears exactly once.
pub fn build_tree(categories: &[Category]) -> Vec<CategoryNode> {
    let ids: HashSet<i32> = categories.iter().map(|c| c.id).collect();
    let mut children: HashMap<i32, Vec<&Category>> = HashMap::new();
    let mut roots: Vec<&Category> = Vec::new();

    for category in categories {
        let is_root = category.parent_id == ROOT_PARENT_ID
            || category.parent_id == category.id
            || !ids.contains(&category.parent_id);
        if is_root {
            roots.push(category);
        } else {
            children.entry(category.parent_id).or_default().push(category);
        }
    }
    roots.sort_by_key(|c| sibling_key(c));
    for siblings in children.values_mut() {
        siblings.sort_by_key(|c| sibling_key(c));
    }

    let mut visited = HashSet::new();
    let mut forest: Vec<CategoryNode> = roots
        .into_iter()
        .map(|root| build_node(root, &children, &mut visited))
        .collect();

    // Anything unvisited sits on a cycle that never reaches a root
    let mut stranded: Vec<&Category> = categories.iter().filter(|c| !visited.contains(&c.id)).collect();
    stranded.sort_by_key(|c| sibling_key(c));
    for category in stranded {
        if !visited.contains(&category.id) {
            forest.push(build_node(category, &children, &mut visited));
        }
    }

    forest
}

fn build_node(
    category: &Category,
    children: &HashMap<i32, Vec<&Category>>,
    visited: &mut HashSet<i32>,
) -> CategoryNode {
    visited.insert(category.id);
    let mut nested = Vec::new();
    if let Some(kids) = children.get(&category.id) {
        for kid in kids {
            if !visited.contains(&kid.id) {
                nested.push(build_node(kid, children, visited));
            }
        }
    }

    CategoryNode {
        category: category.clone(),
        children: nested,
    }
}

/// Whether re-parenting `id` under `new_parent` would make it its own ancestor
pub fn would_create_cycle(categories: &[Category], id: i32, new_parent: i32) -> bool {
    let parents: HashMap<i32, i32> = categories.iter().map(|c| (c.id, c.parent_id)).collect();
    let mut seen = HashSet::new();
    let mut current = new_parent;

    while current != ROOT_PARENT_ID {
        if current == id {
            return true;
        }
        if !seen.insert(current) {
            // Pre-existing loop that does not pass through `id`
            return false;
        }
        match parents.get(&current) {
            Some(&parent) => current = parent,
            None => return false,
        }
    }
    false
}
