use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::{validate_category_name, validate_parent_id};

/// Parent id used by top-level categories
pub const ROOT_PARENT_ID: i32 = 0;

/// A content category; `parent_id == 0` marks a top-level category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct Category {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Tech Articles")]
    pub name: String,
    #[schema(example = 0)]
    pub parent_id: i32,
    /// Position among siblings, ascending
    #[serde(rename = "Order")]
    #[schema(example = 1)]
    pub sort_order: i32,
}

/// Data needed to insert a category; the id comes from the store
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub parent_id: i32,
    pub sort_order: i32,
}

/// Used for POST /v1/categories
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct CreateCategory {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1 to 100 characters"),
        custom = "validate_category_name"
    )]
    #[schema(example = "Rust")]
    pub name: String,
    #[serde(default)]
    #[validate(custom = "validate_parent_id")]
    #[schema(example = 1)]
    pub parent_id: i32,
    #[serde(default, rename = "Order")]
    #[schema(example = 2)]
    pub sort_order: i32,
}

impl From<CreateCategory> for NewCategory {
    fn from(payload: CreateCategory) -> Self {
        Self {
            name: payload.name.trim().to_string(),
            parent_id: payload.parent_id,
            sort_order: payload.sort_order,
        }
    }
}

/// Used for PUT /v1/categories/{id}; omitted fields keep their value
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateCategory {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1 to 100 characters"),
        custom = "validate_category_name"
    )]
    pub name: Option<String>,
    #[validate(custom = "validate_parent_id")]
    pub parent_id: Option<i32>,
    #[serde(rename = "Order")]
    pub sort_order: Option<i32>,
}

impl UpdateCategory {
    /// Apply the provided fields on top of an existing category
    pub fn apply_to(self, existing: &Category) -> Category {
        Category {
            id: existing.id,
            name: self
                .name
                .map(|n| n.trim().to_string())
                .unwrap_or_else(|| existing.name.clone()),
            parent_id: self.parent_id.unwrap_or(existing.parent_id),
            sort_order: self.sort_order.unwrap_or(existing.sort_order),
        }
    }
}

/// Response body for a created category
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedId {
    pub id: i32,
}
