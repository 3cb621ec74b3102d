// HTTP handlers for category management

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::auth::{
    models::{ROLE_ADMIN, ROLE_EDITOR},
    AuthenticatedUser,
};
use crate::categories::{
    models::{Category, CreateCategory, CreatedId, NewCategory, UpdateCategory, ROOT_PARENT_ID},
    repository::CategoryStore,
    tree::{build_tree, would_create_cycle, CategoryNode},
};
use crate::error::ApiError;

/// Roles allowed to modify categories
const CATEGORY_WRITERS: &[&str] = &[ROLE_ADMIN, ROLE_EDITOR];

fn not_found(id: i32) -> ApiError {
    ApiError::NotFound {
        resource: "Category".to_string(),
        id: id.to_string(),
    }
}

async fn ensure_parent_exists(store: &dyn CategoryStore, parent_id: i32) -> Result<(), ApiError> {
    if parent_id == ROOT_PARENT_ID {
        return Ok(());
    }
    match store.find_by_id(parent_id).await? {
        Some(_) => Ok(()),
        None => Err(ApiError::BadRequest(format!(
            "Parent category with id {} does not exist",
            parent_id
        ))),
    }
}

/// Handler for GET /v1/categories
#[utoipa::path(
    get,
    path = "/v1/categories",
    responses(
        (status = 200, description = "All categories", body = Vec<Category>),
        (status = 500, description = "Internal server error")
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(store): State<Arc<dyn CategoryStore>>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = store.list().await?;
    tracing::debug!("Retrieved {} categories", categories.len());
    Ok(Json(categories))
}

/// Handler for GET /v1/categories/tree
#[utoipa::path(
    get,
    path = "/v1/categories/tree",
    responses(
        (status = 200, description = "Categories nested under their parents", body = Vec<CategoryNode>)
    ),
    tag = "categories"
)]
pub async fn category_tree(
    State(store): State<Arc<dyn CategoryStore>>,
) -> Result<Json<Vec<CategoryNode>>, ApiError> {
    let categories = store.list().await?;
    Ok(Json(build_tree(&categories)))
}

/// Handler for GET /v1/categories/:id
#[utoipa::path(
    get,
    path = "/v1/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 400, description = "Id is not an integer"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(store): State<Arc<dyn CategoryStore>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Category>, ApiError> {
    let Path(id) = id?;
    let category = store.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(category))
}

/// Handler for POST /v1/categories
#[utoipa::path(
    post,
    path = "/v1/categories",
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = CreatedId),
        (status = 400, description = "Invalid input or unknown parent"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller may not modify categories")
    ),
    security(("bearer_auth" = [])),
    tag = "categories"
)]
pub async fn create_category(
    user: AuthenticatedUser,
    State(store): State<Arc<dyn CategoryStore>>,
    payload: Result<Json<CreateCategory>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedId>), ApiError> {
    user.require_any_role(CATEGORY_WRITERS)?;
    let Json(payload) = payload?;
    payload.validate()?;
    ensure_parent_exists(store.as_ref(), payload.parent_id).await?;

    let category = store.create(NewCategory::from(payload)).await?;

    tracing::info!(
        "Category created: id={}, parent_id={}, by user_id={}",
        category.id,
        category.parent_id,
        user.user().id
    );
    Ok((StatusCode::CREATED, Json(CreatedId { id: category.id })))
}

/// Handler for PUT /v1/categories/:id
#[utoipa::path(
    put,
    path = "/v1/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = String, example = json!("OK")),
        (status = 400, description = "Invalid input, unknown parent or cycle"),
        (status = 404, description = "Category not found")
    ),
    security(("bearer_auth" = [])),
    tag = "categories"
)]
pub async fn update_category(
    user: AuthenticatedUser,
    State(store): State<Arc<dyn CategoryStore>>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateCategory>, JsonRejection>,
) -> Result<Json<&'static str>, ApiError> {
    user.require_any_role(CATEGORY_WRITERS)?;
    let Path(id) = id?;
    let Json(payload) = payload?;
    payload.validate()?;

    let existing = store.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
    let updated = payload.apply_to(&existing);

    if updated.parent_id != existing.parent_id {
        if updated.parent_id == id {
            return Err(ApiError::BadRequest("A category cannot be its own parent".to_string()));
        }
        ensure_parent_exists(store.as_ref(), updated.parent_id).await?;
        let all = store.list().await?;
        if would_create_cycle(&all, id, updated.parent_id) {
            return Err(ApiError::BadRequest(format!(
                "Moving category {} under {} would create a cycle",
                id, updated.parent_id
            )));
        }
    }

    store.update(&updated).await?.ok_or_else(|| not_found(id))?;

    tracing::info!("Category updated: id={}, by user_id={}", id, user.user().id);
    Ok(Json("OK"))
}

/// Handler for DELETE /v1/categories/:id
#[utoipa::path(
    delete,
    path = "/v1/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = String, example = json!("OK")),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category still has children")
    ),
    security(("bearer_auth" = [])),
    tag = "categories"
)]
pub async fn delete_category(
    user: AuthenticatedUser,
    State(store): State<Arc<dyn CategoryStore>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<&'static str>, ApiError> {
    user.require_any_role(CATEGORY_WRITERS)?;
    let Path(id) = id?;

    if store.find_by_id(id).await?.is_none() {
        return Err(not_found(id));
    }
    if store.has_children(id).await? {
        return Err(ApiError::Conflict {
            message: format!("Category {} still has child categories", id),
        });
    }

    if !store.delete(id).await? {
        return Err(not_found(id));
    }

    tracing::info!("Category deleted: id={}, by user_id={}", id, user.user().id);
    Ok(Json("OK"))
}
