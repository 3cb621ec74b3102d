use async_trait::async_trait;
use sqlx::PgPool;

use crate::categories::models::{Category, NewCategory};
use crate::error::ApiError;

/// Category persistence, one row at a time
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// All categories ordered by parent, sort order, id
    async fn list(&self) -> Result<Vec<Category>, ApiError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, ApiError>;

    async fn create(&self, category: NewCategory) -> Result<Category, ApiError>;

    /// Overwrite name, parent and order; `None` when the row is gone
    async fn update(&self, category: &Category) -> Result<Option<Category>, ApiError>;

    /// Returns false when nothing was deleted
    async fn delete(&self, id: i32) -> Result<bool, ApiError>;

    async fn has_children(&self, id: i32) -> Result<bool, ApiError>;
}

/// Repository for category operations backed by Postgres
#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Create a new CategoryRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, ApiError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, parent_id, sort_order FROM categories ORDER BY parent_id, sort_order, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, ApiError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, parent_id, sort_order FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn create(&self, category: NewCategory) -> Result<Category, ApiError> {
        let created = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, parent_id, sort_order)
            VALUES ($1, $2, $3)
            RETURNING id, name, parent_id, sort_order
            "#,
        )
        .bind(&category.name)
        .bind(category.parent_id)
        .bind(category.sort_order)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update(&self, category: &Category) -> Result<Option<Category>, ApiError> {
        let updated = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $1,
                parent_id = $2,
                sort_order = $3
            WHERE id = $4
            RETURNING id, name, parent_id, sort_order
            "#,
        )
        .bind(&category.name)
        .bind(category.parent_id)
        .bind(category.sort_order)
        .bind(category.id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn has_children(&self, id: i32) -> Result<bool, ApiError> {
        let exists: Option<bool> =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE parent_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.unwrap_or(false))
    }
}
