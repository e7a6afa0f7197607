use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::errors::CategoryError;
use crate::features::categories::models::{Category, CategoryFilter, NewCategory};
use crate::features::categories::repositories::CategoryRepository;

const CATEGORY_COLUMNS: &str = "id, parent_id, name, is_active, created_at, updated_at";

/// Category error for a PostgreSQL error code the store raises on a rejected write
fn map_pg_code(code: Option<&str>) -> Option<CategoryError> {
    match code {
        // unique_violation
        Some("23505") => Some(CategoryError::ConstraintViolation(
            "A sibling category with this name already exists".to_string(),
        )),
        // foreign_key_violation
        Some("23503") => Some(CategoryError::ConstraintViolation(
            "Referenced parent category does not exist".to_string(),
        )),
        _ => None,
    }
}

/// Convert database error to a category error where the store rejected the write
fn handle_db_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if let Some(category_error) = map_pg_code(db_err.code().as_deref()) {
            return category_error.into();
        }
    }

    AppError::Database(e)
}

/// PostgreSQL-backed category store
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, category: &NewCategory) -> Result<Category> {
        let query = format!(
            r#"
            INSERT INTO categories (parent_id, name, is_active)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );

        let created: Category = sqlx::query_as(&query)
            .bind(category.parent_id)
            .bind(&category.name)
            .bind(category.is_active)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create category: {:?}", e);
                handle_db_error(e)
            })?;

        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        let query = format!("SELECT {} FROM categories WHERE id = $1", CATEGORY_COLUMNS);

        sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get category by id: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_children(&self, parent_id: Uuid) -> Result<Vec<Category>> {
        let query = format!(
            r#"
            SELECT {}
            FROM categories
            WHERE parent_id = $1
            ORDER BY created_at, id
            "#,
            CATEGORY_COLUMNS
        );

        sqlx::query_as(&query)
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list child categories: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_parent(&self, parent_id: Uuid) -> Result<Option<Category>> {
        self.find_by_id(parent_id).await
    }

    async fn count_children(&self, parent_id: Uuid) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE parent_id = $1")
            .bind(parent_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count child categories: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(usize::try_from(count).unwrap_or_default())
    }

    async fn find_all(&self, filter: &CategoryFilter) -> Result<Vec<Category>> {
        // NULL parameters disable their condition; strpos keeps the match a
        // plain case-sensitive substring (no LIKE wildcards from user input)
        let query = format!(
            r#"
            SELECT {}
            FROM categories
            WHERE ($1::TEXT IS NULL OR $1 = '' OR strpos(name, $1) > 0)
              AND ($2::BOOLEAN IS NULL OR is_active = $2)
            ORDER BY created_at, id
            "#,
            CATEGORY_COLUMNS
        );

        sqlx::query_as(&query)
            .bind(filter.name.as_deref())
            .bind(filter.is_active)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to search categories: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn update(&self, category: &Category) -> Result<Category> {
        let query = format!(
            r#"
            UPDATE categories
            SET name = $1,
                is_active = $2,
                updated_at = NOW()
            WHERE id = $3
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );

        let updated: Option<Category> = sqlx::query_as(&query)
            .bind(&category.name)
            .bind(category.is_active)
            .bind(category.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update category: {:?}", e);
                handle_db_error(e)
            })?;

        updated.ok_or_else(|| CategoryError::NotFound(category.id).into())
    }

    async fn delete_with_children(&self, category: &Category) -> Result<u64> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let result = sqlx::query(
            r#"
            WITH RECURSIVE subtree AS (
                SELECT id FROM categories WHERE id = $1
                UNION ALL
                SELECT c.id FROM categories c
                INNER JOIN subtree s ON c.parent_id = s.id
            )
            DELETE FROM categories
            WHERE id IN (SELECT id FROM subtree)
            "#,
        )
        .bind(category.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete category subtree: {:?}", e);
            AppError::Database(e)
        })?;

        tx.commit().await.map_err(AppError::Database)?;

        Ok(result.rows_affected())
    }

    async fn find_by_id_with_children(&self, id: Uuid) -> Result<Option<Category>> {
        let Some(mut category) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        category.children = self.find_children(id).await?;
        Ok(Some(category))
    }
}
