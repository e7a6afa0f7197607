use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::categories::errors::CategoryError;
use crate::features::categories::models::{Category, CategoryFilter, NewCategory};
use crate::features::categories::repositories::CategoryRepository;
use crate::features::categories::services::CategoryDomainService;

/// In-memory category store mirroring the PostgreSQL constraints
/// (unique `(parent_id, name)`, cascading delete). Rows keep insertion order.
#[derive(Default)]
pub struct MemoryCategoryRepository {
    rows: RwLock<Vec<Category>>,
    find_parent_calls: AtomicUsize,
}

impl MemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `find_parent` lookups served so far
    pub fn find_parent_calls(&self) -> usize {
        self.find_parent_calls.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    fn name_taken(
        rows: &[Category],
        parent_id: Option<Uuid>,
        name: &str,
        except: Option<Uuid>,
    ) -> bool {
        rows.iter()
            .any(|c| c.parent_id == parent_id && c.name == name && Some(c.id) != except)
    }
}

#[async_trait]
impl CategoryRepository for MemoryCategoryRepository {
    async fn create(&self, category: &NewCategory) -> Result<Category> {
        let mut rows = self.rows.write().await;

        if let Some(parent_id) = category.parent_id {
            if !rows.iter().any(|c| c.id == parent_id) {
                return Err(CategoryError::ConstraintViolation(
                    "Referenced parent category does not exist".to_string(),
                )
                .into());
            }
        }
        if Self::name_taken(&rows, category.parent_id, &category.name, None) {
            return Err(CategoryError::ConstraintViolation(
                "A sibling category with this name already exists".to_string(),
            )
            .into());
        }

        let now = Utc::now();
        let created = Category {
            id: Uuid::now_v7(),
            parent_id: category.parent_id,
            name: category.name.clone(),
            is_active: category.is_active,
            created_at: now,
            updated_at: now,
            children: Vec::new(),
        };
        rows.push(created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|c| c.id == id).cloned())
    }

    async fn find_children(&self, parent_id: Uuid) -> Result<Vec<Category>> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|c| c.parent_id == Some(parent_id))
            .cloned()
            .collect())
    }

    async fn find_parent(&self, parent_id: Uuid) -> Result<Option<Category>> {
        self.find_parent_calls.fetch_add(1, Ordering::SeqCst);
        self.find_by_id(parent_id).await
    }

    async fn count_children(&self, parent_id: Uuid) -> Result<usize> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|c| c.parent_id == Some(parent_id))
            .count())
    }

    async fn find_all(&self, filter: &CategoryFilter) -> Result<Vec<Category>> {
        let rows = self.rows.read().await;
        Ok(CategoryDomainService::filter_categories(&rows, filter))
    }

    async fn update(&self, category: &Category) -> Result<Category> {
        let mut rows = self.rows.write().await;

        if Self::name_taken(&rows, category.parent_id, &category.name, Some(category.id)) {
            return Err(CategoryError::ConstraintViolation(
                "A sibling category with this name already exists".to_string(),
            )
            .into());
        }

        let row = rows
            .iter_mut()
            .find(|c| c.id == category.id)
            .ok_or(CategoryError::NotFound(category.id))?;
        row.name = category.name.clone();
        row.is_active = category.is_active;
        row.updated_at = Utc::now();

        Ok(row.clone())
    }

    async fn delete_with_children(&self, category: &Category) -> Result<u64> {
        let mut rows = self.rows.write().await;

        let mut subtree: HashSet<Uuid> = HashSet::from([category.id]);
        loop {
            let before = subtree.len();
            let found: Vec<Uuid> = rows
                .iter()
                .filter(|c| c.parent_id.is_some_and(|p| subtree.contains(&p)))
                .map(|c| c.id)
                .collect();
            subtree.extend(found);
            if subtree.len() == before {
                break;
            }
        }

        let before = rows.len();
        rows.retain(|c| !subtree.contains(&c.id));

        Ok((before - rows.len()) as u64)
    }

    async fn find_by_id_with_children(&self, id: Uuid) -> Result<Option<Category>> {
        let Some(mut category) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        category.children = self.find_children(id).await?;
        Ok(Some(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;

    fn new_category(parent_id: Option<Uuid>, name: &str) -> NewCategory {
        NewCategory {
            parent_id,
            name: name.to_string(),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_sibling_names() {
        let repo = MemoryCategoryRepository::new();
        let root = repo.create(&new_category(None, "Electronics")).await.unwrap();
        repo.create(&new_category(Some(root.id), "Phones")).await.unwrap();

        let result = repo.create(&new_category(Some(root.id), "Phones")).await;
        assert!(matches!(
            result,
            Err(AppError::Category(CategoryError::ConstraintViolation(_)))
        ));

        // Same name under the root group collides as well
        let result = repo.create(&new_category(None, "Electronics")).await;
        assert!(matches!(
            result,
            Err(AppError::Category(CategoryError::ConstraintViolation(_)))
        ));
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let repo = MemoryCategoryRepository::new();
        let root = repo.create(&new_category(None, "Books")).await.unwrap();
        repo.delete_with_children(&root).await.unwrap();

        let result = repo.update(&root).await;
        assert!(matches!(
            result,
            Err(AppError::Category(CategoryError::NotFound(id))) if id == root.id
        ));
    }

    #[tokio::test]
    async fn test_delete_with_children_removes_whole_subtree() {
        let repo = MemoryCategoryRepository::new();
        let root = repo.create(&new_category(None, "Home")).await.unwrap();
        let kitchen = repo.create(&new_category(Some(root.id), "Kitchen")).await.unwrap();
        repo.create(&new_category(Some(kitchen.id), "Knives")).await.unwrap();
        let other = repo.create(&new_category(None, "Garden")).await.unwrap();

        let removed = repo.delete_with_children(&root).await.unwrap();

        assert_eq!(removed, 3);
        assert_eq!(repo.len().await, 1);
        assert!(repo.find_by_id(other.id).await.unwrap().is_some());
    }
}
