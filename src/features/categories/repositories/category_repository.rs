//! Repository trait for category persistence
//!
//! The tree is traversed through id lookups (`find_parent`, `find_children`),
//! so any store that can answer these queries (PostgreSQL, in-memory) fits.

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::categories::models::{Category, CategoryFilter, NewCategory};

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Persist a new category. Fails with `ConstraintViolation` when the
    /// `(parent_id, name)` pair is already taken.
    async fn create(&self, category: &NewCategory) -> Result<Category>;

    /// Fetch one category (with its `parent_id`), children not loaded
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>>;

    /// Direct children of `parent_id`, in a stable order
    async fn find_children(&self, parent_id: Uuid) -> Result<Vec<Category>>;

    /// Fetch a category by id while walking up the tree
    async fn find_parent(&self, parent_id: Uuid) -> Result<Option<Category>>;

    /// Number of direct children of `parent_id` at call time
    async fn count_children(&self, parent_id: Uuid) -> Result<usize>;

    /// Categories matching the optional name substring and status filters
    async fn find_all(&self, filter: &CategoryFilter) -> Result<Vec<Category>>;

    /// Persist `name` and `is_active`. Fails with `NotFound` if the row is gone.
    async fn update(&self, category: &Category) -> Result<Category>;

    /// Remove the category and all of its descendants atomically.
    /// Returns the number of removed categories.
    async fn delete_with_children(&self, category: &Category) -> Result<u64>;

    /// Fetch a category together with its direct children
    async fn find_by_id_with_children(&self, id: Uuid) -> Result<Option<Category>>;
}
