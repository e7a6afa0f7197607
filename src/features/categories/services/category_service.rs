use std::sync::Arc;

use uuid::Uuid;

use crate::core::config::CategoryConfig;
use crate::core::error::Result;
use crate::features::categories::dtos::{
    CategoryDetailDto, CategoryResponseDto, CategorySummaryDto, CreateCategoryDto,
    SearchCategoryQuery, UpdateCategoryDto,
};
use crate::features::categories::errors::CategoryError;
use crate::features::categories::models::{CategoryFilter, NewCategory};
use crate::features::categories::repositories::CategoryRepository;
use crate::features::categories::services::CategoryDomainService;

/// Service for category operations
///
/// Every check runs before the single write of an operation. The checks are
/// not atomic with that write; the store's unique constraint is the backstop.
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
    domain: CategoryDomainService,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepository>, limits: CategoryConfig) -> Self {
        let domain = CategoryDomainService::new(Arc::clone(&repository), limits);
        Self { repository, domain }
    }

    /// Create a root category, or a child when `parent_id` is given
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let parent = match dto.parent_id {
            Some(parent_id) => Some(
                self.repository
                    .find_by_id(parent_id)
                    .await?
                    .ok_or(CategoryError::ParentNotFound(parent_id))?,
            ),
            None => None,
        };

        // Order matters: depth, then sibling name, then child limit
        if let Some(ref parent) = parent {
            self.domain.check_category_depth(parent).await?;
            self.domain
                .check_unique_category_name(parent, &dto.name)
                .await?;
            self.domain.check_max_children_limit(parent.id).await?;
        }

        let category = self
            .repository
            .create(&NewCategory {
                parent_id: parent.as_ref().map(|p| p.id),
                name: dto.name,
                is_active: dto.is_active.unwrap_or(true),
            })
            .await?;

        tracing::info!(
            "Category created: id={}, parent_id={:?}, name={}",
            category.id,
            category.parent_id,
            category.name
        );

        Ok(category.into())
    }

    /// Get a category, optionally with its direct children
    pub async fn get(&self, id: Uuid, include_children: bool) -> Result<CategoryDetailDto> {
        let mut category = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(CategoryError::NotFound(id))?;

        if include_children {
            category.children = self.repository.find_children(id).await?;
        }

        Ok(category.into())
    }

    /// Search categories by name substring and/or status (no pagination)
    pub async fn search(&self, query: SearchCategoryQuery) -> Result<Vec<CategorySummaryDto>> {
        let filter = CategoryFilter::from(query);
        let categories = self.repository.find_all(&filter).await?;

        Ok(categories.into_iter().map(CategorySummaryDto::from).collect())
    }

    /// Update name and/or status. Reparenting is not supported.
    pub async fn update(&self, id: Uuid, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        let mut category = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(CategoryError::NotFound(id))?;

        // Root renames are left to the store's unique constraint
        if let (Some(name), Some(parent_id)) = (dto.name.as_deref(), category.parent_id) {
            if name != category.name {
                let parent = self
                    .repository
                    .find_parent(parent_id)
                    .await?
                    .ok_or(CategoryError::NotFound(parent_id))?;
                self.domain.check_unique_category_name(&parent, name).await?;
            }
        }

        // Only an active -> inactive transition is checked against the children
        let deactivating = category.is_active && dto.is_active == Some(false);

        if let Some(name) = dto.name {
            category.name = name;
        }
        if let Some(is_active) = dto.is_active {
            category.is_active = is_active;
        }

        if deactivating {
            category.children = self.repository.find_children(id).await?;
            self.domain.validate_category_status_update(&category)?;
        }

        let updated = self.repository.update(&category).await?;

        tracing::info!(
            "Category updated: id={}, name={}, is_active={}",
            updated.id,
            updated.name,
            updated.is_active
        );

        Ok(updated.into())
    }

    /// Delete a category together with its whole subtree
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let category = self
            .repository
            .find_by_id_with_children(id)
            .await?
            .ok_or(CategoryError::NotFound(id))?;

        let removed = self.repository.delete_with_children(&category).await?;

        tracing::info!(
            "Category deleted: id={}, direct_children={}, removed_total={}",
            category.id,
            category.children.len(),
            removed
        );

        Ok(())
    }
}
