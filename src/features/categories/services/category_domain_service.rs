use std::sync::Arc;

use uuid::Uuid;

use crate::core::config::CategoryConfig;
use crate::core::error::Result;
use crate::features::categories::errors::CategoryError;
use crate::features::categories::models::{Category, CategoryFilter};
use crate::features::categories::repositories::CategoryRepository;

/// Business rules for the category tree: depth, sibling names, child limits
/// and status consistency. Holds no state besides the store it queries.
pub struct CategoryDomainService {
    repository: Arc<dyn CategoryRepository>,
    limits: CategoryConfig,
}

impl CategoryDomainService {
    pub fn new(repository: Arc<dyn CategoryRepository>, limits: CategoryConfig) -> Self {
        Self { repository, limits }
    }

    #[cfg(test)]
    pub fn limits(&self) -> CategoryConfig {
        self.limits
    }

    /// Depth of `category` counting itself as 1, walking `parent_id` upwards.
    ///
    /// The walk stops as soon as the depth passes `max_depth`, so the result
    /// is exact up to `max_depth + 1` and saturates there.
    pub async fn calculate_depth(&self, category: &Category) -> Result<usize> {
        let mut depth = 1;
        let mut parent_id = category.parent_id;

        while let Some(id) = parent_id {
            depth += 1;
            if depth > self.limits.max_depth {
                break;
            }

            match self.repository.find_parent(id).await? {
                Some(parent) => parent_id = parent.parent_id,
                None => {
                    tracing::warn!("Dangling parent reference {} while computing depth", id);
                    break;
                }
            }
        }

        Ok(depth)
    }

    /// Ensure a new child of `parent` would stay within `max_depth`.
    /// The child lands at `depth(parent) + 1`.
    pub async fn check_category_depth(&self, parent: &Category) -> Result<()> {
        let parent_depth = self.calculate_depth(parent).await?;
        if parent_depth + 1 > self.limits.max_depth {
            return Err(CategoryError::DepthExceeded {
                max_depth: self.limits.max_depth,
            }
            .into());
        }
        Ok(())
    }

    /// Exact, case-sensitive name comparison against the direct children of `parent`
    pub async fn check_unique_category_name(&self, parent: &Category, name: &str) -> Result<()> {
        let siblings = self.repository.find_children(parent.id).await?;
        if siblings.iter().any(|sibling| sibling.name == name) {
            return Err(CategoryError::DuplicateName(name.to_string()).into());
        }
        Ok(())
    }

    /// Pre-creation guard: a parent already holding `max_children` cannot take another
    pub async fn check_max_children_limit(&self, parent_id: Uuid) -> Result<()> {
        let child_count = self.repository.count_children(parent_id).await?;
        if child_count >= self.limits.max_children {
            return Err(CategoryError::ChildLimitExceeded {
                max_children: self.limits.max_children,
            }
            .into());
        }
        Ok(())
    }

    /// Reject deactivation while any loaded child is active.
    /// Works on `category.children` as given; callers load them first.
    pub fn validate_category_status_update(&self, category: &Category) -> Result<()> {
        if !category.is_active && category.children.iter().any(|child| child.is_active) {
            return Err(CategoryError::ActiveChildrenExist.into());
        }
        Ok(())
    }

    /// In-process counterpart of the store's search; the Postgres store
    /// filters in SQL and is tested against this
    #[allow(dead_code)]
    pub fn filter_categories(categories: &[Category], criteria: &CategoryFilter) -> Vec<Category> {
        categories
            .iter()
            .filter(|category| criteria.matches(category))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::features::categories::models::NewCategory;
    use crate::features::categories::repositories::MemoryCategoryRepository;
    use crate::shared::test_helpers::{build_chain, sample_category};

    fn service(repo: &Arc<MemoryCategoryRepository>) -> CategoryDomainService {
        CategoryDomainService::new(repo.clone(), CategoryConfig::default())
    }

    #[tokio::test]
    async fn test_calculate_depth_of_root_is_one() {
        let repo = Arc::new(MemoryCategoryRepository::new());
        let chain = build_chain(repo.as_ref(), 1).await;

        let depth = service(&repo).calculate_depth(&chain[0]).await.unwrap();

        assert_eq!(depth, 1);
        assert_eq!(repo.find_parent_calls(), 0);
    }

    #[tokio::test]
    async fn test_calculate_depth_walks_parent_chain() {
        let repo = Arc::new(MemoryCategoryRepository::new());
        let chain = build_chain(repo.as_ref(), 4).await;

        let depth = service(&repo).calculate_depth(&chain[3]).await.unwrap();

        assert_eq!(depth, 4);
    }

    #[tokio::test]
    async fn test_calculate_depth_saturates_without_walking_whole_chain() {
        let repo = Arc::new(MemoryCategoryRepository::new());
        let chain = build_chain(repo.as_ref(), 12).await;
        let domain = service(&repo);

        let depth = domain.calculate_depth(&chain[11]).await.unwrap();

        // One above the maximum is enough for the threshold check
        assert_eq!(depth, domain.limits().max_depth + 1);
        assert_eq!(repo.find_parent_calls(), domain.limits().max_depth - 1);
    }

    #[tokio::test]
    async fn test_check_category_depth_allows_child_at_max_depth() {
        let repo = Arc::new(MemoryCategoryRepository::new());
        let chain = build_chain(repo.as_ref(), 4).await;

        // Parent at depth 4, new child at depth 5
        tokio_test::assert_ok!(service(&repo).check_category_depth(&chain[3]).await);
    }

    #[tokio::test]
    async fn test_check_category_depth_rejects_child_beyond_max_depth() {
        let repo = Arc::new(MemoryCategoryRepository::new());
        let chain = build_chain(repo.as_ref(), 5).await;

        let result = service(&repo).check_category_depth(&chain[4]).await;

        assert!(matches!(
            result,
            Err(AppError::Category(CategoryError::DepthExceeded { max_depth: 5 }))
        ));
    }

    #[tokio::test]
    async fn test_check_category_depth_honours_configured_limit() {
        let repo = Arc::new(MemoryCategoryRepository::new());
        let chain = build_chain(repo.as_ref(), 2).await;
        let domain = CategoryDomainService::new(
            repo.clone(),
            CategoryConfig {
                max_depth: 2,
                max_children: 20,
            },
        );

        tokio_test::assert_ok!(domain.check_category_depth(&chain[0]).await);
        tokio_test::assert_err!(domain.check_category_depth(&chain[1]).await);
    }

    #[tokio::test]
    async fn test_check_unique_category_name_detects_duplicate() {
        let repo = Arc::new(MemoryCategoryRepository::new());
        let chain = build_chain(repo.as_ref(), 2).await;
        let existing = chain[1].name.clone();

        let result = service(&repo)
            .check_unique_category_name(&chain[0], &existing)
            .await;

        assert!(matches!(
            result,
            Err(AppError::Category(CategoryError::DuplicateName(name))) if name == existing
        ));
    }

    #[tokio::test]
    async fn test_check_unique_category_name_is_case_sensitive() {
        let repo = Arc::new(MemoryCategoryRepository::new());
        let parent = repo
            .create(&NewCategory {
                parent_id: None,
                name: "Parent Category".to_string(),
                is_active: true,
            })
            .await
            .unwrap();
        repo.create(&NewCategory {
            parent_id: Some(parent.id),
            name: "Other Name".to_string(),
            is_active: true,
        })
        .await
        .unwrap();

        let domain = service(&repo);
        tokio_test::assert_ok!(domain.check_unique_category_name(&parent, "Unique Name").await);
        tokio_test::assert_ok!(domain.check_unique_category_name(&parent, "other name").await);
    }

    #[tokio::test]
    async fn test_check_max_children_limit() {
        let repo = Arc::new(MemoryCategoryRepository::new());
        let parent = repo
            .create(&NewCategory {
                parent_id: None,
                name: "Parent".to_string(),
                is_active: true,
            })
            .await
            .unwrap();
        for i in 0..19 {
            repo.create(&NewCategory {
                parent_id: Some(parent.id),
                name: format!("Child {}", i),
                is_active: true,
            })
            .await
            .unwrap();
        }

        let domain = service(&repo);
        tokio_test::assert_ok!(domain.check_max_children_limit(parent.id).await);

        repo.create(&NewCategory {
            parent_id: Some(parent.id),
            name: "Child 19".to_string(),
            is_active: true,
        })
        .await
        .unwrap();

        let result = domain.check_max_children_limit(parent.id).await;
        assert!(matches!(
            result,
            Err(AppError::Category(CategoryError::ChildLimitExceeded { max_children: 20 }))
        ));
    }

    #[tokio::test]
    async fn test_validate_category_status_update() {
        let repo = Arc::new(MemoryCategoryRepository::new());
        let domain = service(&repo);

        let mut category = sample_category(None, "Parent", false);
        category.children = vec![
            sample_category(Some(category.id), "Inactive", false),
            sample_category(Some(category.id), "Active", true),
        ];
        assert!(matches!(
            domain.validate_category_status_update(&category),
            Err(AppError::Category(CategoryError::ActiveChildrenExist))
        ));

        // Activating, or deactivating with only inactive children, is fine
        category.is_active = true;
        tokio_test::assert_ok!(domain.validate_category_status_update(&category));
        category.is_active = false;
        category.children.retain(|c| !c.is_active);
        tokio_test::assert_ok!(domain.validate_category_status_update(&category));
    }

    #[test]
    fn test_filter_categories() {
        let categories = vec![
            sample_category(None, "Cat One", true),
            sample_category(None, "Cat Two", false),
            sample_category(None, "Dog", true),
            sample_category(None, "Bobcat", true),
        ];

        let both = CategoryFilter {
            name: Some("Cat".to_string()),
            is_active: Some(true),
        };
        let names: Vec<String> = CategoryDomainService::filter_categories(&categories, &both)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Cat One".to_string()]);

        let inactive = CategoryFilter {
            name: None,
            is_active: Some(false),
        };
        assert_eq!(
            CategoryDomainService::filter_categories(&categories, &inactive).len(),
            1
        );

        let everything = CategoryFilter::default();
        assert_eq!(
            CategoryDomainService::filter_categories(&categories, &everything).len(),
            4
        );
    }
}
