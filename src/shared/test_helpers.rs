#[cfg(test)]
use crate::core::config::CategoryConfig;
#[cfg(test)]
use crate::features::categories::dtos::CreateCategoryDto;
#[cfg(test)]
use crate::features::categories::models::{Category, NewCategory};
#[cfg(test)]
use crate::features::categories::repositories::{CategoryRepository, MemoryCategoryRepository};
#[cfg(test)]
use crate::features::categories::{routes, CategoryService};

#[cfg(test)]
use axum::Router;
#[cfg(test)]
use fake::{faker::lorem::en::Word, Fake};
#[cfg(test)]
use std::sync::Arc;
#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
pub fn create_dto(name: &str, parent_id: Option<Uuid>) -> CreateCategoryDto {
    CreateCategoryDto {
        name: name.to_string(),
        parent_id,
        is_active: None,
    }
}

/// Unsaved category value, for pure rule checks
#[cfg(test)]
pub fn sample_category(parent_id: Option<Uuid>, name: &str, is_active: bool) -> Category {
    let now = chrono::Utc::now();
    Category {
        id: Uuid::now_v7(),
        parent_id,
        name: name.to_string(),
        is_active,
        created_at: now,
        updated_at: now,
        children: Vec::new(),
    }
}

/// Persist a single-branch chain root -> ... of `len` categories and return
/// them top-down, so `chain[i]` sits at depth `i + 1`.
#[cfg(test)]
pub async fn build_chain(repo: &MemoryCategoryRepository, len: usize) -> Vec<Category> {
    let mut chain: Vec<Category> = Vec::with_capacity(len);
    for level in 0..len {
        let word: String = Word().fake();
        let category = repo
            .create(&NewCategory {
                parent_id: chain.last().map(|c| c.id),
                name: format!("{} {}", word, level + 1),
                is_active: true,
            })
            .await
            .unwrap();
        chain.push(category);
    }
    chain
}

/// Category routes backed by a fresh in-memory store with default limits
#[cfg(test)]
pub fn memory_router() -> Router {
    let repo = Arc::new(MemoryCategoryRepository::new());
    let service = Arc::new(CategoryService::new(repo, CategoryConfig::default()));
    routes::routes(service)
}
