use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for category
///
/// The tree is held through `parent_id` only; `children` is never persisted and
/// is filled solely by lookups that explicitly load direct children.
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(skip)]
    pub children: Vec<Category>,
}

/// Data needed to insert a new category
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub is_active: bool,
}

/// Optional search filters, combined with AND
#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    /// Case-sensitive substring of the category name
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

impl CategoryFilter {
    #[allow(dead_code)]
    pub fn matches(&self, category: &Category) -> bool {
        let name_ok = match self.name.as_deref() {
            Some(name) if !name.is_empty() => category.name.contains(name),
            _ => true,
        };
        let status_ok = match self.is_active {
            Some(is_active) => category.is_active == is_active,
            None => true,
        };

        name_ok && status_ok
    }
}
