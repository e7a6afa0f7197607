use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::{Category, CategoryFilter};
use crate::shared::validation::NON_BLANK_REGEX;

/// Request DTO for creating a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryDto {
    /// Category name, unique among its siblings
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        regex(path = *NON_BLANK_REGEX, message = "Name must not be blank")
    )]
    #[schema(example = "Electronics")]
    pub name: String,

    /// Parent category ID; omitted for a root category
    pub parent_id: Option<Uuid>,

    /// Active status (default: true)
    pub is_active: Option<bool>,
}

/// Request DTO for updating a category (only name and status are mutable)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryDto {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        regex(path = *NON_BLANK_REGEX, message = "Name must not be blank")
    )]
    pub name: Option<String>,

    pub is_active: Option<bool>,
}

/// Query params for searching categories
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchCategoryQuery {
    /// Case-sensitive substring of the category name
    pub name: Option<String>,

    /// Filter by active status (none = all)
    pub is_active: Option<bool>,
}

impl From<SearchCategoryQuery> for CategoryFilter {
    fn from(q: SearchCategoryQuery) -> Self {
        Self {
            name: q.name,
            is_active: q.is_active,
        }
    }
}

/// Query params for fetching a single category
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GetCategoryQuery {
    /// Include direct children (one level) when true
    #[serde(default)]
    pub include_children: bool,
}

/// Response DTO for a created or updated category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            parent_id: c.parent_id,
            name: c.name,
            is_active: c.is_active,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Flat projection used by search results and as child entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummaryDto {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
}

impl From<Category> for CategorySummaryDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            is_active: c.is_active,
        }
    }
}

/// Single category with its direct children (no grandchildren)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetailDto {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub children: Vec<CategorySummaryDto>,
}

impl From<Category> for CategoryDetailDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            is_active: c.is_active,
            children: c.children.into_iter().map(CategorySummaryDto::from).collect(),
        }
    }
}
