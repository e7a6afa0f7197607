use thiserror::Error;
use uuid::Uuid;

/// Business-rule failures raised by the category store, rules and operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    #[error("Parent category {0} not found")]
    ParentNotFound(Uuid),

    #[error("Category depth cannot exceed {max_depth} levels")]
    DepthExceeded { max_depth: usize },

    #[error("Category name '{0}' already exists among sibling categories")]
    DuplicateName(String),

    #[error("Parent category has reached the limit of {max_children} children")]
    ChildLimitExceeded { max_children: usize },

    #[error("Category {0} not found")]
    NotFound(Uuid),

    #[error("Cannot deactivate a category that has active subcategories")]
    ActiveChildrenExist,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl CategoryError {
    pub fn code(&self) -> &'static str {
        match self {
            CategoryError::ParentNotFound(_) => "PARENT_NOT_FOUND",
            CategoryError::DepthExceeded { .. } => "DEPTH_EXCEEDED",
            CategoryError::DuplicateName(_) => "DUPLICATE_NAME",
            CategoryError::ChildLimitExceeded { .. } => "CHILD_LIMIT_EXCEEDED",
            CategoryError::NotFound(_) => "NOT_FOUND",
            CategoryError::ActiveChildrenExist => "ACTIVE_CHILDREN_EXIST",
            CategoryError::ConstraintViolation(_) => "CONSTRAINT_VIOLATION",
        }
    }
}
