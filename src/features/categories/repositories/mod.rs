pub mod category_repository;
#[cfg(test)]
pub mod memory_category_repository;
pub mod pg_category_repository;

pub use category_repository::CategoryRepository;
#[cfg(test)]
pub use memory_category_repository::MemoryCategoryRepository;
pub use pg_category_repository::PgCategoryRepository;
